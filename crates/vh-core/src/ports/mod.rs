//! Port interfaces for the application layer.
//!
//! Use cases depend on these traits only; `vh-infra` provides the SQLite,
//! SOAP and file-system adapters and `vh-terminal` the scanner.

mod clock;
pub mod collation_repository;
pub mod comm_history_repository;
pub mod handy_service;
pub mod photo_store;
pub mod scanner;
pub mod settings;
pub mod shipment_repository;
pub mod shipment_work_repository;
pub mod system_repository;

pub use clock::ClockPort;
pub use collation_repository::CollationRepositoryPort;
pub use comm_history_repository::CommHistoryRepositoryPort;
pub use handy_service::{HandyServiceError, HandyServicePort, ServiceCall, ServiceResult};
pub use photo_store::PhotoStorePort;
pub use scanner::ScannerPort;
pub use settings::SettingsPort;
pub use shipment_repository::ShipmentRepositoryPort;
pub use shipment_work_repository::ShipmentWorkRepositoryPort;
pub use system_repository::SystemRepositoryPort;
