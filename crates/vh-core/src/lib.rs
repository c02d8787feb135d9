//! # vh-core
//!
//! Domain models, business rules and port interfaces of the vanning
//! handy terminal: shipment plans and bundle selection (バンニング),
//! container registration, collation (照合) and the web-service payloads.
//!
//! No I/O lives here. Adapters implement the traits in [`ports`].

pub mod collation;
pub mod config;
pub mod container;
pub mod history;
pub mod photo;
pub mod ports;
pub mod progress;
pub mod scan;
pub mod settings;
pub mod shipment;
pub mod system;
pub mod time;
pub mod vanning;
pub mod wire;

pub use collation::{CollationError, KakuninContainer, KakuninMeisai};
pub use config::AppConfig;
pub use photo::PhotoKind;
pub use shipment::{BundleKey, SyukkaContainer, SyukkaMeisai, WorkBundle, WorkSummary, Yotei};
pub use system::SystemSetting;
pub use vanning::VanningError;
