//! Use cases of the handy terminal.
//!
//! Screens hold a session ([`BundleSelectSession`], [`CollationSession`])
//! while the operator scans; everything else is a one-shot command.

pub mod collation;
pub mod history;
pub mod progress;
pub mod server_time;
pub mod settings;
pub mod sync;
pub mod vanning;

pub use collation::{CollateError, CollationSession, CollationTarget};
pub use history::{ListCommHistory, DEFAULT_HISTORY_LIMIT};
pub use progress::GetProgress;
pub use server_time::GetServerTime;
pub use settings::{GetSettings, UpdateSettings};
pub use sync::{DataSync, SyncError, SyncGuard};
pub use vanning::{
    BundleScanError, BundleSelectSession, ContainerPhotos, RegisterContainer,
    RegisterContainerError, RegistrationOutcome,
};
