//! Vanning (バンニング): choosing bundles for a container and registering it.

mod error;
mod genpin;
mod registration;
mod selection;

pub use error::VanningError;
pub use genpin::{parse_genpin, Genpin, GenpinError};
pub use registration::{ContainerRegistration, RegistrationPlan};
pub use selection::{
    format_weight, pad_bundle_no, BundleRow, BundleSelection, LoadLimits, SelectionMode,
    MAX_SELECTED_BUNDLES,
};

pub(crate) use selection::group_thousands;
