//! Vanning handy application layer.
//!
//! Use cases over the ports of `vh-core`: the sync round with the back
//! office, bundle selection and container registration, collation, and
//! the small menu commands.

pub mod app_paths;
pub mod builder;
pub mod deps;
pub mod service;
pub mod usecases;

#[cfg(test)]
mod test_support;

pub use app_paths::AppPaths;
pub use builder::App;
pub use deps::AppDeps;
pub use service::RecordingHandyService;
