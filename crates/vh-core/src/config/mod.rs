//! Terminal configuration DTO.
//!
//! Data only. Loading, defaults and environment overrides live in the
//! terminal bootstrap.

mod app_config;

pub use app_config::{AppConfig, HttpConfig, LogConfig, StorageConfig};
