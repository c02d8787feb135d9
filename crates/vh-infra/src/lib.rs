pub mod db;
pub mod fs;
pub mod photo;
pub mod settings;
pub mod soap;
pub mod time;

pub use db::DieselSqliteExecutor;
pub use time::SystemClock;
