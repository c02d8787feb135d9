//! Row <-> domain conversions.
//!
//! Stored timestamps that fail to parse read as `None`; the store is also
//! written by older terminals and the server snapshot.

mod comm_history_mapper;
mod kakunin_mapper;
mod stamp;
mod syukka_mapper;
mod system_mapper;

pub use comm_history_mapper::CommHistoryRowMapper;
pub use kakunin_mapper::{KakuninContainerRowMapper, KakuninMeisaiRowMapper};
pub use stamp::AuditStamp;
pub use syukka_mapper::{SyukkaContainerRowMapper, SyukkaMeisaiRowMapper, YoteiRowMapper};
pub use system_mapper::SystemSettingRowMapper;

use chrono::NaiveDateTime;
use vh_core::time::{format_db, parse_db};

pub(crate) fn opt_time(value: &Option<String>) -> Option<NaiveDateTime> {
    value.as_deref().and_then(parse_db)
}

pub(crate) fn opt_text(value: Option<NaiveDateTime>) -> Option<String> {
    value.map(format_db)
}
