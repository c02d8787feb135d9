use chrono::{NaiveDate, NaiveDateTime};

use crate::db::pool::init_db_pool;
use crate::db::DieselSqliteExecutor;

pub(crate) fn executor() -> DieselSqliteExecutor {
    DieselSqliteExecutor::new(init_db_pool(":memory:").expect("Failed to create test DB pool"))
}

pub(crate) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}
