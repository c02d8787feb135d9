use chrono::{FixedOffset, NaiveDateTime, Utc};
use vh_core::ports::ClockPort;
use vh_core::time::SITE_UTC_OFFSET_SECS;

/// Wall clock of the operation site, independent of the host time zone.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Utc::now();
        match FixedOffset::east_opt(SITE_UTC_OFFSET_SECS) {
            Some(site) => now.with_timezone(&site).naive_local(),
            None => now.naive_utc(),
        }
    }
}
