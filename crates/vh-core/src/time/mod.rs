//! Timestamp formats shared by the local store and the web service.
//!
//! All timestamps are naive local times of the operation site (JST).
//! The store keeps them as `YYYY-MM-DD HH:MM:SS` text, the web service
//! speaks XSD `dateTime`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Offset of the operation site (Asia/Tokyo, no DST).
pub const SITE_UTC_OFFSET_SECS: i32 = 9 * 3600;

const DB_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const XSD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const WORK_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub fn format_db(value: NaiveDateTime) -> String {
    value.format(DB_FORMAT).to_string()
}

/// Parses a stored timestamp. Values written by the web service
/// (containing `T`) are read as XSD `dateTime`.
pub fn parse_db(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value.contains('T') {
        return parse_xsd(value);
    }
    NaiveDateTime::parse_from_str(value, DB_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Formats a request argument, without offset.
pub fn format_xsd(value: NaiveDateTime) -> String {
    value.format(XSD_FORMAT).to_string()
}

/// Parses an XSD `dateTime`.
///
/// Fractional seconds are dropped. A value carrying an offset (`Z` or
/// `+hh:mm`) is converted to site time; a naive value is taken as site time.
pub fn parse_xsd(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = strip_fraction(trimmed);

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(&normalized) {
        let site = FixedOffset::east_opt(SITE_UTC_OFFSET_SECS)?;
        return Some(with_offset.with_timezone(&site).naive_local());
    }
    NaiveDateTime::parse_from_str(&normalized, XSD_FORMAT).ok()
}

/// Stamp format used by the shipment work table (`YYYYMMDDHHMMSS`).
pub fn format_work_stamp(value: NaiveDateTime) -> String {
    value.format(WORK_STAMP_FORMAT).to_string()
}

/// Display format of a collation work date (`MM-DD HH:MM`).
pub fn format_month_day_time(value: NaiveDateTime) -> String {
    value.format("%m-%d %H:%M").to_string()
}

fn strip_fraction(value: &str) -> String {
    let Some(dot) = value.find('.') else {
        return value.to_string();
    };
    let tail = &value[dot + 1..];
    let digits = tail.chars().take_while(|c| c.is_ascii_digit()).count();
    format!("{}{}", &value[..dot], &tail[digits..])
}
