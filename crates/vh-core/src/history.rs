//! Communication history (通信履歴) of web service calls.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const PROC_NAME_MAX: usize = 100;
pub const ARGUMENT_MAX: usize = 255;
pub const TEXT_MAX: usize = 1000;
pub const ERR_NUMBER_MAX: usize = 20;

/// How long history rows are kept before the sync purges them.
pub const RETENTION_MONTHS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommHistory {
    pub log_id: String,
    pub start_ymdhms: NaiveDateTime,
    pub end_ymdhms: NaiveDateTime,
    pub proc_name: String,
    pub argument: String,
    pub return_value: String,
    pub err_number: String,
    pub err_description: Option<String>,
}

/// History row before an id is assigned. Text fields are cut to the
/// column widths on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommHistory {
    pub start_ymdhms: NaiveDateTime,
    pub end_ymdhms: NaiveDateTime,
    pub proc_name: String,
    pub argument: String,
    pub return_value: String,
    pub err_number: String,
    pub err_description: Option<String>,
}

impl NewCommHistory {
    pub fn new(proc_name: &str, started: NaiveDateTime, ended: NaiveDateTime) -> Self {
        Self {
            start_ymdhms: started,
            end_ymdhms: ended,
            proc_name: truncate_chars(proc_name, PROC_NAME_MAX),
            argument: String::new(),
            return_value: String::new(),
            err_number: String::new(),
            err_description: None,
        }
    }

    pub fn with_argument(mut self, argument: &str) -> Self {
        self.argument = truncate_chars(argument, ARGUMENT_MAX);
        self
    }

    pub fn with_return_value(mut self, value: &str) -> Self {
        self.return_value = truncate_chars(value, TEXT_MAX);
        self
    }

    pub fn with_error(mut self, kind: &str, description: &str) -> Self {
        self.err_number = truncate_chars(kind, ERR_NUMBER_MAX);
        self.err_description = Some(truncate_chars(description, TEXT_MAX));
        self
    }
}

/// Log ids are `YYYYMMDD` followed by a 6-digit daily sequence.
pub fn next_log_id(day_prefix: &str, current_max: Option<&str>) -> String {
    let next = current_max
        .and_then(|max| max.strip_prefix(day_prefix))
        .and_then(|seq| seq.parse::<u32>().ok())
        .map_or(1, |seq| seq + 1);
    format!("{day_prefix}{next:06}")
}

pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}
