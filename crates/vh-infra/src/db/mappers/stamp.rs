use chrono::NaiveDateTime;
use vh_core::time::format_db;

/// Process name and time written to the audit columns.
#[derive(Debug, Clone)]
pub struct AuditStamp {
    pub proc_name: &'static str,
    pub at: NaiveDateTime,
}

impl AuditStamp {
    pub fn new(proc_name: &'static str, at: NaiveDateTime) -> Self {
        Self { proc_name, at }
    }

    pub fn proc(&self) -> Option<String> {
        Some(self.proc_name.to_string())
    }

    pub fn ymd(&self) -> Option<String> {
        Some(format_db(self.at))
    }
}
