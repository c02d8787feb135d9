use chrono::NaiveDateTime;

/// Site-local wall clock (JST).
pub trait ClockPort: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
