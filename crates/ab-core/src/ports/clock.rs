use chrono::{DateTime, Utc};

/// Source of mutation timestamps.
///
/// Every write issued by the list view stamps `updated_at` from this port so
/// tests can pin time without touching the system clock.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
