/// Job identifiers are UUIDv7: unique, opaque to callers, and
/// time-ordered so id order matches submission order.
pub type JobId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
