/// Primary key type; every table uses `BIGSERIAL`.
pub type DbId = i64;

/// `TIMESTAMPTZ` columns, always handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
