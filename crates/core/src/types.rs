/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User ids are UUIDs minted by the external identity service; this service
/// never resolves them, it only stores and echoes them.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
