/// Failures surfaced by the category, content and media repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database unreachable: {0}")]
    ConnectionFailed(String),
    #[error("migration failed: {0}")]
    MigrationFailed(String),
    #[error("database query failed: {0}")]
    QueryFailed(String),
    #[error("row violates a table constraint: {0}")]
    ConstraintViolation(String),
    #[error("stored row could not be decoded: {0}")]
    CorruptRow(String),
}
