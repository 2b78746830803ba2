use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis connect error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Store operation timed out")]
    Timeout,

    #[error("Store operation error: {0}")]
    Operation(String),
}

impl StoreError {
    /// Whether this error is a deadline or timeout kind rather than a hard
    /// failure.
    pub fn is_timeout(&self) -> bool {
        match self {
            StoreError::Timeout => true,
            StoreError::Connection(e) => e.is_timeout(),
            StoreError::Operation(_) => false,
        }
    }
}
