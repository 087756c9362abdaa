use thiserror::Error;

/// Every failure a client call can surface, one variant per kind.
///
/// Callers branch on the variant; no failure is ever swallowed or retried
/// internally.
#[derive(Debug, Error)]
pub enum McssApiError {
    #[error("unauthorized: API key is invalid or expired")]
    Unauthorized,

    #[error("forbidden: API key does not belong to an admin")]
    NotAdmin,

    #[error("forbidden: API key has no access to the requested server")]
    NoServerAccess,

    #[error("not found")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("server side error (status {0})")]
    ServerSide(u16),

    #[error("API version mismatch: server reports {got}, expected {expected}")]
    VersionMismatch { expected: String, got: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, McssApiError>;
