#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("Response body already consumed")]
    BodyConsumed,

    #[error("Response body exceeds limit of {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid status code: {0}")]
    InvalidStatus(i32),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}
