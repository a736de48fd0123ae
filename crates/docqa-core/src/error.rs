use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Chunk metadata is missing a non-empty 'source'")]
    MissingSource,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store operation failed: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
