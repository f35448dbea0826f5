use thiserror::Error;

pub type Result<T, E = ThumbgenError> = std::result::Result<T, E>;

/// Unified error type covering every stage of the thumbnail pipeline.
#[derive(Debug, Error)]
pub enum ThumbgenError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("write error: {0}")]
    Write(String),
    #[error("malformed thumbnail block: {0}")]
    Format(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
