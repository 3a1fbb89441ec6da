use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VisualError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0} has not been built yet")]
    NotInitialized(&'static str),

    #[error("index {index} out of range ({len} available)")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, VisualError>;

pub(crate) fn invalid(msg: impl Into<String>) -> VisualError {
    VisualError::InvalidParameter(msg.into())
}
