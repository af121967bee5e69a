use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid percent-encoding at byte {index} in '{input}'")]
    InvalidPercentEncoding { input: String, index: usize },
    #[error("percent-decoded path '{input}' is not valid utf-8")]
    InvalidUtf8 { input: String },
}

pub type PathResult<T> = Result<T, PathError>;
