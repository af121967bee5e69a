use crate::enums::HttpMethod;
use crate::matcher::MatcherError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WildcardError {
    #[error("only one wildcard (*) is allowed in path '{path}'")]
    MultipleWildcards { path: String },
    #[error("wildcard (*) must be in the last path segment, e.g. /member/*path (got '{path}')")]
    NotInLastSegment { path: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("not a valid http method: '{method}'")]
    InvalidMethod { method: String },
    #[error("path must begin with '/': '{path}'")]
    InvalidPath { path: String },
    #[error(transparent)]
    InvalidWildcard(#[from] WildcardError),
    #[error("duplicated item for {method} {path}")]
    DuplicateRoute { method: HttpMethod, path: String },
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

pub type RouterResult<T> = Result<T, RouterError>;
