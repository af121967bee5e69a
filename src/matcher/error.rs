use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatcherError {
    #[error("duplicated item for {pattern}")]
    DuplicatePattern { pattern: String },
    #[error("parameter segment '{segment}' in '{pattern}' is missing a name")]
    ParameterNameEmpty { pattern: String, segment: String },
    #[error("duplicate parameter name '{param}' in path '{pattern}'")]
    DuplicateParamName { param: String, pattern: String },
    #[error("pattern '{pattern}' must begin with '/'")]
    NotRooted { pattern: String },
    #[error(transparent)]
    Insert(#[from] matchit::InsertError),
}

pub type MatcherResult<T> = Result<T, MatcherError>;
