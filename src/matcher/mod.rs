mod error;
mod radix;

pub use error::{MatcherError, MatcherResult};
pub use radix::RadixMatcher;

use crate::types::Params;

/// Pattern engine backing the per-method route table.
///
/// Implementations own every exact and parameterized pattern registered for
/// one method. `insert` must fail with [`MatcherError::DuplicatePattern`] when
/// the very same pattern is inserted twice; the router turns that into a
/// duplicate-route error. Any other error is surfaced to the caller as is.
pub trait PathMatcher<T>: Default + Send + Sync {
    fn insert(&mut self, pattern: &str, value: T) -> MatcherResult<()>;

    fn find(&self, path: &str) -> Option<(&T, Params)>;

    fn is_match(&self, path: &str) -> bool {
        self.find(path).is_some()
    }
}
