use hashbrown::HashSet as FastHashSet;
use matchit::{InsertError, Router as MatchitRouter};
use smallvec::SmallVec;

use super::{MatcherError, MatcherResult, PathMatcher};
use crate::types::Params;

/// Default route engine: a `matchit` radix tree per method.
///
/// Patterns use `:name` segments, which are rewritten to matchit's `{name}`
/// form; braces in literal segments are escaped so they match verbatim. A
/// literal segment takes priority over a parameter at the same position.
pub struct RadixMatcher<T> {
    tree: MatchitRouter<T>,
    patterns: FastHashSet<Box<str>>,
}

impl<T> Default for RadixMatcher<T> {
    fn default() -> Self {
        Self {
            tree: MatchitRouter::new(),
            patterns: FastHashSet::new(),
        }
    }
}

impl<T> RadixMatcher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern))]
    pub fn insert(&mut self, pattern: &str, value: T) -> MatcherResult<()> {
        let route = to_matchit_route(pattern)?;
        if self.patterns.contains(pattern) {
            return Err(MatcherError::DuplicatePattern {
                pattern: pattern.to_string(),
            });
        }

        self.tree.insert(route.as_str(), value).map_err(|err| match err {
            InsertError::Conflict { with } if with == route => MatcherError::DuplicatePattern {
                pattern: pattern.to_string(),
            },
            other => MatcherError::Insert(other),
        })?;
        self.patterns.insert(pattern.into());
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path))]
    pub fn find(&self, path: &str) -> Option<(&T, Params)> {
        let matched = self.tree.at(path).ok()?;
        // a parameter never captures an empty segment
        if matched.params.iter().any(|(_, value)| value.is_empty()) {
            return None;
        }
        let params = matched.params.iter().collect();
        Some((matched.value, params))
    }
}

impl<T> std::fmt::Debug for RadixMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadixMatcher")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync> PathMatcher<T> for RadixMatcher<T> {
    fn insert(&mut self, pattern: &str, value: T) -> MatcherResult<()> {
        RadixMatcher::insert(self, pattern, value)
    }

    fn find(&self, path: &str) -> Option<(&T, Params)> {
        RadixMatcher::find(self, path)
    }
}

fn to_matchit_route(pattern: &str) -> MatcherResult<String> {
    let body = pattern
        .strip_prefix('/')
        .ok_or_else(|| MatcherError::NotRooted {
            pattern: pattern.to_string(),
        })?;

    let mut route = String::with_capacity(pattern.len() + 8);
    let mut names: SmallVec<[&str; 4]> = SmallVec::new();

    for segment in body.split('/') {
        route.push('/');
        match segment.strip_prefix(':') {
            Some("") => {
                return Err(MatcherError::ParameterNameEmpty {
                    pattern: pattern.to_string(),
                    segment: segment.to_string(),
                });
            }
            Some(name) => {
                if names.contains(&name) {
                    return Err(MatcherError::DuplicateParamName {
                        param: name.to_string(),
                        pattern: pattern.to_string(),
                    });
                }
                names.push(name);
                route.push('{');
                route.push_str(name);
                route.push('}');
            }
            None => {
                for ch in segment.chars() {
                    if ch == '{' || ch == '}' {
                        route.push(ch);
                    }
                    route.push(ch);
                }
            }
        }
    }

    Ok(route)
}
