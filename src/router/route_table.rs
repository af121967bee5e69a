use std::fmt;
use std::sync::Arc;

use crate::enums::{HTTP_METHOD_COUNT, HttpMethod};
use crate::handler::BoxedHandler;
use crate::matcher::{MatcherError, PathMatcher};
use crate::router::{RouterError, RouterResult};
use crate::types::Params;

/// Exact and parameterized routes, one matcher per method.
pub(crate) struct RouteTable<M> {
    matchers: [Option<M>; HTTP_METHOD_COUNT],
}

impl<M: PathMatcher<BoxedHandler>> RouteTable<M> {
    pub fn new() -> Self {
        Self {
            matchers: std::array::from_fn(|_| None),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(method = %method, path = %path))]
    pub fn register(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler: BoxedHandler,
    ) -> RouterResult<()> {
        let matcher = self.matchers[method.index()].get_or_insert_with(M::default);
        matcher.insert(path, handler).map_err(|err| match err {
            MatcherError::DuplicatePattern { .. } => RouterError::DuplicateRoute {
                method,
                path: path.to_string(),
            },
            other => RouterError::Matcher(other),
        })
    }

    #[inline]
    pub fn lookup(&self, method: HttpMethod, path: &str) -> Option<(BoxedHandler, Params)> {
        let matcher = self.matchers[method.index()].as_ref()?;
        matcher
            .find(path)
            .map(|(handler, params)| (Arc::clone(handler), params))
    }

    pub fn matches(&self, method: HttpMethod, path: &str) -> bool {
        self.matchers[method.index()]
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(path))
    }

    /// Methods that own a matcher, in canonical order.
    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter(|method| self.matchers[method.index()].is_some())
    }
}

impl<M> fmt::Debug for RouteTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods: Vec<HttpMethod> = HttpMethod::ALL
            .into_iter()
            .filter(|method| self.matchers[method.index()].is_some())
            .collect();
        f.debug_struct("RouteTable")
            .field("methods", &methods)
            .finish()
    }
}
