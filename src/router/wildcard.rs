use hashbrown::HashSet as FastHashSet;
use std::fmt;
use std::sync::Arc;

use crate::enums::{HTTP_METHOD_COUNT, HttpMethod};
use crate::handler::BoxedHandler;
use crate::router::{RouterError, RouterResult, WildcardError};
use crate::types::Params;

/// Parameter name used when a wildcard segment is a bare `*`.
pub const ANONYMOUS_WILDCARD: &str = "*";

pub(crate) struct WildcardRoute {
    pattern: Box<str>,
    prefix: Box<str>,
    param: Box<str>,
    handler: BoxedHandler,
}

impl WildcardRoute {
    #[inline]
    fn capture<'p>(&self, path: &'p str) -> Option<&'p str> {
        path.strip_prefix(&*self.prefix)
    }
}

/// Splits a cleaned wildcard pattern into its fixed prefix and parameter name.
///
/// The prefix keeps the slash that precedes the `*` segment, so `/member/*rest`
/// yields `("/member/", "rest")` and `/*all` yields `("/", "all")`.
pub(crate) fn split_wildcard(path: &str) -> Result<(&str, &str), WildcardError> {
    if memchr::memchr_iter(b'*', path.as_bytes()).count() > 1 {
        return Err(WildcardError::MultipleWildcards {
            path: path.to_string(),
        });
    }

    let (prefix, last) = match path.rfind('/') {
        Some(idx) => (&path[..=idx], &path[idx + 1..]),
        None => ("/", path),
    };

    match last.strip_prefix('*') {
        Some("") => Ok((prefix, ANONYMOUS_WILDCARD)),
        Some(name) => Ok((prefix, name)),
        None => Err(WildcardError::NotInLastSegment {
            path: path.to_string(),
        }),
    }
}

/// Catch-all routes, one list per method.
///
/// Each list is kept sorted by descending prefix length, routes with equal
/// prefix lengths staying in registration order. A lookup therefore returns
/// the most specific prefix, independent of hashing or insertion order.
/// A prefix is owned by at most one route per method.
pub(crate) struct WildcardTable {
    routes: [Vec<WildcardRoute>; HTTP_METHOD_COUNT],
    prefixes: [FastHashSet<Box<str>>; HTTP_METHOD_COUNT],
}

impl WildcardTable {
    pub fn new() -> Self {
        Self {
            routes: Default::default(),
            prefixes: Default::default(),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(method = %method, path = %path))]
    pub fn register(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler: BoxedHandler,
    ) -> RouterResult<()> {
        let (prefix, param) = split_wildcard(path)?;

        let idx = method.index();
        if self.prefixes[idx].contains(prefix) {
            return Err(RouterError::DuplicateRoute {
                method,
                path: path.to_string(),
            });
        }

        let routes = &mut self.routes[idx];
        let position = routes.partition_point(|route| route.prefix.len() >= prefix.len());
        routes.insert(
            position,
            WildcardRoute {
                pattern: path.into(),
                prefix: prefix.into(),
                param: param.into(),
                handler,
            },
        );
        self.prefixes[idx].insert(prefix.into());
        Ok(())
    }

    #[inline]
    pub fn lookup(&self, method: HttpMethod, path: &str) -> Option<(BoxedHandler, Params)> {
        self.routes[method.index()].iter().find_map(|route| {
            route.capture(path).map(|rest| {
                let mut params = Params::new();
                params.push(route.param.clone(), rest);
                (Arc::clone(&route.handler), params)
            })
        })
    }

    pub fn matches_any(&self, method: HttpMethod, path: &str) -> bool {
        self.routes[method.index()]
            .iter()
            .any(|route| route.capture(path).is_some())
    }

    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter(|method| !self.routes[method.index()].is_empty())
    }

    #[cfg(test)]
    fn patterns_in_order(&self, method: HttpMethod) -> Vec<&str> {
        self.routes[method.index()]
            .iter()
            .map(|route| &*route.pattern)
            .collect()
    }
}

impl fmt::Debug for WildcardTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for method in self.methods() {
            let patterns: Vec<&str> = self.routes[method.index()]
                .iter()
                .map(|route| &*route.pattern)
                .collect();
            map.entry(&method, &patterns);
        }
        map.finish()
    }
}
