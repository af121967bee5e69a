use http::HeaderValue;
use smallvec::SmallVec;

use crate::enums::{HTTP_METHOD_COUNT, HttpMethod, MethodSet};
use crate::handler::BoxedHandler;
use crate::matcher::PathMatcher;
use crate::router::route_table::RouteTable;
use crate::router::wildcard::WildcardTable;

/// Methods, other than the requested one, that have a route for a path.
///
/// Inserted into the request extensions before a custom not-allowed handler
/// runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedMethods {
    methods: SmallVec<[HttpMethod; HTTP_METHOD_COUNT]>,
}

impl AllowedMethods {
    pub fn found(&self) -> bool {
        !self.methods.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn contains(&self, method: HttpMethod) -> bool {
        self.methods.contains(&method)
    }

    pub fn as_slice(&self) -> &[HttpMethod] {
        &self.methods
    }

    pub fn join(&self, separator: &str) -> String {
        let mut out = String::with_capacity(self.methods.len() * 8);
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(method.as_str());
        }
        out
    }

    /// `None` only when `separator` is not a valid header value fragment.
    pub fn header_value(&self, separator: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.join(separator)).ok()
    }
}

/// Collects every method other than `requested` that routes `path`.
///
/// A method reachable through both its route table and its wildcard table is
/// listed once. `order` decides the output order; methods missing from it are
/// never reported.
#[tracing::instrument(level = "trace", skip_all, fields(requested = ?requested, path = %path))]
pub(crate) fn resolve<M: PathMatcher<BoxedHandler>>(
    routes: &RouteTable<M>,
    wildcards: &WildcardTable,
    order: &[HttpMethod],
    requested: Option<HttpMethod>,
    path: &str,
) -> AllowedMethods {
    let mut set = MethodSet::empty();

    for method in routes.methods() {
        if Some(method) == requested {
            continue;
        }
        if routes.matches(method, path) {
            set.add(method);
        }
    }

    for method in wildcards.methods() {
        if Some(method) == requested || set.has(method) {
            continue;
        }
        if wildcards.matches_any(method, path) {
            set.add(method);
        }
    }

    AllowedMethods {
        methods: order
            .iter()
            .copied()
            .filter(|method| set.has(*method))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::RadixMatcher;
    use crate::types::Params;
    use bytes::Bytes;
    use http::{Request, Response};
    use std::sync::Arc;

    fn noop() -> BoxedHandler {
        Arc::new(|_req: Request<Bytes>, _params: Params| Response::new(Bytes::new()))
    }

    fn tables() -> (RouteTable<RadixMatcher<BoxedHandler>>, WildcardTable) {
        let mut routes = RouteTable::new();
        let mut wildcards = WildcardTable::new();
        routes.register(HttpMethod::Put, "/docs/:id", noop()).unwrap();
        routes.register(HttpMethod::Get, "/docs/:id", noop()).unwrap();
        wildcards.register(HttpMethod::Get, "/docs/*rest", noop()).unwrap();
        wildcards.register(HttpMethod::Delete, "/docs/*rest", noop()).unwrap();
        (routes, wildcards)
    }

    #[test]
    fn excludes_requested_method_and_deduplicates() {
        let (routes, wildcards) = tables();
        let allowed = resolve(
            &routes,
            &wildcards,
            &HttpMethod::ALL,
            Some(HttpMethod::Post),
            "/docs/7",
        );
        assert_eq!(
            allowed.as_slice(),
            &[HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete]
        );
        assert_eq!(allowed.join(", "), "GET, PUT, DELETE");

        let allowed = resolve(
            &routes,
            &wildcards,
            &HttpMethod::ALL,
            Some(HttpMethod::Get),
            "/docs/7",
        );
        assert!(!allowed.contains(HttpMethod::Get));
    }

    #[test]
    fn follows_given_order() {
        let (routes, wildcards) = tables();
        let order = [HttpMethod::Delete, HttpMethod::Put, HttpMethod::Get];
        let allowed = resolve(&routes, &wildcards, &order, None, "/docs/7");
        assert_eq!(allowed.join("|"), "DELETE|PUT|GET");
    }

    #[test]
    fn reports_nothing_for_unrouted_path() {
        let (routes, wildcards) = tables();
        let allowed = resolve(&routes, &wildcards, &HttpMethod::ALL, None, "/other");
        assert!(!allowed.found());
        assert_eq!(allowed.header_value(", "), Some(HeaderValue::from_static("")));
    }
}
