use bytes::Bytes;
use http::{Request, Response};
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::enums::{HTTP_METHOD_COUNT, HttpMethod};
use crate::handler::{BoxedHandler, Handler, not_allowed_response, not_found_response};
use crate::matcher::{PathMatcher, RadixMatcher};
use crate::path::{PathResult, clean_path, decode_percent, is_rooted};
use crate::router::allowed::{AllowedMethods, resolve};
use crate::router::options::{DEFAULT_ALLOW_SEPARATOR, MethodOrder, RouterOptions};
use crate::router::route_table::RouteTable;
use crate::router::stats::RouteStats;
use crate::router::wildcard::WildcardTable;
use crate::router::{RouterError, RouterResult};
use crate::types::Params;

struct RouterState<M> {
    routes: RouteTable<M>,
    wildcards: WildcardTable,
    registration_order: SmallVec<[HttpMethod; HTTP_METHOD_COUNT]>,
    stats: RouteStats,
    not_found: Option<BoxedHandler>,
    not_allowed: Option<BoxedHandler>,
}

impl<M: PathMatcher<BoxedHandler>> RouterState<M> {
    fn new() -> Self {
        Self {
            routes: RouteTable::new(),
            wildcards: WildcardTable::new(),
            registration_order: SmallVec::new(),
            stats: RouteStats::default(),
            not_found: None,
            not_allowed: None,
        }
    }

    fn method_order(&self, order: MethodOrder) -> &[HttpMethod] {
        match order {
            MethodOrder::Canonical => &HttpMethod::ALL,
            MethodOrder::Registration => &self.registration_order,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Route,
    Wildcard,
}

impl MatchKind {
    fn as_str(self) -> &'static str {
        match self {
            MatchKind::Route => "route",
            MatchKind::Wildcard => "wildcard",
        }
    }
}

// Outcome selected under the read lock; handlers run after it is released.
enum Dispatch {
    Matched {
        handler: BoxedHandler,
        params: Params,
        kind: MatchKind,
    },
    NotFound(Option<BoxedHandler>),
    NotAllowed(Option<BoxedHandler>, AllowedMethods),
}

/// HTTP method/path router.
///
/// Routes are registered with [`Router::handle`] and requests dispatched with
/// [`Router::serve`]. A path containing `*` registers a catch-all route; any
/// other path goes to the per-method matcher (`RadixMatcher` unless another
/// engine is chosen through [`Router::with_matcher`]).
///
/// The router is meant to be fully populated before serving starts, but both
/// operations may run concurrently: registration takes a write lock and
/// dispatch a read lock that is released before the handler runs.
pub struct Router<M = RadixMatcher<BoxedHandler>> {
    inner: RwLock<RouterState<M>>,
    options: RouterOptions,
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> Self {
        Self::with_matcher(options)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<M: PathMatcher<BoxedHandler>> Router<M> {
    pub fn with_matcher(options: Option<RouterOptions>) -> Self {
        let mut options = options.unwrap_or_default();
        if let Err(err) = options.validate() {
            tracing::warn!(error = %err, "invalid allow_separator; using default");
            options.allow_separator = DEFAULT_ALLOW_SEPARATOR.to_string();
        }

        Self {
            inner: RwLock::new(RouterState::new()),
            options,
        }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Registers `handler` for `method` and `path`.
    ///
    /// `method` must be one of GET, HEAD, POST, PUT, PATCH, DELETE or OPTIONS
    /// and `path` must start with `/`. The path is cleaned before it is
    /// stored, so `/a/./b/` and `/a/b` name the same route.
    pub fn handle<H: Handler>(&self, method: &str, path: &str, handler: H) -> RouterResult<()> {
        let method: HttpMethod = method.parse().map_err(|_| RouterError::InvalidMethod {
            method: method.to_string(),
        })?;
        self.handle_method(method, path, handler)
    }

    #[tracing::instrument(skip_all, fields(method = %method, path = %path))]
    pub fn handle_method<H: Handler>(
        &self,
        method: HttpMethod,
        path: &str,
        handler: H,
    ) -> RouterResult<()> {
        if !is_rooted(path) {
            return Err(RouterError::InvalidPath {
                path: path.to_string(),
            });
        }

        let cleaned = clean_path(path);
        let handler: BoxedHandler = Arc::new(handler);
        let mut guard = self.inner.write();
        let state = &mut *guard;

        if cleaned.contains('*') {
            state.wildcards.register(method, &cleaned, handler)?;
            state.stats.record_wildcard();
        } else {
            state.routes.register(method, &cleaned, handler)?;
            state.stats.record_route();
        }

        if !state.registration_order.contains(&method) {
            state.registration_order.push(method);
        }

        tracing::debug!(method = %method, path = %cleaned, "route registered");
        Ok(())
    }

    pub fn set_not_found_handler<H: Handler>(&self, handler: H) {
        self.inner.write().not_found = Some(Arc::new(handler));
    }

    pub fn set_not_allowed_handler<H: Handler>(&self, handler: H) {
        self.inner.write().not_allowed = Some(Arc::new(handler));
    }

    /// Methods other than `method` that route `path`.
    ///
    /// `path` is prepared like a request path. An unknown `method` is treated
    /// as one with no routes and a path with a broken escape routes nothing.
    pub fn allowed_methods(&self, method: &str, path: &str) -> AllowedMethods {
        let requested = method.parse::<HttpMethod>().ok();
        let Ok(cleaned) = self.request_path(path) else {
            return AllowedMethods::default();
        };
        let guard = self.inner.read();
        resolve(
            &guard.routes,
            &guard.wildcards,
            guard.method_order(self.options.method_order),
            requested,
            &cleaned,
        )
    }

    pub fn stats(&self) -> RouteStats {
        self.inner.read().stats
    }

    /// Dispatches one request.
    ///
    /// The request path is percent-decoded (unless `decode_uri` is off) and
    /// cleaned. Exact and parameterized routes are tried first, then
    /// catch-all routes. Without a match the request goes to the not-found
    /// handler when no other method routes the path, and to the not-allowed
    /// handler (or a bare 405 with an `Allow` header) otherwise. A path with
    /// a malformed escape goes straight to the not-found handler.
    #[tracing::instrument(level = "trace", skip_all, fields(method = %req.method(), path = %req.uri().path()))]
    pub fn serve(&self, mut req: Request<Bytes>) -> Response<Bytes> {
        let method = HttpMethod::try_from(req.method()).ok();
        let (path, outcome) = match self.request_path(req.uri().path()) {
            Ok(path) => {
                let outcome = self.dispatch(method, &path);
                (path, outcome)
            }
            Err(err) => {
                tracing::debug!(error = %err, "request path rejected");
                let not_found = self.inner.read().not_found.clone();
                (req.uri().path().to_string(), Dispatch::NotFound(not_found))
            }
        };

        match outcome {
            Dispatch::Matched {
                handler,
                params,
                kind,
            } => {
                self.log_outcome(kind.as_str(), req.method(), &path);
                req.extensions_mut().insert(params.clone());
                handler.serve(req, params)
            }
            Dispatch::NotFound(handler) => {
                self.log_outcome("not_found", req.method(), &path);
                match handler {
                    Some(handler) => handler.serve(req, Params::new()),
                    None => not_found_response(&self.options.not_found_body),
                }
            }
            Dispatch::NotAllowed(handler, allowed) => {
                self.log_outcome("not_allowed", req.method(), &path);
                match handler {
                    Some(handler) => {
                        req.extensions_mut().insert(allowed);
                        handler.serve(req, Params::new())
                    }
                    None => match allowed.header_value(&self.options.allow_separator) {
                        Some(value) => not_allowed_response(value),
                        None => {
                            tracing::error!(
                                separator = ?self.options.allow_separator,
                                "allow header could not be built"
                            );
                            not_allowed_response(http::HeaderValue::from_static(""))
                        }
                    },
                }
            }
        }
    }

    fn request_path(&self, raw: &str) -> PathResult<String> {
        if self.options.decode_uri {
            Ok(clean_path(&decode_percent(raw)?))
        } else {
            Ok(clean_path(raw))
        }
    }

    fn dispatch(&self, method: Option<HttpMethod>, path: &str) -> Dispatch {
        let state = self.inner.read();

        if let Some(method) = method {
            if let Some((handler, params)) = state.routes.lookup(method, path) {
                return Dispatch::Matched {
                    handler,
                    params,
                    kind: MatchKind::Route,
                };
            }
            if let Some((handler, params)) = state.wildcards.lookup(method, path) {
                return Dispatch::Matched {
                    handler,
                    params,
                    kind: MatchKind::Wildcard,
                };
            }
        }

        let allowed = resolve(
            &state.routes,
            &state.wildcards,
            state.method_order(self.options.method_order),
            method,
            path,
        );

        if allowed.found() {
            Dispatch::NotAllowed(state.not_allowed.clone(), allowed)
        } else {
            Dispatch::NotFound(state.not_found.clone())
        }
    }

    fn log_outcome(&self, outcome: &'static str, method: &http::Method, path: &str) {
        if self.options.debug {
            tracing::debug!(outcome, method = %method, path = %path, "request dispatched");
        } else {
            tracing::trace!(outcome, method = %method, path = %path, "request dispatched");
        }
    }
}

impl<M> fmt::Debug for Router<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.read();
        f.debug_struct("Router")
            .field("options", &self.options)
            .field("routes", &state.routes)
            .field("wildcards", &state.wildcards)
            .field("stats", &state.stats)
            .finish_non_exhaustive()
    }
}
