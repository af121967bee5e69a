use bytes::Bytes;
use http::{Request, Response, StatusCode};
use pattern_router_rs::matcher::MatcherResult;
use pattern_router_rs::{
    BoxedHandler, HttpMethod, MatcherError, Params, PathMatcher, Router, RouterError,
};
use std::collections::HashMap;

/// Literal-only engine: every pattern is matched verbatim.
#[derive(Default)]
struct LiteralMatcher {
    routes: HashMap<String, BoxedHandler>,
}

impl PathMatcher<BoxedHandler> for LiteralMatcher {
    fn insert(&mut self, pattern: &str, value: BoxedHandler) -> MatcherResult<()> {
        if pattern.contains(':') {
            return Err(MatcherError::ParameterNameEmpty {
                pattern: pattern.to_string(),
                segment: "unsupported".to_string(),
            });
        }
        if self.routes.contains_key(pattern) {
            return Err(MatcherError::DuplicatePattern {
                pattern: pattern.to_string(),
            });
        }
        self.routes.insert(pattern.to_string(), value);
        Ok(())
    }

    fn find(&self, path: &str) -> Option<(&BoxedHandler, Params)> {
        self.routes.get(path).map(|handler| (handler, Params::new()))
    }
}

fn tagged(tag: &'static str) -> impl Fn(Request<Bytes>, Params) -> Response<Bytes> + Send + Sync {
    move |_req, _params| Response::new(Bytes::from_static(tag.as_bytes()))
}

fn request(method: &str, path: &str) -> Request<Bytes> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Bytes::new())
        .expect("request should build")
}

#[test]
fn router_when_custom_matcher_plugged_then_routes_dispatch_through_it() {
    let router = Router::<LiteralMatcher>::with_matcher(None);
    router
        .handle("GET", "/plain", tagged("plain"))
        .expect("literal route should register");
    router
        .handle("GET", "/rest/*tail", tagged("tail"))
        .expect("wildcard route should register");

    assert_eq!(
        router.serve(request("GET", "/plain")).body().as_ref(),
        b"plain"
    );
    assert_eq!(
        router.serve(request("GET", "/rest/a/b")).body().as_ref(),
        b"tail"
    );

    let response = router.serve(request("PUT", "/plain"));
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn router_when_custom_matcher_reports_duplicate_then_router_reports_duplicate_route() {
    let router = Router::<LiteralMatcher>::with_matcher(None);
    router
        .handle("GET", "/plain", tagged("plain"))
        .expect("literal route should register");

    match router
        .handle("GET", "/plain/", tagged("again"))
        .expect_err("expected duplicate route")
    {
        RouterError::DuplicateRoute { method, path } => {
            assert_eq!(method, HttpMethod::Get);
            assert_eq!(path, "/plain");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_custom_matcher_fails_then_error_is_surfaced_verbatim() {
    let router = Router::<LiteralMatcher>::with_matcher(None);
    let err = router
        .handle("GET", "/users/:id", tagged("user"))
        .expect_err("expected matcher error");

    assert_eq!(
        err,
        RouterError::Matcher(MatcherError::ParameterNameEmpty {
            pattern: "/users/:id".to_string(),
            segment: "unsupported".to_string(),
        })
    );
}
