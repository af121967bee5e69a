use bytes::Bytes;
use http::{Request, Response, StatusCode};
use pattern_router_rs::{MatcherError, Params, Router, RouterError};

fn echo(tag: &'static str) -> impl Fn(Request<Bytes>, Params) -> Response<Bytes> + Send + Sync {
    move |_req, params| {
        let mut out = tag.to_string();
        for (name, value) in params.iter() {
            out.push_str(&format!(" {name}={value}"));
        }
        Response::new(Bytes::from(out))
    }
}

fn request(method: &str, path: &str) -> Request<Bytes> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Bytes::new())
        .expect("request should build")
}

fn body(response: &Response<Bytes>) -> String {
    String::from_utf8(response.body().to_vec()).expect("body should be utf-8")
}

#[test]
fn router_when_parameter_route_registered_then_extracts_values() {
    let router = Router::new(None);
    router
        .handle("GET", "/users/:id/profile", echo("profile"))
        .expect("parameter route should register");

    let response = router.serve(request("GET", "/users/123/profile"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(&response), "profile id=123");
}

#[test]
fn router_when_multiple_parameters_registered_then_all_are_captured() {
    let router = Router::new(None);
    router
        .handle("PUT", "/orgs/:org/repos/:repo", echo("repo"))
        .expect("route should register");

    let response = router.serve(request("PUT", "/orgs/acme/repos/widgets"));
    assert_eq!(body(&response), "repo org=acme repo=widgets");
}

#[test]
fn router_when_static_and_parameter_overlap_then_static_wins() {
    let router = Router::new(None);
    router
        .handle("GET", "/users/:id", echo("param"))
        .expect("parameter route should register");
    router
        .handle("GET", "/users/me", echo("static"))
        .expect("static route should register");

    assert_eq!(body(&router.serve(request("GET", "/users/me"))), "static");
    assert_eq!(
        body(&router.serve(request("GET", "/users/42"))),
        "param id=42"
    );
}

#[test]
fn router_when_handler_reads_request_extensions_then_params_are_bound() {
    let router = Router::new(None);
    router
        .handle("GET", "/items/:item", |req: Request<Bytes>, _params: Params| {
            let bound = req
                .extensions()
                .get::<Params>()
                .and_then(|params| params.get("item"))
                .unwrap_or("missing")
                .to_string();
            Response::new(Bytes::from(bound))
        })
        .expect("route should register");

    assert_eq!(body(&router.serve(request("GET", "/items/apple"))), "apple");
}

#[test]
fn router_when_parameter_name_repeats_in_pattern_then_matcher_error_is_surfaced() {
    let router = Router::new(None);
    let err = router.handle("GET", "/users/:id/friends/:id", echo("bad"));

    match err.expect_err("expected repeated parameter error") {
        RouterError::Matcher(MatcherError::DuplicateParamName { param, pattern }) => {
            assert_eq!(param, "id");
            assert_eq!(pattern, "/users/:id/friends/:id");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(router.stats().total(), 0);
}

#[test]
fn router_when_parameter_value_is_percent_encoded_then_handler_sees_decoded_value() {
    let router = Router::new(None);
    router
        .handle("GET", "/users/:name", echo("user"))
        .expect("route should register");

    assert_eq!(
        body(&router.serve(request("GET", "/users/J%C3%BCrgen%20K"))),
        "user name=Jürgen K"
    );
}

#[test]
fn router_when_duplicate_parameter_route_registered_then_returns_duplicate_error() {
    let router = Router::new(None);
    router
        .handle("GET", "/users/:id", echo("first"))
        .expect("first route should register");

    let err = router.handle("GET", "/users//:id", echo("second"));
    assert!(matches!(
        err.expect_err("expected duplicate route"),
        RouterError::DuplicateRoute { .. }
    ));
}

#[test]
fn router_when_parameter_name_empty_then_returns_matcher_error() {
    let router = Router::new(None);
    let err = router.handle("GET", "/users/:", echo("bad"));
    assert!(matches!(
        err.expect_err("expected empty parameter name error"),
        RouterError::Matcher(MatcherError::ParameterNameEmpty { .. })
    ));
}

#[test]
fn router_when_parameter_requests_differ_then_params_do_not_leak() {
    let router = Router::new(None);
    router
        .handle("GET", "/users/:id", echo("user"))
        .expect("route should register");
    router
        .handle("GET", "/health", echo("health"))
        .expect("route should register");

    assert_eq!(body(&router.serve(request("GET", "/users/1"))), "user id=1");
    assert_eq!(body(&router.serve(request("GET", "/health"))), "health");
    assert_eq!(body(&router.serve(request("GET", "/users/2"))), "user id=2");
}
