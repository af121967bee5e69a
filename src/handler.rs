use bytes::Bytes;
use http::{HeaderValue, Request, Response, StatusCode, header};
use std::sync::Arc;

use crate::types::Params;

/// Unit of behaviour bound to one (method, pattern) pair.
///
/// Exact, parameterized and wildcard routes all store the same trait object,
/// so dispatch never inspects what kind of handler it holds. Any
/// `Fn(Request<Bytes>, Params) -> Response<Bytes>` closure is a handler.
pub trait Handler: Send + Sync + 'static {
    fn serve(&self, req: Request<Bytes>, params: Params) -> Response<Bytes>;
}

impl<F> Handler for F
where
    F: Fn(Request<Bytes>, Params) -> Response<Bytes> + Send + Sync + 'static,
{
    fn serve(&self, req: Request<Bytes>, params: Params) -> Response<Bytes> {
        (self)(req, params)
    }
}

pub type BoxedHandler = Arc<dyn Handler>;

pub(crate) fn not_found_response(body: &str) -> Response<Bytes> {
    let mut response = Response::new(Bytes::copy_from_slice(body.as_bytes()));
    *response.status_mut() = StatusCode::NOT_FOUND;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

pub(crate) fn not_allowed_response(allow: HeaderValue) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
    response.headers_mut().insert(header::ALLOW, allow);
    response
}
