//! `X-Request-ID` correlation.
//!
//! The ingress controller usually stamps an id on the way in; when it does not,
//! one is minted here. Either way the id is echoed on the response and the
//! handler runs inside an INFO `request` span carrying it, so the `warn!` from
//! a failed `GET /` names the request as well as the replica that logged it.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument as _;
use uuid::Uuid;

pub const HEADER: &str = "x-request-id";

/// Caller-supplied id if it is a non-empty valid header value, else a fresh UUID v4.
fn resolve(headers: &HeaderMap) -> HeaderValue {
    match headers.get(HEADER) {
        Some(v) if !v.is_empty() => v.clone(),
        _ => HeaderValue::try_from(Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
    }
}

/// Apply **inside** `tower_http::TraceLayer` so it runs within the trace span.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let id = resolve(req.headers());
    let span = tracing::info_span!("request", request_id = ?id);

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(HEADER, id);
    response
}
