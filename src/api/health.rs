//! Liveness probe endpoint.

use axum::{http::header, response::IntoResponse};

/// `GET /health` — always `200 OK` with the body `OK\n`.
///
/// No dependencies and never blocks, so it is safe as a Kubernetes
/// liveness/readiness probe and as the target of `--healthcheck`.
pub async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "OK\n")
}
