//! Public API (port 5000): the greeting and the health probe.
//!
//! Routing is exact-path only. Anything else falls through to axum's default
//! 404, and a wrong method on a known path to its default 405.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::{config::Config, error::AppError, greeting::Greeting, host};

/// Immutable per-process state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    pub greeting: Greeting,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            greeting: Greeting::new(&config.greeting),
        }
    }
}

/// Build the public axum router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(crate::api::health::health))
        .with_state(state)
}

/// `GET /` — greet and name the host that served the request.
///
/// The hostname is looked up on every request so a renamed host is reported
/// without a restart.
pub async fn hello(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let hostname = host::hostname()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.greeting.render(&hostname),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt; // oneshot

    use super::AppState;
    use crate::config::{Config, GreetingConfig};

    fn default_state() -> Arc<AppState> {
        Arc::new(AppState::new(&Config::default()))
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    // -----------------------------------------------------------------------
    // GET /health
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn health_returns_200_ok_plain_text() {
        let (status, content_type, body) = get(super::router(default_state()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK\n");
        assert!(content_type.unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn health_is_idempotent() {
        let state = default_state();
        let (_, _, first) = get(super::router(Arc::clone(&state)), "/health").await;
        let (_, _, second) = get(super::router(state), "/health").await;
        assert_eq!(first, second);
    }

    // -----------------------------------------------------------------------
    // GET /
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn hello_reports_this_host() {
        let hostname = crate::host::hostname().unwrap();
        let (status, content_type, body) = get(super::router(default_state()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/plain"));
        assert!(body.starts_with("Hello from EKS"), "body: {body:?}");
        assert!(body.ends_with(&format!("Host: {hostname}\n")), "body: {body:?}");
    }

    #[tokio::test]
    async fn hello_uses_default_greeting_text() {
        let hostname = crate::host::hostname().unwrap();
        let (_, _, body) = get(super::router(default_state()), "/").await;
        assert_eq!(
            body,
            format!("Hello from EKS v2! Deployed via GitHub Actions CI/CD. Host: {hostname}\n")
        );
    }

    #[tokio::test]
    async fn hello_honours_configured_greeting() {
        let config = Config {
            greeting: GreetingConfig {
                version: "v9".into(),
                message: "Canary.".into(),
            },
            ..Config::default()
        };
        let state = Arc::new(AppState::new(&config));
        let (_, _, body) = get(super::router(state), "/").await;
        assert!(body.starts_with("Hello from EKS v9! Canary. Host: "), "body: {body:?}");
    }

    #[tokio::test]
    async fn hello_is_idempotent() {
        let state = default_state();
        let (_, _, first) = get(super::router(Arc::clone(&state)), "/").await;
        let (_, _, second) = get(super::router(state), "/").await;
        assert_eq!(first, second);
    }

    // -----------------------------------------------------------------------
    // Fallthrough
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_path_returns_404() {
        let (status, _, _) = get(super::router(default_state()), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn trailing_slash_is_not_health() {
        let (status, _, _) = get(super::router(default_state()), "/health/").await;
        assert_ne!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn post_to_health_is_rejected() {
        let req = Request::builder()
            .method("POST")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = super::router(default_state()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
