//! Handler failures and their plain-text HTTP rendering.
//!
//! Every response this service sends is `text/plain`, errors included. Only
//! `GET /` can fail, and only when the hostname cannot be read. Unknown routes
//! never reach this type; they get axum's stock 404.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::host::HostnameError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot determine hostname: {0}")]
    Hostname(#[from] HostnameError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Hostname(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request failed");
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{self}\n"),
        )
            .into_response()
    }
}
