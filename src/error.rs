//! Error types for the standings service.
//!
//! - `FetchError`: the request named something we cannot look up
//! - `AppError`: HTTP layer errors, rendered as JSON bodies

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unknown league: {0}")]
    UnknownLeague(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("export failed: {0:#}")]
    Export(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Export(err) => {
                tracing::error!("Excel export failed: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Excel oluşturma hatası",
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
        });

        (status, body).into_response()
    }
}
