use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::service::CatalogError;

/// Errors that can occur when running the catalog server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The request body was not valid JSON of the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl ServerError {
    /// Status code and caller-facing message. Asset failures get a generic
    /// message; the cause is logged where it happened.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            // Malformed or mistyped fields are validation failures; size and
            // content-type rejections keep their own status.
            Self::InvalidBody(rejection) => {
                let status = match rejection.status() {
                    StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
                    other => other,
                };
                (status, rejection.body_text())
            }
            Self::Catalog(err) => match err {
                CatalogError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
                CatalogError::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "Product not found".to_owned()),
                CatalogError::AssetWrite(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error saving image".to_owned(),
                ),
                CatalogError::AssetRead(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error loading image".to_owned(),
                ),
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
    }
}
