use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use catalog_core::to_data_uri;

use super::AppState;
use super::schemas::ErrorResponse;
use crate::error::ServerError;

/// `GET /image/{id}` -- return a stored image as an inline data URI.
///
/// `id` is either the bare token (the configured default extension is
/// assumed) or the full `token.ext` file name.
#[utoipa::path(
    get,
    path = "/image/{id}",
    tag = "Images",
    summary = "Fetch an image",
    description = "Reads a stored image and returns it as a `data:` URI in a text/plain body. A bare token is resolved with the default extension.",
    params(
        ("id" = String, Path, description = "Asset token or file name"),
    ),
    responses(
        (status = 200, description = "Inline data URI", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 500, description = "Image could not be loaded", body = ErrorResponse),
    )
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let asset = state.catalog.image(&id).await?;
    Ok((StatusCode::OK, to_data_uri(&asset.media_type, &asset.data)))
}
