//! Product CRUD endpoints.
//!
//! All four operations share the `/products` path; update takes the id in
//! the body and delete takes it in the query string.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use catalog_core::{Price, ProductFields, ProductRecord, ValidationError};

use super::AppState;
use super::schemas::{ErrorResponse, MessageResponse};
use crate::error::ServerError;
use crate::service::{CatalogError, ProductDraft};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

// Fields default to empty so that absent values reach validation and come
// back as 400 instead of a JSON rejection.

/// Request body for creating a product.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Display name.
    #[schema(example = "Monitor")]
    #[serde(default)]
    pub name: String,
    /// Description.
    #[schema(example = "24in")]
    #[serde(default)]
    pub description: String,
    /// Price, as a number or a string.
    #[schema(value_type = Object, example = "200")]
    #[serde(default)]
    pub price: Option<Price>,
    /// Base64 image payload, with or without a `data:` URI prefix.
    #[schema(example = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=")]
    #[serde(default)]
    pub photo: String,
    /// Media type of a bare payload (e.g. `image/jpeg`). Ignored when
    /// `photo` is a data URI.
    #[schema(example = "image/png")]
    #[serde(default)]
    pub photo_type: Option<String>,
}

/// Request body for replacing a product.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// Id of the product to replace.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Price, as a number or a string.
    #[schema(value_type = Object)]
    #[serde(default)]
    pub price: Option<Price>,
    /// New photo, usually a full data URI. Required on every update.
    #[serde(default)]
    pub photo: String,
    /// Media type of a bare payload.
    #[serde(default)]
    pub photo_type: Option<String>,
}

/// Query parameters for deleting a product.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteProductParams {
    /// Id of the product to delete.
    pub id: Option<String>,
}

fn draft(
    name: String,
    description: String,
    price: Option<Price>,
    photo: String,
    photo_type: Option<String>,
) -> Result<ProductDraft, ValidationError> {
    let price = price.ok_or(ValidationError::MissingField("price"))?;
    Ok(ProductDraft {
        fields: ProductFields::new(name, description, price),
        photo,
        photo_type,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /products` -- list every product.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    summary = "List products",
    description = "Returns all products in insertion order. No filtering or pagination.",
    responses(
        (status = 200, description = "Product list", body = Vec<ProductRecord>),
    )
)]
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.catalog.list().await))
}

/// `POST /products` -- create a product and store its photo.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    summary = "Create a product",
    description = "Stores the photo under a freshly generated file name, then appends the product with a reference to it.",
    request_body(content = CreateProductRequest, description = "Product fields and photo"),
    responses(
        (status = 201, description = "Product created", body = ProductRecord),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 500, description = "Photo could not be saved", body = ErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Json(req) = payload?;
    let draft = draft(
        req.name,
        req.description,
        req.price,
        req.photo,
        req.photo_type,
    )
    .map_err(CatalogError::from)?;

    let record = state.catalog.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /products` -- replace a product, including a new photo.
#[utoipa::path(
    put,
    path = "/products",
    tag = "Products",
    summary = "Replace a product",
    description = "Stores the new photo, then replaces every field of the product identified by `id`.",
    request_body(content = UpdateProductRequest, description = "Product id, fields, and new photo"),
    responses(
        (status = 200, description = "Product updated", body = ProductRecord),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Photo could not be saved", body = ErrorResponse),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Json(req) = payload?;
    let draft = draft(
        req.name,
        req.description,
        req.price,
        req.photo,
        req.photo_type,
    )
    .map_err(CatalogError::from)?;

    let record = state.catalog.update(&req.id, draft).await?;
    Ok((StatusCode::OK, Json(record)))
}

/// `DELETE /products?id=...` -- remove a product.
#[utoipa::path(
    delete,
    path = "/products",
    tag = "Products",
    summary = "Delete a product",
    description = "Removes the product with the given id. Unknown or missing ids are a no-op; the call always succeeds. The stored photo is kept.",
    params(DeleteProductParams),
    responses(
        (status = 200, description = "Deletion confirmed", body = MessageResponse),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Query(params): Query<DeleteProductParams>,
) -> impl IntoResponse {
    if let Some(id) = params.id.as_deref() {
        state.catalog.delete(id).await;
    }

    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "Product deleted".to_owned(),
        }),
    )
}
