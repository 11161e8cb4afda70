#![allow(clippy::needless_for_each)]

use catalog_core::ProductRecord;

use super::products::{CreateProductRequest, UpdateProductRequest};
use super::schemas::{ErrorResponse, HealthResponse, MessageResponse};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "HTTP API for the product catalog. Create, list, replace, and delete products; fetch their stored photos.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Products", description = "Product records"),
        (name = "Images", description = "Stored product photos")
    ),
    paths(
        super::health::health,
        super::products::list_products,
        super::products::create_product,
        super::products::update_product,
        super::products::delete_product,
        super::images::get_image,
    ),
    components(schemas(
        ProductRecord,
        CreateProductRequest,
        UpdateProductRequest,
        HealthResponse,
        MessageResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;
