pub mod health;
pub mod images;
pub mod openapi;
pub mod products;
pub mod schemas;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::service::CatalogService;

use self::openapi::ApiDoc;

/// A directory of stored assets exposed under a URL prefix.
#[derive(Debug, Clone)]
pub struct AssetMount {
    /// URL path prefix, e.g. `/images`.
    pub prefix: String,
    /// Directory the files are served from.
    pub root: PathBuf,
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Records and photos.
    pub catalog: Arc<CatalogService>,
    /// Optional static mount for stored assets (None disables it).
    pub assets: Option<AssetMount>,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health))
        .route(
            "/products",
            get(products::list_products)
                .post(products::create_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/image/{id}", get(images::get_image))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Record references (`/images/<token>.<ext>`) resolve to the stored file.
    if let Some(mount) = &state.assets {
        router = router.nest_service(&mount.prefix, ServeDir::new(&mount.root));
    }

    let body_limit = state.max_upload_bytes;
    router
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
