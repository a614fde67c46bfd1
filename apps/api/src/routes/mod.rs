pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::imaging::handlers as imaging;
use crate::inventory::handlers as inventory;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Upload cap for `/remove-bg`, above axum's 2 MB default.
const MAX_IMAGE_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Inventory API
        .route(
            "/items",
            get(inventory::handle_list_items).post(inventory::handle_create_item),
        )
        .route(
            "/items/:id",
            get(inventory::handle_get_item)
                .put(inventory::handle_update_item)
                .delete(inventory::handle_delete_item),
        )
        // Resume extraction API
        .route("/api/v1/resumes/extract", post(resume::handle_extract))
        .route(
            "/api/v1/resumes/extract/batch",
            post(resume::handle_extract_batch),
        )
        // Image API
        .route(
            "/remove-bg",
            post(imaging::handle_remove_bg).layer(DefaultBodyLimit::max(MAX_IMAGE_UPLOAD_BYTES)),
        )
        .with_state(state)
}

/// Router plus the HTTP middleware stack used in production.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict allowed origins once a frontend origin exists
    )
}
