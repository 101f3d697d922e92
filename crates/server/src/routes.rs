pub mod franchise;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc, state::AppState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Routes below `/api/franchise`.
fn franchise_routes() -> Router<AppState> {
    use franchise::*;

    Router::new()
        .route("/", post(create_franchise).get(list_franchises))
        .route("/:id/name", put(update_franchise_name))
        .route("/:id/highest-stock-products", get(highest_stock_products))
        .route("/:id/branch", post(add_branch))
        .route("/:id/branch/name", put(update_branch_name))
        .route("/:id/branch/:branch_name/product", post(add_product))
        // Static `name` segment also has to take DELETE for a product called "name".
        .route(
            "/:id/branch/:branch_name/product/name",
            put(update_product_name).delete(remove_product_named_name),
        )
        .route("/:id/branch/:branch_name/product/:product_name", delete(remove_product))
        .route(
            "/:id/branch/:branch_name/product/:product_name/stock/:new_stock",
            put(update_product_stock),
        )
}

/// Build the full application router: catalog API plus health, metrics and
/// the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/franchise", franchise_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
