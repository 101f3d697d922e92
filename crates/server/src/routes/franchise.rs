//! `/api/franchise` handlers. Each one delegates to the catalog service and
//! maps its error through [`ApiError`].

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use service::catalog::domain::{Branch, Franchise, HighestStockProducts, Product};
use tracing::info;

use crate::{errors::ApiError, metrics::observe, state::AppState};

/// `oldName`/`newName` query pair used by the rename endpoints.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RenameQuery {
    pub old_name: String,
    pub new_name: String,
}

#[utoipa::path(
    post, path = "/api/franchise", tag = "franchise",
    request_body = crate::openapi::FranchiseDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::FranchiseDoc),
        (status = 400, description = "Franchise already exists", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create_franchise(State(state): State<AppState>, Json(input): Json<Franchise>) -> Result<Json<Franchise>, ApiError> {
    let saved = observe("create_franchise", state.catalog.create_franchise(input).await)?;
    info!(id = ?saved.id, name = %saved.name, "created franchise");
    Ok(Json(saved))
}

#[utoipa::path(
    get, path = "/api/franchise", tag = "franchise",
    responses((status = 200, description = "All franchises", body = [crate::openapi::FranchiseDoc]))
)]
pub async fn list_franchises(State(state): State<AppState>) -> Result<Json<Vec<Franchise>>, ApiError> {
    let all = observe("list_franchises", state.catalog.get_all_franchises().await)?;
    Ok(Json(all))
}

#[utoipa::path(
    post, path = "/api/franchise/{id}/branch", tag = "franchise",
    params(("id" = String, Path, description = "Franchise ID")),
    request_body = crate::openapi::BranchDoc,
    responses(
        (status = 200, description = "Branch added", body = crate::openapi::FranchiseDoc),
        (status = 400, description = "Branch already exists", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Franchise not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn add_branch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(branch): Json<Branch>,
) -> Result<Json<Franchise>, ApiError> {
    Ok(Json(observe("add_branch", state.catalog.add_branch(&id, branch).await)?))
}

#[utoipa::path(
    post, path = "/api/franchise/{id}/branch/{branchName}/product", tag = "franchise",
    params(
        ("id" = String, Path, description = "Franchise ID"),
        ("branchName" = String, Path, description = "Branch name, case-insensitive")
    ),
    request_body = crate::openapi::ProductDoc,
    responses(
        (status = 200, description = "Product added", body = crate::openapi::FranchiseDoc),
        (status = 400, description = "Product already exists", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Franchise or branch not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path((id, branch_name)): Path<(String, String)>,
    Json(product): Json<Product>,
) -> Result<Json<Franchise>, ApiError> {
    Ok(Json(observe("add_product", state.catalog.add_product(&id, &branch_name, product).await)?))
}

#[utoipa::path(
    delete, path = "/api/franchise/{id}/branch/{branchName}/product/{productName}", tag = "franchise",
    params(
        ("id" = String, Path, description = "Franchise ID"),
        ("branchName" = String, Path, description = "Branch name, case-insensitive"),
        ("productName" = String, Path, description = "Product name, case-insensitive")
    ),
    responses(
        (status = 200, description = "Product removed", body = crate::openapi::FranchiseDoc),
        (status = 404, description = "Franchise, branch or product not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn remove_product(
    State(state): State<AppState>,
    Path((id, branch_name, product_name)): Path<(String, String, String)>,
) -> Result<Json<Franchise>, ApiError> {
    let f = observe("remove_product", state.catalog.remove_product(&id, &branch_name, &product_name).await)?;
    Ok(Json(f))
}

/// DELETE on the product rename path: removes the product literally named
/// `name`, which the static route would otherwise hide.
pub async fn remove_product_named_name(
    State(state): State<AppState>,
    Path((id, branch_name)): Path<(String, String)>,
) -> Result<Json<Franchise>, ApiError> {
    let f = observe("remove_product", state.catalog.remove_product(&id, &branch_name, "name").await)?;
    Ok(Json(f))
}

#[utoipa::path(
    put, path = "/api/franchise/{id}/branch/{branchName}/product/{productName}/stock/{newStock}", tag = "franchise",
    params(
        ("id" = String, Path, description = "Franchise ID"),
        ("branchName" = String, Path, description = "Branch name, case-insensitive"),
        ("productName" = String, Path, description = "Product name, case-insensitive"),
        ("newStock" = i32, Path, description = "New stock; negative values are accepted")
    ),
    responses(
        (status = 200, description = "Stock updated", body = crate::openapi::FranchiseDoc),
        (status = 404, description = "Franchise, branch or product not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update_product_stock(
    State(state): State<AppState>,
    Path((id, branch_name, product_name, new_stock)): Path<(String, String, String, i32)>,
) -> Result<Json<Franchise>, ApiError> {
    let f = observe(
        "update_product_stock",
        state.catalog.update_product_stock(&id, &branch_name, &product_name, new_stock).await,
    )?;
    Ok(Json(f))
}

#[utoipa::path(
    get, path = "/api/franchise/{id}/highest-stock-products", tag = "franchise",
    params(("id" = String, Path, description = "Franchise ID")),
    responses(
        (status = 200, description = "Top product per non-empty branch", body = [crate::openapi::HighestStockProductDoc]),
        (status = 404, description = "Franchise not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn highest_stock_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HighestStockProducts>, ApiError> {
    let rows = observe("highest_stock_products", state.catalog.get_highest_stock_products(&id).await)?;
    Ok(Json(rows))
}

/// The body is taken verbatim as the new name.
#[utoipa::path(
    put, path = "/api/franchise/{id}/name", tag = "franchise",
    params(("id" = String, Path, description = "Franchise ID")),
    request_body(content = String, description = "New name, raw text", content_type = "text/plain"),
    responses(
        (status = 200, description = "Renamed", body = crate::openapi::FranchiseDoc),
        (status = 404, description = "Franchise not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update_franchise_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    new_name: String,
) -> Result<Json<Franchise>, ApiError> {
    Ok(Json(observe("update_franchise_name", state.catalog.update_franchise_name(&id, &new_name).await)?))
}

#[utoipa::path(
    put, path = "/api/franchise/{id}/branch/name", tag = "franchise",
    params(("id" = String, Path, description = "Franchise ID"), RenameQuery),
    responses(
        (status = 200, description = "Renamed", body = crate::openapi::FranchiseDoc),
        (status = 404, description = "Franchise or branch not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update_branch_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<RenameQuery>,
) -> Result<Json<Franchise>, ApiError> {
    let f = observe("update_branch_name", state.catalog.update_branch_name(&id, &q.old_name, &q.new_name).await)?;
    Ok(Json(f))
}

#[utoipa::path(
    put, path = "/api/franchise/{id}/branch/{branchName}/product/name", tag = "franchise",
    params(
        ("id" = String, Path, description = "Franchise ID"),
        ("branchName" = String, Path, description = "Branch name, case-insensitive"),
        RenameQuery
    ),
    responses(
        (status = 200, description = "Renamed", body = crate::openapi::FranchiseDoc),
        (status = 404, description = "Franchise, branch or product not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update_product_name(
    State(state): State<AppState>,
    Path((id, branch_name)): Path<(String, String)>,
    Query(q): Query<RenameQuery>,
) -> Result<Json<Franchise>, ApiError> {
    let f = observe(
        "update_product_name",
        state.catalog.update_product_name(&id, &branch_name, &q.old_name, &q.new_name).await,
    )?;
    Ok(Json(f))
}
