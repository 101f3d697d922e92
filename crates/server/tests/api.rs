use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::catalog::repository::memory::InMemoryFranchiseStore;
use tower::ServiceExt;

use server::{routes, state::AppState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> Router {
    let store = Arc::new(InMemoryFranchiseStore::new());
    routes::build_router(AppState::new(store), cors())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn create(app: &Router, name: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/api/franchise", Some(json!({ "name": name }))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_then_duplicate_is_bad_request_with_error_body() -> anyhow::Result<()> {
    let app = build_app();
    let id = create(&app, "Sabores").await?;
    assert!(!id.is_empty());

    let (status, body) = send(&app, "POST", "/api/franchise", Some(json!({ "name": "SABORES" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "franchise already exists");
    assert!(body["timestamp"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn unknown_franchise_is_not_found() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/api/franchise/missing/highest-stock-products", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "franchise not found");
    Ok(())
}

#[tokio::test]
async fn branch_and_product_lifecycle() -> anyhow::Result<()> {
    let app = build_app();
    let id = create(&app, "Arepas").await?;

    let (status, body) = send(&app, "POST", &format!("/api/franchise/{id}/branch"), Some(json!({ "name": "Sucursal 1" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["name"], "Sucursal 1");
    assert_eq!(body["branches"][0]["products"], json!([]));

    let (status, _) = send(&app, "POST", &format!("/api/franchise/{id}/branch"), Some(json!({ "name": "sucursal 1" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let product_uri = format!("/api/franchise/{id}/branch/Sucursal%201/product");
    let (status, _) = send(&app, "POST", &product_uri, Some(json!({ "name": "Empanada", "stock": 10 }))).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "POST", &product_uri, Some(json!({ "name": "Chorizo", "stock": 30 }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["products"][1], json!({ "name": "Chorizo", "stock": 30 }));

    let (status, body) = send(&app, "POST", &format!("/api/franchise/{id}/branch/Nope/product"), Some(json!({ "name": "X" }))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "branch not found");

    let (status, body) = send(&app, "PUT", &format!("/api/franchise/{id}/branch/Sucursal%201/product/empanada/stock/-3"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["products"][0]["stock"], -3);

    let (status, body) = send(&app, "DELETE", &format!("/api/franchise/{id}/branch/Sucursal%201/product/Pan"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "product not found");

    let (status, body) = send(&app, "DELETE", &format!("/api/franchise/{id}/branch/Sucursal%201/product/CHORIZO"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["products"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn highest_stock_products_in_branch_order() -> anyhow::Result<()> {
    let app = build_app();
    let id = create(&app, "Top").await?;
    for branch in ["A", "Empty", "B"] {
        send(&app, "POST", &format!("/api/franchise/{id}/branch"), Some(json!({ "name": branch }))).await?;
    }
    for (branch, name, stock) in [("A", "p1", 10), ("A", "p2", 30), ("B", "p3", 25)] {
        send(
            &app,
            "POST",
            &format!("/api/franchise/{id}/branch/{branch}/product"),
            Some(json!({ "name": name, "stock": stock })),
        )
        .await?;
    }

    let (status, body) = send(&app, "GET", &format!("/api/franchise/{id}/highest-stock-products"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "branchName": "A", "productName": "p2", "stock": 30 },
            { "branchName": "B", "productName": "p3", "stock": 25 }
        ])
    );
    Ok(())
}

#[tokio::test]
async fn renames_via_body_and_query() -> anyhow::Result<()> {
    let app = build_app();
    let id = create(&app, "Old").await?;
    send(&app, "POST", &format!("/api/franchise/{id}/branch"), Some(json!({ "name": "Centro" }))).await?;
    send(&app, "POST", &format!("/api/franchise/{id}/branch/Centro/product"), Some(json!({ "name": "Arepa", "stock": 1 }))).await?;
    send(&app, "POST", &format!("/api/franchise/{id}/branch/Centro/product"), Some(json!({ "name": "Pan", "stock": 2 }))).await?;

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/franchise/{id}/name"))
        .header("content-type", "text/plain")
        .body(Body::from("New Name"))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
    assert_eq!(body["name"], "New Name");

    let (status, body) = send(&app, "PUT", &format!("/api/franchise/{id}/branch/name?oldName=centro&newName=Norte"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["name"], "Norte");

    // Renaming onto a sibling's name is accepted.
    let (status, body) = send(&app, "PUT", &format!("/api/franchise/{id}/branch/Norte/product/name?oldName=pan&newName=Arepa"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["products"][1]["name"], "Arepa");

    let (status, _) = send(&app, "PUT", &format!("/api/franchise/{id}/branch/name?oldName=Centro&newName=X"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn list_returns_all_in_creation_order() -> anyhow::Result<()> {
    let app = build_app();
    for name in ["F1", "F2"] {
        create(&app, name).await?;
    }
    let (status, body) = send(&app, "GET", "/api/franchise", None).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body.as_array().into_iter().flatten().map(|f| f["name"].clone()).collect();
    assert_eq!(names, vec![json!("F1"), json!("F2")]);
    Ok(())
}

#[tokio::test]
async fn non_integer_stock_is_rejected_by_extractor() -> anyhow::Result<()> {
    let app = build_app();
    let id = create(&app, "Strict").await?;
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/franchise/{id}/branch/A/product/B/stock/ten"))
        .body(Body::empty())?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn metrics_and_openapi_are_served() -> anyhow::Result<()> {
    let app = build_app();
    create(&app, "Counted").await?;

    let res = app.clone().oneshot(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("franchise_api_operations_total"));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/franchise/{id}/highest-stock-products"].is_object());
    Ok(())
}

#[tokio::test]
async fn product_literally_named_name_can_be_deleted() -> anyhow::Result<()> {
    let app = build_app();
    let id = create(&app, "Literal").await?;
    send(&app, "POST", &format!("/api/franchise/{id}/branch"), Some(json!({ "name": "B" }))).await?;
    send(&app, "POST", &format!("/api/franchise/{id}/branch/B/product"), Some(json!({ "name": "name", "stock": 1 }))).await?;
    send(&app, "POST", &format!("/api/franchise/{id}/branch/B/product"), Some(json!({ "name": "Other", "stock": 2 }))).await?;

    let (status, body) = send(&app, "PUT", &format!("/api/franchise/{id}/branch/B/product/name/stock/9"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["products"][0]["stock"], 9);

    let (status, body) = send(&app, "DELETE", &format!("/api/franchise/{id}/branch/B/product/name"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["branches"][0]["products"], json!([{ "name": "Other", "stock": 2 }]));

    let (status, body) = send(&app, "DELETE", &format!("/api/franchise/{id}/branch/B/product/name"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "product not found");

    let (status, body) = send(&app, "DELETE", "/api/franchise/missing/branch/B/product/name", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "franchise not found");
    Ok(())
}

#[tokio::test]
async fn rename_endpoints_report_missing_targets() -> anyhow::Result<()> {
    let app = build_app();
    let id = create(&app, "Renames").await?;
    send(&app, "POST", &format!("/api/franchise/{id}/branch"), Some(json!({ "name": "Centro" }))).await?;

    let (status, body) = send(&app, "PUT", &format!("/api/franchise/{id}/branch/Centro/product/name?oldName=missing&newName=X"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "product not found");

    let (status, body) = send(&app, "PUT", &format!("/api/franchise/{id}/branch/Nope/product/name?oldName=a&newName=b"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "branch not found");

    let req = Request::builder()
        .method("PUT")
        .uri("/api/franchise/missing/name")
        .header("content-type", "text/plain")
        .body(Body::from("Whatever"))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "franchise not found");
    assert!(body["timestamp"].as_str().is_some());

    let (status, body) = send(&app, "PUT", "/api/franchise/missing/branch/name?oldName=a&newName=b", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "franchise not found");
    Ok(())
}
