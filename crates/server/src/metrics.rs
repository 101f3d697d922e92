use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::catalog::CatalogError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "franchise_api_operations_total",
        "Catalog operations handled",
        &["operation"]
    )
    .expect("register operations_total")
});

pub static OPERATION_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "franchise_api_operation_errors_total",
        "Catalog operations that returned an error",
        &["operation", "kind"]
    )
    .expect("register operation_errors_total")
});

/// Count one catalog call and its failure kind, if any.
pub fn observe<T>(operation: &'static str, res: Result<T, CatalogError>) -> Result<T, CatalogError> {
    OPERATIONS_TOTAL.with_label_values(&[operation]).inc();
    if let Err(e) = &res {
        OPERATION_ERRORS_TOTAL.with_label_values(&[operation, e.kind()]).inc();
    }
    res
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
