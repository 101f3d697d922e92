use thiserror::Error;

/// Business errors for catalog workflows
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn franchise_not_found() -> Self { Self::NotFound("franchise not found".into()) }
    pub fn branch_not_found() -> Self { Self::NotFound("branch not found".into()) }
    pub fn product_not_found() -> Self { Self::NotFound("product not found".into()) }

    pub fn franchise_exists() -> Self { Self::Conflict("franchise already exists".into()) }
    pub fn branch_exists() -> Self { Self::Conflict("branch already exists".into()) }
    pub fn product_exists() -> Self { Self::Conflict("product already exists".into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CatalogError::NotFound(_) => 2001,
            CatalogError::Conflict(_) => 2002,
            CatalogError::Store(_) => 2100,
        }
    }

    /// Short label used as a metrics/log dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "not_found",
            CatalogError::Conflict(_) => "conflict",
            CatalogError::Store(_) => "store",
        }
    }
}

impl From<models::errors::ModelError> for CatalogError {
    fn from(e: models::errors::ModelError) -> Self { Self::Store(e.to_string()) }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self { Self::Store(format!("document encoding: {e}")) }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self { Self::Store(format!("io: {e}")) }
}
