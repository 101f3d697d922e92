//! Catalog module: franchise/branch/product hierarchy in three layers
//! (domain, repository, service).
//!
//! Backends for the repository live in `repo` (PostgreSQL via SeaORM),
//! `repository::memory` and `crate::storage` (JSON file).

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use errors::CatalogError;
pub use repository::FranchiseStore;
pub use service::CatalogService;
