//! Service layer providing the franchise catalog business rules on top of
//! pluggable document stores.
//! - Separates business logic from data access.
//! - Reuses entity definitions in the `models` crate for PostgreSQL.
//! - Provides clear error types and documented interfaces.

pub mod catalog;
#[cfg(test)]
pub mod test_support;
pub mod storage;
