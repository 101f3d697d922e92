//! Shared building blocks for the franchise catalog workspace.

pub mod types;
pub mod utils;
