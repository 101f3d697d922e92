//! File-backed storage for the service layer.
//!
//! Keeps every franchise document in a single JSON file, for local runs
//! where a database is overkill.

pub mod json_file_store;
