//! Shared types and models for the Supermarket Inventory backend
//!
//! This crate holds the wire models, common types and query-parameter
//! validation. It performs no I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
