//! Domain models for the Supermarket Inventory backend

mod product;
mod report;

pub use product::*;
pub use report::*;
