//! Query services for the Supermarket Inventory backend

pub mod product;
pub mod reporting;

pub use product::ProductService;
pub use reporting::ReportingService;
