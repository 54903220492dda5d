//! HTTP handlers for the Supermarket Inventory backend

pub mod health;
pub mod product;
pub mod reporting;

pub use health::health_check;
pub use product::{get_expiring_products, get_product, get_products_below_minimum};
pub use reporting::{get_monthly_summary, get_movement_report};
