//! Route definitions for the Supermarket Inventory backend

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(product_routes())
        .merge(report_routes())
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/produto", get(handlers::get_product))
        .route("/produto/validade", get(handlers::get_expiring_products))
        .route("/produto/em_falta", get(handlers::get_products_below_minimum))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/relatorios/resumo_mensal_por_produto",
            get(handlers::get_monthly_summary),
        )
        .route("/relatorios/movimentacao", get(handlers::get_movement_report))
}
