//! HTTP handlers for product endpoints

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::{parse_expiry_window, require_barcode, MessageResponse, Product};

use crate::error::{AppError, AppResult};
use crate::services::ProductService;
use crate::AppState;

#[derive(Deserialize)]
pub struct ProductQuery {
    pub codigo: Option<String>,
}

#[derive(Deserialize)]
pub struct ExpiryQuery {
    pub dias: Option<String>,
}

/// Look up a product by barcode
pub async fn get_product(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Product>> {
    let codigo = require_barcode(query.codigo.as_deref())?;

    let service = ProductService::new(state.db.clone());
    let product = service
        .find_by_barcode(codigo)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado".to_string()))?;

    Ok(Json(product))
}

/// List lots expiring within the next `dias` days
pub async fn get_expiring_products(
    State(state): State<AppState>,
    Query(query): Query<ExpiryQuery>,
) -> AppResult<Response> {
    let window = parse_expiry_window(query.dias.as_deref(), state.config.default_expiry_window())?;

    let service = ProductService::new(state.db.clone());
    let lots = service.near_expiry(window).await?;

    if lots.is_empty() {
        let message = format!("Nenhum produto vence nos próximos {} dias.", window.days());
        return Ok(Json(MessageResponse::new(message)).into_response());
    }

    Ok(Json(lots).into_response())
}

/// List products whose current stock is below their minimum
pub async fn get_products_below_minimum(State(state): State<AppState>) -> AppResult<Response> {
    let service = ProductService::new(state.db.clone());
    let products = service.below_minimum_stock().await?;

    if products.is_empty() {
        return Ok(Json(MessageResponse::new(
            "Nenhum produto está abaixo do estoque mínimo definido.",
        ))
        .into_response());
    }

    Ok(Json(products).into_response())
}
