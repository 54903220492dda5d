//! Product models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A product as returned by the barcode lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "nome")]
    pub name: String,
    /// Sale price, rendered as a JSON float
    #[serde(rename = "preco_venda")]
    pub sale_price: f64,
    #[serde(rename = "tipo_produto")]
    pub product_type: Option<String>,
    #[serde(rename = "estoque_minimo")]
    pub minimum_stock: i32,
}

/// A lot whose expiry date falls inside the requested window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpiringLot {
    #[serde(rename = "produto_nome")]
    pub product_name: String,
    #[serde(rename = "cod_lote")]
    pub lot_code: i32,
    #[serde(rename = "data_validade")]
    pub expiry_date: NaiveDate,
}

/// A product whose current stock is below its minimum threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockShortage {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cod_barras")]
    pub barcode: String,
    #[serde(rename = "estoque_minimo")]
    pub minimum_stock: i32,
    /// Received minus sold; may be negative
    #[serde(rename = "estoque_atual")]
    pub current_stock: i64,
}
