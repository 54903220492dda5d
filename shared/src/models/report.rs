//! Reporting models: monthly summaries and the movement ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::MovementType;

/// Units received and sold for one product during a calendar month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyProductSummary {
    #[serde(rename = "cod_barras")]
    pub barcode: String,
    #[serde(rename = "nome_produto")]
    pub product_name: String,
    #[serde(rename = "total_entradas")]
    pub total_received: i64,
    #[serde(rename = "total_saidas")]
    pub total_sold: i64,
}

/// Envelope for the monthly summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummaryReport {
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "resumo")]
    pub summary: Vec<MonthlyProductSummary>,
}

/// One stock-in or stock-out event.
///
/// Stock-in rows carry a positive quantity and the lot code as reference;
/// stock-out rows carry a negative quantity and the sale code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movement {
    #[serde(rename = "tipo_movimento")]
    pub movement_type: MovementType,
    #[serde(rename = "data_movimento")]
    pub movement_date: NaiveDate,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "referencia")]
    pub reference: String,
    #[serde(rename = "cod_produto")]
    pub barcode: String,
    #[serde(rename = "nome_produto")]
    pub product_name: String,
}

/// Envelope for the movement ledger endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementReport {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "movimentacoes")]
    pub movements: Vec<Movement>,
}

/// Body returned with 200 when a report has no rows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(rename = "mensagem")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Title of the movement report for an optional product filter
pub fn movement_title(barcode: Option<&str>) -> String {
    match barcode {
        Some(code) => format!("Movimentação Produto {}", code),
        None => "Movimentação Geral".to_string(),
    }
}

/// Net stock change over a set of movements
pub fn net_change(movements: &[Movement]) -> i64 {
    movements.iter().map(|m| m.quantity).sum()
}

/// Whether movements are ordered newest first
pub fn is_newest_first(movements: &[Movement]) -> bool {
    movements
        .windows(2)
        .all(|pair| pair[0].movement_date >= pair[1].movement_date)
}
