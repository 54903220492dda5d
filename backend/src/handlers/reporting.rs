//! Reporting handlers for stock movement analytics and data export

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Deserialize;
use shared::{
    movement_title, optional_barcode, parse_year_month, MessageResponse, MonthlySummaryReport,
    MovementReport,
};

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Deserialize)]
pub struct MonthlySummaryQuery {
    pub ano: Option<String>,
    pub mes: Option<String>,
    pub formato: Option<String>, // "json" or "csv"
}

#[derive(Deserialize)]
pub struct MovementQuery {
    pub codigo: Option<String>,
    pub formato: Option<String>,
}

fn wants_csv(formato: Option<&str>) -> bool {
    formato.is_some_and(|f| f.eq_ignore_ascii_case("csv"))
}

/// Barcode as it may appear in a `Content-Disposition` filename.
/// Anything outside `[A-Za-z0-9_-]` becomes `_`.
fn filename_part(code: &str) -> String {
    code.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn csv_attachment(csv: String, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response()
}

/// Get per-product receipts and sales for a month
pub async fn get_monthly_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthlySummaryQuery>,
) -> AppResult<Response> {
    let today = Local::now().date_naive();
    let period = parse_year_month(query.ano.as_deref(), query.mes.as_deref(), today)?;

    let service = ReportingService::new(state.db.clone());
    let summary = service.monthly_summary(period).await?;

    if summary.is_empty() {
        let message = format!(
            "Nenhuma movimentação de produto encontrada em {}/{}.",
            period.month, period.year
        );
        return Ok(Json(MessageResponse::new(message)).into_response());
    }

    if wants_csv(query.formato.as_deref()) {
        let csv = ReportingService::export_to_csv(&summary)?;
        let filename = format!("resumo_mensal_{}_{:02}.csv", period.year, period.month);
        return Ok(csv_attachment(csv, &filename));
    }

    Ok(Json(MonthlySummaryReport {
        month: period.month,
        year: period.year,
        summary,
    })
    .into_response())
}

/// Get the stock-in/stock-out ledger, optionally for one product
pub async fn get_movement_report(
    State(state): State<AppState>,
    Query(query): Query<MovementQuery>,
) -> AppResult<Response> {
    let codigo = optional_barcode(query.codigo.as_deref());

    let service = ReportingService::new(state.db.clone());
    let movements = service.movements(codigo).await?;

    if movements.is_empty() {
        return Ok(Json(MessageResponse::new("Nenhuma movimentação encontrada.")).into_response());
    }

    if wants_csv(query.formato.as_deref()) {
        let csv = ReportingService::export_to_csv(&movements)?;
        let filename = match codigo {
            Some(code) => format!("movimentacao_{}.csv", filename_part(code)),
            None => "movimentacao.csv".to_string(),
        };
        return Ok(csv_attachment(csv, &filename));
    }

    Ok(Json(MovementReport {
        title: movement_title(codigo),
        movements,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_csv() {
        assert!(wants_csv(Some("csv")));
        assert!(wants_csv(Some("CSV")));
        assert!(!wants_csv(Some("json")));
        assert!(!wants_csv(None));
    }

    #[test]
    fn test_filename_part_keeps_safe_characters() {
        assert_eq!(filename_part("7891000100103"), "7891000100103");
        assert_eq!(filename_part("AB-12_x"), "AB-12_x");
    }

    #[test]
    fn test_filename_part_replaces_header_breaking_characters() {
        assert_eq!(filename_part("10\"01"), "10_01");
        assert_eq!(filename_part("10\r\n01"), "10__01");
        assert_eq!(filename_part(" 1001;x=y"), "_1001_x_y");
        assert_eq!(filename_part("café"), "caf_");
    }

    #[test]
    fn test_csv_attachment_with_unsafe_barcode_is_valid() {
        let filename = format!("movimentacao_{}.csv", filename_part("1\"\u{7}2"));
        let response = csv_attachment("a,b\n".to_string(), &filename);
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"movimentacao_1__2.csv\""
        );
    }

    #[test]
    fn test_csv_attachment_headers() {
        let response = csv_attachment("a,b\n".to_string(), "movimentacao.csv");
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"movimentacao.csv\""
        );
    }
}
