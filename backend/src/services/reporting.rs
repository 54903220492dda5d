//! Reporting service for stock movement analytics and data export
//! Provides monthly per-product summaries and the in/out movement ledger

use chrono::NaiveDate;
use serde::Serialize;
use shared::{optional_barcode, MonthlyProductSummary, Movement, MovementType, YearMonth};
use sqlx::FromRow;

use crate::db::{Database, SqlParam};
use crate::error::{AppError, AppResult};

const MONTHLY_SUMMARY: &str = r#"
    WITH movimentacao AS (
        SELECT
            l.cod_produto AS cod_barras,
            p.nome AS nome_produto,
            l.quantidade::bigint AS entrada,
            0::bigint AS saida
        FROM Lote l
        JOIN Produto p ON l.cod_produto = p.cod_barras
        WHERE EXTRACT(YEAR FROM l.data_recebimento) = $1
          AND EXTRACT(MONTH FROM l.data_recebimento) = $2

        UNION ALL

        SELECT
            vcp.cod_barras,
            p.nome AS nome_produto,
            0::bigint AS entrada,
            vcp.quantidade::bigint AS saida
        FROM Venda_Contem_Produto vcp
        JOIN Venda v ON vcp.cod_venda = v.cod_venda
        JOIN Produto p ON vcp.cod_barras = p.cod_barras
        WHERE EXTRACT(YEAR FROM v.data_venda) = $1
          AND EXTRACT(MONTH FROM v.data_venda) = $2
    )
    SELECT
        cod_barras,
        nome_produto,
        SUM(entrada)::bigint AS total_entradas,
        SUM(saida)::bigint AS total_saidas
    FROM movimentacao
    GROUP BY cod_barras, nome_produto
    ORDER BY nome_produto ASC, cod_barras ASC
"#;

// A NULL filter matches every product, so the text never changes with the
// presence of a barcode. Quantities come back unsigned; the movement type
// decides the sign.
const MOVEMENTS: &str = r#"
    SELECT
        'IN' AS tipo_movimento,
        l.data_recebimento::date AS data_movimento,
        l.quantidade::bigint AS quantidade,
        CAST(l.cod_lote AS VARCHAR) AS referencia,
        l.cod_produto::varchar AS cod_produto,
        p.nome AS nome_produto
    FROM Lote l
    JOIN Produto p ON l.cod_produto = p.cod_barras
    WHERE ($1::text IS NULL OR l.cod_produto = $1::text)

    UNION ALL

    SELECT
        'OUT' AS tipo_movimento,
        v.data_venda::date AS data_movimento,
        vcp.quantidade::bigint AS quantidade,
        CAST(vcp.cod_venda AS VARCHAR) AS referencia,
        vcp.cod_barras::varchar AS cod_produto,
        p.nome AS nome_produto
    FROM Venda_Contem_Produto vcp
    JOIN Venda v ON vcp.cod_venda = v.cod_venda
    JOIN Produto p ON vcp.cod_barras = p.cod_barras
    WHERE ($1::text IS NULL OR vcp.cod_barras = $1::text)

    ORDER BY data_movimento DESC, cod_produto ASC, tipo_movimento ASC, referencia ASC
"#;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: Database,
}

#[derive(Debug, FromRow)]
struct MonthlySummaryRow {
    cod_barras: String,
    nome_produto: String,
    total_entradas: i64,
    total_saidas: i64,
}

impl From<MonthlySummaryRow> for MonthlyProductSummary {
    fn from(row: MonthlySummaryRow) -> Self {
        Self {
            barcode: row.cod_barras,
            product_name: row.nome_produto,
            total_received: row.total_entradas,
            total_sold: row.total_saidas,
        }
    }
}

#[derive(Debug, FromRow)]
struct MovementRow {
    tipo_movimento: String,
    data_movimento: NaiveDate,
    quantidade: i64,
    referencia: String,
    cod_produto: String,
    nome_produto: String,
}

impl TryFrom<MovementRow> for Movement {
    type Error = AppError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        let movement_type = row
            .tipo_movimento
            .parse::<MovementType>()
            .map_err(AppError::Internal)?;

        Ok(Self {
            movement_type,
            movement_date: row.data_movimento,
            quantity: movement_type.sign() * row.quantidade,
            reference: row.referencia,
            barcode: row.cod_produto,
            product_name: row.nome_produto,
        })
    }
}

impl ReportingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Units received and sold per product during `period`, by product name.
    /// Products without movement in the period are left out.
    pub async fn monthly_summary(&self, period: YearMonth) -> AppResult<Vec<MonthlyProductSummary>> {
        tracing::debug!(%period, "Building monthly summary");

        let params = [
            SqlParam::Int(i64::from(period.year)),
            SqlParam::Int(i64::from(period.month)),
        ];

        let rows = self
            .db
            .select_all::<MonthlySummaryRow>(MONTHLY_SUMMARY, &params)
            .await?;

        Ok(rows.into_iter().map(MonthlyProductSummary::from).collect())
    }

    /// Stock-in and stock-out ledger, newest first. A blank or missing
    /// barcode returns every product.
    pub async fn movements(&self, barcode: Option<&str>) -> AppResult<Vec<Movement>> {
        let filter = optional_barcode(barcode).map(str::to_string);
        tracing::debug!(barcode = ?filter, "Building movement report");

        let rows = self
            .db
            .select_all::<MovementRow>(MOVEMENTS, &[SqlParam::OptionalText(filter)])
            .await?;

        rows.into_iter().map(Movement::try_from).collect()
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(wtr.into_inner().map_err(|e| {
            AppError::Internal(format!("CSV writer error: {}", e))
        })?)
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
