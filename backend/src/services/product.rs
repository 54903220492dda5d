//! Product queries: barcode lookup, near-expiry lots and stock shortages

use chrono::{Local, NaiveDate};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use shared::{ExpiringLot, ExpiryWindow, Product, StockShortage};
use sqlx::FromRow;

use crate::db::{Database, SqlParam};
use crate::error::AppResult;

const FIND_BY_BARCODE: &str = r#"
    SELECT nome, preco_venda, tipo_produto, estoque_minimo
    FROM Produto
    WHERE cod_barras = $1
"#;

const NEAR_EXPIRY: &str = r#"
    SELECT
        p.nome AS produto_nome,
        l.cod_lote,
        l.data_validade
    FROM Lote l
    JOIN Produto p ON l.cod_produto = p.cod_barras
    WHERE l.data_validade BETWEEN $1 AND $2
    ORDER BY l.data_validade ASC, l.cod_lote ASC
"#;

// Receipts and sales are summed in separate subqueries; joining both tables
// directly would multiply each side by the row count of the other.
const BELOW_MINIMUM: &str = r#"
    SELECT
        p.nome,
        p.cod_barras,
        p.estoque_minimo,
        (COALESCE(entradas.total, 0) - COALESCE(saidas.total, 0))::bigint AS estoque_atual
    FROM Produto p
    LEFT JOIN (
        SELECT cod_produto, SUM(quantidade) AS total
        FROM Lote
        GROUP BY cod_produto
    ) entradas ON entradas.cod_produto = p.cod_barras
    LEFT JOIN (
        SELECT cod_barras, SUM(quantidade) AS total
        FROM Venda_Contem_Produto
        GROUP BY cod_barras
    ) saidas ON saidas.cod_barras = p.cod_barras
    WHERE COALESCE(entradas.total, 0) - COALESCE(saidas.total, 0) < p.estoque_minimo
    ORDER BY estoque_atual ASC, p.nome ASC
"#;

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: Database,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    nome: String,
    preco_venda: Decimal,
    tipo_produto: Option<String>,
    estoque_minimo: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            name: row.nome,
            sale_price: row.preco_venda.to_f64().unwrap_or_default(),
            product_type: row.tipo_produto,
            minimum_stock: row.estoque_minimo,
        }
    }
}

#[derive(Debug, FromRow)]
struct ExpiringLotRow {
    produto_nome: String,
    cod_lote: i32,
    data_validade: NaiveDate,
}

impl From<ExpiringLotRow> for ExpiringLot {
    fn from(row: ExpiringLotRow) -> Self {
        Self {
            product_name: row.produto_nome,
            lot_code: row.cod_lote,
            expiry_date: row.data_validade,
        }
    }
}

#[derive(Debug, FromRow)]
struct StockShortageRow {
    nome: String,
    cod_barras: String,
    estoque_minimo: i32,
    estoque_atual: i64,
}

impl From<StockShortageRow> for StockShortage {
    fn from(row: StockShortageRow) -> Self {
        Self {
            name: row.nome,
            barcode: row.cod_barras,
            minimum_stock: row.estoque_minimo,
            current_stock: row.estoque_atual,
        }
    }
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Look up a product by exact barcode
    pub async fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<Product>> {
        let row = self
            .db
            .select_one::<ProductRow>(FIND_BY_BARCODE, &[SqlParam::Text(barcode.to_string())])
            .await?;

        Ok(row.map(Product::from))
    }

    /// Lots expiring between today and `today + window`, soonest first
    pub async fn near_expiry(&self, window: ExpiryWindow) -> AppResult<Vec<ExpiringLot>> {
        self.near_expiry_from(Local::now().date_naive(), window)
            .await
    }

    /// Same as [`near_expiry`](Self::near_expiry) with an explicit reference date
    pub async fn near_expiry_from(
        &self,
        today: NaiveDate,
        window: ExpiryWindow,
    ) -> AppResult<Vec<ExpiringLot>> {
        let end = window.end_from(today);
        tracing::debug!(%today, %end, "Listing lots near expiry");

        let rows = self
            .db
            .select_all::<ExpiringLotRow>(NEAR_EXPIRY, &[SqlParam::Date(today), SqlParam::Date(end)])
            .await?;

        Ok(rows.into_iter().map(ExpiringLot::from).collect())
    }

    /// Products whose received-minus-sold stock is below their minimum,
    /// lowest stock first
    pub async fn below_minimum_stock(&self) -> AppResult<Vec<StockShortage>> {
        let rows = self
            .db
            .select_all::<StockShortageRow>(BELOW_MINIMUM, &[])
            .await?;

        Ok(rows.into_iter().map(StockShortage::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_row_price_becomes_float() {
        let product = Product::from(ProductRow {
            nome: "Arroz 5kg".to_string(),
            preco_venda: Decimal::new(2499, 2),
            tipo_produto: Some("mercearia".to_string()),
            estoque_minimo: 10,
        });

        assert!((product.sale_price - 24.99).abs() < 1e-9);
        assert_eq!(product.minimum_stock, 10);
    }

    #[test]
    fn test_queries_bind_every_value() {
        assert!(FIND_BY_BARCODE.contains("$1"));
        assert!(NEAR_EXPIRY.contains("BETWEEN $1 AND $2"));
        assert!(!BELOW_MINIMUM.contains('$'));
    }
}
