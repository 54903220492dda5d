//! Report shaping tests
//!
//! Tests for the report models and export including:
//! - Movement sign convention and net change
//! - CSV export and JSON field names

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{
    is_newest_first, movement_title, net_change, Movement, MovementType, MonthlyProductSummary,
    MonthlySummaryReport, Product,
};
use smi_backend::services::ReportingService;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn movement(movement_type: MovementType, day: u32, quantity: i64, reference: &str) -> Movement {
    Movement {
        movement_type,
        movement_date: date(2024, 5, day),
        quantity: movement_type.sign() * quantity,
        reference: reference.to_string(),
        barcode: "7891000100103".to_string(),
        product_name: "Leite Integral 1L".to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_movement_titles() {
        assert_eq!(movement_title(None), "Movimentação Geral");
        assert_eq!(
            movement_title(Some("7891000100103")),
            "Movimentação Produto 7891000100103"
        );
    }

    #[test]
    fn test_net_change_of_ledger() {
        let ledger = vec![
            movement(MovementType::Out, 20, 4, "31"),
            movement(MovementType::In, 12, 50, "8"),
            movement(MovementType::Out, 3, 6, "30"),
        ];

        assert_eq!(net_change(&ledger), 40);
        assert!(is_newest_first(&ledger));
    }

    #[test]
    fn test_movement_json_fields() {
        let json = serde_json::to_value(movement(MovementType::Out, 2, 3, "99")).unwrap();

        assert_eq!(json["tipo_movimento"], "SAÍDA");
        assert_eq!(json["data_movimento"], "2024-05-02");
        assert_eq!(json["quantidade"], -3);
        assert_eq!(json["referencia"], "99");
        assert_eq!(json["cod_produto"], "7891000100103");
        assert_eq!(json["nome_produto"], "Leite Integral 1L");
    }

    #[test]
    fn test_product_json_fields() {
        let product = Product {
            name: "Café 500g".to_string(),
            sale_price: 18.9,
            product_type: Some("mercearia".to_string()),
            minimum_stock: 12,
        };
        let json = serde_json::to_value(product).unwrap();

        assert_eq!(json["nome"], "Café 500g");
        assert_eq!(json["preco_venda"], 18.9);
        assert_eq!(json["tipo_produto"], "mercearia");
        assert_eq!(json["estoque_minimo"], 12);
    }

    #[test]
    fn test_monthly_report_envelope() {
        let report = MonthlySummaryReport {
            month: 3,
            year: 2024,
            summary: vec![MonthlyProductSummary {
                barcode: "123".to_string(),
                product_name: "Arroz".to_string(),
                total_received: 40,
                total_sold: 15,
            }],
        };
        let json = serde_json::to_value(report).unwrap();

        assert_eq!(json["mes"], 3);
        assert_eq!(json["ano"], 2024);
        assert_eq!(json["resumo"][0]["total_entradas"], 40);
        assert_eq!(json["resumo"][0]["total_saidas"], 15);
    }

    #[test]
    fn test_csv_export_has_header_and_rows() {
        let ledger = vec![
            movement(MovementType::In, 10, 24, "5"),
            movement(MovementType::Out, 9, 2, "41"),
        ];

        let csv = ReportingService::export_to_csv(&ledger).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "tipo_movimento,data_movimento,quantidade,referencia,cod_produto,nome_produto"
        );
        assert_eq!(lines[1], "ENTRADA,2024-05-10,24,5,7891000100103,Leite Integral 1L");
        assert_eq!(lines[2], "SAÍDA,2024-05-09,-2,41,7891000100103,Leite Integral 1L");
    }

    #[test]
    fn test_csv_export_empty() {
        let csv = ReportingService::export_to_csv::<Movement>(&[]).unwrap();
        assert!(csv.is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Summing signed ledger quantities yields received minus sold
    #[test]
    fn property_ledger_net_change(
        received in prop::collection::vec(0i64..1000, 0..20),
        sold in prop::collection::vec(0i64..1000, 0..20),
    ) {
        let mut ledger: Vec<Movement> = received
            .iter()
            .enumerate()
            .map(|(i, q)| movement(MovementType::In, 1 + (i as u32 % 28), *q, &i.to_string()))
            .chain(
                sold.iter()
                    .enumerate()
                    .map(|(i, q)| movement(MovementType::Out, 1 + (i as u32 % 28), *q, &i.to_string())),
            )
            .collect();
        ledger.sort_by(|a, b| b.movement_date.cmp(&a.movement_date));

        prop_assert!(is_newest_first(&ledger));
        prop_assert_eq!(
            net_change(&ledger),
            received.iter().sum::<i64>() - sold.iter().sum::<i64>()
        );
        prop_assert!(ledger
            .iter()
            .all(|m| (m.movement_type == MovementType::In) == (m.quantity >= 0) || m.quantity == 0));
    }
}
