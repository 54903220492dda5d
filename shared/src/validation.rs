//! Query-parameter validation for the reporting endpoints
//!
//! Every check here runs before a query reaches the database. Error messages
//! are the ones returned to clients in the `erro` field.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{ExpiryWindow, YearMonth};

/// A rejected query parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Código do produto é obrigatório")]
    MissingBarcode,

    #[error("O parâmetro 'dias' deve ser um número inteiro.")]
    DaysNotInteger,

    #[error("O número de dias deve ser positivo.")]
    DaysNotPositive,

    #[error("O ano e o mês devem ser números inteiros válidos.")]
    YearMonthNotInteger,

    #[error("Mês inválido (deve ser entre 1 e 12).")]
    MonthOutOfRange,
}

impl ValidationError {
    /// Name of the offending query parameter
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingBarcode => "codigo",
            ValidationError::DaysNotInteger | ValidationError::DaysNotPositive => "dias",
            ValidationError::YearMonthNotInteger => "ano",
            ValidationError::MonthOutOfRange => "mes",
        }
    }
}

// ============================================================================
// Barcodes
// ============================================================================

/// Barcode for the single-product lookup; blank counts as missing.
///
/// The value is returned untouched so the lookup stays an exact match.
pub fn require_barcode(codigo: Option<&str>) -> Result<&str, ValidationError> {
    optional_barcode(codigo).ok_or(ValidationError::MissingBarcode)
}

/// Barcode filter for the movement report; blank means "all products"
pub fn optional_barcode(codigo: Option<&str>) -> Option<&str> {
    codigo.filter(|code| !code.trim().is_empty())
}

// ============================================================================
// Dates and windows
// ============================================================================

/// Parse the `dias` parameter, falling back to `default` when absent
pub fn parse_expiry_window(
    dias: Option<&str>,
    default: ExpiryWindow,
) -> Result<ExpiryWindow, ValidationError> {
    let Some(raw) = dias else {
        return Ok(default);
    };

    let days: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::DaysNotInteger)?;

    if days <= 0 {
        return Err(ValidationError::DaysNotPositive);
    }

    // Positive i64 always fits in u64
    ExpiryWindow::new(days as u64).ok_or(ValidationError::DaysNotPositive)
}

/// Parse `ano`/`mes`, each defaulting to the matching part of `today`.
///
/// Both values are parsed before the month range is checked, so a
/// non-numeric year is reported even when the month is also out of range.
pub fn parse_year_month(
    ano: Option<&str>,
    mes: Option<&str>,
    today: NaiveDate,
) -> Result<YearMonth, ValidationError> {
    let current = YearMonth::of(today);

    let year = match ano {
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::YearMonthNotInteger)?,
        None => current.year,
    };

    let month = match mes {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::YearMonthNotInteger)?,
        None => i64::from(current.month),
    };

    u32::try_from(month)
        .ok()
        .and_then(|month| YearMonth::new(year, month))
        .ok_or(ValidationError::MonthOutOfRange)
}
