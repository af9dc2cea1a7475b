//! Coercion of raw form fields into typed values.
//!
//! Browsers submit everything as text; each helper either yields the typed
//! value or an [`AppError::Validation`] naming the offending field.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use time::{macros::format_description, Date};

use crate::error::AppError;

/// Integer record id taken from the route path. A segment that is not an
/// integer can never name a record, so it is answered with 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Page"))?;
        Ok(RecordId(id))
    }
}

/// Upper bound for any single quantity. Keeps calorie products and daily sums
/// far from `f64` overflow.
pub const MAX_QUANTITY: f64 = 1_000_000.0;

/// Parse a gram/nutrient quantity: a float in `0..=MAX_QUANTITY`.
pub fn quantity(field: &str, raw: &str) -> Result<f64, AppError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be a number, got {raw:?}")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number, got {raw:?}"
        )));
    }
    if value > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "{field} must be at most {MAX_QUANTITY}, got {raw:?}"
        )));
    }
    Ok(value)
}

pub fn id(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be an integer id, got {raw:?}")))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn date(field: &str, raw: &str) -> Result<Date, AppError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::validation(format!("{field} must be a YYYY-MM-DD date, got {raw:?}")))
}

/// Like [`date`], but a missing or blank value is `None`.
pub fn optional_date(field: &str, raw: Option<&str>) -> Result<Option<Date>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => date(field, v).map(Some),
    }
}

pub fn name(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn quantity_accepts_decimals_and_whitespace() {
        assert_eq!(quantity("grams", " 12.5 ").unwrap(), 12.5);
        assert_eq!(quantity("fats", "0").unwrap(), 0.0);
        assert_eq!(quantity("grams", "1000000").unwrap(), MAX_QUANTITY);
    }

    #[test]
    fn quantity_rejects_garbage_negative_and_non_finite() {
        for raw in ["", "abc", "-1", "NaN", "inf", "1e308", "1000000.5"] {
            let err = quantity("proteins", raw).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{raw} should be rejected");
        }
    }

    #[test]
    fn id_requires_integer() {
        assert_eq!(id("dish_id", "42").unwrap(), 42);
        assert!(id("dish_id", "4.2").is_err());
    }

    #[test]
    fn date_uses_iso_calendar_format() {
        assert_eq!(date("date", "2024-03-09").unwrap(), date!(2024 - 03 - 09));
        assert!(date("date", "09/03/2024").is_err());
        assert!(date("date", "2024-02-30").is_err());
    }

    #[test]
    fn blank_optional_date_is_absent() {
        assert_eq!(optional_date("start_date", None).unwrap(), None);
        assert_eq!(optional_date("start_date", Some("  ")).unwrap(), None);
        assert_eq!(
            optional_date("start_date", Some("2024-01-01")).unwrap(),
            Some(date!(2024 - 01 - 01))
        );
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(name("  Oatmeal ").unwrap(), "Oatmeal");
        assert!(name("   ").is_err());
    }
}
