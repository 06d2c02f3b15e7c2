//! Numeric normalization for quantities and unit prices.

use inv_model::RawValue;

/// Parses a string as a finite f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn finite_number(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(v) if v.is_finite() => Some(*v),
        RawValue::Number(_) | RawValue::Missing => None,
        RawValue::Text(text) => parse_f64(text),
    }
}

/// Quantity rule: parse, default to 0, truncate toward zero, take the
/// absolute value.
///
/// Negative quantities are treated as sign errors in the source data.
pub fn normalize_quantity(value: &RawValue) -> i64 {
    // `as` saturates at the i64 bounds.
    let truncated = finite_number(value).map_or(0, |v| v.trunc() as i64);
    truncated.saturating_abs()
}

/// Unit price rule: drop `$` and `,`, parse, default to 0.0. The sign is kept.
pub fn normalize_unit_price(value: &RawValue) -> f64 {
    match value {
        RawValue::Number(v) if v.is_finite() => *v,
        RawValue::Number(_) | RawValue::Missing => 0.0,
        RawValue::Text(text) => {
            let stripped: String = text.chars().filter(|ch| !matches!(ch, '$' | ',')).collect();
            parse_f64(&stripped).unwrap_or(0.0)
        }
    }
}

/// Parses a manually entered quantity without any coercion.
pub fn parse_quantity_strict(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    parse_f64(trimmed)
        .filter(|v| v.fract() == 0.0 && v.abs() < 9.0e15)
        .map(|v| v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_truncates_and_flips_sign() {
        assert_eq!(normalize_quantity(&RawValue::from("-5")), 5);
        assert_eq!(normalize_quantity(&RawValue::from("3.9")), 3);
        assert_eq!(normalize_quantity(&RawValue::from("-3.9")), 3);
        assert_eq!(normalize_quantity(&RawValue::Number(-12.0)), 12);
        assert_eq!(normalize_quantity(&RawValue::from(" 7 ")), 7);
    }

    #[test]
    fn quantity_defaults_to_zero() {
        assert_eq!(normalize_quantity(&RawValue::from("abc")), 0);
        assert_eq!(normalize_quantity(&RawValue::from("1,000")), 0);
        assert_eq!(normalize_quantity(&RawValue::from("nan")), 0);
        assert_eq!(normalize_quantity(&RawValue::from("inf")), 0);
        assert_eq!(normalize_quantity(&RawValue::Missing), 0);
        assert_eq!(normalize_quantity(&RawValue::Number(f64::NAN)), 0);
    }

    #[test]
    fn quantity_saturates() {
        assert_eq!(normalize_quantity(&RawValue::Number(-1e30)), i64::MAX);
    }

    #[test]
    fn price_strips_currency_formatting() {
        assert!((normalize_unit_price(&RawValue::from("$1,250.50")) - 1250.5).abs() < 1e-9);
        assert!((normalize_unit_price(&RawValue::from(" $ 99 ")) - 99.0).abs() < 1e-9);
        assert!((normalize_unit_price(&RawValue::Number(15.75)) - 15.75).abs() < 1e-9);
    }

    #[test]
    fn price_keeps_sign_and_defaults_to_zero() {
        assert!((normalize_unit_price(&RawValue::from("-20")) + 20.0).abs() < 1e-9);
        assert_eq!(normalize_unit_price(&RawValue::from("free")), 0.0);
        assert_eq!(normalize_unit_price(&RawValue::from("nan")), 0.0);
        assert_eq!(normalize_unit_price(&RawValue::Missing), 0.0);
    }

    #[test]
    fn strict_quantity_parsing() {
        assert_eq!(parse_quantity_strict("12"), Some(12));
        assert_eq!(parse_quantity_strict("-4"), Some(-4));
        assert_eq!(parse_quantity_strict("4.0"), Some(4));
        assert_eq!(parse_quantity_strict("4.5"), None);
        assert_eq!(parse_quantity_strict("doce"), None);
    }
}
