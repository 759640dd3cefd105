//! Normalization of the catalog's heterogeneous textual nutrient values.
//! Upstream data mixes comma decimals, unit suffixes ("12.5 g"), empty
//! cells and the "tr" trace marker, so parsing is lenient by contract:
//! anything unusable becomes 0.0, nothing ever errors.

use lazy_static::lazy_static;
use regex::Regex;

/// Short token the catalog uses for "present in trace amounts".
const TRACE_MARKER: &str = "tr";

lazy_static! {
    static ref NUMERIC_PART: Regex = Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex");
}

/// Converts a raw per-100g value into a finite float.
///
/// Null and empty input, the trace marker, and anything with no numeric
/// content all yield 0.0. A comma is accepted as decimal separator. When
/// the whole string does not parse, the first contiguous signed-decimal
/// substring is used instead.
pub fn normalize(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let cleaned = raw.trim().to_lowercase().replace(',', ".");
    if cleaned.is_empty() || cleaned == TRACE_MARKER {
        return 0.0;
    }
    if let Ok(value) = cleaned.parse::<f64>() {
        // "inf" and "nan" parse; the contract promises finite output.
        if value.is_finite() {
            return value;
        }
    }
    NUMERIC_PART
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Variant used by the reference-intake loader: strips stray single and
/// double quotes left over from CSV quoting before normalizing.
pub fn normalize_quoted(raw: &str) -> f64 {
    normalize(Some(&raw.replace(['\'', '"'], "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_empty_and_trace_are_zero() {
        assert_eq!(normalize(None), 0.0);
        assert_eq!(normalize(Some("")), 0.0);
        assert_eq!(normalize(Some("   ")), 0.0);
        assert_eq!(normalize(Some("tr")), 0.0);
        assert_eq!(normalize(Some("TR")), 0.0);
        assert_eq!(normalize(Some(" Tr ")), 0.0);
    }

    #[test]
    fn comma_is_a_decimal_separator() {
        assert_eq!(normalize(Some("12,5")), 12.5);
        assert_eq!(normalize(Some("0,07")), 0.07);
    }

    #[test]
    fn falls_back_to_first_numeric_substring() {
        assert_eq!(normalize(Some("12.5 g")), 12.5);
        assert_eq!(normalize(Some("circa 3,2 mg")), 3.2);
        assert_eq!(normalize(Some("-1.5 mg")), -1.5);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(normalize(Some("abc")), 0.0);
        assert_eq!(normalize(Some("--")), 0.0);
    }

    #[test]
    fn non_finite_never_escapes() {
        assert_eq!(normalize(Some("inf")), 0.0);
        assert_eq!(normalize(Some("nan")), 0.0);
        assert_eq!(normalize(Some("-inf")), 0.0);
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(normalize(Some("42")), 42.0);
        assert_eq!(normalize(Some("3.75")), 3.75);
    }

    #[test]
    fn quoted_variant_strips_quotes() {
        assert_eq!(normalize_quoted("'12,5'"), 12.5);
        assert_eq!(normalize_quoted("\"830\""), 830.0);
        assert_eq!(normalize_quoted("''"), 0.0);
    }
}
