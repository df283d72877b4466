//! Null-safe numeric casts for instrument log fields.
//!
//! Instrument exports leave fields blank (or fill them with placeholder
//! tokens) whenever the tracker had no measurement for that column. A
//! failed conversion therefore yields `None` - "no measurement" - which
//! downstream code must keep distinct from a legitimate zero.

/// Parse an integer field, yielding `None` for anything non-numeric.
pub fn cast_int(field: &str) -> Option<i64> {
    field.trim().parse::<i64>().ok()
}

/// Parse a floating-point field, yielding `None` for anything non-numeric.
pub fn cast_float(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_int_well_formed() {
        assert_eq!(cast_int("42"), Some(42));
        assert_eq!(cast_int("-7"), Some(-7));
        assert_eq!(cast_int(" 13 "), Some(13));
    }

    #[test]
    fn test_cast_int_absent() {
        assert_eq!(cast_int(""), None);
        assert_eq!(cast_int("n/a"), None);
        assert_eq!(cast_int("3.5"), None);
    }

    #[test]
    fn test_cast_float_well_formed() {
        assert_eq!(cast_float("3.5"), Some(3.5));
        assert_eq!(cast_float("-0.25"), Some(-0.25));
        assert_eq!(cast_float("7"), Some(7.0));
    }

    #[test]
    fn test_cast_float_absent() {
        assert_eq!(cast_float(""), None);
        assert_eq!(cast_float("garbage"), None);
    }

    #[test]
    fn test_zero_is_not_absent() {
        assert_eq!(cast_int("0"), Some(0));
        assert_eq!(cast_float("0.0"), Some(0.0));
    }
}
