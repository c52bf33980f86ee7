use crate::error::GirderError;
use crate::model::{FieldKind, FieldValue};

/// Parse raw text for a field of the given kind.
///
/// Handles formats like:
/// - "Clay" -> Text("Clay") for text fields
/// - "150" -> Integer(150)
/// - " 150 " -> Integer(150)
/// - "30-40" -> Range(30, 40) for range-capable fields
/// - "30 - 40" -> Range(30, 40)
pub fn parse_value(field: &str, raw: &str, kind: FieldKind) -> Result<FieldValue, GirderError> {
    let s = raw.trim();
    match kind {
        FieldKind::Text => Ok(FieldValue::Text(s.to_string())),
        FieldKind::Integer => parse_integer(field, s).map(FieldValue::Integer),
        FieldKind::IntegerOrRange => match s.split_once('-') {
            Some((lo, hi)) => Ok(FieldValue::Range(
                parse_integer(field, lo)?,
                parse_integer(field, hi)?,
            )),
            None => parse_integer(field, s).map(FieldValue::Integer),
        },
    }
}

/// Values of fields outside the known vocabulary: integer when the text is
/// one, text otherwise.
pub fn infer_value(raw: &str) -> FieldValue {
    let s = raw.trim();
    s.parse::<i64>()
        .map(FieldValue::Integer)
        .unwrap_or_else(|_| FieldValue::Text(s.to_string()))
}

fn parse_integer(field: &str, s: &str) -> Result<i64, GirderError> {
    let s = s.trim();
    s.parse::<i64>().map_err(|e| {
        GirderError::Preprocess(format!("{}: invalid integer '{}': {}", field, s, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer() {
        let v = parse_value("Floors", "3", FieldKind::Integer).unwrap();
        assert_eq!(v, FieldValue::Integer(3));
    }

    #[test]
    fn test_whitespace_trimming() {
        let v = parse_value("Area (sq. m)", "  150  ", FieldKind::Integer).unwrap();
        assert_eq!(v, FieldValue::Integer(150));
    }

    #[test]
    fn test_text_kept_verbatim() {
        let v = parse_value("Soil Type", " Clay ", FieldKind::Text).unwrap();
        assert_eq!(v, FieldValue::from("Clay"));
    }

    #[test]
    fn test_range() {
        let v = parse_value("Wind Speed (km/h)", "30-40", FieldKind::IntegerOrRange).unwrap();
        assert_eq!(v, FieldValue::Range(30, 40));
    }

    #[test]
    fn test_range_with_spaces() {
        let v = parse_value("Wind Speed (km/h)", "30 - 40", FieldKind::IntegerOrRange).unwrap();
        assert_eq!(v, FieldValue::Range(30, 40));
    }

    #[test]
    fn test_single_value_for_range_field() {
        let v = parse_value("Wind Speed (km/h)", "45", FieldKind::IntegerOrRange).unwrap();
        assert_eq!(v, FieldValue::Integer(45));
    }

    #[test]
    fn test_invalid_integer_names_field() {
        let err = parse_value("Floors", "three", FieldKind::Integer).unwrap_err();
        assert!(matches!(err, GirderError::Preprocess(_)));
        assert!(err.to_string().contains("Floors"));
        assert!(err.to_string().contains("three"));
    }

    #[test]
    fn test_empty_integer_rejected() {
        assert!(parse_value("Floors", "", FieldKind::Integer).is_err());
    }

    #[test]
    fn test_malformed_range_rejected() {
        assert!(parse_value("Wind Speed (km/h)", "30-", FieldKind::IntegerOrRange).is_err());
        assert!(parse_value("Wind Speed (km/h)", "a-b", FieldKind::IntegerOrRange).is_err());
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(infer_value("12"), FieldValue::Integer(12));
        assert_eq!(infer_value("Seismic"), FieldValue::from("Seismic"));
    }
}
