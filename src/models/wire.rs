//! Serde helpers for loosely typed client payloads.
//!
//! Clients send ids and phone numbers as either JSON strings or numbers, and
//! amounts as numbers or numeric strings. Both are normalized here so the
//! required-field checks only ever see one type.

use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Number;

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(Number),
}

/// `Option<String>` field that also accepts a JSON number, kept in its decimal form.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}

/// `Option<f64>` field that also accepts a numeric string. A blank string is absent.
pub fn number_or_text<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TextOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TextOrNumber::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("number {} out of range", number))),
        Some(TextOrNumber::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(TextOrNumber::Text(text)) => match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(de::Error::custom(format!(
                "invalid number {:?}, expected a number",
                text
            ))),
        },
    }
}

/// Write integral amounts as JSON integers (`10`, not `10.0`).
pub fn integral_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // i64 range check uses 2^63 as the exclusive bound
    if value.fract() == 0.0 && value.abs() < 9_223_372_036_854_775_808.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "text_or_number")]
        id: Option<String>,
        #[serde(default, deserialize_with = "number_or_text")]
        quantity: Option<f64>,
    }

    #[derive(Serialize)]
    struct Amount {
        #[serde(serialize_with = "integral_amount")]
        value: f64,
    }

    fn body(value: serde_json::Value) -> Result<Body, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_text_accepts_numbers() {
        assert_eq!(body(json!({ "id": 42 })).unwrap().id.as_deref(), Some("42"));
        assert_eq!(
            body(json!({ "id": 1112223333u64 })).unwrap().id.as_deref(),
            Some("1112223333")
        );
        assert_eq!(body(json!({ "id": "P1" })).unwrap().id.as_deref(), Some("P1"));
    }

    #[test]
    fn test_text_absent_or_null() {
        assert_eq!(body(json!({})).unwrap().id, None);
        assert_eq!(body(json!({ "id": null })).unwrap().id, None);
    }

    #[test]
    fn test_text_rejects_other_types() {
        assert!(body(json!({ "id": ["P1"] })).is_err());
        assert!(body(json!({ "id": { "x": 1 } })).is_err());
    }

    #[test]
    fn test_amount_accepts_numeric_strings() {
        assert_eq!(body(json!({ "quantity": "10" })).unwrap().quantity, Some(10.0));
        assert_eq!(body(json!({ "quantity": " 2.5 " })).unwrap().quantity, Some(2.5));
        assert_eq!(body(json!({ "quantity": 7 })).unwrap().quantity, Some(7.0));
        assert_eq!(body(json!({ "quantity": "" })).unwrap().quantity, None);
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        assert!(body(json!({ "quantity": "ten" })).is_err());
        assert!(body(json!({ "quantity": "NaN" })).is_err());
        assert!(body(json!({ "quantity": "inf" })).is_err());
    }

    #[test]
    fn test_integral_amounts_serialize_as_integers() {
        let whole = serde_json::to_string(&Amount { value: 10.0 }).unwrap();
        assert_eq!(whole, r#"{"value":10}"#);

        let fractional = serde_json::to_string(&Amount { value: 2.5 }).unwrap();
        assert_eq!(fractional, r#"{"value":2.5}"#);

        let negative = serde_json::to_string(&Amount { value: -3.0 }).unwrap();
        assert_eq!(negative, r#"{"value":-3}"#);
    }
}
