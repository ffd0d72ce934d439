//! Lenient field decoders for backend payloads.
//!
//! A malformed field never fails its record: it decodes to the field's empty value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Renders strings and numbers as text; anything else gives `None`.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Optional free text. Numbers are kept as their decimal rendering.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Required text, empty when missing or not a scalar.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional text normalized to trimmed lowercase, for enum-like fields.
pub fn keyword<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).map(|raw| raw.trim().to_lowercase()))
}

/// A flag: `true`, `"true"`, `"yes"`, `"1"` or a non-zero number. Anything else is false.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(f64::is_normal),
        Value::String(raw) => matches!(
            raw.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    })
}

/// A record id; numbers are accepted, anything else leaves the id unassigned.
pub fn id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(scalar_text(Value::deserialize(deserializer)?)
        .filter(|raw| !raw.trim().is_empty())
        .map_or_else(T::default, T::from))
}

/// Optional id of a referenced record.
pub fn optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?)
        .filter(|raw| !raw.trim().is_empty())
        .map(T::from))
}

/// A list of text values; non-text entries are dropped and a non-list gives `None`.
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(raw) => Some(raw),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "super::string")]
        string: String,
        #[serde(default, deserialize_with = "super::flag")]
        flag: bool,
    }

    fn decode(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!("yes"), true)]
    #[case(json!(" TRUE "), true)]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    #[case(json!(null), false)]
    #[case(json!("no"), false)]
    #[case(json!({"on": true}), false)]
    fn test_flag(#[case] value: serde_json::Value, #[case] expected: bool) {
        assert_eq!(decode(json!({ "flag": value })).flag, expected);
    }

    #[test]
    fn test_text_and_string() {
        let decoded = decode(json!({"text": 1042, "string": null}));
        assert_eq!(decoded.text.as_deref(), Some("1042"));
        assert_eq!(decoded.string, "");

        let decoded = decode(json!({"text": ["a"], "string": "INV-9"}));
        assert_eq!(decoded.text, None);
        assert_eq!(decoded.string, "INV-9");
    }

    #[test]
    fn test_missing_fields_default() {
        let decoded = decode(json!({}));
        assert_eq!(decoded.text, None);
        assert!(!decoded.flag);
    }
}
