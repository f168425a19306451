//! Декодеры полей для нестрого типизированных данных хоста.
//!
//! Данные биллинга формирует JavaScript-хост: числа приходят строками,
//! строки числами, а флаги любым truthy-значением. Хелперы используются
//! через `#[serde(default, deserialize_with = "...")]`, чтобы отсутствующее
//! или странно типизированное поле не ломало весь payload.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Истинность JSON-значения в понимании хоста
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Строковое представление скаляра; `None` для null, массивов и объектов
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Целые float печатаются без `.0` ("5", а не "5.0")
fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

/// `true` только для литерала JSON `true`
pub fn strictly_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(&Value::deserialize(deserializer)?))
}

/// Как [`opt_string`], но falsy-значения (`0`, `""`, `false`) дают `None`
pub fn opt_truthy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !is_truthy(&value) {
        return Ok(None);
    }
    Ok(scalar_to_string(&value))
}

/// Всё, что не массив, превращается в пустой список
pub fn seq_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            serde_json::from_value(Value::Array(items)).map_err(D::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!(1.5)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&json!("$1.00")).as_deref(), Some("$1.00"));
        assert_eq!(scalar_to_string(&json!(42)).as_deref(), Some("42"));
        assert_eq!(scalar_to_string(&json!(5.0)).as_deref(), Some("5"));
        assert_eq!(scalar_to_string(&json!(-12.75)).as_deref(), Some("-12.75"));
        assert_eq!(scalar_to_string(&json!(null)), None);
        assert_eq!(scalar_to_string(&json!({"a": 1})), None);
    }

    #[derive(Deserialize)]
    struct Lines {
        #[serde(default, deserialize_with = "seq_or_empty")]
        lines: Vec<u32>,
    }

    #[test]
    fn test_seq_or_empty() {
        let read = |v: Value| serde_json::from_value::<Lines>(v).unwrap().lines;
        assert_eq!(read(json!({"lines": [1, 2]})), vec![1, 2]);
        assert!(read(json!({"lines": null})).is_empty());
        assert!(read(json!({"lines": {}})).is_empty());
        assert!(read(json!({"lines": "n/a"})).is_empty());
        assert!(read(json!({})).is_empty());
        assert!(serde_json::from_value::<Lines>(json!({"lines": ["x"]})).is_err());
    }
}
