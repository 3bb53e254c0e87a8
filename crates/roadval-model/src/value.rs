//! Tagged cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell of a survey table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Absent, null, or whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(n) => n.is_nan(),
            Self::Bool(_) => false,
        }
    }

    /// Numeric coercion. Text is trimmed before parsing; NaN never coerces.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(n) if n.is_nan() => None,
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(text) => parse_number(text),
        }
    }

    /// Short type name used in checker messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
        }
    }

    /// Canonical text form: numbers without trailing zeros, text trimmed,
    /// null as the empty string.
    pub fn canonical(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(text) => text.trim().to_string(),
            Self::Number(n) => format_numeric(*n),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => f.write_str(&format_numeric(*n)),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Formats a number without a fractional part when it has none.
///
/// ```
/// use roadval_model::format_numeric;
///
/// assert_eq!(format_numeric(500.0), "500");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(f64::INFINITY), "inf");
/// ```
pub fn format_numeric(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values() {
        assert!(Value::Null.is_empty());
        assert!(Value::text("").is_empty());
        assert!(Value::text("   ").is_empty());
        assert!(Value::Number(f64::NAN).is_empty());
        assert!(!Value::text("0").is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::text(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Value::text("abc").as_number(), None);
        assert_eq!(Value::text("NaN").as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), Some(1.0));
        assert_eq!(Value::Number(3.0).as_number(), Some(3.0));
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(Value::Number(1200.0).canonical(), "1200");
        assert_eq!(Value::Number(-0.0).canonical(), "0");
        assert_eq!(Value::text(" 110512345678 ").canonical(), "110512345678");
        assert_eq!(Value::Null.canonical(), "");
        assert_eq!(format_numeric(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_numeric(0.25), "0.25");
    }

    #[test]
    fn value_serializes_tagged() {
        let json = serde_json::to_string(&Value::Number(2.0)).expect("serialize");
        assert_eq!(json, r#"{"kind":"number","value":2.0}"#);
    }
}
