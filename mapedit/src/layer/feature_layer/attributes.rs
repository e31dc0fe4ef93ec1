//! Attribute schema and values of features.
//!
//! A layer's schema is advisory metadata: it drives which fields a new feature is
//! initialized with, but nothing prevents a feature's property bag from diverging from it
//! later (e.g. through ad-hoc field addition).

use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Type of an attribute field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-form text.
    String,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float.
    Float,
    /// `true` / `false`.
    Boolean,
    /// Calendar date without time.
    Date,
}

impl FieldType {
    /// Parses a field type from its wire name (`"string"`, `"integer"`, ...). Returns `None`
    /// for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldType::String),
            "integer" => Some(FieldType::Integer),
            "float" => Some(FieldType::Float),
            "boolean" => Some(FieldType::Boolean),
            "date" => Some(FieldType::Date),
            _ => None,
        }
    }
}

/// One field of a layer's attribute schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Name of the field.
    pub name: String,
    /// Type of the field's values.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDef {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Value of an attribute field.
///
/// Property bags are untyped: any field can hold any value, the schema's field type is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Boolean(bool),
    /// Integer value.
    Integer(i64),
    /// Float value.
    Float(f64),
    /// Date value.
    Date(NaiveDate),
    /// String value.
    String(String),
    /// Absent value (e.g. a field added with an unknown type).
    Null,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Null => write!(f, "null"),
        }
    }
}

/// Default value for a field of the given type, used when a feature is created for a layer
/// with a schema and when a field is added to a feature ad hoc.
pub fn default_value(field_type: FieldType) -> Value {
    match field_type {
        FieldType::String => Value::String(String::new()),
        FieldType::Integer => Value::Integer(0),
        FieldType::Float => Value::Float(0.0),
        FieldType::Boolean => Value::Boolean(false),
        FieldType::Date => Value::Date(chrono::Local::now().date_naive()),
    }
}

/// Coerces a string submitted through an attribute form into a typed value.
///
/// The precedence is fixed: a full number containing `.` becomes a float, a full integer
/// becomes an integer, `true`/`false` (case-insensitive) becomes a boolean, and anything
/// else stays a string, unchanged.
pub fn coerce_input(input: &str) -> Value {
    let trimmed = input.trim();

    if trimmed.contains('.') {
        if let Ok(float) = trimmed.parse::<f64>() {
            return Value::Float(float);
        }
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Integer(int);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    Value::String(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_precedence() {
        assert_eq!(coerce_input("3.14"), Value::Float(3.14));
        assert_eq!(coerce_input("42"), Value::Integer(42));
        assert_eq!(coerce_input("  42  "), Value::Integer(42));
        assert_eq!(coerce_input("True"), Value::Boolean(true));
        assert_eq!(coerce_input("FALSE"), Value::Boolean(false));
        assert_eq!(coerce_input("hello"), Value::String("hello".to_string()));
        assert_eq!(coerce_input(""), Value::String(String::new()));
    }

    #[test]
    fn coercion_keeps_partial_numbers_as_strings() {
        assert_eq!(coerce_input("42abc"), Value::String("42abc".to_string()));
        assert_eq!(coerce_input("3.1.4"), Value::String("3.1.4".to_string()));
    }

    #[test]
    fn defaults_by_type() {
        assert_eq!(default_value(FieldType::String), Value::String(String::new()));
        assert_eq!(default_value(FieldType::Integer), Value::Integer(0));
        assert_eq!(default_value(FieldType::Float), Value::Float(0.0));
        assert_eq!(default_value(FieldType::Boolean), Value::Boolean(false));

        let today = chrono::Local::now().date_naive();
        assert_eq!(default_value(FieldType::Date), Value::Date(today));
        // the Date default renders as YYYY-MM-DD
        assert_eq!(
            default_value(FieldType::Date).to_string(),
            today.format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn field_type_names() {
        assert_eq!(FieldType::from_name("string"), Some(FieldType::String));
        assert_eq!(FieldType::from_name("date"), Some(FieldType::Date));
        assert_eq!(FieldType::from_name("geometry"), None);
    }
}
