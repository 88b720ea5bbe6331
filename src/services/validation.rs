use crate::registry::OptionValue;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Integer(OptionValue),
    Text(String),
    Json(Value),
}

impl RawValue {
    pub fn from_json(value: &Value) -> Option<RawValue> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(RawValue::Text(text.clone())),
            other => Some(RawValue::Json(other.clone())),
        }
    }
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Json(Value::Null))
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(value) => write!(f, "{}", value),
            RawValue::Text(text) => f.write_str(text),
            RawValue::Json(value) => write!(f, "{}", value),
        }
    }
}

impl From<OptionValue> for RawValue {
    fn from(value: OptionValue) -> Self {
        RawValue::Integer(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Number(OptionValue),
    /// Integer syntax whose magnitude does not fit the option domain.
    Overflow { negative: bool },
    Invalid,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn candidate(&self, raw: &RawValue) -> Candidate {
        match raw {
            RawValue::Integer(value) => Candidate::Number(*value),
            RawValue::Text(text) => self.parse_text(text),
            RawValue::Json(value) => self.coerce_json(value),
        }
    }

    // [+-]digits, surrounding whitespace allowed
    pub fn parse_text(&self, text: &str) -> Candidate {
        let trimmed = text.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Candidate::Invalid;
        }
        match trimmed.parse::<OptionValue>() {
            Ok(value) => Candidate::Number(value),
            Err(_) => Candidate::Overflow { negative },
        }
    }

    fn coerce_json(&self, value: &Value) -> Candidate {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(value) => Candidate::Number(value),
                None => self.parse_text(&number.to_string()),
            },
            Value::String(text) => self.parse_text(text),
            _ => Candidate::Invalid,
        }
    }
}
