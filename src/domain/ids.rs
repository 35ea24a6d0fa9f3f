//! Record identifiers
//!
//! The backend hands out ids as strings (`"64f1..."`) or, for older
//! records, as plain numbers. Both decode into the same `RecordId`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::DomainError;

/// Identifier of a course or user account, normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create an identifier from a non-empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<Value> for RecordId {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => RecordId::new(s),
            Value::Number(n) => RecordId::new(n.to_string()),
            other => Err(DomainError::InvalidIdentifier(other.to_string())),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl TryFrom<&str> for RecordId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        RecordId::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_id() {
        let id: RecordId = serde_json::from_value(json!("c1")).unwrap();
        assert_eq!(id.as_str(), "c1");
    }

    #[test]
    fn test_numeric_id() {
        let id: RecordId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_empty_id_rejected() {
        let result: Result<RecordId, _> = serde_json::from_value(json!("  "));
        assert!(result.is_err());
    }

    #[test]
    fn test_object_id_rejected() {
        let result: Result<RecordId, _> = serde_json::from_value(json!({ "id": "c1" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = RecordId::new("u7").unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("u7"));
    }
}
