//! Validation error types for product records
//!
//! A failed validation never reports a single error: every violated field
//! contributes one `FieldViolation`, and the whole set travels together as
//! `ValidationErrors`.

use std::fmt;

/// A single field-level constraint violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as it appears on the wire (e.g. "price")
    pub field: &'static str,
    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("Product {} is required", label))
    }

    pub fn not_a_number(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("{} must be a number", label))
    }

    pub fn negative(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("{} cannot be negative", label))
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Aggregated validation failure
///
/// Display joins all messages with ", " in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns the individual violations
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns true if any violation concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Messages in recorded order
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Converts an accumulated set into a result: empty means success.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldViolation> for ValidationErrors {
    fn from(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_join_with_comma() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldViolation::required("name", "name"));
        errors.push(FieldViolation::negative("price", "Price"));

        assert_eq!(
            errors.to_string(),
            "Product name is required, Price cannot be negative"
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("price"));
        assert!(!errors.has_field("quantity"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));

        let errors = ValidationErrors::from(FieldViolation::not_a_number("quantity", "Quantity"));
        let err = errors.into_result(()).unwrap_err();
        assert_eq!(err.messages(), vec!["Quantity must be a number"]);
    }
}
