//! Inline validation of declared input constraints

use super::field::{FieldKind, FieldSpec, FieldValue, IntegerInput};
use thiserror::Error;

/// A field whose value breaks its input constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: \"{raw}\" is not a number")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field}: must be {min} or more (got {value})")]
    BelowMinimum {
        field: &'static str,
        min: i64,
        value: i64,
    },

    #[error("{field}: \"{value}\" is not an email address")]
    InvalidEmail { field: &'static str, value: String },
}

impl ValidationError {
    /// Label of the field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotANumber { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::InvalidEmail { field, .. } => field,
        }
    }
}

/// Check a value against the constraint its field declares
pub fn validate_field(spec: &FieldSpec, value: &FieldValue) -> Option<ValidationError> {
    match (spec.kind, value) {
        (FieldKind::Number { .. }, FieldValue::Integer(IntegerInput::Invalid(raw))) => {
            Some(ValidationError::NotANumber {
                field: spec.label,
                raw: raw.clone(),
            })
        }
        (FieldKind::Number { min }, FieldValue::Integer(IntegerInput::Value(value)))
            if *value < min =>
        {
            Some(ValidationError::BelowMinimum {
                field: spec.label,
                min,
                value: *value,
            })
        }
        (FieldKind::Email, FieldValue::Text(text)) if !text.is_empty() && !is_email(text) => {
            Some(ValidationError::InvalidEmail {
                field: spec.label,
                value: text.clone(),
            })
        }
        _ => None,
    }
}

/// Loose `local@domain` shape check
fn is_email(text: &str) -> bool {
    let text = text.trim();
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !text.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THRESHOLD: FieldSpec =
        FieldSpec::new("alertThreshold", "Alert threshold", "", FieldKind::Number { min: 0 });
    const EMAIL: FieldSpec = FieldSpec::new("email", "Email", "", FieldKind::Email);

    #[test]
    fn test_not_a_number() {
        let value = FieldValue::Integer(IntegerInput::parse("ten"));
        assert_eq!(
            validate_field(&THRESHOLD, &value),
            Some(ValidationError::NotANumber {
                field: "Alert threshold",
                raw: "ten".to_string()
            })
        );
    }

    #[test]
    fn test_below_minimum() {
        let value = FieldValue::Integer(IntegerInput::Value(-1));
        let error = validate_field(&THRESHOLD, &value).unwrap();
        assert_eq!(error.to_string(), "Alert threshold: must be 0 or more (got -1)");
    }

    #[test]
    fn test_zero_is_valid() {
        let value = FieldValue::Integer(IntegerInput::Value(0));
        assert!(validate_field(&THRESHOLD, &value).is_none());
    }

    #[test]
    fn test_empty_email_is_valid() {
        assert!(validate_field(&EMAIL, &FieldValue::Text(String::new())).is_none());
    }

    #[test]
    fn test_email_shapes() {
        let check = |s: &str| validate_field(&EMAIL, &FieldValue::Text(s.to_string()));
        assert!(check("admin@example.co.jp").is_none());
        assert!(check("admin").is_some());
        assert!(check("@example.com").is_some());
        assert!(check("a@b@c").is_some());
        assert!(check("a b@example.com").is_some());
    }

    #[test]
    fn test_field_label_is_exposed() {
        let error = validate_field(&EMAIL, &FieldValue::Text("nope".to_string())).unwrap();
        assert_eq!(error.field(), "Email");
    }
}
