//! # Validation Module
//!
//! Input validation for values coming out of ERP form fields.
//!
//! ## Usage
//! ```rust
//! use erpkit_core::validation::{validate_attribute_value, validate_code_width};
//!
//! assert!(validate_attribute_value("Navy Blue").is_ok());
//! assert!(validate_code_width(3).is_ok());
//! assert!(validate_code_width(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ATTRIBUTE_VALUE_LEN, MAX_CODE_WIDTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an attribute value (e.g. a color name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 140 characters
pub fn validate_attribute_value(value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "attribute_value".to_string(),
        });
    }

    if value.chars().count() > MAX_ATTRIBUTE_VALUE_LEN {
        return Err(ValidationError::TooLong {
            field: "attribute_value".to_string(),
            max: MAX_ATTRIBUTE_VALUE_LEN,
        });
    }

    Ok(())
}

/// Validates a code width.
///
/// ## Rules
/// - Between 1 and 12 (the largest width whose values fit in a u64)
pub fn validate_code_width(width: usize) -> ValidationResult<()> {
    if width == 0 || width > MAX_CODE_WIDTH {
        return Err(ValidationError::OutOfRange {
            field: "code_width".to_string(),
            min: 1,
            max: MAX_CODE_WIDTH as i64,
        });
    }

    Ok(())
}

/// Validates a conflict key (employee ID, attribute value) is present.
pub fn validate_key(field: &str, key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_attribute_value() {
        assert!(validate_attribute_value("Red").is_ok());
        assert!(validate_attribute_value("").is_err());
        assert!(validate_attribute_value("   ").is_err());
        assert!(validate_attribute_value(&"A".repeat(140)).is_ok());
        assert!(validate_attribute_value(&"A".repeat(141)).is_err());
    }

    #[test]
    fn test_validate_code_width() {
        assert!(validate_code_width(1).is_ok());
        assert!(validate_code_width(12).is_ok());
        assert!(validate_code_width(0).is_err());
        assert!(validate_code_width(13).is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("employee", "HR-EMP-0001").is_ok());
        let err = validate_key("employee", " ").unwrap_err();
        assert_eq!(err.to_string(), "employee is required");
    }
}
