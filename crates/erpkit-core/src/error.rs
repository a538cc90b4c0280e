//! # Error Types
//!
//! Domain-specific error types for erpkit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  erpkit-core errors (this file)                                        │
//! │  ├── CodeError        - Sequential code failures (seed, overflow)      │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CoreError        - General domain errors                          │
//! │                                                                         │
//! │  erpkit-cli errors (separate crate)                                    │
//! │  └── CliError         - Config, I/O and JSON failures                  │
//! │                                                                         │
//! │  Flow: CodeError / ValidationError → CoreError → CliError → stderr     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Conflicts found by the overlap validator are not errors: they come back
//! as [`ConflictDescriptor`] reports. [`CoreError::Conflicts`] exists for
//! callers that want to turn a non-empty report into a blocked save.

use thiserror::Error;

use crate::overlap::ConflictDescriptor;

// =============================================================================
// Code Error
// =============================================================================

/// Failures of the strict sequential code API.
///
/// The lenient API ([`crate::code::next_code`]) never returns these; it maps
/// them to a seed or a wrapped code and tags the outcome instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Input cannot be used as the current code.
    ///
    /// ## When This Occurs
    /// - Empty input (fresh catalog with no codes yet)
    /// - Width outside the policy (e.g. 4 characters when only 2 or 3 allowed)
    /// - Characters outside `0-9A-Z`
    #[error("Invalid seed '{input}': {reason}")]
    InvalidSeed { input: String, reason: String },

    /// Every code of this width has been handed out.
    #[error("Code space exhausted for width {width}")]
    Overflow { width: usize },

    /// Width is not usable (zero, or not allowed by policy).
    #[error("Invalid code width: {width}")]
    InvalidWidth { width: usize },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog has no free code left for its category.
    #[error("No codes left for {category}: all {width}-character codes are in use")]
    CodeSpaceExhausted { category: String, width: usize },

    /// Quantity totals no longer fit in an i64.
    #[error("Quantity overflow while totalling group '{group}'")]
    QuantityOverflow { group: String },

    /// At least one duplicate or overlap was found.
    #[error("{} conflicting entries found", .0.len())]
    Conflicts(Vec<ConflictDescriptor>),

    /// Sequential code error (wraps CodeError).
    #[error("Code error: {0}")]
    Code(#[from] CodeError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. unknown category, inverted range).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. duplicate attribute value).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CodeSpaceExhausted {
            category: "size".to_string(),
            width: 2,
        };
        assert_eq!(
            err.to_string(),
            "No codes left for size: all 2-character codes are in use"
        );

        let err = CodeError::Overflow { width: 3 };
        assert_eq!(err.to_string(), "Code space exhausted for width 3");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "attribute_value".to_string(),
            value: "Red".to_string(),
        };
        assert_eq!(err.to_string(), "attribute_value 'Red' already exists");
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "key".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = CodeError::InvalidWidth { width: 0 }.into();
        assert!(matches!(core_err, CoreError::Code(_)));
    }

    #[test]
    fn test_conflicts_message_counts_entries() {
        let err = CoreError::Conflicts(Vec::new());
        assert_eq!(err.to_string(), "0 conflicting entries found");
    }
}
