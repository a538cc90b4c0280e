//! # Attribute Catalog
//!
//! In-memory bookkeeping for one category's `(value, code)` pairs. Loading
//! and saving the pairs is the caller's job; this type only decides the next
//! code and rejects duplicates.
//!
//! ## Add Flow
//! ```text
//! add("dark-blue")
//!      │
//!      ├── validate_attribute_value ──► Required / TooLong
//!      ├── to_proper_case (if configured) → "Dark-Blue"
//!      ├── already present? ──────────► Duplicate
//!      ├── successor of max code ─────► CodeSpaceExhausted
//!      ▼
//! AttributeValue { value: "Dark-Blue", code: "00C" }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::case::to_proper_case;
use crate::category::{AttributeCategory, CategoryConfig};
use crate::code::{Code, CodePolicy};
use crate::error::{CodeError, CoreError, CoreResult, ValidationError};
use crate::overlap::{find_duplicate_keys, ConflictDescriptor};
use crate::validation::validate_attribute_value;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttributeValue {
    pub value: String,
    pub code: Code,
}

/// A batch value that is already in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExistingMatch {
    /// Position in the batch.
    pub index: usize,
    /// The entry it collides with.
    pub entry: AttributeValue,
}

/// Result of checking a batch before adding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchReport {
    /// Pairs of equal values inside the batch.
    pub conflicts: Vec<ConflictDescriptor>,
    /// Batch values already in the catalog.
    pub existing: Vec<ExistingMatch>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.existing.is_empty()
    }
}

fn comparable(value: &str) -> String {
    value.trim().to_lowercase()
}

/// The values and codes of one category.
#[derive(Debug, Clone)]
pub struct AttributeCatalog {
    category: AttributeCategory,
    config: CategoryConfig,
    policy: CodePolicy,
    entries: Vec<AttributeValue>,
}

impl AttributeCatalog {
    /// Creates an empty catalog.
    pub fn new(category: AttributeCategory, config: CategoryConfig) -> CoreResult<Self> {
        let policy = config.code_policy()?;
        Ok(AttributeCatalog {
            category,
            config,
            policy,
            entries: Vec::new(),
        })
    }

    /// Creates a catalog from previously stored entries.
    ///
    /// ## Rules
    /// - Every code has the category's width
    /// - Values are unique (case-insensitive)
    /// - Codes are unique
    pub fn with_entries(
        category: AttributeCategory,
        config: CategoryConfig,
        entries: Vec<AttributeValue>,
    ) -> CoreResult<Self> {
        let mut catalog = Self::new(category, config)?;

        let mut values = HashSet::new();
        let mut codes = HashSet::new();
        for entry in &entries {
            if entry.code.width() != catalog.config.code_width {
                return Err(ValidationError::InvalidFormat {
                    field: "code".to_string(),
                    reason: format!(
                        "'{}' is not {} characters wide",
                        entry.code, catalog.config.code_width
                    ),
                }
                .into());
            }
            if !values.insert(comparable(&entry.value)) {
                return Err(ValidationError::Duplicate {
                    field: "attribute_value".to_string(),
                    value: entry.value.clone(),
                }
                .into());
            }
            if !codes.insert(entry.code.clone()) {
                return Err(ValidationError::Duplicate {
                    field: "code".to_string(),
                    value: entry.code.to_string(),
                }
                .into());
            }
        }

        catalog.entries = entries;
        Ok(catalog)
    }

    #[inline]
    pub fn category(&self) -> AttributeCategory {
        self.category
    }

    #[inline]
    pub fn entries(&self) -> &[AttributeValue] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest code in use.
    pub fn max_code(&self) -> Option<&Code> {
        self.entries.iter().map(|e| &e.code).max()
    }

    /// Looks up an entry by value (trimmed, case-insensitive).
    pub fn find(&self, value: &str) -> Option<&AttributeValue> {
        let wanted = comparable(value);
        self.entries.iter().find(|e| comparable(&e.value) == wanted)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    /// The code the next added value would get.
    ///
    /// An empty catalog starts at the all-zero code. Running past the all-`Z`
    /// code is [`CoreError::CodeSpaceExhausted`], never a silent wrap.
    pub fn next_code(&self) -> CoreResult<Code> {
        let Some(max) = self.max_code() else {
            return Ok(Code::zero(self.config.code_width)?);
        };

        self.policy.try_advance(max.as_str()).map_err(|err| match err {
            CodeError::Overflow { width } => CoreError::CodeSpaceExhausted {
                category: self.category.to_string(),
                width,
            },
            other => CoreError::Code(other),
        })
    }

    /// Adds a value and assigns it the next code.
    pub fn add(&mut self, value: &str) -> CoreResult<AttributeValue> {
        validate_attribute_value(value)?;

        let value = self.prepare(value);
        if let Some(existing) = self.find(&value) {
            return Err(ValidationError::Duplicate {
                field: "attribute_value".to_string(),
                value: existing.value.clone(),
            }
            .into());
        }

        let entry = AttributeValue {
            value,
            code: self.next_code()?,
        };

        info!(
            category = %self.category,
            value = %entry.value,
            code = %entry.code,
            "Added attribute value"
        );
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Checks a batch against itself and against the catalog.
    pub fn validate_batch<S: AsRef<str>>(&self, values: &[S]) -> BatchReport {
        let existing = values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                self.find(value.as_ref()).map(|entry| ExistingMatch {
                    index,
                    entry: entry.clone(),
                })
            })
            .collect();

        BatchReport {
            conflicts: find_duplicate_keys(values),
            existing,
        }
    }

    /// Adds a whole batch, or nothing if any value conflicts.
    pub fn add_batch<S: AsRef<str>>(&mut self, values: &[S]) -> CoreResult<Vec<AttributeValue>> {
        for value in values {
            validate_attribute_value(value.as_ref())?;
        }

        let report = self.validate_batch(values);
        if let Some(found) = report.existing.first() {
            return Err(ValidationError::Duplicate {
                field: "attribute_value".to_string(),
                value: found.entry.value.clone(),
            }
            .into());
        }
        if !report.conflicts.is_empty() {
            return Err(CoreError::Conflicts(report.conflicts));
        }

        // Check capacity up front so a failure leaves the catalog untouched.
        let mut staged = Vec::with_capacity(values.len());
        let mut current = self.max_code().cloned();
        for value in values {
            let code = match &current {
                None => Code::zero(self.config.code_width)?,
                Some(max) => {
                    let (next, wrapped) = max.successor();
                    if wrapped {
                        return Err(CoreError::CodeSpaceExhausted {
                            category: self.category.to_string(),
                            width: max.width(),
                        });
                    }
                    next
                }
            };
            current = Some(code.clone());
            staged.push(AttributeValue {
                value: self.prepare(value.as_ref()),
                code,
            });
        }

        info!(category = %self.category, added = staged.len(), "Added attribute batch");
        self.entries.extend(staged.iter().cloned());
        Ok(staged)
    }

    fn prepare(&self, value: &str) -> String {
        if self.config.normalize_case {
            to_proper_case(value)
        } else {
            value.trim().to_string()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> AttributeCatalog {
        AttributeCatalog::new(AttributeCategory::Color, CategoryConfig::new(3, true)).unwrap()
    }

    fn entry(value: &str, code: &str) -> AttributeValue {
        AttributeValue {
            value: value.to_string(),
            code: Code::parse(code).unwrap(),
        }
    }

    #[test]
    fn test_first_code_is_zero() {
        let mut catalog = colors();
        assert_eq!(catalog.next_code().unwrap().as_str(), "000");

        let added = catalog.add("red").unwrap();
        assert_eq!(added.value, "Red");
        assert_eq!(added.code.as_str(), "000");
        assert_eq!(catalog.add("navy blue").unwrap().code.as_str(), "001");
    }

    #[test]
    fn test_continues_from_max_code() {
        let catalog = AttributeCatalog::with_entries(
            AttributeCategory::Color,
            CategoryConfig::new(3, true),
            vec![entry("Red", "009"), entry("Blue", "003")],
        )
        .unwrap();
        assert_eq!(catalog.max_code().unwrap().as_str(), "009");
        assert_eq!(catalog.next_code().unwrap().as_str(), "00A");
    }

    #[test]
    fn test_duplicate_values_rejected() {
        let mut catalog = colors();
        catalog.add("Red").unwrap();

        let err = catalog.add("  RED ").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { ref value, .. }) if value == "Red"
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_exhausted_catalog_does_not_wrap() {
        let mut catalog = AttributeCatalog::with_entries(
            AttributeCategory::Size,
            CategoryConfig::new(2, false),
            vec![entry("XXL", "ZZ")],
        )
        .unwrap();

        assert!(matches!(
            catalog.add("XXXL"),
            Err(CoreError::CodeSpaceExhausted { width: 2, .. })
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_without_case_normalization_value_is_trimmed() {
        let mut catalog =
            AttributeCatalog::new(AttributeCategory::Size, CategoryConfig::new(2, false)).unwrap();
        assert_eq!(catalog.add(" xl ").unwrap().value, "xl");
    }

    #[test]
    fn test_with_entries_rules() {
        let config = CategoryConfig::new(3, true);

        let wrong_width = AttributeCatalog::with_entries(
            AttributeCategory::Color,
            config.clone(),
            vec![entry("Red", "01")],
        );
        assert!(wrong_width.is_err());

        let dup_value = AttributeCatalog::with_entries(
            AttributeCategory::Color,
            config.clone(),
            vec![entry("Red", "001"), entry("red", "002")],
        );
        assert!(dup_value.is_err());

        let dup_code = AttributeCatalog::with_entries(
            AttributeCategory::Color,
            config,
            vec![entry("Red", "001"), entry("Blue", "001")],
        );
        assert!(dup_code.is_err());
    }

    #[test]
    fn test_validate_batch_reports_both_sources() {
        let mut catalog = colors();
        catalog.add("Red").unwrap();

        let report = catalog.validate_batch(&["Green", "red", "GREEN"]);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].first.index, 0);
        assert_eq!(report.conflicts[0].second.index, 2);
        assert_eq!(report.existing.len(), 1);
        assert_eq!(report.existing[0].index, 1);
        assert!(!report.is_clean());

        assert!(catalog.validate_batch(&["Olive", "Teal"]).is_clean());
    }

    #[test]
    fn test_add_batch_is_all_or_nothing() {
        let mut catalog = colors();
        catalog.add("Red").unwrap();

        assert!(catalog.add_batch(&["Olive", "olive"]).is_err());
        assert!(catalog.add_batch(&["Olive", "RED"]).is_err());
        assert_eq!(catalog.len(), 1);

        let added = catalog.add_batch(&["olive", "teal green"]).unwrap();
        let codes: Vec<_> = added.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["001", "002"]);
        assert_eq!(added[1].value, "Teal Green");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_add_batch_checks_capacity_first() {
        let mut catalog = AttributeCatalog::with_entries(
            AttributeCategory::Season,
            CategoryConfig::new(2, true),
            vec![entry("26Ss", "ZY")],
        )
        .unwrap();

        assert!(matches!(
            catalog.add_batch(&["26aw", "27ss"]),
            Err(CoreError::CodeSpaceExhausted { .. })
        ));
        assert_eq!(catalog.len(), 1);
    }
}
