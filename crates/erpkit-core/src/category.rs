//! # Attribute Categories
//!
//! Explicit category identifiers with a lookup table of per-category
//! settings. Category behavior is chosen by exact, validated identifiers,
//! never by substring matching on free text.
//!
//! ## Default Table
//! ```text
//! ┌──────────┬────────────┬────────────────┐
//! │ Category │ Code width │ Normalize case │
//! ├──────────┼────────────┼────────────────┤
//! │ color    │ 3          │ yes            │
//! │ size     │ 2          │ no             │
//! │ brand    │ 3          │ yes            │
//! │ season   │ 2          │ yes            │
//! └──────────┴────────────┴────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::code::CodePolicy;
use crate::error::{CodeError, ValidationError};

/// An attribute category of the item catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AttributeCategory {
    Color,
    Size,
    Brand,
    Season,
}

impl AttributeCategory {
    /// All categories, in table order.
    pub const ALL: [AttributeCategory; 4] = [
        AttributeCategory::Color,
        AttributeCategory::Size,
        AttributeCategory::Brand,
        AttributeCategory::Season,
    ];

    /// Stable identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeCategory::Color => "color",
            AttributeCategory::Size => "size",
            AttributeCategory::Brand => "brand",
            AttributeCategory::Season => "season",
        }
    }
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeCategory {
    type Err = ValidationError;

    /// Accepts exact identifiers only (`"Color"`, `" size "`), so
    /// `"Color Family"` is rejected rather than treated as a color.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AttributeCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: AttributeCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Category Config
// =============================================================================

/// Settings applied to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryConfig {
    /// Width of the codes handed out for this category.
    pub code_width: usize,

    /// Apply proper case to new values before storing them.
    #[serde(default = "default_normalize_case")]
    pub normalize_case: bool,

    /// Display name (e.g. "Colour").
    #[serde(default)]
    pub label: Option<String>,
}

fn default_normalize_case() -> bool {
    true
}

impl CategoryConfig {
    pub fn new(code_width: usize, normalize_case: bool) -> Self {
        CategoryConfig {
            code_width,
            normalize_case,
            label: None,
        }
    }

    /// Code policy that accepts only this category's width.
    pub fn code_policy(&self) -> Result<CodePolicy, CodeError> {
        CodePolicy::fixed(self.code_width)
    }
}

// =============================================================================
// Category Table
// =============================================================================

/// Lookup table from category to its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable(BTreeMap<AttributeCategory, CategoryConfig>);

impl Default for CategoryTable {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        table.insert(AttributeCategory::Color, CategoryConfig::new(3, true));
        table.insert(AttributeCategory::Size, CategoryConfig::new(2, false));
        table.insert(AttributeCategory::Brand, CategoryConfig::new(3, true));
        table.insert(AttributeCategory::Season, CategoryConfig::new(2, true));
        CategoryTable(table)
    }
}

impl CategoryTable {
    /// An empty table.
    pub fn empty() -> Self {
        CategoryTable(BTreeMap::new())
    }

    /// Returns the config for a category, if present.
    pub fn get(&self, category: AttributeCategory) -> Option<&CategoryConfig> {
        self.0.get(&category)
    }

    /// Sets the config for a category, returning the previous one.
    pub fn insert(
        &mut self,
        category: AttributeCategory,
        config: CategoryConfig,
    ) -> Option<CategoryConfig> {
        self.0.insert(category, config)
    }

    /// Code policy for a category.
    pub fn code_policy(&self, category: AttributeCategory) -> Result<CodePolicy, ValidationError> {
        let config = self.get(category).ok_or_else(|| ValidationError::Required {
            field: format!("categories.{}", category),
        })?;

        config
            .code_policy()
            .map_err(|_| ValidationError::OutOfRange {
                field: format!("categories.{}.code_width", category),
                min: 1,
                max: i64::MAX,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeCategory, &CategoryConfig)> {
        self.0.iter().map(|(c, cfg)| (*c, cfg))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
