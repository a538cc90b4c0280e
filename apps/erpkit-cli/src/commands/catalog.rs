//! # add-values
//!
//! Assigns codes to new attribute values against the entries a category
//! already has. Nothing is stored: the caller gets the new pairs back and
//! saves them through the ERP.
//!
//! ## Input Format
//! ```json
//! {
//!   "category": "color",
//!   "entries": [ { "value": "Red", "code": "000" } ],
//!   "values": ["navy blue", "olive"]
//! }
//! ```

use erpkit_core::catalog::BatchReport;
use erpkit_core::{AttributeCatalog, AttributeCategory, AttributeValue, Code};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Report;
use crate::config::ToolkitConfig;
use crate::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
struct CatalogInput {
    category: AttributeCategory,
    #[serde(default)]
    entries: Vec<AttributeValue>,
    values: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub category: AttributeCategory,
    /// Pairs created by this run (empty on a dry run or when the batch conflicts).
    pub added: Vec<AttributeValue>,
    pub batch: BatchReport,
    /// Code the next value would get, if any are left.
    pub next_code: Option<Code>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.batch.is_clean()
    }
}

impl Report for CatalogReport {
    fn to_text(&self) -> String {
        let mut lines: Vec<String> = self
            .added
            .iter()
            .map(|e| format!("{}\t{}", e.code, e.value))
            .collect();

        for found in &self.batch.existing {
            lines.push(format!(
                "exists: {} ({})",
                found.entry.value, found.entry.code
            ));
        }
        for conflict in &self.batch.conflicts {
            lines.push(format!(
                "duplicate: {} ({} <-> {})",
                conflict.key, conflict.first.label, conflict.second.label
            ));
        }

        if lines.is_empty() {
            lines.push(format!("Nothing added to {}", self.category));
        }
        lines.join("\n")
    }
}

pub fn run(config: &ToolkitConfig, input: &str, dry_run: bool) -> CliResult<CatalogReport> {
    let input: CatalogInput = serde_json::from_str(input)?;
    let table = config.category_table()?;
    let settings = table
        .get(input.category)
        .cloned()
        .ok_or_else(|| CliError::InvalidConfig(format!("No settings for category {}", input.category)))?;

    let mut catalog = AttributeCatalog::with_entries(input.category, settings, input.entries)?;
    let batch = catalog.validate_batch(&input.values);

    let added = if !batch.is_clean() {
        warn!(
            category = %input.category,
            existing = batch.existing.len(),
            conflicts = batch.conflicts.len(),
            "Batch rejected"
        );
        Vec::new()
    } else if dry_run {
        Vec::new()
    } else {
        catalog.add_batch(&input.values)?
    };

    Ok(CatalogReport {
        category: input.category,
        added,
        batch,
        next_code: catalog.next_code().ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_after_existing_codes() {
        let config = ToolkitConfig::default();
        let input = r#"{
            "category": "color",
            "entries": [ { "value": "Red", "code": "009" } ],
            "values": ["navy blue", "olive"]
        }"#;

        let report = run(&config, input, false).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.to_text(), "00A\tNavy Blue\n00B\tOlive");
        assert_eq!(report.next_code.unwrap().as_str(), "00C");
    }

    #[test]
    fn test_dry_run_adds_nothing() {
        let config = ToolkitConfig::default();
        let input = r#"{ "category": "size", "values": ["XL"] }"#;

        let report = run(&config, input, true).unwrap();
        assert!(report.added.is_empty());
        assert_eq!(report.next_code.unwrap().as_str(), "00");
    }

    #[test]
    fn test_conflicting_batch_is_reported_not_added() {
        let config = ToolkitConfig::default();
        let input = r#"{
            "category": "brand",
            "entries": [ { "value": "Acme", "code": "000" } ],
            "values": ["ACME", "Zenith", "zenith"]
        }"#;

        let report = run(&config, input, false).unwrap();
        assert!(!report.is_clean());
        assert!(report.added.is_empty());
        assert_eq!(report.batch.existing.len(), 1);
        assert_eq!(report.batch.conflicts.len(), 1);
        assert_eq!(report.next_code.unwrap().as_str(), "001");
    }

    #[test]
    fn test_wrong_width_entries_rejected() {
        let config = ToolkitConfig::default();
        let input = r#"{
            "category": "size",
            "entries": [ { "value": "S", "code": "000" } ],
            "values": ["M"]
        }"#;
        assert!(matches!(run(&config, input, false), Err(CliError::Core(_))));
    }
}
