//! # check-overlaps / check-duplicates
//!
//! ## Input Format
//! ```json
//! [
//!   { "label": "Row 1", "key": "HR-EMP-0001", "start": "2025-01-01", "end": "2025-01-10" },
//!   { "key": "HR-EMP-0001", "start": "2025-01-10", "end": "2025-01-20" }
//! ]
//! ```
//! `label` defaults to `Row <n>` (1-based). Times are `HH:MM:SS`, date-times
//! `YYYY-MM-DDTHH:MM:SS`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use erpkit_core::{
    find_duplicate_keys, find_duplicates_and_overlaps, ConflictDescriptor, ConflictKind, Entry,
    OverlapPolicy, Span,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::Report;
use crate::config::ToolkitConfig;
use crate::error::{CliError, CliResult};

/// What the `start`/`end` values are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    Dates,
    Times,
    Datetimes,
}

impl RangeKind {
    /// Policy configured for this kind of range.
    pub fn configured_policy(&self, config: &ToolkitConfig) -> OverlapPolicy {
        match self {
            RangeKind::Dates | RangeKind::Datetimes => config.overlap.dates,
            RangeKind::Times => config.overlap.times,
        }
    }
}

/// One input row as written in the JSON file.
#[derive(Debug, Deserialize)]
struct EntryInput<T> {
    #[serde(default)]
    label: Option<String>,
    key: String,
    start: T,
    end: T,
}

#[derive(Debug, Serialize)]
pub struct ConflictReport {
    pub kind: RangeKind,
    pub policy: OverlapPolicy,
    pub checked: usize,
    pub conflicts: Vec<ConflictDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct DuplicateReport {
    pub checked: usize,
    pub conflicts: Vec<ConflictDescriptor>,
}

fn describe(conflict: &ConflictDescriptor) -> String {
    let kind = match conflict.kind {
        ConflictKind::Duplicate => "duplicate",
        ConflictKind::Overlap => "overlap",
    };
    format!(
        "{}: {} ({} <-> {})",
        kind, conflict.key, conflict.first.label, conflict.second.label
    )
}

fn render(checked: usize, conflicts: &[ConflictDescriptor]) -> String {
    if conflicts.is_empty() {
        return format!("No conflicts in {} entries", checked);
    }
    conflicts.iter().map(describe).collect::<Vec<_>>().join("\n")
}

impl Report for ConflictReport {
    fn to_text(&self) -> String {
        render(self.checked, &self.conflicts)
    }
}

impl Report for DuplicateReport {
    fn to_text(&self) -> String {
        render(self.checked, &self.conflicts)
    }
}

fn parse_entries<T: DeserializeOwned + Ord>(text: &str) -> CliResult<Vec<Entry<T>>> {
    let rows: Vec<EntryInput<T>> = serde_json::from_str(text)?;

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let label = row.label.unwrap_or_else(|| format!("Row {}", i + 1));
            let span = Span::new(row.start, row.end)
                .map_err(|e| CliError::InvalidInput(format!("{}: {}", label, e)))?;
            Ok(Entry::new(label, row.key, span))
        })
        .collect()
}

fn check<T: DeserializeOwned + Ord>(
    text: &str,
    policy: OverlapPolicy,
) -> CliResult<(usize, Vec<ConflictDescriptor>)> {
    let entries = parse_entries::<T>(text)?;
    Ok((entries.len(), find_duplicates_and_overlaps(&entries, policy)))
}

/// Runs `check-overlaps` on JSON input.
///
/// `policy` overrides the policy configured for `kind`.
pub fn run_overlaps(
    config: &ToolkitConfig,
    input: &str,
    kind: RangeKind,
    policy: Option<OverlapPolicy>,
) -> CliResult<ConflictReport> {
    let policy = policy.unwrap_or_else(|| kind.configured_policy(config));

    let (checked, conflicts) = match kind {
        RangeKind::Dates => check::<NaiveDate>(input, policy)?,
        RangeKind::Times => check::<NaiveTime>(input, policy)?,
        RangeKind::Datetimes => check::<NaiveDateTime>(input, policy)?,
    };

    info!(?kind, %policy, checked, conflicts = conflicts.len(), "Overlap check finished");
    Ok(ConflictReport {
        kind,
        policy,
        checked,
        conflicts,
    })
}

/// Runs `check-duplicates` on a JSON array of strings.
pub fn run_duplicates(input: &str) -> CliResult<DuplicateReport> {
    let values: Vec<String> = serde_json::from_str(input)?;
    let conflicts = find_duplicate_keys(&values);
    info!(checked = values.len(), conflicts = conflicts.len(), "Duplicate check finished");

    Ok(DuplicateReport {
        checked: values.len(),
        conflicts,
    })
}
