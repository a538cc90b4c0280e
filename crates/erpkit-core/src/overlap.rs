//! # Duplicate & Overlap Validation
//!
//! Pairwise conflict detection over small, user-edited lists: employees
//! assigned to date ranges, shifts with time ranges, attribute values typed
//! into a child table.
//!
//! ## Boundary Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   A: [01-01 ────────── 01-10]                                           │
//! │   B:                   [01-10 ────────── 01-20]                         │
//! │                                                                         │
//! │   Exclusive: start_a < end_b && start_b < end_a   → touching is OK      │
//! │   Inclusive: start_a <= end_b && start_b <= end_a → touching conflicts  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! There is no default policy: every caller names the one it needs.
//!
//! ## Complexity
//! O(n²) comparisons. The lists come from editable form tables and hold a
//! few dozen rows at most.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

// =============================================================================
// Span
// =============================================================================

/// A range with `start <= end`.
///
/// Works with any ordered value; the callers use `chrono::NaiveDate` for
/// date ranges and `chrono::NaiveTime` for shift times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "SpanRepr<T>",
    bound(deserialize = "T: Deserialize<'de> + Ord")
)]
pub struct Span<T> {
    start: T,
    end: T,
}

#[derive(Deserialize)]
struct SpanRepr<T> {
    start: T,
    end: T,
}

impl<T: Ord> Span<T> {
    /// Creates a span, rejecting `end < start`.
    pub fn new(start: T, end: T) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidFormat {
                field: "range".to_string(),
                reason: "end is before start".to_string(),
            });
        }
        Ok(Span { start, end })
    }

    #[inline]
    pub fn start(&self) -> &T {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &T {
        &self.end
    }
}

impl<T: Ord> TryFrom<SpanRepr<T>> for Span<T> {
    type Error = ValidationError;

    fn try_from(repr: SpanRepr<T>) -> Result<Self, Self::Error> {
        Span::new(repr.start, repr.end)
    }
}

/// Half-open overlap: `[a.start, a.end)` and `[b.start, b.end)` share time.
pub fn exclusive_overlap<T: Ord>(a: &Span<T>, b: &Span<T>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Closed overlap: touching endpoints count.
pub fn inclusive_overlap<T: Ord>(a: &Span<T>, b: &Span<T>) -> bool {
    a.start <= b.end && b.start <= a.end
}

// =============================================================================
// Overlap Policy
// =============================================================================

/// How range endpoints are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Touching ranges do not conflict (`end == start` is fine).
    Exclusive,
    /// Touching ranges conflict.
    Inclusive,
}

impl OverlapPolicy {
    /// Checks two spans under this policy.
    pub fn overlaps<T: Ord>(&self, a: &Span<T>, b: &Span<T>) -> bool {
        match self {
            OverlapPolicy::Exclusive => exclusive_overlap(a, b),
            OverlapPolicy::Inclusive => inclusive_overlap(a, b),
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPolicy::Exclusive => write!(f, "exclusive"),
            OverlapPolicy::Inclusive => write!(f, "inclusive"),
        }
    }
}

impl FromStr for OverlapPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclusive" => Ok(OverlapPolicy::Exclusive),
            "inclusive" => Ok(OverlapPolicy::Inclusive),
            _ => Err(ValidationError::NotAllowed {
                field: "overlap policy".to_string(),
                allowed: vec!["exclusive".to_string(), "inclusive".to_string()],
            }),
        }
    }
}

// =============================================================================
// Entries & Conflicts
// =============================================================================

/// One row to check: a key (employee, attribute value) and its range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Ord"))]
pub struct Entry<T> {
    /// Row label shown back to the user (e.g. "Row 3").
    pub label: String,
    pub key: String,
    pub span: Span<T>,
}

impl<T: Ord> Entry<T> {
    pub fn new(label: impl Into<String>, key: impl Into<String>, span: Span<T>) -> Self {
        Entry {
            label: label.into(),
            key: key.into(),
            span,
        }
    }
}

/// What kind of rule a pair of rows breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Same key, and the same range (or no range at all).
    Duplicate,
    /// Same key, ranges overlap under the chosen policy.
    Overlap,
}

/// One side of a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConflictParty {
    /// Position in the input list.
    pub index: usize,
    pub label: String,
}

/// Two rows that violate a uniqueness or non-overlap rule.
///
/// `first.index < second.index` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConflictDescriptor {
    pub kind: ConflictKind,
    /// Key as written on the first row.
    pub key: String,
    pub first: ConflictParty,
    pub second: ConflictParty,
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

// =============================================================================
// Detection
// =============================================================================

/// Reports every pair of rows with the same key whose ranges collide.
///
/// Keys compare trimmed and case-insensitively; blank keys are skipped.
/// A pair with identical spans is a [`ConflictKind::Duplicate`], any other
/// overlapping pair is a [`ConflictKind::Overlap`]. Each pair is reported
/// once, ordered by `(first.index, second.index)`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use erpkit_core::overlap::{find_duplicates_and_overlaps, Entry, OverlapPolicy, Span};
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
/// let entries = vec![
///     Entry::new("Row 1", "E1", Span::new(day(1), day(10)).unwrap()),
///     Entry::new("Row 2", "E1", Span::new(day(10), day(20)).unwrap()),
/// ];
///
/// assert!(find_duplicates_and_overlaps(&entries, OverlapPolicy::Exclusive).is_empty());
/// assert_eq!(find_duplicates_and_overlaps(&entries, OverlapPolicy::Inclusive).len(), 1);
/// ```
pub fn find_duplicates_and_overlaps<T: Ord>(
    entries: &[Entry<T>],
    policy: OverlapPolicy,
) -> Vec<ConflictDescriptor> {
    let keys: Vec<String> = entries.iter().map(|e| normalize_key(&e.key)).collect();
    let mut conflicts = Vec::new();

    for i in 0..entries.len() {
        if keys[i].is_empty() {
            continue;
        }
        for j in (i + 1)..entries.len() {
            if keys[i] != keys[j] {
                continue;
            }

            let (a, b) = (&entries[i], &entries[j]);
            let kind = if a.span == b.span {
                ConflictKind::Duplicate
            } else if policy.overlaps(&a.span, &b.span) {
                ConflictKind::Overlap
            } else {
                continue;
            };

            conflicts.push(ConflictDescriptor {
                kind,
                key: a.key.clone(),
                first: ConflictParty {
                    index: i,
                    label: a.label.clone(),
                },
                second: ConflictParty {
                    index: j,
                    label: b.label.clone(),
                },
            });
        }
    }

    debug!(
        entries = entries.len(),
        conflicts = conflicts.len(),
        %policy,
        "Checked entries for duplicates and overlaps"
    );
    conflicts
}

/// Reports every pair of identical keys in a key-only list.
///
/// Keys compare trimmed and case-insensitively; blank keys are skipped.
/// Three copies of one value give three pairs, never one report per row.
/// The label of each party is the key as written.
pub fn find_duplicate_keys<S: AsRef<str>>(keys: &[S]) -> Vec<ConflictDescriptor> {
    let normalized: Vec<String> = keys.iter().map(|k| normalize_key(k.as_ref())).collect();
    let mut conflicts = Vec::new();

    for i in 0..keys.len() {
        if normalized[i].is_empty() {
            continue;
        }
        for j in (i + 1)..keys.len() {
            if normalized[i] == normalized[j] {
                conflicts.push(ConflictDescriptor {
                    kind: ConflictKind::Duplicate,
                    key: keys[i].as_ref().to_string(),
                    first: ConflictParty {
                        index: i,
                        label: keys[i].as_ref().to_string(),
                    },
                    second: ConflictParty {
                        index: j,
                        label: keys[j].as_ref().to_string(),
                    },
                });
            }
        }
    }

    conflicts
}

/// Turns a non-empty report into [`CoreError::Conflicts`] to block a save.
pub fn ensure_no_conflicts(conflicts: Vec<ConflictDescriptor>) -> CoreResult<()> {
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Conflicts(conflicts))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn dated(label: &str, key: &str, start: &str, end: &str) -> Entry<NaiveDate> {
        Entry::new(label, key, Span::new(date(start), date(end)).unwrap())
    }

    #[test]
    fn test_touching_dates_do_not_overlap_exclusively() {
        let entries = vec![
            dated("Row 1", "E1", "2025-01-01", "2025-01-10"),
            dated("Row 2", "E1", "2025-01-10", "2025-01-20"),
        ];
        assert!(find_duplicates_and_overlaps(&entries, OverlapPolicy::Exclusive).is_empty());
    }

    #[test]
    fn test_crossing_dates_overlap() {
        let entries = vec![
            dated("Row 1", "E1", "2025-01-01", "2025-01-11"),
            dated("Row 2", "E1", "2025-01-10", "2025-01-20"),
        ];
        let conflicts = find_duplicates_and_overlaps(&entries, OverlapPolicy::Exclusive);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overlap);
        assert_eq!(conflicts[0].first.label, "Row 1");
        assert_eq!(conflicts[0].second.index, 1);
    }

    #[test]
    fn test_inclusive_policy_flags_touching_ranges() {
        let entries = vec![
            dated("Row 1", "E1", "2025-01-01", "2025-01-10"),
            dated("Row 2", "e1 ", "2025-01-10", "2025-01-20"),
        ];
        let conflicts = find_duplicates_and_overlaps(&entries, OverlapPolicy::Inclusive);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].key, "E1");
    }

    #[test]
    fn test_different_keys_never_conflict() {
        let entries = vec![
            dated("Row 1", "E1", "2025-01-01", "2025-01-31"),
            dated("Row 2", "E2", "2025-01-01", "2025-01-31"),
        ];
        assert!(find_duplicates_and_overlaps(&entries, OverlapPolicy::Inclusive).is_empty());
    }

    #[test]
    fn test_identical_rows_are_duplicates() {
        let entries = vec![
            dated("Row 1", "E1", "2025-02-01", "2025-02-05"),
            dated("Row 2", "E1", "2025-02-01", "2025-02-05"),
            dated("Row 3", "E1", "2025-02-03", "2025-02-04"),
        ];
        let conflicts = find_duplicates_and_overlaps(&entries, OverlapPolicy::Exclusive);
        let kinds: Vec<_> = conflicts.iter().map(|c| (c.first.index, c.second.index, c.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, 1, ConflictKind::Duplicate),
                (0, 2, ConflictKind::Overlap),
                (1, 2, ConflictKind::Overlap),
            ]
        );
    }

    #[test]
    fn test_blank_keys_are_skipped() {
        let entries = vec![
            dated("Row 1", " ", "2025-01-01", "2025-01-10"),
            dated("Row 2", "", "2025-01-01", "2025-01-10"),
        ];
        assert!(find_duplicates_and_overlaps(&entries, OverlapPolicy::Inclusive).is_empty());
    }

    #[test]
    fn test_shift_times() {
        let shift = |label: &str, start: &str, end: &str| {
            Entry::new(label, "E7", Span::new(time(start), time(end)).unwrap())
        };
        let entries = vec![shift("Morning", "06:00", "14:00"), shift("Evening", "14:00", "22:00")];

        assert!(find_duplicates_and_overlaps(&entries, OverlapPolicy::Exclusive).is_empty());
        assert_eq!(
            find_duplicates_and_overlaps(&entries, OverlapPolicy::Inclusive).len(),
            1
        );
    }

    #[test]
    fn test_span_rejects_inverted_range() {
        assert!(Span::new(date("2025-01-10"), date("2025-01-01")).is_err());
        assert!(Span::new(date("2025-01-10"), date("2025-01-10")).is_ok());
    }

    #[test]
    fn test_span_deserialization_validates() {
        let ok: Span<NaiveDate> =
            serde_json::from_str(r#"{"start":"2025-01-01","end":"2025-01-02"}"#).unwrap();
        assert_eq!(ok.start(), &date("2025-01-01"));

        let bad = serde_json::from_str::<Span<NaiveDate>>(r#"{"start":"2025-01-02","end":"2025-01-01"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_duplicate_keys_once_per_pair() {
        let conflicts = find_duplicate_keys(&["Red", "Blue", "red", " RED "]);
        let pairs: Vec<_> = conflicts.iter().map(|c| (c.first.index, c.second.index)).collect();
        assert_eq!(pairs, vec![(0, 2), (0, 3), (2, 3)]);
        assert!(conflicts.iter().all(|c| c.kind == ConflictKind::Duplicate));

        assert_eq!(find_duplicate_keys(&["Red", "red"]).len(), 1);
        assert!(find_duplicate_keys(&["", " "]).is_empty());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Exclusive".parse::<OverlapPolicy>().unwrap(), OverlapPolicy::Exclusive);
        assert_eq!(" inclusive".parse::<OverlapPolicy>().unwrap(), OverlapPolicy::Inclusive);
        assert!("touching".parse::<OverlapPolicy>().is_err());
    }

    #[test]
    fn test_ensure_no_conflicts() {
        assert!(ensure_no_conflicts(Vec::new()).is_ok());
        let conflicts = find_duplicate_keys(&["S", "s"]);
        assert!(matches!(
            ensure_no_conflicts(conflicts),
            Err(CoreError::Conflicts(c)) if c.len() == 1
        ));
    }

    #[test]
    fn test_descriptor_json_shape() {
        let conflicts = find_duplicate_keys(&["XL", "xl"]);
        let json = serde_json::to_value(&conflicts[0]).unwrap();
        assert_eq!(json["kind"], "duplicate");
        assert_eq!(json["first"]["index"], 0);
        assert_eq!(json["second"]["label"], "xl");
    }
}
