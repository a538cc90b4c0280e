//! # Group Quantity Aggregation
//!
//! Totals line quantities per group (item group, warehouse, size run) in a
//! single pass. Groups come back in the order they were first seen, which
//! keeps the summary aligned with the rows the user typed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// One input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupLine {
    pub group: String,
    pub quantity: i64,
}

impl GroupLine {
    pub fn new(group: impl Into<String>, quantity: i64) -> Self {
        GroupLine {
            group: group.into(),
            quantity,
        }
    }
}

/// Total for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupTotal {
    pub group: String,
    pub quantity: i64,
    /// Number of lines that contributed.
    pub lines: usize,
}

/// Sums quantities per group.
///
/// Group identifiers are trimmed and otherwise compared exactly:
/// `"Shirts"` and `"shirts"` are different groups.
pub fn aggregate_quantities(lines: &[GroupLine]) -> CoreResult<Vec<GroupTotal>> {
    let mut totals: Vec<GroupTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for line in lines {
        let group = line.group.trim();
        match positions.get(group) {
            Some(&pos) => {
                let total = &mut totals[pos];
                total.quantity = total.quantity.checked_add(line.quantity).ok_or_else(|| {
                    CoreError::QuantityOverflow {
                        group: group.to_string(),
                    }
                })?;
                total.lines += 1;
            }
            None => {
                positions.insert(group, totals.len());
                totals.push(GroupTotal {
                    group: group.to_string(),
                    quantity: line.quantity,
                    lines: 1,
                });
            }
        }
    }

    Ok(totals)
}

/// Total across all groups.
pub fn grand_total(totals: &[GroupTotal]) -> CoreResult<i64> {
    totals.iter().try_fold(0i64, |acc, t| {
        acc.checked_add(t.quantity)
            .ok_or_else(|| CoreError::QuantityOverflow {
                group: t.group.clone(),
            })
    })
}
