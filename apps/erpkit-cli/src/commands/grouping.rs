//! # aggregate
//!
//! Totals a JSON array of `{ "group": ..., "quantity": ... }` lines.

use erpkit_core::grouping::grand_total;
use erpkit_core::{aggregate_quantities, GroupLine, GroupTotal};
use serde::Serialize;

use super::Report;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
pub struct AggregateReport {
    pub totals: Vec<GroupTotal>,
    pub grand_total: i64,
}

impl Report for AggregateReport {
    fn to_text(&self) -> String {
        let mut lines: Vec<String> = self
            .totals
            .iter()
            .map(|t| format!("{}\t{}\t({} lines)", t.group, t.quantity, t.lines))
            .collect();
        lines.push(format!("Total\t{}", self.grand_total));
        lines.join("\n")
    }
}

pub fn run(input: &str) -> CliResult<AggregateReport> {
    let lines: Vec<GroupLine> = serde_json::from_str(input)?;
    let totals = aggregate_quantities(&lines)?;
    let grand_total = grand_total(&totals)?;

    Ok(AggregateReport {
        totals,
        grand_total,
    })
}
