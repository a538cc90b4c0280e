//! # next-code
//!
//! Prints the successor of a catalog code. Width comes from `--width`, else
//! the category's table entry, else `[codes]` in the config.

use erpkit_core::validation::validate_code_width;
use erpkit_core::{AttributeCategory, CodeAdvance, CodePolicy, NextCode};
use serde::Serialize;
use tracing::debug;

use super::Report;
use crate::config::ToolkitConfig;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
pub struct NextCodeReport {
    pub input: Option<String>,
    #[serde(flatten)]
    pub next: NextCode,
}

impl Report for NextCodeReport {
    fn to_text(&self) -> String {
        match self.next.advance {
            CodeAdvance::Incremented => self.next.code.to_string(),
            CodeAdvance::Seeded => format!("{} (seeded)", self.next.code),
            CodeAdvance::Wrapped => format!("{} (wrapped)", self.next.code),
        }
    }
}

/// Picks the policy for this invocation.
pub fn resolve_policy(
    config: &ToolkitConfig,
    width: Option<usize>,
    category: Option<AttributeCategory>,
) -> CliResult<CodePolicy> {
    match (width, category) {
        (Some(width), _) => {
            validate_code_width(width)?;
            Ok(CodePolicy::fixed(width)?)
        }
        (None, Some(category)) => Ok(config.category_table()?.code_policy(category)?),
        (None, None) => config.code_policy(),
    }
}

pub fn run(
    config: &ToolkitConfig,
    current: Option<&str>,
    width: Option<usize>,
    category: Option<AttributeCategory>,
    strict: bool,
) -> CliResult<NextCodeReport> {
    let policy = resolve_policy(config, width, category)?;
    debug!(?policy, strict, "Resolved code policy");

    let next = if strict || config.codes.strict {
        NextCode {
            code: policy.try_advance(current.unwrap_or(""))?,
            advance: CodeAdvance::Incremented,
        }
    } else {
        policy.advance(current)
    };

    Ok(NextCodeReport {
        input: current.map(str::to_string),
        next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_default_policy() {
        let config = ToolkitConfig::default();
        let report = run(&config, Some("00Z"), None, None, false).unwrap();
        assert_eq!(report.to_text(), "010");

        let report = run(&config, None, None, None, false).unwrap();
        assert_eq!(report.to_text(), "000 (seeded)");
    }

    #[test]
    fn test_category_and_width_selection() {
        let config = ToolkitConfig::default();

        // Size codes are two characters wide, so a 3-character input seeds.
        let report = run(&config, Some("0ZZ"), None, Some(AttributeCategory::Size), false).unwrap();
        assert_eq!(report.to_text(), "00 (seeded)");

        let report = run(&config, Some("0ZZZ"), Some(4), None, false).unwrap();
        assert_eq!(report.to_text(), "1000");
    }

    #[test]
    fn test_strict_mode_surfaces_errors() {
        let config = ToolkitConfig::default();
        assert!(run(&config, Some("ZZZ"), None, None, true).is_err());
        assert!(run(&config, Some(""), None, None, true).is_err());

        let mut config = ToolkitConfig::default();
        config.codes.strict = true;
        assert!(matches!(
            run(&config, Some("ZZ"), None, None, false),
            Err(CliError::Core(_))
        ));
    }

    #[test]
    fn test_wrapped_report_json() {
        let config = ToolkitConfig::default();
        let report = run(&config, Some("ZZ"), None, None, false).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["code"], "00");
        assert_eq!(json["advance"], "wrapped");
        assert_eq!(json["input"], "ZZ");
    }
}
