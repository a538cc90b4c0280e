//! # proper-case
//!
//! Normalizes each argument (or each stdin line) to proper case.

use erpkit_core::case::to_proper_case;
use serde::Serialize;

use super::Report;

#[derive(Debug, Serialize)]
pub struct CaseLine {
    pub input: String,
    pub output: String,
    pub changed: bool,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CaseReport(pub Vec<CaseLine>);

impl Report for CaseReport {
    fn to_text(&self) -> String {
        self.0
            .iter()
            .map(|line| line.output.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn run<S: AsRef<str>>(inputs: &[S]) -> CaseReport {
    CaseReport(
        inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                let output = to_proper_case(input);
                CaseLine {
                    changed: output != input,
                    input: input.to_string(),
                    output,
                }
            })
            .collect(),
    )
}

/// Splits stdin text into non-empty lines.
pub fn lines_of(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run() {
        let report = run(&["red color", "Dark-Blue", "26ss"]);
        assert_eq!(report.to_text(), "Red Color\nDark-Blue\n26Ss");
        assert!(report.0[0].changed);
        assert!(!report.0[1].changed);
    }

    #[test]
    fn test_lines_of_skips_blank_lines() {
        assert_eq!(lines_of("red\n\n  \nblue\n"), vec!["red", "blue"]);
    }
}
