//! # CLI Commands Module
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (shared input/output helpers)
//! ├── code.rs       ◄─── next-code
//! ├── text.rs       ◄─── proper-case
//! ├── conflicts.rs  ◄─── check-overlaps, check-duplicates
//! ├── catalog.rs    ◄─── add-values
//! ├── grouping.rs   ◄─── aggregate
//! └── config.rs     ◄─── config show / init / path
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin / --file  ──►  serde_json  ──►  erpkit-core  ──►  Report         │
//! │                                                           │             │
//! │                                   --format json ◄─────────┤             │
//! │                                   --format text ◄─────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Every command returns a value implementing [`Report`]; `emit` writes it in
//! the requested format. Logs go to stderr, reports to stdout.

pub mod catalog;
pub mod code;
pub mod config;
pub mod conflicts;
pub mod grouping;
pub mod text;

use std::io::{Read, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::CliResult;

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// A command result that can be printed.
pub trait Report: Serialize {
    /// Human-readable rendering, one item per line.
    fn to_text(&self) -> String;
}

/// Writes a report and a trailing newline.
pub fn emit<R: Report>(report: &R, format: OutputFormat, out: &mut impl Write) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => writeln!(out, "{}", report.to_text())?,
    }
    Ok(())
}

/// Reads the whole input from a file, or stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> CliResult<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
