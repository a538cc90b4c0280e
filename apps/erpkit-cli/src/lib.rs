//! # erpkit CLI Library
//!
//! Command-line access to the erpkit helpers, for ERP server scripts and
//! for checking data by hand.
//!
//! ## Module Organization
//! ```text
//! erpkit_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing, logging, dispatch)
//! ├── config.rs       ◄─── TOML + environment configuration
//! ├── error.rs        ◄─── CliError and exit codes
//! └── commands/       ◄─── One file per command family
//! ```
//!
//! ## Usage
//! ```bash
//! erpkit next-code 00Z                         # 010
//! erpkit next-code --category size             # 00 (seeded)
//! erpkit proper-case "red color" 26ss          # Red Color / 26Ss
//! erpkit check-overlaps --kind dates -f roster.json --deny
//! echo '["Red","red"]' | erpkit check-duplicates
//! erpkit add-values -f colors.json --dry-run
//! erpkit aggregate -f lines.json
//! erpkit config init
//! ```

pub mod commands;
pub mod config;
pub mod error;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use erpkit_core::{AttributeCategory, OverlapPolicy};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use commands::conflicts::RangeKind;
use commands::{emit, read_input, OutputFormat};
use config::ToolkitConfig;
use error::{CliError, CliResult};

#[derive(Debug, Parser)]
#[command(name = "erpkit")]
#[command(version)]
#[command(about = "Catalog codes, label casing and conflict checks for ERP data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config directory)
    #[arg(long, short = 'c', global = true, env = "ERPKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the code that follows CURRENT
    NextCode {
        /// Current highest code (omit to start a new sequence)
        current: Option<String>,

        /// Accept exactly this width
        #[arg(long, short, conflicts_with = "category")]
        width: Option<usize>,

        /// Use the width configured for this category
        #[arg(long)]
        category: Option<AttributeCategory>,

        /// Fail on unusable input or overflow instead of seeding / wrapping
        #[arg(long)]
        strict: bool,
    },

    /// Convert labels to proper case (reads stdin lines if none given)
    ProperCase {
        inputs: Vec<String>,
    },

    /// Report duplicate and overlapping ranges per key
    CheckOverlaps {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Type of the start/end values
        #[arg(long, value_enum, default_value = "dates")]
        kind: RangeKind,

        /// Boundary policy (default: from config for this kind)
        #[arg(long)]
        policy: Option<OverlapPolicy>,

        /// Exit with status 2 when conflicts are found
        #[arg(long)]
        deny: bool,
    },

    /// Report duplicate values in a JSON array of strings
    CheckDuplicates {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Exit with status 2 when duplicates are found
        #[arg(long)]
        deny: bool,
    },

    /// Assign codes to new attribute values
    AddValues {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Check the batch without assigning codes
        #[arg(long)]
        dry_run: bool,
    },

    /// Total quantities per group
    Aggregate {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

/// Initializes tracing to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=erpkit_core=trace` - Trace the core crate only
/// - Default: WARN, INFO for erpkit crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,erpkit_core=info,erpkit_cli=info"));

    // A second init (tests) is harmless, so the error is ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs one parsed command, writing its report to `out`.
pub fn execute(cli: Cli, out: &mut impl Write) -> CliResult<()> {
    let format = cli.format;

    // `config init` and `config path` must work with a broken config file.
    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::Init { force } => {
                return emit(&commands::config::init(cli.config, *force)?, format, out)
            }
            ConfigAction::Path => return emit(&commands::config::path(cli.config), format, out),
            ConfigAction::Show => {}
        }
    }

    let config = ToolkitConfig::load(cli.config.clone())?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::NextCode {
            current,
            width,
            category,
            strict,
        } => {
            let report = commands::code::run(&config, current.as_deref(), width, category, strict)?;
            emit(&report, format, out)
        }
        Commands::ProperCase { inputs } => {
            let inputs = if inputs.is_empty() {
                commands::text::lines_of(&read_input(None)?)
            } else {
                inputs
            };
            emit(&commands::text::run(&inputs), format, out)
        }
        Commands::CheckOverlaps {
            file,
            kind,
            policy,
            deny,
        } => {
            let input = read_input(file.as_deref())?;
            let report = commands::conflicts::run_overlaps(&config, &input, kind, policy)?;
            emit(&report, format, out)?;
            deny_if(deny, report.conflicts.len())
        }
        Commands::CheckDuplicates { file, deny } => {
            let input = read_input(file.as_deref())?;
            let report = commands::conflicts::run_duplicates(&input)?;
            emit(&report, format, out)?;
            deny_if(deny, report.conflicts.len())
        }
        Commands::AddValues { file, dry_run } => {
            let input = read_input(file.as_deref())?;
            let report = commands::catalog::run(&config, &input, dry_run)?;
            emit(&report, format, out)?;
            // A rejected batch assigned nothing, so it always fails.
            let problems = report.batch.conflicts.len() + report.batch.existing.len();
            deny_if(true, problems)
        }
        Commands::Aggregate { file } => {
            let input = read_input(file.as_deref())?;
            emit(&commands::grouping::run(&input)?, format, out)
        }
        Commands::Config { .. } => emit(&commands::config::show(&config, cli.config), format, out),
    }
}

fn deny_if(deny: bool, conflicts: usize) -> CliResult<()> {
    if deny && conflicts > 0 {
        return Err(CliError::ConflictsFound(conflicts));
    }
    Ok(())
}

/// Parses arguments, runs the command and maps errors to exit codes.
pub fn run() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match execute(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ConflictsFound(n)) => {
            debug!(conflicts = n, "Exiting with conflicts");
            ExitCode::from(2)
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
