//! # erpkit Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments
//! 3. Load configuration (file, then `ERPKIT_*` environment)
//! 4. Run the command and print its report to stdout
//! 5. Exit: 0 ok, 2 conflicts, 3 config, 4 bad input, 5 I/O

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs so tests can call `execute` directly
    erpkit_cli::run()
}
