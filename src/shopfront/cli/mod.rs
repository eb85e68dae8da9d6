//! # CLI Layer
//!
//! This module is **one possible UI client** for shopfront. It is the only
//! place that:
//! - Handles argument parsing
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a `tracing` subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()`, context setup and per-command handlers
//! - `print`: rendering of `CmdResult` parts

mod commands;
mod print;
mod setup;

pub use commands::run;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SHOPFRONT_LOG";

/// Logs go to stderr so listings on stdout stay pipeable. `--verbose` wins
/// over `SHOPFRONT_LOG`; with neither, only warnings are shown.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
