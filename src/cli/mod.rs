//! CLI module for tgrm-sim.
//!
//! This module contains all CLI logic so it can be tested without spawning
//! the binary. `main.rs` only parses arguments, installs logging and calls
//! [`run_cli`].

mod args;
mod commands;
mod output;

use tracing_subscriber::EnvFilter;

pub use args::{Args, Command, ModelArgs, RunArgs, VerifyArgs};
pub use commands::{
    config_command, run_cli, run_command, summary_command, verify_command, write_frame,
};
pub use output::{
    format_summaries, format_verify_report, print_summaries, print_verify_report, print_version,
    version_line,
};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level follows `verbosity`
/// (0 info, 1 debug, 2+ trace).
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tgrm_sim={level}").into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests;
