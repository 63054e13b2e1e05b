//! tgrm-sim CLI - repair-vs-retrain dashboard
//!
//! Thin wrapper around [`tgrm_sim::cli::run_cli`].

use std::process::ExitCode;

use clap::Parser;
use tgrm_sim::cli::{init_tracing, run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    run_cli(args)
}
