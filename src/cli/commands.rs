//! CLI command handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;

use super::args::{ModelArgs, RunArgs, VerifyArgs};
use super::output::{
    print_summaries, print_verify_report, print_version, print_written,
};
use super::{Args, Command};
use crate::config::AppConfig;
use crate::dashboard::{run_dashboard, ChartKind, DashboardFrame};
use crate::engine::rng::SimRng;
use crate::error::SimResult;
use crate::export::Exporter;
use crate::renderers::write_chart;
use crate::verify::verify_reproducibility;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler and maps errors to exit
/// code 1.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let outcome = match &args.command {
        Command::Run(run) => run_command(run),
        Command::Summary(model) => summary_command(model),
        Command::Verify(verify) => verify_command(verify),
        Command::Config(model) => config_command(model),
        Command::Version => {
            print_version();
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Run the dashboard once, write charts (and the optional export), print
/// the summaries.
///
/// # Errors
///
/// Returns error if configuration is invalid or an output cannot be written.
pub fn run_command(args: &RunArgs) -> SimResult<()> {
    let config = args.resolve()?;
    let frame = dashboard_for(&config);
    let written = write_frame(&frame, &config)?;
    print_summaries(&frame);
    print_written(&written);
    Ok(())
}

/// Run the dashboard once and print the summaries.
///
/// # Errors
///
/// Returns error if configuration is invalid.
pub fn summary_command(args: &ModelArgs) -> SimResult<()> {
    let config = args.resolve()?;
    print_summaries(&dashboard_for(&config));
    Ok(())
}

/// Compare fingerprints of repeated seeded runs.
///
/// # Errors
///
/// Returns error if configuration is invalid or the runs diverge.
pub fn verify_command(args: &VerifyArgs) -> SimResult<()> {
    let config = args.model.resolve()?;
    let report = verify_reproducibility(&config.parameters, config.seed, args.runs)?;
    print_verify_report(&report);
    Ok(())
}

/// Print the effective configuration.
///
/// # Errors
///
/// Returns error if configuration is invalid.
pub fn config_command(args: &ModelArgs) -> SimResult<()> {
    let config = args.resolve()?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

fn dashboard_for(config: &AppConfig) -> DashboardFrame {
    let mut rng = SimRng::new(config.seed);
    run_dashboard(&config.parameters, &config.chart_layout(), &mut rng)
}

/// Write the four charts and the configured export into the output
/// directory, creating it if needed. Returns the written paths.
///
/// # Errors
///
/// Returns error if the directory or a file cannot be written.
pub fn write_frame(frame: &DashboardFrame, config: &AppConfig) -> SimResult<Vec<PathBuf>> {
    let dir = &config.output.dir;
    std::fs::create_dir_all(dir)?;

    let format = config.output.format;
    let mut written = Vec::with_capacity(ChartKind::ALL.len() + 1);
    for kind in ChartKind::ALL {
        let path = dir.join(format!("{}.{}", kind.file_stem(), format.extension()));
        write_chart(&path, format, config.chart_size(), frame.chart(kind))?;
        written.push(path);
    }

    if let Some(path) = Exporter::new(config.output.export).export(&frame.result, dir)? {
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "run complete");
    Ok(written)
}
