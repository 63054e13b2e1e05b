//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::SimResult;
use crate::export::ExportFormat;
use crate::renderers::ChartFormat;

/// Repair-vs-retrain dashboard simulator.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "tgrm-sim", version, about, propagate_version = true)]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Run the dashboard once and write the four charts.
    Run(RunArgs),
    /// Run the dashboard once and print the strategy summaries.
    Summary(ModelArgs),
    /// Check that repeated seeded runs produce identical results.
    Verify(VerifyArgs),
    /// Print the effective configuration as YAML.
    Config(ModelArgs),
    /// Show version information.
    Version,
}

/// Simulation inputs shared by every command.
#[derive(Debug, Clone, Default, PartialEq, clap::Args)]
pub struct ModelArgs {
    /// YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed of the noise source.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulation steps.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Fault magnitude.
    #[arg(long)]
    pub fault: Option<f64>,

    /// Repair cap as a percentage of items.
    #[arg(long, value_name = "PERCENT")]
    pub cap: Option<f64>,

    /// Repair rate.
    #[arg(long)]
    pub repair_rate: Option<f64>,
}

impl ModelArgs {
    /// Configuration file contents with the flags applied, validated.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or a value is out of range.
    pub fn resolve(&self) -> SimResult<AppConfig> {
        let mut config = self.base_config()?;
        self.apply(&mut config);
        config.check()?;
        Ok(config)
    }

    fn base_config(&self) -> SimResult<AppConfig> {
        self.config
            .as_ref()
            .map_or_else(|| Ok(AppConfig::default()), AppConfig::load)
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        let p = &mut config.parameters;
        if let Some(steps) = self.steps {
            p.step_count = steps;
        }
        if let Some(fault) = self.fault {
            p.fault_magnitude = fault;
        }
        if let Some(cap) = self.cap {
            p.cap_fraction = cap / 100.0;
        }
        if let Some(rate) = self.repair_rate {
            p.repair_rate = rate;
        }
    }
}

/// Arguments of `run`.
#[derive(Debug, Clone, Default, PartialEq, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Directory receiving the chart files.
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Chart file format.
    #[arg(long, value_enum)]
    pub format: Option<ChartFormat>,

    /// Chart width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Also export the step series.
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,
}

impl RunArgs {
    /// Resolve model and output settings into one validated configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or a value is out of range.
    pub fn resolve(&self) -> SimResult<AppConfig> {
        let mut config = self.model.base_config()?;
        self.model.apply(&mut config);
        if let Some(dir) = &self.out_dir {
            config.output.dir.clone_from(dir);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(width) = self.width {
            config.charts.width = width;
        }
        if let Some(height) = self.height {
            config.charts.height = height;
        }
        if let Some(export) = self.export {
            config.output.export = export;
        }
        config.check()?;
        Ok(config)
    }
}

/// Arguments of `verify`.
#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Number of runs to compare.
    #[arg(long, default_value_t = 3)]
    pub runs: usize,
}
