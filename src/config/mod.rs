//! Configuration system with YAML schema and validation.
//!
//! ```yaml
//! schema_version: "1.0"
//! seed: 42
//! parameters:
//!   step_count: 300
//!   fault_magnitude: 0.25
//!   cap_fraction: 0.10
//!   repair_rate: 0.25
//! charts:
//!   width: 640
//!   height: 260
//! output:
//!   dir: target/tgrm
//!   format: svg
//!   export: none
//! ```
//!
//! Every section and field is optional. Range checks run here and only
//! here; the simulator itself accepts whatever it is given.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::dashboard::ChartLayout;
use crate::error::{SimError, SimResult};
use crate::export::ExportFormat;
use crate::model::SimulationParameters;
use crate::render::ChartSize;
use crate::renderers::ChartFormat;

/// Schema major version this build understands.
const SUPPORTED_SCHEMA_MAJOR: &str = "1";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Seed of the noise source.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Simulation inputs.
    #[validate(nested)]
    #[serde(default)]
    pub parameters: SimulationParameters,

    /// Chart surface dimensions.
    #[validate(nested)]
    #[serde(default)]
    pub charts: ChartConfig,

    /// Where and how results are written.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_seed() -> u64 {
    42
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            seed: default_seed(),
            parameters: SimulationParameters::default(),
            charts: ChartConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing constraint.
    pub fn check(&self) -> SimResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    fn validate_semantic(&self) -> SimResult<()> {
        let major = self.schema_version.split('.').next().unwrap_or_default();
        if major != SUPPORTED_SCHEMA_MAJOR {
            return Err(SimError::config(format!(
                "unsupported schema version {}",
                self.schema_version
            )));
        }

        let p = &self.parameters;
        for (name, value) in [
            ("fault_magnitude", p.fault_magnitude),
            ("cap_fraction", p.cap_fraction),
            ("repair_rate", p.repair_rate),
        ] {
            if !value.is_finite() {
                return Err(SimError::config(format!("{name} must be finite")));
            }
        }

        if self.output.dir.as_os_str().is_empty() {
            return Err(SimError::config("output directory must not be empty"));
        }

        Ok(())
    }

    /// Surface size of every chart.
    #[must_use]
    pub const fn chart_size(&self) -> ChartSize {
        ChartSize::new(self.charts.width, self.charts.height)
    }

    /// All four charts at [`Self::chart_size`].
    #[must_use]
    pub const fn chart_layout(&self) -> ChartLayout {
        ChartLayout::uniform(self.chart_size())
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    seed: Option<u64>,
    parameters: Option<SimulationParameters>,
    chart_size: Option<ChartSize>,
    output_dir: Option<PathBuf>,
    format: Option<ChartFormat>,
    export: Option<ExportFormat>,
}

impl AppConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the simulation inputs.
    #[must_use]
    pub const fn parameters(mut self, parameters: SimulationParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Set the chart surface size.
    #[must_use]
    pub const fn chart_size(mut self, size: ChartSize) -> Self {
        self.chart_size = Some(size);
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the chart file format.
    #[must_use]
    pub const fn format(mut self, format: ChartFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the series export format.
    #[must_use]
    pub const fn export(mut self, export: ExportFormat) -> Self {
        self.export = Some(export);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        let mut config = AppConfig::default();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(parameters) = self.parameters {
            config.parameters = parameters;
        }
        if let Some(size) = self.chart_size {
            config.charts.width = size.width;
            config.charts.height = size.height;
        }
        if let Some(dir) = self.output_dir {
            config.output.dir = dir;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(export) = self.export {
            config.output.export = export;
        }

        config
    }
}

/// Chart surface dimensions in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Surface width.
    #[validate(range(min = 60))]
    #[serde(default = "default_width")]
    pub width: u32,

    /// Surface height.
    #[validate(range(min = 40))]
    #[serde(default = "default_height")]
    pub height: u32,
}

const fn default_width() -> u32 {
    640
}

const fn default_height() -> u32 {
    260
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Output destination and formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving chart files and exports.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Chart file format.
    #[serde(default)]
    pub format: ChartFormat,

    /// Series export format.
    #[serde(default)]
    pub export: ExportFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("target/tgrm")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: ChartFormat::default(),
            export: ExportFormat::default(),
        }
    }
}
