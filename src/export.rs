//! Step-series export.
//!
//! Writes the six series of a [`SimulationResult`] one row per step, as
//! JSON Lines or CSV, with the columns
//! `step, accuracy_repair, accuracy_retrain, energy_repair, energy_retrain,
//! bpi_repair, bpi_retrain`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::model::SimulationResult;

/// Header row of the CSV export.
pub const CSV_HEADER: &str =
    "step,accuracy_repair,accuracy_retrain,energy_repair,energy_retrain,bpi_repair,bpi_retrain";

/// File stem of the export.
const EXPORT_STEM: &str = "series";

/// Export format options.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// No export.
    #[default]
    None,
    /// JSON Lines (one object per step).
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

impl ExportFormat {
    /// File extension, or `None` when nothing is exported.
    #[must_use]
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json => Some("jsonl"),
            Self::Csv => Some("csv"),
        }
    }
}

/// One row of the export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub accuracy_repair: f64,
    pub accuracy_retrain: f64,
    pub energy_repair: f64,
    pub energy_retrain: f64,
    pub bpi_repair: f64,
    pub bpi_retrain: f64,
}

impl StepRecord {
    fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.step,
            self.accuracy_repair,
            self.accuracy_retrain,
            self.energy_repair,
            self.energy_retrain,
            self.bpi_repair,
            self.bpi_retrain
        )
    }
}

/// Rows of `result`, in step order.
pub fn step_records(result: &SimulationResult) -> impl Iterator<Item = StepRecord> + '_ {
    (0..result.len()).map(move |step| StepRecord {
        step,
        accuracy_repair: result.accuracy_repair[step],
        accuracy_retrain: result.accuracy_retrain[step],
        energy_repair: result.energy_repair[step],
        energy_retrain: result.energy_retrain[step],
        bpi_repair: result.bpi_repair[step],
        bpi_retrain: result.bpi_retrain[step],
    })
}

/// Exporter for simulation series.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    /// Create an exporter for `format`.
    #[must_use]
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Export `result` to JSON Lines format.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_json_lines(result: &SimulationResult, path: &Path) -> SimResult<()> {
        let file =
            File::create(path).map_err(|e| SimError::io(format!("Failed to create file: {e}")))?;
        let mut writer = BufWriter::new(file);

        for record in step_records(result) {
            let json = serde_json::to_string(&record)
                .map_err(|e| SimError::serialization(format!("JSON serialization failed: {e}")))?;
            writeln!(writer, "{json}").map_err(|e| SimError::io(format!("Write failed: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| SimError::io(format!("Flush failed: {e}")))
    }

    /// Export `result` to CSV format.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_csv(result: &SimulationResult, path: &Path) -> SimResult<()> {
        let file =
            File::create(path).map_err(|e| SimError::io(format!("Failed to create file: {e}")))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{CSV_HEADER}")
            .map_err(|e| SimError::io(format!("Write header failed: {e}")))?;
        for record in step_records(result) {
            writeln!(writer, "{}", record.csv_row())
                .map_err(|e| SimError::io(format!("Write data failed: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| SimError::io(format!("Flush failed: {e}")))
    }

    /// Export using the configured format into `dir`.
    ///
    /// Returns the written path, or `None` when the format is
    /// [`ExportFormat::None`].
    ///
    /// # Errors
    ///
    /// Returns error if export fails.
    pub fn export(&self, result: &SimulationResult, dir: &Path) -> SimResult<Option<PathBuf>> {
        let Some(ext) = self.format.extension() else {
            return Ok(None);
        };
        let path = dir.join(format!("{EXPORT_STEM}.{ext}"));
        match self.format {
            ExportFormat::Json => Self::to_json_lines(result, &path)?,
            ExportFormat::Csv => Self::to_csv(result, &path)?,
            ExportFormat::None => return Ok(None),
        }
        info!(path = %path.display(), rows = result.len(), "series exported");
        Ok(Some(path))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::engine::rng::ZeroNoise;
    use crate::model::{simulate, SimulationParameters};

    fn small_result() -> SimulationResult {
        let params = SimulationParameters {
            step_count: 5,
            ..SimulationParameters::default()
        };
        simulate(&params, &mut ZeroNoise)
    }

    #[test]
    fn test_step_records() {
        let result = small_result();
        let records: Vec<_> = step_records(&result).collect();
        assert_eq!(records.len(), 5);
        assert_eq!(records[3].step, 3);
        assert!((records[3].energy_retrain - result.energy_retrain[3]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.jsonl");
        let result = small_result();
        Exporter::to_json_lines(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        let first: StepRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.step, 0);
        assert!((first.accuracy_repair - result.accuracy_repair[0]).abs() < f64::EPSILON);
        assert!(lines[4].contains("\"bpi_retrain\""));
    }

    #[test]
    fn test_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        Exporter::to_csv(&small_result(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].starts_with("0,"));
        assert_eq!(rows[0].split(',').count(), 7);
    }

    #[test]
    fn test_export_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let result = small_result();

        let none = Exporter::new(ExportFormat::None)
            .export(&result, dir.path())
            .unwrap();
        assert!(none.is_none());

        let csv = Exporter::new(ExportFormat::Csv)
            .export(&result, dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(csv, dir.path().join("series.csv"));
        assert!(csv.exists());

        let json = Exporter::new(ExportFormat::Json)
            .export(&result, dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(json.extension().and_then(|e| e.to_str()), Some("jsonl"));
    }

    #[test]
    fn test_export_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        Exporter::to_csv(&SimulationResult::default(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_export_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("series.csv");
        let err = Exporter::to_csv(&small_result(), &path).unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
