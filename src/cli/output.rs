//! CLI output formatting.
//!
//! Summaries and reports go to stdout; logs go to stderr through `tracing`.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::dashboard::DashboardFrame;
use crate::model::StrategyKind;
use crate::verify::ReproducibilityReport;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("{}", version_line());
}

/// Version string including the build's git hash when known.
#[must_use]
pub fn version_line() -> String {
    let version = option_env!("TGRM_SIM_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    match option_env!("GIT_HASH").filter(|h| !h.is_empty()) {
        Some(hash) => format!("tgrm-sim {version} ({})", &hash[..hash.len().min(12)]),
        None => format!("tgrm-sim {version}"),
    }
}

/// Both strategy summaries, separated by a blank line.
#[must_use]
pub fn format_summaries(frame: &DashboardFrame) -> String {
    StrategyKind::ALL
        .iter()
        .map(|&kind| frame.summary(kind).to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Print both strategy summaries.
pub fn print_summaries(frame: &DashboardFrame) {
    println!("{}", format_summaries(frame));
}

/// Print the files a run produced.
pub fn print_written(paths: &[PathBuf]) {
    println!("\n{RULE}");
    println!("Files written:");
    for path in paths {
        println!("  ✓ {}", path.display());
    }
}

/// Reproducibility report as text.
#[must_use]
pub fn format_verify_report(report: &ReproducibilityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Reproducibility Check");
    let _ = writeln!(out, "{RULE}\n");
    let _ = writeln!(out, "  Seed:      {}", report.seed);
    let _ = writeln!(out, "  Runs:      {}", report.runs);
    let _ = writeln!(out, "  Identical: true");
    let _ = writeln!(out, "\n  Reference Hash: {}", report.fingerprint);
    let _ = write!(out, "\n✓ Reproducibility verified");
    out
}

/// Print a reproducibility report.
pub fn print_verify_report(report: &ReproducibilityReport) {
    println!("{}", format_verify_report(report));
}
