//! CLI module tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::args::{Args, Command, ModelArgs, RunArgs, VerifyArgs};
use super::commands::{config_command, run_cli, summary_command, verify_command, write_frame};
use super::output::{format_summaries, format_verify_report, version_line};
use crate::config::AppConfig;
use crate::dashboard::run_dashboard;
use crate::engine::rng::SimRng;
use crate::export::ExportFormat;
use crate::renderers::ChartFormat;
use crate::verify::verify_reproducibility;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_run_defaults() {
    let args = Args::parse_from(["tgrm-sim", "run"]);
    assert_eq!(args.verbose, 0);
    assert_eq!(args.command, Command::Run(RunArgs::default()));
}

#[test]
fn test_parse_run_all_flags() {
    let args = Args::parse_from([
        "tgrm-sim",
        "run",
        "--config",
        "tgrm.yaml",
        "--seed",
        "7",
        "--steps",
        "120",
        "--fault",
        "0.5",
        "--cap",
        "15",
        "--repair-rate",
        "0.3",
        "--out-dir",
        "charts",
        "--format",
        "png",
        "--width",
        "800",
        "--height",
        "300",
        "--export",
        "csv",
        "-v",
    ]);
    assert_eq!(args.verbose, 1);
    let Command::Run(run) = args.command else {
        panic!("expected run");
    };
    assert_eq!(run.model.config, Some(PathBuf::from("tgrm.yaml")));
    assert_eq!(run.model.seed, Some(7));
    assert_eq!(run.model.steps, Some(120));
    assert_eq!(run.model.fault, Some(0.5));
    assert_eq!(run.model.cap, Some(15.0));
    assert_eq!(run.model.repair_rate, Some(0.3));
    assert_eq!(run.out_dir, Some(PathBuf::from("charts")));
    assert_eq!(run.format, Some(ChartFormat::Png));
    assert_eq!(run.width, Some(800));
    assert_eq!(run.height, Some(300));
    assert_eq!(run.export, Some(ExportFormat::Csv));
}

#[test]
fn test_parse_verify_default_runs() {
    let args = Args::parse_from(["tgrm-sim", "verify", "--seed", "3"]);
    let Command::Verify(verify) = args.command else {
        panic!("expected verify");
    };
    assert_eq!(verify.runs, 3);
    assert_eq!(verify.model.seed, Some(3));
}

#[test]
fn test_parse_summary_and_version() {
    let args = Args::parse_from(["tgrm-sim", "-vv", "summary", "--steps", "10"]);
    assert_eq!(args.verbose, 2);
    assert!(matches!(args.command, Command::Summary(ModelArgs { steps: Some(10), .. })));

    let args = Args::parse_from(["tgrm-sim", "version"]);
    assert_eq!(args.command, Command::Version);
}

#[test]
fn test_parse_rejects_bad_values() {
    assert!(Args::try_parse_from(["tgrm-sim"]).is_err());
    assert!(Args::try_parse_from(["tgrm-sim", "unknown"]).is_err());
    assert!(Args::try_parse_from(["tgrm-sim", "run", "--steps", "many"]).is_err());
    assert!(Args::try_parse_from(["tgrm-sim", "run", "--format", "gif"]).is_err());
}

// ============================================================================
// Resolution tests
// ============================================================================

#[test]
fn test_resolve_defaults() {
    let config = ModelArgs::default().resolve().unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_cap_flag_is_percent() {
    let args = ModelArgs {
        cap: Some(25.0),
        ..ModelArgs::default()
    };
    let config = args.resolve().unwrap();
    assert!((config.parameters.cap_fraction - 0.25).abs() < 1e-12);
}

#[test]
fn test_flags_override_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"seed: 5\nparameters:\n  step_count: 40\n  repair_rate: 0.5\n")
        .unwrap();

    let args = ModelArgs {
        config: Some(file.path().to_path_buf()),
        steps: Some(80),
        ..ModelArgs::default()
    };
    let config = args.resolve().unwrap();
    assert_eq!(config.seed, 5);
    assert_eq!(config.parameters.step_count, 80);
    assert!((config.parameters.repair_rate - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_flags_are_validated() {
    let bad_cap = ModelArgs {
        cap: Some(150.0),
        ..ModelArgs::default()
    };
    assert!(bad_cap.resolve().unwrap_err().is_config_error());

    let zero_steps = ModelArgs {
        steps: Some(0),
        ..ModelArgs::default()
    };
    assert!(zero_steps.resolve().is_err());

    let too_many_steps = ModelArgs {
        steps: Some(usize::MAX),
        ..ModelArgs::default()
    };
    assert!(too_many_steps.resolve().is_err());

    let nan_inputs = ModelArgs {
        cap: Some(f64::NAN),
        repair_rate: Some(f64::NAN),
        ..ModelArgs::default()
    };
    assert!(nan_inputs.resolve().unwrap_err().is_config_error());

    let narrow = RunArgs {
        width: Some(10),
        ..RunArgs::default()
    };
    assert!(narrow.resolve().is_err());
}

#[test]
fn test_run_args_output_overrides() {
    let run = RunArgs {
        out_dir: Some(PathBuf::from("elsewhere")),
        format: Some(ChartFormat::Png),
        width: Some(320),
        height: Some(200),
        export: Some(ExportFormat::Json),
        ..RunArgs::default()
    };
    let config = run.resolve().unwrap();
    assert_eq!(config.output.dir, PathBuf::from("elsewhere"));
    assert_eq!(config.output.format, ChartFormat::Png);
    assert_eq!(config.charts.width, 320);
    assert_eq!(config.charts.height, 200);
    assert_eq!(config.output.export, ExportFormat::Json);
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_write_frame_creates_charts_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("out");
    let config = AppConfig::builder()
        .output_dir(&out)
        .export(ExportFormat::Csv)
        .build();
    let frame = run_dashboard(&config.parameters, &config.chart_layout(), &mut SimRng::new(1));

    let written = write_frame(&frame, &config).unwrap();
    assert_eq!(written.len(), 5);
    for name in ["accuracy.svg", "energy.svg", "bpi.svg", "scatter.svg", "series.csv"] {
        assert!(out.join(name).exists(), "{name} missing");
    }
}

#[test]
fn test_run_cli_run_success() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args::parse_from([
        "tgrm-sim",
        "run",
        "--steps",
        "50",
        "--out-dir",
        dir.path().to_str().unwrap(),
    ]);
    assert_eq!(run_cli(args), ExitCode::SUCCESS);
    assert!(dir.path().join("scatter.svg").exists());
}

#[test]
fn test_run_cli_invalid_config_fails() {
    let args = Args::parse_from(["tgrm-sim", "summary", "--config", "/nonexistent/tgrm.yaml"]);
    assert_eq!(run_cli(args), ExitCode::from(1));

    let args = Args::parse_from(["tgrm-sim", "summary", "--repair-rate", "2"]);
    assert_eq!(run_cli(args), ExitCode::from(1));
}

#[test]
fn test_summary_and_config_commands() {
    assert!(summary_command(&ModelArgs::default()).is_ok());
    assert!(config_command(&ModelArgs::default()).is_ok());
}

#[test]
fn test_verify_command() {
    let args = VerifyArgs {
        model: ModelArgs {
            steps: Some(100),
            ..ModelArgs::default()
        },
        runs: 4,
    };
    assert!(verify_command(&args).is_ok());

    let zero = VerifyArgs {
        model: ModelArgs::default(),
        runs: 0,
    };
    assert!(verify_command(&zero).is_err());
}

// ============================================================================
// Output tests
// ============================================================================

#[test]
fn test_format_summaries() {
    let config = AppConfig::default();
    let frame = run_dashboard(&config.parameters, &config.chart_layout(), &mut SimRng::new(42));
    let text = format_summaries(&frame);

    let blocks: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("Repair (TGRM)\nFinal Acc: "));
    assert!(blocks[1].starts_with("Retrain\nFinal Acc: "));
    assert!(blocks[0].contains("% · Energy: "));
    assert!(blocks[1].contains(" · BPI: "));
}

#[test]
fn test_format_verify_report() {
    let report = verify_reproducibility(&AppConfig::default().parameters, 42, 2).unwrap();
    let text = format_verify_report(&report);
    assert!(text.contains("Runs:      2"));
    assert!(text.contains(&report.fingerprint));
}

#[test]
fn test_version_line() {
    assert!(version_line().starts_with(&format!("tgrm-sim {}", env!("CARGO_PKG_VERSION"))));
}
