//! One dashboard refresh: simulate, chart, summarize.
//!
//! [`run_dashboard`] is shared by every front end. The browser app replays
//! the resulting [`DashboardFrame`] onto its canvases, the CLI writes it to
//! chart files.

use std::fmt;

use tracing::{debug, info};

use crate::engine::rng::NoiseSource;
use crate::model::{simulate, FinalMetrics, SimulationParameters, SimulationResult, StrategyKind};
use crate::render::{line_chart, scatter_chart, ChartSize, ChartSpec, RenderCommand};

/// The four charts of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Accuracy of both strategies over steps.
    Accuracy,
    /// Cumulative energy of both strategies over steps.
    Energy,
    /// Benefit-per-energy of both strategies over steps.
    BenefitPerEnergy,
    /// Final (energy, accuracy) of each strategy.
    Scatter,
}

impl ChartKind {
    /// All charts, in display order.
    pub const ALL: [Self; 4] = [
        Self::Accuracy,
        Self::Energy,
        Self::BenefitPerEnergy,
        Self::Scatter,
    ];

    /// File name stem used when writing the chart to disk.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy",
            Self::Energy => "energy",
            Self::BenefitPerEnergy => "bpi",
            Self::Scatter => "scatter",
        }
    }

    /// Id of the page canvas showing this chart.
    #[must_use]
    pub const fn canvas_id(self) -> &'static str {
        match self {
            Self::Accuracy => "accChart",
            Self::Energy => "engChart",
            Self::BenefitPerEnergy => "bpiChart",
            Self::Scatter => "scatter",
        }
    }
}

/// Surface size of each chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    sizes: [ChartSize; 4],
}

impl ChartLayout {
    /// Every chart the same size.
    #[must_use]
    pub const fn uniform(size: ChartSize) -> Self {
        Self { sizes: [size; 4] }
    }

    /// Override the size of one chart.
    #[must_use]
    pub fn with_size(mut self, kind: ChartKind, size: ChartSize) -> Self {
        self.sizes[kind as usize] = size;
        self
    }

    /// Size of one chart.
    #[must_use]
    pub const fn size(&self, kind: ChartKind) -> ChartSize {
        self.sizes[kind as usize]
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::uniform(ChartSize::default())
    }
}

/// Final outcome of one strategy, formatted for display.
///
/// An empty run has no final values; its numbers print as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategySummary {
    pub kind: StrategyKind,
    pub metrics: Option<FinalMetrics>,
}

impl StrategySummary {
    /// Summarize `kind` from a finished run.
    #[must_use]
    pub fn from_result(result: &SimulationResult, kind: StrategyKind) -> Self {
        Self {
            kind,
            metrics: result.final_metrics(kind),
        }
    }
}

impl fmt::Display for StrategySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics.unwrap_or(FinalMetrics {
            accuracy: f64::NAN,
            energy: f64::NAN,
            benefit_per_energy: f64::NAN,
        });
        write!(
            f,
            "{}\nFinal Acc: {:.2}% · Energy: {:.3} · BPI: {:.3}",
            self.kind.heading(),
            m.accuracy * 100.0,
            m.energy,
            m.benefit_per_energy
        )
    }
}

/// Everything one refresh produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFrame {
    pub params: SimulationParameters,
    pub result: SimulationResult,
    pub accuracy: Vec<RenderCommand>,
    pub energy: Vec<RenderCommand>,
    pub benefit_per_energy: Vec<RenderCommand>,
    pub scatter: Vec<RenderCommand>,
    pub repair: StrategySummary,
    pub retrain: StrategySummary,
}

impl DashboardFrame {
    /// Commands of one chart.
    #[must_use]
    pub fn chart(&self, kind: ChartKind) -> &[RenderCommand] {
        match kind {
            ChartKind::Accuracy => &self.accuracy,
            ChartKind::Energy => &self.energy,
            ChartKind::BenefitPerEnergy => &self.benefit_per_energy,
            ChartKind::Scatter => &self.scatter,
        }
    }

    /// Summary of one strategy.
    #[must_use]
    pub const fn summary(&self, kind: StrategyKind) -> &StrategySummary {
        match kind {
            StrategyKind::Repair => &self.repair,
            StrategyKind::Retrain => &self.retrain,
        }
    }
}

/// X-positions of a run: `0, 1, ..., step_count - 1`.
#[must_use]
pub fn step_axis(step_count: usize) -> Vec<f64> {
    (0..step_count).map(|i| i as f64).collect()
}

/// Run the simulation once and build all four charts and both summaries.
pub fn run_dashboard<N: NoiseSource + ?Sized>(
    params: &SimulationParameters,
    layout: &ChartLayout,
    noise: &mut N,
) -> DashboardFrame {
    info!(
        steps = params.step_count,
        fault = params.fault_magnitude,
        cap = params.cap_fraction,
        repair_rate = params.repair_rate,
        "running dashboard"
    );

    let result = simulate(params, noise);
    let xs = step_axis(result.len());

    let accuracy = pair_chart(
        layout.size(ChartKind::Accuracy),
        &xs,
        &result,
        SimulationResult::accuracy,
    );
    let energy = pair_chart(
        layout.size(ChartKind::Energy),
        &xs,
        &result,
        SimulationResult::energy,
    );
    let benefit_per_energy = pair_chart(
        layout.size(ChartKind::BenefitPerEnergy),
        &xs,
        &result,
        SimulationResult::benefit_per_energy,
    );
    let scatter = final_scatter(layout.size(ChartKind::Scatter), &result);

    for (kind, commands) in [
        (ChartKind::Accuracy, &accuracy),
        (ChartKind::Energy, &energy),
        (ChartKind::BenefitPerEnergy, &benefit_per_energy),
        (ChartKind::Scatter, &scatter),
    ] {
        debug!(chart = ?kind, commands = commands.len(), "chart built");
    }

    DashboardFrame {
        params: *params,
        repair: StrategySummary::from_result(&result, StrategyKind::Repair),
        retrain: StrategySummary::from_result(&result, StrategyKind::Retrain),
        result,
        accuracy,
        energy,
        benefit_per_energy,
        scatter,
    }
}

fn pair_chart(
    size: ChartSize,
    xs: &[f64],
    result: &SimulationResult,
    series: fn(&SimulationResult, StrategyKind) -> &[f64],
) -> Vec<RenderCommand> {
    let spec = StrategyKind::ALL
        .into_iter()
        .fold(ChartSpec::new(), |spec, kind| {
            spec.with_series(kind.series_label(), series(result, kind))
        });
    line_chart(size, xs, &spec)
}

fn final_scatter(size: ChartSize, result: &SimulationResult) -> Vec<RenderCommand> {
    let (points, labels): (Vec<(f64, f64)>, Vec<&str>) = StrategyKind::ALL
        .into_iter()
        .filter_map(|kind| {
            result
                .final_metrics(kind)
                .map(|m| ((m.energy, m.accuracy), kind.point_label()))
        })
        .unzip();
    scatter_chart(size, &points, &labels)
}

/// Raw text of the four page controls.
///
/// Each control is read from its longest numeric prefix, so trailing junk
/// is ignored: `steps` and `cap_percent` as base-10 integers, `fault` and
/// `repair_rate` as decimals. Conversion never fails. A control with no
/// numeric prefix becomes zero steps or `NaN`, which flows through the
/// simulator unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlValues<'a> {
    pub steps: &'a str,
    pub fault: &'a str,
    /// Repair cap as a percentage.
    pub cap_percent: &'a str,
    pub repair_rate: &'a str,
}

impl ControlValues<'_> {
    /// Parameters described by the controls.
    #[must_use]
    pub fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters::from_controls(
            parse_count(self.steps),
            parse_decimal_prefix(self.fault),
            parse_integer_prefix(self.cap_percent),
            parse_decimal_prefix(self.repair_rate),
        )
    }
}

fn parse_count(text: &str) -> usize {
    parse_integer_prefix(text).max(0.0) as usize
}

fn sign_len(text: &str) -> usize {
    usize::from(text.starts_with(|c: char| c == '+' || c == '-'))
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// Leading `[+-]digits`, or `NaN` when there are no digits.
fn parse_integer_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    let start = sign_len(text);
    let end = start + digit_run(text.as_bytes(), start);
    if end == start {
        return f64::NAN;
    }
    text[..end].parse().unwrap_or(f64::NAN)
}

/// Leading decimal literal with optional fraction and exponent, or
/// `Infinity`. `NaN` when nothing numeric leads the text.
fn parse_decimal_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let sign = sign_len(text);

    if text[sign..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = digit_run(bytes, sign);
    let mut end = sign + int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digit_run(bytes, end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if end == sign {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + sign_len(&text[end + 1..]);
        let exp_digits = digit_run(bytes, exp_start);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }
    text[..end].parse().unwrap_or(f64::NAN)
}
