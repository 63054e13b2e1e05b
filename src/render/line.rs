//! Multi-series line chart.

use super::scale::{extent, PlotFrame};
use super::{
    palette_color, ChartSize, Color, RenderCommand, TextRotation, FONT_SIZE, SERIES_PALETTE,
};

/// Number of horizontal grid lines.
const GRID_LINES: usize = 6;
/// Horizontal distance between legend entries.
const LEGEND_SPACING: f64 = 120.0;
/// Side of a legend swatch.
const LEGEND_SWATCH: f64 = 10.0;
/// Stroke width of data series.
const SERIES_WIDTH: f64 = 2.0;

/// Series and their legend labels for one draw call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpec<'a> {
    /// Y-values, one slice per series, aligned with the x-positions.
    pub series: Vec<&'a [f64]>,
    /// Legend label per series. Missing labels become `S1`, `S2`, ...
    pub labels: Vec<&'a str>,
}

impl<'a> ChartSpec<'a> {
    /// Create an empty spec.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            series: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Append a labelled series.
    #[must_use]
    pub fn with_series(mut self, label: &'a str, values: &'a [f64]) -> Self {
        self.series.push(values);
        self.labels.push(label);
        self
    }

    fn label(&self, index: usize) -> String {
        self.labels
            .get(index)
            .filter(|l| !l.is_empty())
            .map_or_else(|| format!("S{}", index + 1), |l| (*l).to_string())
    }
}

/// Render a line chart of `spec` against the x-positions `xs`.
///
/// The vertical scale spans the joint min/max of every series; x maps from
/// the first to the last position.
#[must_use]
pub fn line_chart(size: ChartSize, xs: &[f64], spec: &ChartSpec<'_>) -> Vec<RenderCommand> {
    let frame = PlotFrame::new(size.width, size.height);
    let mut commands = Vec::with_capacity(GRID_LINES + 2 + 3 * spec.series.len());

    commands.push(RenderCommand::Clear {
        color: Color::BACKGROUND,
    });

    let grid_step = frame.grid_span() / (GRID_LINES - 1) as f64;
    for i in 0..GRID_LINES {
        let y = frame.top() + i as f64 * grid_step;
        commands.push(RenderCommand::Polyline {
            points: vec![(frame.left(), y), (frame.right(), y)],
            color: Color::GRID,
            width: 1.0,
        });
    }
    commands.push(RenderCommand::Polyline {
        points: frame.axis_points(),
        color: Color::AXIS,
        width: 1.0,
    });

    let x_first = xs.first().copied().unwrap_or(0.0);
    let x_last = xs.last().copied().unwrap_or(0.0);
    let x_scale = frame.x_scale(x_first, x_last);
    let (y_min, y_max) = extent(spec.series.iter().flat_map(|s| s.iter().copied()));
    let y_scale = frame.y_scale(y_min, y_max);

    for (k, ys) in spec.series.iter().enumerate() {
        let color = palette_color(&SERIES_PALETTE, k);

        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| (x_scale.map(x), y_scale.map(y)))
            .collect();
        if !points.is_empty() {
            commands.push(RenderCommand::Polyline {
                points,
                color,
                width: SERIES_WIDTH,
            });
        }

        let offset = k as f64 * LEGEND_SPACING;
        commands.push(RenderCommand::FillRect {
            x: 50.0 + offset,
            y: 8.0,
            width: LEGEND_SWATCH,
            height: LEGEND_SWATCH,
            color,
        });
        commands.push(RenderCommand::Text {
            x: 66.0 + offset,
            y: 17.0,
            text: spec.label(k),
            color: Color::LEGEND_TEXT,
            size: FONT_SIZE,
            rotation: TextRotation::Horizontal,
        });
    }

    commands
}
