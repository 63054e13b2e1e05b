//! Platform-agnostic render commands for the dashboard charts.
//!
//! Implements the command pattern for rendering: chart routines emit an
//! ordered list of [`RenderCommand`]s in surface pixel coordinates, and a
//! [`RenderTarget`](crate::renderers::RenderTarget) replays them onto SVG,
//! bitmap or an HTML canvas.
//!
//! Every chart fully repaints its surface: the first command is always a
//! [`RenderCommand::Clear`].

pub mod line;
pub mod scale;
pub mod scatter;

use serde::{Deserialize, Serialize};

pub use line::{line_chart, ChartSpec};
pub use scale::{LinearScale, PlotFrame};
pub use scatter::scatter_chart;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// CSS hex notation (`#rrggbb`), alpha ignored.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    // Chart chrome
    pub const BACKGROUND: Self = Self::rgb(0xfa, 0xfa, 0xfa);
    pub const GRID: Self = Self::rgb(0xdd, 0xdd, 0xdd);
    pub const AXIS: Self = Self::rgb(0x99, 0x99, 0x99);
    pub const LEGEND_TEXT: Self = Self::rgb(0x44, 0x44, 0x44);
    pub const LABEL_TEXT: Self = Self::rgb(0x33, 0x33, 0x33);
}

/// Stroke colors of line-chart series, cycled by series index.
pub const SERIES_PALETTE: [Color; 4] = [
    Color::rgb(0x15, 0x65, 0xc0),
    Color::rgb(0x2e, 0x7d, 0x32),
    Color::rgb(0xc6, 0x28, 0x28),
    Color::rgb(0x6a, 0x1b, 0x9a),
];

/// Fill colors of scatter markers, cycled by point index.
pub const POINT_PALETTE: [Color; 4] = [
    Color::rgb(0x0d, 0x47, 0xa1),
    Color::rgb(0xb7, 0x1c, 0x1c),
    Color::rgb(0x1b, 0x5e, 0x20),
    Color::rgb(0x4a, 0x14, 0x8c),
];

/// Font size of legends, labels and captions.
pub const FONT_SIZE: f64 = 12.0;

/// Pick a palette entry for the `index`-th series or point.
#[must_use]
pub fn palette_color(palette: &[Color; 4], index: usize) -> Color {
    palette[index % palette.len()]
}

/// Orientation of a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextRotation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Bottom to top (rotated -90°).
    Vertical,
}

/// Platform-agnostic render command.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
/// Text is anchored at its left baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill the whole surface.
    Clear { color: Color },

    /// Fill an axis-aligned rectangle.
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },

    /// Stroke a connected polyline.
    Polyline {
        points: Vec<(f64, f64)>,
        color: Color,
        width: f64,
    },

    /// Fill a circle.
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },

    /// Draw a text run.
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Color,
        size: f64,
        rotation: TextRotation,
    },
}

impl RenderCommand {
    /// Whether every coordinate of the command is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Clear { .. } => true,
            Self::FillRect {
                x,
                y,
                width,
                height,
                ..
            } => [x, y, width, height].iter().all(|v| v.is_finite()),
            Self::Polyline { points, width, .. } => {
                width.is_finite() && points.iter().all(|(x, y)| x.is_finite() && y.is_finite())
            }
            Self::FillCircle { x, y, radius, .. } => {
                x.is_finite() && y.is_finite() && radius.is_finite()
            }
            Self::Text { x, y, size, .. } => x.is_finite() && y.is_finite() && size.is_finite(),
        }
    }
}

/// Pixel dimensions of a chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 260,
        }
    }
}

impl ChartSize {
    /// Create a chart size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
