//! Labelled scatter chart.

use super::scale::{extent, PlotFrame};
use super::{
    palette_color, ChartSize, Color, RenderCommand, TextRotation, FONT_SIZE, POINT_PALETTE,
};

/// Radius of a point marker.
pub const MARKER_RADIUS: f64 = 5.0;
/// Caption of the horizontal axis.
pub const X_CAPTION: &str = "Energy →";
/// Caption of the vertical axis.
pub const Y_CAPTION: &str = "Accuracy ↑";

/// Render `points` as labelled markers.
///
/// Both axes are scaled to the point set's own extent, independently of any
/// other chart.
#[must_use]
pub fn scatter_chart(
    size: ChartSize,
    points: &[(f64, f64)],
    labels: &[&str],
) -> Vec<RenderCommand> {
    let frame = PlotFrame::new(size.width, size.height);
    let mut commands = Vec::with_capacity(4 + 2 * points.len());

    commands.push(RenderCommand::Clear {
        color: Color::BACKGROUND,
    });
    commands.push(RenderCommand::Polyline {
        points: frame.axis_points(),
        color: Color::AXIS,
        width: 1.0,
    });

    let (x_min, x_max) = extent(points.iter().map(|p| p.0));
    let (y_min, y_max) = extent(points.iter().map(|p| p.1));
    let x_scale = frame.x_scale(x_min, x_max);
    let y_scale = frame.y_scale(y_min, y_max);

    for (i, &(x, y)) in points.iter().enumerate() {
        let px = x_scale.map(x);
        let py = y_scale.map(y);
        commands.push(RenderCommand::FillCircle {
            x: px,
            y: py,
            radius: MARKER_RADIUS,
            color: palette_color(&POINT_PALETTE, i),
        });
        commands.push(RenderCommand::Text {
            x: px + 8.0,
            y: py + 4.0,
            text: labels.get(i).copied().unwrap_or_default().to_string(),
            color: Color::LABEL_TEXT,
            size: FONT_SIZE,
            rotation: TextRotation::Horizontal,
        });
    }

    commands.push(RenderCommand::Text {
        x: frame.width - 70.0,
        y: frame.height - 5.0,
        text: X_CAPTION.to_string(),
        color: Color::LABEL_TEXT,
        size: FONT_SIZE,
        rotation: TextRotation::Horizontal,
    });
    commands.push(RenderCommand::Text {
        x: 12.0,
        y: frame.height / 2.0,
        text: Y_CAPTION.to_string(),
        color: Color::LABEL_TEXT,
        size: FONT_SIZE,
        rotation: TextRotation::Vertical,
    });

    commands
}
