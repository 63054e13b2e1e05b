//! SVG and bitmap output through `plotters`.
//!
//! # Example
//!
//! ```rust
//! use tgrm_sim::render::{line_chart, ChartSize, ChartSpec};
//! use tgrm_sim::renderers::render_svg_string;
//!
//! let ys = [0.88, 0.9, 0.91];
//! let spec = ChartSpec::new().with_series("TGRM Repair", &ys);
//! let commands = line_chart(ChartSize::default(), &[0.0, 1.0, 2.0], &spec);
//! let svg = render_svg_string(ChartSize::default(), &commands).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, Circle, DrawingArea, DrawingBackend, IntoDrawingArea, IntoFont, PathElement,
    RGBAColor, Rectangle, SVGBackend, Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontTransform};
use tracing::{debug, info};

use super::{ChartFormat, RenderTarget};
use crate::error::{SimError, SimResult};
use crate::render::{ChartSize, Color, RenderCommand, TextRotation};

const FONT_FAMILY: &str = "sans-serif";

/// Replays render commands onto a `plotters` drawing area.
pub struct PlottersTarget<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    draw_text: bool,
}

impl<DB: DrawingBackend> PlottersTarget<DB> {
    /// Wrap a backend.
    pub fn new(backend: DB) -> Self {
        Self {
            area: backend.into_drawing_area(),
            draw_text: true,
        }
    }

    /// Enable or disable text output. Bitmap backends need a font
    /// rasterizer for text, which is only present with the `png-text`
    /// feature.
    #[must_use]
    pub fn with_text(mut self, draw_text: bool) -> Self {
        self.draw_text = draw_text;
        self
    }
}

impl<DB: DrawingBackend> RenderTarget for PlottersTarget<DB> {
    fn draw(&mut self, command: &RenderCommand) -> SimResult<()> {
        let drawn = match command {
            RenderCommand::Clear { color } => self.area.fill(&backend_color(*color)),
            RenderCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => self.area.draw(&Rectangle::new(
                [pixel(*x, *y), pixel(x + width, y + height)],
                backend_color(*color).filled(),
            )),
            RenderCommand::Polyline {
                points,
                color,
                width,
            } => {
                let path: Vec<(i32, i32)> = points.iter().map(|&(x, y)| pixel(x, y)).collect();
                self.area.draw(&PathElement::new(
                    path,
                    backend_color(*color).stroke_width(stroke_width(*width)),
                ))
            }
            RenderCommand::FillCircle {
                x,
                y,
                radius,
                color,
            } => self.area.draw(&Circle::new(
                pixel(*x, *y),
                round_to_i32(*radius),
                backend_color(*color).filled(),
            )),
            RenderCommand::Text {
                x,
                y,
                text,
                color,
                size,
                rotation,
            } => {
                if !self.draw_text {
                    debug!(%text, "text output disabled for this backend");
                    return Ok(());
                }
                let color = backend_color(*color);
                let mut style = (FONT_FAMILY, *size)
                    .into_font()
                    .color(&color)
                    .pos(Pos::new(HPos::Left, VPos::Bottom));
                if *rotation == TextRotation::Vertical {
                    style = style.transform(FontTransform::Rotate270);
                }
                self.area
                    .draw(&Text::new(text.as_str(), pixel(*x, *y), style))
            }
        };
        drawn.map_err(|e| SimError::render(e.to_string()))
    }

    fn finish(&mut self) -> SimResult<()> {
        self.area
            .present()
            .map_err(|e| SimError::render(e.to_string()))
    }
}

/// Render `commands` into an in-memory SVG document.
///
/// # Errors
///
/// Returns error if the SVG backend rejects a command.
pub fn render_svg_string(size: ChartSize, commands: &[RenderCommand]) -> SimResult<String> {
    let mut buffer = String::new();
    {
        let mut target =
            PlottersTarget::new(SVGBackend::with_string(&mut buffer, dimensions(size)));
        target.render(commands)?;
        target.finish()?;
    }
    Ok(buffer)
}

/// Render `commands` into a chart file at `path`.
///
/// # Errors
///
/// Returns error if the backend fails or the file cannot be written.
pub fn write_chart(
    path: &Path,
    format: ChartFormat,
    size: ChartSize,
    commands: &[RenderCommand],
) -> SimResult<()> {
    match format {
        ChartFormat::Svg => {
            let mut target = PlottersTarget::new(SVGBackend::new(path, dimensions(size)));
            target.render(commands)?;
            target.finish()?;
        }
        ChartFormat::Png => {
            let mut target = PlottersTarget::new(BitMapBackend::new(path, dimensions(size)))
                .with_text(cfg!(feature = "png-text"));
            target.render(commands)?;
            target.finish()?;
        }
    }
    info!(path = %path.display(), ?format, "chart written");
    Ok(())
}

const fn dimensions(size: ChartSize) -> (u32, u32) {
    (size.width, size.height)
}

fn backend_color(color: Color) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, f64::from(color.a) / 255.0)
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

fn pixel(x: f64, y: f64) -> (i32, i32) {
    (round_to_i32(x), round_to_i32(y))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stroke_width(width: f64) -> u32 {
    (width.round().max(1.0)) as u32
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::render::{line_chart, scatter_chart, ChartSpec};

    const SIZE: ChartSize = ChartSize::new(400, 200);

    #[test]
    fn test_line_chart_svg() {
        let repair = [0.88, 0.9, 0.92];
        let retrain = [0.88, 0.95, 0.99];
        let spec = ChartSpec::new()
            .with_series("TGRM Repair", &repair)
            .with_series("Retrain", &retrain);
        let commands = line_chart(SIZE, &[0.0, 1.0, 2.0], &spec);

        let svg = render_svg_string(SIZE, &commands).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("TGRM Repair"));
        assert!(svg.contains("Retrain"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_scatter_svg() {
        let commands = scatter_chart(SIZE, &[(0.6, 0.99), (3.0, 0.999)], &["Repair", "Retrain"]);
        let svg = render_svg_string(SIZE, &commands).unwrap();
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("Repair"));
    }

    #[test]
    fn test_skipped_non_finite_command() {
        let commands = vec![
            RenderCommand::Clear {
                color: Color::BACKGROUND,
            },
            RenderCommand::FillCircle {
                x: f64::INFINITY,
                y: 0.0,
                radius: 5.0,
                color: Color::AXIS,
            },
        ];
        let svg = render_svg_string(SIZE, &commands).unwrap();
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_write_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let commands = line_chart(SIZE, &[], &ChartSpec::new());
        write_chart(&path, ChartFormat::Svg, SIZE, &commands).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn test_write_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        // No series means no legend text, so no font rasterizer is needed.
        let commands = line_chart(SIZE, &[], &ChartSpec::new());
        write_chart(&path, ChartFormat::Png, SIZE, &commands).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.svg");
        let commands = line_chart(SIZE, &[], &ChartSpec::new());
        assert!(write_chart(&path, ChartFormat::Svg, SIZE, &commands).is_err());
    }

    #[test]
    fn test_stroke_width_at_least_one() {
        assert_eq!(stroke_width(0.2), 1);
        assert_eq!(stroke_width(2.0), 2);
        assert_eq!(pixel(1.4, 2.6), (1, 3));
    }
}
