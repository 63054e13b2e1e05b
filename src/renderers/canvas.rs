//! HTML canvas target for the browser dashboard.

use std::f64::consts::{FRAC_PI_2, TAU};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::RenderTarget;
use crate::error::{SimError, SimResult};
use crate::render::{ChartSize, RenderCommand, TextRotation};

/// Replays render commands onto a 2D canvas context.
#[derive(Debug, Clone)]
pub struct CanvasTarget {
    ctx: CanvasRenderingContext2d,
    size: ChartSize,
}

impl CanvasTarget {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns error if the canvas has no 2D context.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> SimResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| SimError::render("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SimError::render("context is not a CanvasRenderingContext2d"))?;
        Ok(Self {
            ctx,
            size: ChartSize::new(canvas.width(), canvas.height()),
        })
    }

    /// Pixel size of the underlying canvas.
    #[must_use]
    pub const fn size(&self) -> ChartSize {
        self.size
    }
}

impl RenderTarget for CanvasTarget {
    fn draw(&mut self, command: &RenderCommand) -> SimResult<()> {
        let ctx = &self.ctx;
        match command {
            RenderCommand::Clear { color } => {
                let (w, h) = (f64::from(self.size.width), f64::from(self.size.height));
                ctx.clear_rect(0.0, 0.0, w, h);
                ctx.set_fill_style_str(&color.to_hex());
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            RenderCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_hex());
                ctx.fill_rect(*x, *y, *width, *height);
            }
            RenderCommand::Polyline {
                points,
                color,
                width,
            } => {
                let Some((&(x0, y0), rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.set_stroke_style_str(&color.to_hex());
                ctx.set_line_width(*width);
                ctx.begin_path();
                ctx.move_to(x0, y0);
                for &(x, y) in rest {
                    ctx.line_to(x, y);
                }
                ctx.stroke();
            }
            RenderCommand::FillCircle {
                x,
                y,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_hex());
                ctx.begin_path();
                ctx.arc(*x, *y, *radius, 0.0, TAU).map_err(js_error)?;
                ctx.fill();
            }
            RenderCommand::Text {
                x,
                y,
                text,
                color,
                size,
                rotation,
            } => {
                ctx.set_fill_style_str(&color.to_hex());
                ctx.set_font(&format!("{size}px system-ui"));
                match rotation {
                    TextRotation::Horizontal => ctx.fill_text(text, *x, *y).map_err(js_error)?,
                    TextRotation::Vertical => {
                        ctx.save();
                        ctx.translate(*x, *y).map_err(js_error)?;
                        ctx.rotate(-FRAC_PI_2).map_err(js_error)?;
                        ctx.fill_text(text, 0.0, 0.0).map_err(js_error)?;
                        ctx.restore();
                    }
                }
            }
        }
        Ok(())
    }
}

fn js_error(value: JsValue) -> SimError {
    SimError::render(format!("{value:?}"))
}
