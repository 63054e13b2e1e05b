//! Render targets for [`RenderCommand`] lists.
//!
//! Chart routines in [`crate::render`] are backend-free; a target replays
//! their output onto a concrete surface.
//!
//! ```text
//! line_chart / scatter_chart
//!       ↓
//!  Vec<RenderCommand>
//!       ↓           ↓
//!  PlottersTarget  CanvasTarget (wasm)
//!  (SVG / PNG)
//! ```

#[cfg(feature = "wasm")]
pub mod canvas;
pub mod backend;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimResult;
use crate::render::RenderCommand;

#[cfg(feature = "wasm")]
pub use canvas::CanvasTarget;
pub use backend::{render_svg_string, write_chart, PlottersTarget};

/// A surface that can execute render commands.
pub trait RenderTarget {
    /// Execute a single command.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the drawing operation.
    fn draw(&mut self, command: &RenderCommand) -> SimResult<()>;

    /// Execute `commands` in order.
    ///
    /// Commands carrying non-finite coordinates are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    fn render(&mut self, commands: &[RenderCommand]) -> SimResult<()> {
        for command in commands {
            if !command.is_finite() {
                debug!(?command, "skipping non-finite render command");
                continue;
            }
            self.draw(command)?;
        }
        Ok(())
    }

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails to write its output.
    fn finish(&mut self) -> SimResult<()> {
        Ok(())
    }
}

/// File format of rendered charts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// Scalable vector graphics.
    #[default]
    Svg,
    /// Portable network graphics.
    Png,
}

impl ChartFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}
