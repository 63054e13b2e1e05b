//! # tgrm-sim
//!
//! Deterministic toy model comparing targeted, bounded repair (TGRM) of a
//! degraded predictor against generic retraining.
//!
//! - [`model`]: the two update rules and the step simulator
//! - [`render`]: backend-free line and scatter charts as render commands
//! - [`renderers`]: SVG/PNG output and, with the `wasm` feature, HTML canvas
//! - [`dashboard`]: one refresh of the four charts plus textual summaries
//!
//! ## Example
//!
//! ```rust
//! use tgrm_sim::prelude::*;
//!
//! let config = AppConfig::builder().seed(42).build();
//! let mut rng = SimRng::new(config.seed);
//! let frame = run_dashboard(&config.parameters, &config.chart_layout(), &mut rng);
//! assert!(frame.repair.to_string().starts_with("Repair (TGRM)"));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod render;
pub mod renderers;
pub mod verify;

#[cfg(feature = "wasm")]
pub mod web_app;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AppConfig, AppConfigBuilder};
    pub use crate::dashboard::{run_dashboard, ChartKind, ChartLayout, DashboardFrame};
    pub use crate::engine::rng::{NoiseSource, SimRng, ZeroNoise};
    pub use crate::error::{SimError, SimResult};
    pub use crate::model::{simulate, SimulationParameters, SimulationResult, StrategyKind};
    pub use crate::render::{ChartSize, RenderCommand};
    pub use crate::renderers::{ChartFormat, RenderTarget};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
