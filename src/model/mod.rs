//! Repair-vs-retrain toy model.
//!
//! [`simulate`] runs both strategies side by side for a fixed number of
//! steps and records accuracy, cumulative energy and benefit-per-energy
//! after every step.
//!
//! # Example
//!
//! ```rust
//! use tgrm_sim::engine::SimRng;
//! use tgrm_sim::model::{simulate, SimulationParameters};
//!
//! let params = SimulationParameters::default();
//! let mut rng = SimRng::new(42);
//! let result = simulate(&params, &mut rng);
//! assert_eq!(result.len(), params.step_count);
//! ```

pub mod strategy;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::rng::NoiseSource;
use crate::error::{SimError, SimResult};

pub use strategy::{
    RepairStrategy, RetrainStrategy, Strategy, StrategyKind, StrategyState, ACCURACY_FLOOR,
    BPI_EPSILON, INITIAL_ACCURACY, REPAIR_ACCURACY_CEILING, RETRAIN_ACCURACY_CEILING,
};

/// Scale applied to the signed unit draw before the fault magnitude.
pub const NOISE_SCALE: f64 = 0.002;

/// Largest step count accepted from configuration.
pub const MAX_STEP_COUNT: usize = 10_000_000;

/// Inputs of one simulation run.
///
/// The simulator trusts these values: out-of-range inputs propagate through
/// the accuracy clamps or produce degenerate series. Range checks only
/// happen where parameters enter from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimulationParameters {
    /// Number of steps to run.
    #[validate(range(min = 1, max = 10_000_000))]
    #[serde(default = "default_step_count")]
    pub step_count: usize,

    /// Scale of the injected per-step disturbance.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_fault_magnitude")]
    pub fault_magnitude: f64,

    /// Fraction of items targeted by repair each step.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_cap_fraction")]
    pub cap_fraction: f64,

    /// Repair coefficient.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_repair_rate")]
    pub repair_rate: f64,
}

const fn default_step_count() -> usize {
    300
}

const fn default_fault_magnitude() -> f64 {
    0.25
}

const fn default_cap_fraction() -> f64 {
    0.10
}

const fn default_repair_rate() -> f64 {
    0.25
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            step_count: default_step_count(),
            fault_magnitude: default_fault_magnitude(),
            cap_fraction: default_cap_fraction(),
            repair_rate: default_repair_rate(),
        }
    }
}

impl SimulationParameters {
    /// Build parameters from the control values of the page, where the cap
    /// is entered as a percentage.
    #[must_use]
    pub fn from_controls(
        step_count: usize,
        fault_magnitude: f64,
        cap_percent: f64,
        repair_rate: f64,
    ) -> Self {
        Self {
            step_count,
            fault_magnitude,
            cap_fraction: cap_percent / 100.0,
            repair_rate,
        }
    }

    /// The repair strategy these parameters describe.
    #[must_use]
    pub const fn repair_strategy(&self) -> RepairStrategy {
        RepairStrategy::new(self.cap_fraction, self.repair_rate)
    }
}

/// Final values of one strategy after the last step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    /// Accuracy after the last step.
    pub accuracy: f64,
    /// Total energy spent.
    pub energy: f64,
    /// Benefit-per-energy after the last step.
    pub benefit_per_energy: f64,
}

/// Six step-aligned series produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Repair accuracy after each step.
    pub accuracy_repair: Vec<f64>,
    /// Retrain accuracy after each step.
    pub accuracy_retrain: Vec<f64>,
    /// Cumulative repair energy.
    pub energy_repair: Vec<f64>,
    /// Cumulative retrain energy.
    pub energy_retrain: Vec<f64>,
    /// Repair benefit-per-energy.
    pub bpi_repair: Vec<f64>,
    /// Retrain benefit-per-energy.
    pub bpi_retrain: Vec<f64>,
}

impl SimulationResult {
    fn with_capacity(steps: usize) -> Self {
        Self {
            accuracy_repair: Vec::with_capacity(steps),
            accuracy_retrain: Vec::with_capacity(steps),
            energy_repair: Vec::with_capacity(steps),
            energy_retrain: Vec::with_capacity(steps),
            bpi_repair: Vec::with_capacity(steps),
            bpi_retrain: Vec::with_capacity(steps),
        }
    }

    fn record(&mut self, repair: &StrategyState, retrain: &StrategyState) {
        self.accuracy_repair.push(repair.accuracy);
        self.energy_repair.push(repair.energy);
        self.bpi_repair.push(repair.benefit_per_energy());

        self.accuracy_retrain.push(retrain.accuracy);
        self.energy_retrain.push(retrain.energy);
        self.bpi_retrain.push(retrain.benefit_per_energy());
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accuracy_repair.len()
    }

    /// Whether no step was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accuracy_repair.is_empty()
    }

    /// Accuracy series of a strategy.
    #[must_use]
    pub fn accuracy(&self, kind: StrategyKind) -> &[f64] {
        match kind {
            StrategyKind::Repair => &self.accuracy_repair,
            StrategyKind::Retrain => &self.accuracy_retrain,
        }
    }

    /// Cumulative energy series of a strategy.
    #[must_use]
    pub fn energy(&self, kind: StrategyKind) -> &[f64] {
        match kind {
            StrategyKind::Repair => &self.energy_repair,
            StrategyKind::Retrain => &self.energy_retrain,
        }
    }

    /// Benefit-per-energy series of a strategy.
    #[must_use]
    pub fn benefit_per_energy(&self, kind: StrategyKind) -> &[f64] {
        match kind {
            StrategyKind::Repair => &self.bpi_repair,
            StrategyKind::Retrain => &self.bpi_retrain,
        }
    }

    /// Values after the last step, or `None` for an empty run.
    #[must_use]
    pub fn final_metrics(&self, kind: StrategyKind) -> Option<FinalMetrics> {
        let accuracy = *self.accuracy(kind).last()?;
        let energy = *self.energy(kind).last()?;
        Some(FinalMetrics {
            accuracy,
            energy,
            benefit_per_energy: (accuracy - INITIAL_ACCURACY) / (energy + BPI_EPSILON),
        })
    }

    /// Content hash of the result, stable across runs and platforms.
    ///
    /// # Errors
    ///
    /// Returns error if the result cannot be encoded.
    pub fn fingerprint(&self) -> SimResult<String> {
        let bytes = bincode::serialize(self)
            .map_err(|e| SimError::serialization(format!("bincode encoding failed: {e}")))?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

/// Run both strategies for `params.step_count` steps.
///
/// One noise draw is taken per step and applied to both strategies, so
/// their trajectories share the same disturbance realization.
pub fn simulate<N: NoiseSource + ?Sized>(
    params: &SimulationParameters,
    source: &mut N,
) -> SimulationResult {
    let repair = params.repair_strategy();
    let retrain = RetrainStrategy;

    let mut result = SimulationResult::with_capacity(params.step_count.min(MAX_STEP_COUNT));
    let mut repair_state = StrategyState::initial();
    let mut retrain_state = StrategyState::initial();

    for _ in 0..params.step_count {
        let noise = source.signed_unit() * NOISE_SCALE * params.fault_magnitude;
        repair.step(&mut repair_state, noise);
        retrain.step(&mut retrain_state, noise);
        result.record(&repair_state, &retrain_state);
    }

    result
}
