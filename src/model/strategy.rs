//! The two accuracy-improvement strategies.
//!
//! # Governing Equations
//!
//! ```text
//! Repair (TGRM):  push = k (1 - a)
//!                 a'   = clamp(a + 0.5 c push + ε, 0.5, 0.995)
//!                 E'   = E + 0.12 c push + 0.002
//!
//! Retrain:        push = 0.7 (1 - a)
//!                 a'   = clamp(a + 0.4 push + ε, 0.5, 0.999)
//!                 E'   = E + 0.4 push + 0.01
//!
//! BPI:            (a - a₀) / (E + 1e-9)
//! ```
//!
//! `c` is the cap fraction, `k` the repair rate, `ε` the shared per-step
//! noise and `a₀` the fixed starting accuracy.

use serde::{Deserialize, Serialize};

/// Accuracy both strategies start from.
pub const INITIAL_ACCURACY: f64 = 0.88;

/// Lower clamp shared by both strategies.
pub const ACCURACY_FLOOR: f64 = 0.5;

/// Upper clamp of the repair strategy.
pub const REPAIR_ACCURACY_CEILING: f64 = 0.995;

/// Upper clamp of the retrain strategy.
pub const RETRAIN_ACCURACY_CEILING: f64 = 0.999;

/// Guard added to the energy denominator of the BPI ratio.
pub const BPI_EPSILON: f64 = 1e-9;

/// Which strategy a series or summary belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Targeted, bounded repair of the top-K fraction.
    Repair,
    /// Generic retraining with larger updates.
    Retrain,
}

impl StrategyKind {
    /// Both strategies, in display order.
    pub const ALL: [Self; 2] = [Self::Repair, Self::Retrain];

    /// Heading used in the textual summary.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Repair => "Repair (TGRM)",
            Self::Retrain => "Retrain",
        }
    }

    /// Legend label used by the line charts.
    #[must_use]
    pub const fn series_label(self) -> &'static str {
        match self {
            Self::Repair => "TGRM Repair",
            Self::Retrain => "Retrain",
        }
    }

    /// Marker label used by the scatter chart.
    #[must_use]
    pub const fn point_label(self) -> &'static str {
        match self {
            Self::Repair => "Repair",
            Self::Retrain => "Retrain",
        }
    }
}

/// Running accuracy and cumulative energy of one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyState {
    /// Current accuracy.
    pub accuracy: f64,
    /// Energy spent so far.
    pub energy: f64,
}

impl Default for StrategyState {
    fn default() -> Self {
        Self::initial()
    }
}

impl StrategyState {
    /// State before the first step.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            accuracy: INITIAL_ACCURACY,
            energy: 0.0,
        }
    }

    /// Accuracy gained since the start per unit of energy spent.
    #[must_use]
    pub fn benefit_per_energy(&self) -> f64 {
        (self.accuracy - INITIAL_ACCURACY) / (self.energy + BPI_EPSILON)
    }
}

/// One per-step update rule.
pub trait Strategy {
    /// Advance `state` by one step under the shared `noise` term.
    fn step(&self, state: &mut StrategyState, noise: f64);
}

/// Bounded top-K repair pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepairStrategy {
    /// Fraction of items targeted per step.
    pub cap_fraction: f64,
    /// How aggressively the accuracy gap is closed.
    pub repair_rate: f64,
}

impl RepairStrategy {
    /// Create a repair strategy.
    #[must_use]
    pub const fn new(cap_fraction: f64, repair_rate: f64) -> Self {
        Self {
            cap_fraction,
            repair_rate,
        }
    }
}

impl Strategy for RepairStrategy {
    fn step(&self, state: &mut StrategyState, noise: f64) {
        // Diminishing returns as accuracy rises.
        let repair_push = self.repair_rate * (1.0 - state.accuracy);
        let useful_gain = 0.5 * self.cap_fraction * repair_push;
        state.accuracy = (state.accuracy + useful_gain + noise)
            .clamp(ACCURACY_FLOOR, REPAIR_ACCURACY_CEILING);

        state.energy += 0.12 * self.cap_fraction * repair_push + 0.002;
    }
}

/// Generic retraining baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrainStrategy;

impl Strategy for RetrainStrategy {
    fn step(&self, state: &mut StrategyState, noise: f64) {
        let train_push = 0.7 * (1.0 - state.accuracy);
        state.accuracy = (state.accuracy + 0.4 * train_push + noise)
            .clamp(ACCURACY_FLOOR, RETRAIN_ACCURACY_CEILING);

        state.energy += 0.4 * train_push + 0.01;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_initial_state() {
        let state = StrategyState::initial();
        assert!((state.accuracy - 0.88).abs() < TOL);
        assert!(state.energy.abs() < TOL);
        assert_eq!(StrategyState::default(), state);
    }

    #[test]
    fn test_initial_bpi_is_zero() {
        assert!(StrategyState::initial().benefit_per_energy().abs() < TOL);
    }

    #[test]
    fn test_repair_single_step_by_hand() {
        let repair = RepairStrategy::new(0.10, 0.25);
        let mut state = StrategyState::initial();
        repair.step(&mut state, 0.0);

        // push = 0.25 * 0.12 = 0.03; gain = 0.5 * 0.1 * 0.03 = 0.0015
        assert!((state.accuracy - 0.8815).abs() < TOL);
        // cost = 0.12 * 0.1 * 0.03 + 0.002 = 0.00236
        assert!((state.energy - 0.00236).abs() < TOL);
    }

    #[test]
    fn test_retrain_single_step_by_hand() {
        let mut state = StrategyState::initial();
        RetrainStrategy.step(&mut state, 0.0);

        // push = 0.7 * 0.12 = 0.084; gain = 0.4 * 0.084 = 0.0336
        assert!((state.accuracy - 0.9136).abs() < TOL);
        // cost = 0.4 * 0.084 + 0.01 = 0.0436
        assert!((state.energy - 0.0436).abs() < TOL);
    }

    #[test]
    fn test_noise_is_added_to_accuracy() {
        let repair = RepairStrategy::new(0.0, 0.0);
        let mut state = StrategyState::initial();
        repair.step(&mut state, 0.01);
        assert!((state.accuracy - 0.89).abs() < TOL);
    }

    #[test]
    fn test_clamps_hold_under_extreme_noise() {
        let repair = RepairStrategy::new(1.0, 1.0);
        let mut up = StrategyState::initial();
        let mut down = StrategyState::initial();
        for _ in 0..50 {
            repair.step(&mut up, 1.0);
            repair.step(&mut down, -1.0);
        }
        assert!((up.accuracy - REPAIR_ACCURACY_CEILING).abs() < TOL);
        assert!((down.accuracy - ACCURACY_FLOOR).abs() < TOL);

        let mut retrain = StrategyState::initial();
        RetrainStrategy.step(&mut retrain, 5.0);
        assert!((retrain.accuracy - RETRAIN_ACCURACY_CEILING).abs() < TOL);
    }

    #[test]
    fn test_retrain_costs_more_per_step() {
        let repair = RepairStrategy::new(0.10, 0.25);
        let mut a = StrategyState::initial();
        let mut b = StrategyState::initial();
        repair.step(&mut a, 0.0);
        RetrainStrategy.step(&mut b, 0.0);
        assert!(b.energy > a.energy);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(StrategyKind::Repair.heading(), "Repair (TGRM)");
        assert_eq!(StrategyKind::Repair.series_label(), "TGRM Repair");
        assert_eq!(StrategyKind::Retrain.point_label(), "Retrain");
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&StrategyKind::Repair).unwrap_or_default();
        assert_eq!(json, "\"repair\"");
    }
}
