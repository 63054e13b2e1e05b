//! Simulation engine primitives.
//!
//! Only the randomness layer lives here; the model itself is in
//! [`crate::model`].

pub mod rng;

pub use rng::{FixedNoise, NoiseSource, SimRng, ZeroNoise};
