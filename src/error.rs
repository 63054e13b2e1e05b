//! Error types for tgrm-sim.
//!
//! The simulator and the chart renderers are total functions and never fail.
//! Errors only arise at the I/O edges: loading configuration, writing chart
//! files and exports, and reproducibility verification.

use thiserror::Error;

/// Result type alias for tgrm-sim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all tgrm-sim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Output Errors =====
    /// A render target rejected a drawing operation.
    #[error("Render error: {0}")]
    Render(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ===== Reproducibility =====
    /// Two runs with the same seed produced different results.
    #[error("Reproducibility violated: run {run} hash {found} differs from reference {expected}")]
    ReproducibilityMismatch {
        /// Zero-based index of the diverging run.
        run: usize,
        /// Reference hash (first run).
        expected: String,
        /// Hash of the diverging run.
        found: String,
    },
}

impl SimError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Whether the error came from user-supplied configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::YamlParse(_) | Self::Validation(_)
        )
    }
}
