//! # Configuration Errors
//!
//! Meshing itself never fails: degenerate inputs produce empty or partial
//! results. The only fallible surface is strict parameter validation for
//! authoring tools that prefer rejecting input over clamping it.

use thiserror::Error;

/// A generator parameter outside its valid range.
///
/// ## Example
///
/// ```rust
/// use body_mesh::{ConfigError, GeneratorConfig};
///
/// let config = GeneratorConfig {
///     surface_threshold: 1.5,
///     ..GeneratorConfig::default()
/// };
/// assert!(matches!(config.validate(), Err(ConfigError::ThresholdOutOfRange(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The isovalue must lie in the density range [0, 1].
    #[error("Surface threshold must be within [0, 1]: {0}")]
    ThresholdOutOfRange(f64),

    /// A length or scale parameter is negative or not finite.
    #[error("Parameter '{name}' must be finite and non-negative: {value}")]
    NegativeParameter {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}
