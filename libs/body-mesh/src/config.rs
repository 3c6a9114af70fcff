//! Externally settable generator parameters.
//!
//! Defaults come from the `config` crate. The generator never rejects a
//! configuration; it sanitizes it with [`GeneratorConfig::clamped`].
//! Authoring tools that want hard errors call [`GeneratorConfig::validate`].

use crate::error::ConfigError;
use config::constants::{
    DEBUG_POINT_SCALE, DEFAULT_AUTO_UPDATE, DEFAULT_MAX_SURFACE_SAMPLES,
    DEFAULT_MAX_TRIANGULATION_DISTANCE, DEFAULT_MIN_DISTANCE_BETWEEN_POINTS,
    DEFAULT_PROJECTION_STEPS, DEFAULT_PROJECTION_STEP_SIZE, DEFAULT_SAMPLE_DENSITY,
    DEFAULT_SURFACE_THRESHOLD,
};
use log::warn;
use serde::{Deserialize, Serialize};

/// How neighbor queries are answered during sampling and triangulation.
///
/// Both strategies accept exactly the same points and triangles in the
/// same order; the grid only skips pairs that cannot pass the distance
/// filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearch {
    /// Uniform hash grid
    #[default]
    Grid,
    /// Exhaustive pair/triple scan
    BruteForce,
}

/// Generator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Target isovalue of the density field.
    pub surface_threshold: f64,
    /// Debug-visualization density; sizes point markers only.
    pub sample_density: f64,
    /// Maximum number of accepted surface samples.
    pub max_surface_samples: usize,
    /// Projection iterations per random candidate.
    pub projection_steps: u32,
    /// Scale of each projection step.
    pub projection_step_size: f64,
    /// Minimum spacing between accepted samples.
    pub min_distance_between_points: f64,
    /// Maximum edge length of an emitted triangle.
    pub max_triangulation_distance: f64,
    /// Whether [`BodyGenerator::regenerate`](crate::BodyGenerator::regenerate)
    /// rebuilds the mesh.
    pub auto_update: bool,
    /// Seed for reproducible sampling; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    /// Neighbor query strategy.
    pub neighbor_search: NeighborSearch,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            surface_threshold: DEFAULT_SURFACE_THRESHOLD,
            sample_density: DEFAULT_SAMPLE_DENSITY,
            max_surface_samples: DEFAULT_MAX_SURFACE_SAMPLES,
            projection_steps: DEFAULT_PROJECTION_STEPS,
            projection_step_size: DEFAULT_PROJECTION_STEP_SIZE,
            min_distance_between_points: DEFAULT_MIN_DISTANCE_BETWEEN_POINTS,
            max_triangulation_distance: DEFAULT_MAX_TRIANGULATION_DISTANCE,
            auto_update: DEFAULT_AUTO_UPDATE,
            seed: None,
            neighbor_search: NeighborSearch::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default parameters with a fixed sampling seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Radius of the debug marker drawn for each surface sample.
    pub fn debug_point_radius(&self) -> f64 {
        self.sample_density * DEBUG_POINT_SCALE
    }

    /// Returns a copy with every parameter forced into its valid range.
    ///
    /// The threshold is clamped into [0, 1], lengths are floored at 0 and a
    /// NaN falls back to its default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use body_mesh::GeneratorConfig;
    ///
    /// let config = GeneratorConfig {
    ///     surface_threshold: 2.0,
    ///     projection_step_size: -1.0,
    ///     ..GeneratorConfig::default()
    /// }
    /// .clamped();
    /// assert_eq!(config.surface_threshold, 1.0);
    /// assert_eq!(config.projection_step_size, 0.0);
    /// ```
    #[must_use]
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let unit = |name: &str, value: f64, default: f64| {
            let clamped = if value.is_nan() { default } else { value.clamp(0.0, 1.0) };
            if clamped != value {
                warn!("clamped {name} from {value} to {clamped}");
            }
            clamped
        };
        let length = |name: &str, value: f64, default: f64| {
            let clamped = if value.is_nan() { default } else { value.clamp(0.0, f64::MAX) };
            if clamped != value {
                warn!("clamped {name} from {value} to {clamped}");
            }
            clamped
        };

        Self {
            surface_threshold: unit(
                "surface_threshold",
                self.surface_threshold,
                defaults.surface_threshold,
            ),
            sample_density: length("sample_density", self.sample_density, defaults.sample_density),
            projection_step_size: length(
                "projection_step_size",
                self.projection_step_size,
                defaults.projection_step_size,
            ),
            min_distance_between_points: length(
                "min_distance_between_points",
                self.min_distance_between_points,
                defaults.min_distance_between_points,
            ),
            max_triangulation_distance: length(
                "max_triangulation_distance",
                self.max_triangulation_distance,
                defaults.max_triangulation_distance,
            ),
            ..self.clone()
        }
    }

    /// Checks every parameter without modifying it.
    ///
    /// # Errors
    ///
    /// Returns the first parameter outside its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.surface_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.surface_threshold));
        }
        let lengths = [
            ("sample_density", self.sample_density),
            ("projection_step_size", self.projection_step_size),
            ("min_distance_between_points", self.min_distance_between_points),
            ("max_triangulation_distance", self.max_triangulation_distance),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeParameter { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let config = GeneratorConfig::default();
        assert_eq!(config.surface_threshold, 0.5);
        assert_eq!(config.max_surface_samples, 3000);
        assert_eq!(config.projection_steps, 8);
        assert_eq!(config.projection_step_size, 0.1);
        assert_eq!(config.min_distance_between_points, 0.1);
        assert_eq!(config.max_triangulation_distance, 0.5);
        assert!(config.auto_update);
        assert_eq!(config.seed, None);
        assert_eq!(config.neighbor_search, NeighborSearch::Grid);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamped_is_noop_for_valid_config() {
        let config = GeneratorConfig::seeded(7);
        assert_eq!(config.clamped(), config);
    }

    #[test]
    fn test_clamped_replaces_nan_with_default() {
        let config = GeneratorConfig {
            surface_threshold: f64::NAN,
            min_distance_between_points: f64::NAN,
            ..GeneratorConfig::default()
        }
        .clamped();
        assert_eq!(config.surface_threshold, 0.5);
        assert_eq!(config.min_distance_between_points, 0.1);
    }

    #[test]
    fn test_validate_rejects_negative_length() {
        let config = GeneratorConfig {
            max_triangulation_distance: -0.5,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeParameter {
                name: "max_triangulation_distance",
                value: -0.5
            })
        );
    }

    #[test]
    fn test_debug_point_radius() {
        let config = GeneratorConfig {
            sample_density: 0.5,
            ..GeneratorConfig::default()
        };
        assert!((config.debug_point_radius() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "surface_threshold": 0.3, "neighbor_search": "brute_force" }"#)
                .unwrap();
        assert_eq!(config.surface_threshold, 0.3);
        assert_eq!(config.neighbor_search, NeighborSearch::BruteForce);
        assert_eq!(config.max_surface_samples, 3000);
    }
}
