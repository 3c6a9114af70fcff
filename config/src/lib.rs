//! # Config Crate
//!
//! Centralized configuration constants for the procedural body generator.
//! All magic numbers and tunable parameters are defined here so the
//! skeleton and meshing crates agree on the same reference values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DENSITY_FALLOFF, DEFAULT_SURFACE_THRESHOLD};
//!
//! // Normalized distance at which the field crosses the default isovalue
//! let crossing = (-DEFAULT_SURFACE_THRESHOLD.ln() / DENSITY_FALLOFF).sqrt();
//! assert!(crossing > 0.4 && crossing < 0.5);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Dependency Free**: Plain `const` items, no runtime state
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
