// File: crates/chart-data/src/error.rs
// Summary: Typed errors surfaced by the data layer.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("max zoom factor {max} must not be smaller than min zoom factor {min}")]
    ZoomRangeInverted { min: f32, max: f32 },

    #[error("min zoom factor must be positive, got {0}")]
    NonPositiveZoom(f32),
}
