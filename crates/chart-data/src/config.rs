// File: crates/chart-data/src/config.rs
// Summary: Plain-value configuration consumed by the data layer, validated eagerly.

use std::time::Duration;

use crate::error::ConfigError;

/// Which edge the chart scrolls to when it first receives data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitialScroll {
    #[default]
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 500,
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Effectively animated: enabled and with a non-zero duration.
    pub fn is_animated(&self) -> bool {
        self.enabled && self.duration_ms > 0
    }
}

/// Top-level configuration surface. Loaded and deserialized externally;
/// validated here before anything consumes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    pub animation: AnimationConfig,
    pub initial_scroll: InitialScroll,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            initial_scroll: InitialScroll::default(),
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl ChartConfig {
    /// Reject invariant violations up front instead of clamping them away
    /// later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0) {
            return Err(ConfigError::NonPositiveZoom(self.min_zoom));
        }
        if self.max_zoom < self.min_zoom {
            return Err(ConfigError::ZoomRangeInverted {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        Ok(())
    }

    pub fn clamp_zoom(&self, factor: f32) -> f32 {
        factor.clamp(self.min_zoom, self.max_zoom)
    }
}
