// File: crates/chart-data/src/marker.rs
// Summary: Persistent marker model; claims headroom above the plot.

use crate::layout::{InsetContributor, Insets, LayoutContext};

/// A fixed-size marker pinned above the plot area (e.g. a value bubble).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub size: f32,
}

impl Marker {
    pub fn new(size: f32) -> Self {
        Self { size }
    }
}

impl InsetContributor for Marker {
    fn base_insets(&self, _ctx: &LayoutContext) -> Insets {
        Insets::new(0.0, self.size, 0.0, 0.0)
    }
}
