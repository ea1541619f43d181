// File: crates/chart-data/src/axis.rs
// Summary: Axis model with placement and the inset claims it negotiates.

use crate::layout::{InsetContributor, Insets, LayoutContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisPosition {
    Start,
    End,
    Top,
    Bottom,
}

/// An axis at one plot edge. Label metrics are plain values measured by the
/// host (text shaping is out of scope here).
#[derive(Clone, Debug)]
pub struct Axis {
    pub position: AxisPosition,
    pub line_thickness: f32,
    pub tick_length: f32,
    pub guideline_thickness: f32,
    pub label_height: f32,
    pub max_label_width: f32,
}

impl Axis {
    pub fn new(position: AxisPosition) -> Self {
        Self {
            position,
            line_thickness: 1.0,
            tick_length: 4.0,
            guideline_thickness: 1.0,
            label_height: 12.0,
            max_label_width: 32.0,
        }
    }

    pub fn start() -> Self {
        Self::new(AxisPosition::Start)
    }

    pub fn end() -> Self {
        Self::new(AxisPosition::End)
    }

    pub fn top() -> Self {
        Self::new(AxisPosition::Top)
    }

    pub fn bottom() -> Self {
        Self::new(AxisPosition::Bottom)
    }

    pub fn with_label_metrics(mut self, max_label_width: f32, label_height: f32) -> Self {
        self.max_label_width = max_label_width;
        self.label_height = label_height;
        self
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self.position, AxisPosition::Start | AxisPosition::End)
    }

    /// Width of the label column next to a vertical axis. Labels are only
    /// claimed once at least one fits the available height.
    fn label_column_width(&self, available_height: f32) -> f32 {
        if available_height >= self.label_height {
            self.max_label_width
        } else {
            0.0
        }
    }
}

impl InsetContributor for Axis {
    fn base_insets(&self, _ctx: &LayoutContext) -> Insets {
        let edge = self.line_thickness + self.tick_length;
        // Half a guideline of headroom on the perpendicular edges keeps
        // extreme guidelines from being clipped.
        let g = self.guideline_thickness * 0.5;
        match self.position {
            AxisPosition::Start => Insets::new(edge, g, 0.0, g),
            AxisPosition::End => Insets::new(0.0, g, edge, g),
            AxisPosition::Top => Insets::new(g, edge + self.label_height, g, 0.0),
            AxisPosition::Bottom => Insets::new(g, 0.0, g, edge + self.label_height),
        }
    }

    fn horizontal_insets(&self, _ctx: &LayoutContext, available_height: f32) -> Insets {
        if !self.is_vertical() {
            return Insets::default();
        }
        let width = self.label_column_width(available_height);
        if width <= 0.0 {
            return Insets::default();
        }
        // The full edge claim: line + tick + label column. Sums are fine
        // within one contributor; the negotiator maxes across contributors.
        let claim = self.line_thickness + self.tick_length + width;
        match self.position {
            AxisPosition::Start => Insets::new(claim, 0.0, 0.0, 0.0),
            AxisPosition::End => Insets::new(0.0, 0.0, claim, 0.0),
            _ => Insets::default(),
        }
    }
}
