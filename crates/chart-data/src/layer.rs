// File: crates/chart-data/src/layer.rs
// Summary: Chart layer variants and their segment/inset contributions.

use crate::layout::{InsetContributor, Insets, LabelPosition, LayoutContext, SegmentSpec};

/// Column layer: one column of `column_thickness` px per x slot, separated by
/// `spacing` px. Labels sit under the columns, so it prefers centered labels.
#[derive(Clone, Debug)]
pub struct ColumnLayer {
    pub column_thickness: f32,
    pub spacing: f32,
}

impl ColumnLayer {
    pub fn new(column_thickness: f32, spacing: f32) -> Self {
        Self {
            column_thickness,
            spacing,
        }
    }
}

/// Line layer: `point_spacing` px per x slot; the stroke and point markers
/// need headroom at the vertical extremes. Prefers labels at segment start.
#[derive(Clone, Debug)]
pub struct LineLayer {
    pub point_spacing: f32,
    pub line_thickness: f32,
    pub point_size: f32,
}

impl LineLayer {
    pub fn new(point_spacing: f32) -> Self {
        Self {
            point_spacing,
            line_thickness: 2.0,
            point_size: 8.0,
        }
    }
}

/// Closed set of layer variants. `Composed` overlays children on one shared
/// x-grid and delegates to them explicitly, max-merging their claims.
#[derive(Clone, Debug)]
pub enum Layer {
    Column(ColumnLayer),
    Line(LineLayer),
    Composed(Vec<Layer>),
}

impl Layer {
    /// This layer's proposal for the shared segment geometry.
    pub fn segment_spec(&self) -> SegmentSpec {
        match self {
            Layer::Column(c) => SegmentSpec {
                cell_width: c.column_thickness,
                margin_width: c.spacing,
                label_position: Some(LabelPosition::Center),
            },
            Layer::Line(l) => SegmentSpec {
                cell_width: l.point_spacing,
                margin_width: 0.0,
                label_position: Some(LabelPosition::Start),
            },
            Layer::Composed(children) => children
                .iter()
                .map(Layer::segment_spec)
                .fold(SegmentSpec::default(), SegmentSpec::merge_max),
        }
    }
}

impl InsetContributor for Layer {
    fn base_insets(&self, ctx: &LayoutContext) -> Insets {
        match self {
            Layer::Column(_) => Insets::default(),
            Layer::Line(l) => {
                // Headroom so strokes and dots at the extrema aren't clipped.
                let v = l.line_thickness.max(l.point_size) * 0.5;
                Insets::new(0.0, v, 0.0, v)
            }
            Layer::Composed(children) => children
                .iter()
                .fold(Insets::default(), |acc, c| acc.merge_max(c.base_insets(ctx))),
        }
    }

    fn horizontal_insets(&self, ctx: &LayoutContext, available_height: f32) -> Insets {
        match self {
            Layer::Composed(children) => children.iter().fold(Insets::default(), |acc, c| {
                acc.merge_max(c.horizontal_insets(ctx, available_height))
            }),
            _ => Insets::default(),
        }
    }
}
