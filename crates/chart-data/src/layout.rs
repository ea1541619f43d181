// File: crates/chart-data/src/layout.rs
// Summary: Segment/inset negotiation shared by all layers, axes and markers.

use crate::model::EntryModel;

/// Where the x-axis label sits inside its segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPosition {
    Start,
    Center,
}

/// One layer's proposal for the shared x-grid geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentSpec {
    pub cell_width: f32,
    pub margin_width: f32,
    pub label_position: Option<LabelPosition>,
}

impl SegmentSpec {
    /// Per-field max merge; label preferences stay `Start` only while
    /// unanimous.
    pub fn merge_max(self, other: Self) -> Self {
        let label_position = match (self.label_position, other.label_position) {
            (None, other) => other,
            (this, None) => this,
            (Some(LabelPosition::Start), Some(LabelPosition::Start)) => Some(LabelPosition::Start),
            _ => Some(LabelPosition::Center),
        };
        Self {
            cell_width: self.cell_width.max(other.cell_width),
            margin_width: self.margin_width.max(other.margin_width),
            label_position,
        }
    }
}

/// Negotiated x-grid geometry all overlaid layers share.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProperties {
    pub cell_width: f32,
    pub margin_width: f32,
    pub label_position: LabelPosition,
}

impl SegmentProperties {
    pub const fn new(cell_width: f32, margin_width: f32, label_position: LabelPosition) -> Self {
        Self {
            cell_width,
            margin_width,
            label_position,
        }
    }

    pub fn segment_width(&self) -> f32 {
        self.cell_width + self.margin_width
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            cell_width: self.cell_width * factor,
            margin_width: self.margin_width * factor,
            label_position: self.label_position,
        }
    }
}

impl Default for SegmentProperties {
    fn default() -> Self {
        Self::new(0.0, 0.0, LabelPosition::Center)
    }
}

/// Reserved space around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub start: f32,
    pub top: f32,
    pub end: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(start: f32, top: f32, end: f32, bottom: f32) -> Self {
        Self {
            start,
            top,
            end,
            bottom,
        }
    }

    /// Total horizontal inset (start + end).
    pub fn hsum(&self) -> f32 {
        self.start + self.end
    }

    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f32 {
        self.top + self.bottom
    }

    /// Per-direction max with `other`. Contributions from independent
    /// sources overlap instead of accumulating.
    pub fn merge_max(self, other: Self) -> Self {
        Self {
            start: self.start.max(other.start),
            top: self.top.max(other.top),
            end: self.end.max(other.end),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// What inset contributors get to look at while claiming space.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub model: &'a EntryModel,
    pub width: f32,
    pub height: f32,
}

/// A source of inset claims: an axis, a layer or a persistent marker.
///
/// Negotiation runs in two ordered phases. Phase 1 claims space that does not
/// depend on the final plot height (axis line/tick/guideline thickness, label
/// heights, fixed-size markers). Phase 2 claims the remaining start/end space
/// that depends on the now-known available height (label columns sized to the
/// ticks that fit). Claims are merged per direction by max, never summed.
pub trait InsetContributor {
    fn base_insets(&self, _ctx: &LayoutContext) -> Insets {
        Insets::default()
    }

    fn horizontal_insets(&self, _ctx: &LayoutContext, _available_height: f32) -> Insets {
        Insets::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BoundsKey {
    width: f32,
    height: f32,
}

/// Resolved output of one negotiation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NegotiatedLayout {
    pub segment: SegmentProperties,
    pub insets: Insets,
}

/// Resolves per-layer segment proposals and inset claims into one geometry.
///
/// Owns an explicit per-instance cache keyed by the value-equality bounds
/// tuple; a differing key recomputes, and [`LayoutNegotiator::invalidate`]
/// must be called when the model or the contributor set changes.
#[derive(Default)]
pub struct LayoutNegotiator {
    cache: Option<(BoundsKey, NegotiatedLayout)>,
}

impl LayoutNegotiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn negotiate(
        &mut self,
        ctx: &LayoutContext<'_>,
        specs: &[SegmentSpec],
        contributors: &[&dyn InsetContributor],
    ) -> NegotiatedLayout {
        let key = BoundsKey {
            width: ctx.width,
            height: ctx.height,
        };
        if let Some((cached_key, cached)) = self.cache {
            if cached_key == key {
                return cached;
            }
        }

        let segment = negotiate_segments(specs);

        let mut insets = Insets::default();
        for c in contributors {
            insets = insets.merge_max(c.base_insets(ctx));
        }
        let available_height = (ctx.height - insets.vsum()).max(0.0);
        for c in contributors {
            insets = insets.merge_max(c.horizontal_insets(ctx, available_height));
        }

        let layout = NegotiatedLayout { segment, insets };
        self.cache = Some((key, layout));
        layout
    }
}

/// Max over all proposals; `Start` labels only when at least one layer
/// expressed a preference and every expressed preference was `Start`.
pub fn negotiate_segments(specs: &[SegmentSpec]) -> SegmentProperties {
    let merged = specs
        .iter()
        .fold(SegmentSpec::default(), |acc, s| acc.merge_max(*s));
    SegmentProperties::new(
        merged.cell_width,
        merged.margin_width,
        match merged.label_position {
            Some(LabelPosition::Start) => LabelPosition::Start,
            _ => LabelPosition::Center,
        },
    )
}
