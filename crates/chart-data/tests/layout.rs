// File: crates/chart-data/tests/layout.rs
// Purpose: Validate segment/inset negotiation and the per-bounds layout cache.

use std::cell::Cell;

use chart_data::{
    negotiate_segments, Axis, ColumnLayer, EntryModel, InsetContributor, Insets, LabelPosition,
    Layer, LayoutContext, LayoutNegotiator, LineLayer, SegmentSpec, Series,
};

fn spec(cell_width: f32, margin_width: f32) -> SegmentSpec {
    SegmentSpec {
        cell_width,
        margin_width,
        label_position: None,
    }
}

fn test_model() -> EntryModel {
    EntryModel::compute(vec![Series::from_pairs([(0.0, 1.0), (1.0, 2.0)])])
}

struct FixedInsets(Insets);

impl InsetContributor for FixedInsets {
    fn base_insets(&self, _ctx: &LayoutContext) -> Insets {
        self.0
    }
}

#[test]
fn segment_negotiation_takes_per_field_maxima() {
    let negotiated = negotiate_segments(&[spec(8.0, 4.0), spec(6.0, 10.0)]);
    assert_eq!(negotiated.cell_width, 8.0);
    assert_eq!(negotiated.margin_width, 10.0);
    assert_eq!(negotiated.segment_width(), 18.0);
}

#[test]
fn label_position_start_requires_unanimity_among_expressed_preferences() {
    let start = SegmentSpec {
        label_position: Some(LabelPosition::Start),
        ..spec(1.0, 1.0)
    };
    let center = SegmentSpec {
        label_position: Some(LabelPosition::Center),
        ..spec(1.0, 1.0)
    };
    let silent = spec(1.0, 1.0);

    assert_eq!(
        negotiate_segments(&[start, start]).label_position,
        LabelPosition::Start
    );
    assert_eq!(
        negotiate_segments(&[start, silent]).label_position,
        LabelPosition::Start
    );
    assert_eq!(
        negotiate_segments(&[start, center]).label_position,
        LabelPosition::Center
    );
    assert_eq!(
        negotiate_segments(&[silent, silent]).label_position,
        LabelPosition::Center
    );
}

#[test]
fn layer_variants_propose_their_geometry() {
    let column = Layer::Column(ColumnLayer::new(8.0, 4.0));
    let line = Layer::Line(LineLayer::new(6.0));
    let composed = Layer::Composed(vec![column, line]);

    let merged = composed.segment_spec();
    assert_eq!(merged.cell_width, 8.0);
    assert_eq!(merged.margin_width, 4.0);
    // Column centers its labels; the composition loses unanimity for Start.
    assert_eq!(merged.label_position, Some(LabelPosition::Center));
}

#[test]
fn insets_merge_by_max_not_sum() {
    let model = test_model();
    let ctx = LayoutContext {
        model: &model,
        width: 400.0,
        height: 300.0,
    };
    let low = FixedInsets(Insets::new(0.0, 0.0, 0.0, 10.0));
    let high = FixedInsets(Insets::new(0.0, 0.0, 0.0, 24.0));
    let contributors: Vec<&dyn InsetContributor> = vec![&low, &high];

    let layout = LayoutNegotiator::new().negotiate(&ctx, &[], &contributors);
    assert_eq!(layout.insets.bottom, 24.0);
}

#[test]
fn bottom_axis_claims_line_tick_and_label_height() {
    let model = test_model();
    let ctx = LayoutContext {
        model: &model,
        width: 400.0,
        height: 300.0,
    };
    let axis = Axis::bottom();
    let contributors: Vec<&dyn InsetContributor> = vec![&axis];

    let layout = LayoutNegotiator::new().negotiate(&ctx, &[], &contributors);
    // line 1 + tick 4 + label height 12
    assert_eq!(layout.insets.bottom, 17.0);
    assert_eq!(layout.insets.top, 0.0);
}

#[test]
fn vertical_axis_label_column_depends_on_available_height() {
    let model = test_model();
    let axis = Axis::start().with_label_metrics(40.0, 12.0);
    let contributors: Vec<&dyn InsetContributor> = vec![&axis];

    let tall = LayoutContext {
        model: &model,
        width: 400.0,
        height: 300.0,
    };
    let layout = LayoutNegotiator::new().negotiate(&tall, &[], &contributors);
    // line 1 + tick 4 + label column 40
    assert_eq!(layout.insets.start, 45.0);

    // Too short for even one label: only the phase-1 edge claim remains.
    let short = LayoutContext {
        model: &model,
        width: 400.0,
        height: 10.0,
    };
    let layout = LayoutNegotiator::new().negotiate(&short, &[], &contributors);
    assert_eq!(layout.insets.start, 5.0);
}

#[test]
fn line_layer_reserves_vertical_headroom() {
    let model = test_model();
    let ctx = LayoutContext {
        model: &model,
        width: 400.0,
        height: 300.0,
    };
    let layer = Layer::Line(LineLayer::new(6.0));
    let contributors: Vec<&dyn InsetContributor> = vec![&layer];

    let layout = LayoutNegotiator::new().negotiate(&ctx, &[], &contributors);
    // Half the 8px default point size on both vertical edges.
    assert_eq!(layout.insets.top, 4.0);
    assert_eq!(layout.insets.bottom, 4.0);
}

struct CountingContributor {
    calls: Cell<usize>,
}

impl InsetContributor for CountingContributor {
    fn base_insets(&self, _ctx: &LayoutContext) -> Insets {
        self.calls.set(self.calls.get() + 1);
        Insets::default()
    }
}

#[test]
fn negotiation_is_cached_per_bounds_until_invalidated() {
    let model = test_model();
    let counting = CountingContributor { calls: Cell::new(0) };
    let contributors: Vec<&dyn InsetContributor> = vec![&counting];
    let mut negotiator = LayoutNegotiator::new();

    let ctx = LayoutContext {
        model: &model,
        width: 400.0,
        height: 300.0,
    };
    negotiator.negotiate(&ctx, &[], &contributors);
    negotiator.negotiate(&ctx, &[], &contributors);
    assert_eq!(counting.calls.get(), 1);

    // A differing bounds key recomputes.
    let resized = LayoutContext {
        model: &model,
        width: 400.0,
        height: 200.0,
    };
    negotiator.negotiate(&resized, &[], &contributors);
    assert_eq!(counting.calls.get(), 2);

    // Explicit invalidation (model swap) recomputes at the same bounds.
    negotiator.invalidate();
    negotiator.negotiate(&resized, &[], &contributors);
    assert_eq!(counting.calls.get(), 3);
}
