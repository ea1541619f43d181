// File: crates/chart-data/tests/properties.rs
// Purpose: Property-based checks over aggregation, diffing, scroll and negotiation.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use chart_data::{
    negotiate_segments, DiffProcessor, EntryModel, InitialScroll, ScrollHandler, ScrollListener,
    SegmentSpec, Series, SourceSnapshot,
};

fn arb_series() -> impl Strategy<Value = Series> {
    prop::collection::vec((-1.0e6..1.0e6f64, -1.0e6..1.0e6f64), 0..24).prop_map(|mut pairs| {
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        pairs.dedup_by(|a, b| a.0 == b.0);
        Series::from_pairs(pairs)
    })
}

fn arb_series_list() -> impl Strategy<Value = Vec<Series>> {
    prop::collection::vec(arb_series(), 0..4)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn model_invariants_hold(list in arb_series_list()) {
        let model = EntryModel::compute(list);
        prop_assert!(model.min_x() <= model.max_x());
        prop_assert!(model.min_y() <= model.max_y());
        prop_assert!(model.stacked_min_y() <= model.stacked_max_y());
        prop_assert!(model.step() > 0.0);
    }

    #[test]
    fn aggregation_is_idempotent(list in arb_series_list()) {
        prop_assert_eq!(
            EntryModel::compute(list.clone()),
            EntryModel::compute(list)
        );
    }

    #[test]
    fn diff_round_trip_reproduces_both_ends(
        old in arb_series_list(),
        new in arb_series_list(),
    ) {
        let old_model = EntryModel::compute(old);
        let new_model = EntryModel::compute(new);
        let mut processor = DiffProcessor::new();
        processor.set_source(SourceSnapshot::of(&old_model), &new_model);

        let at_start = processor.progress_diff(0.0);
        for (series, source) in at_start.iter().zip(old_model.series()) {
            for p in source.points.iter() {
                let got = series.points.iter().find(|q| q.x == p.x);
                prop_assert_eq!(got.map(|q| q.y), Some(p.y));
            }
        }

        let at_end = processor.progress_diff(1.0);
        for (series, target) in at_end.iter().zip(new_model.series()) {
            for p in target.points.iter() {
                let got = series.points.iter().find(|q| q.x == p.x);
                prop_assert!(got.is_some_and(|q| close(q.y, p.y)));
            }
        }
    }

    #[test]
    fn interpolation_is_linear_in_progress(
        y0 in -1.0e6..1.0e6f64,
        y1 in -1.0e6..1.0e6f64,
        p in 0.0..=1.0f64,
    ) {
        let old_model = EntryModel::compute(vec![Series::from_pairs([(0.0, y0)])]);
        let new_model = EntryModel::compute(vec![Series::from_pairs([(0.0, y1)])]);
        let mut processor = DiffProcessor::new();
        processor.set_source(SourceSnapshot::of(&old_model), &new_model);

        let y = processor.progress_diff(p)[0].points[0].y;
        prop_assert!(close(y, y0 + (y1 - y0) * p));
    }

    #[test]
    fn scroll_stays_bounded_and_conserves_deltas(
        max in 0.0..1.0e6f32,
        deltas in prop::collection::vec(-1.0e5..1.0e5f32, 0..48),
    ) {
        let unconsumed = Rc::new(RefCell::new(Vec::<f32>::new()));

        struct Tail(Rc<RefCell<Vec<f32>>>);
        impl ScrollListener for Tail {
            fn on_unconsumed_scroll(&self, delta: f32) {
                self.0.borrow_mut().push(delta);
            }
        }

        let mut handler = ScrollHandler::new(InitialScroll::Start);
        handler.add_listener(Rc::new(Tail(Rc::clone(&unconsumed))));
        handler.set_max_value(max);

        for delta in deltas {
            unconsumed.borrow_mut().clear();
            let consumed = handler.handle_scroll_delta(delta);
            let leftover: f32 = unconsumed.borrow().iter().sum();
            prop_assert!(handler.value() >= 0.0);
            prop_assert!(handler.value() <= handler.max_value());
            let total = consumed + leftover;
            prop_assert!((total - delta).abs() <= delta.abs() * 1.0e-5 + 1.0e-3);
        }
    }

    #[test]
    fn segment_negotiation_equals_field_maxima(
        widths in prop::collection::vec((0.0..1.0e4f32, 0.0..1.0e4f32), 1..8),
    ) {
        let specs: Vec<SegmentSpec> = widths
            .iter()
            .map(|&(cell_width, margin_width)| SegmentSpec {
                cell_width,
                margin_width,
                label_position: None,
            })
            .collect();
        let negotiated = negotiate_segments(&specs);

        let max_cell = widths.iter().map(|w| w.0).fold(0.0f32, f32::max);
        let max_margin = widths.iter().map(|w| w.1).fold(0.0f32, f32::max);
        prop_assert_eq!(negotiated.cell_width, max_cell);
        prop_assert_eq!(negotiated.margin_width, max_margin);
    }
}
