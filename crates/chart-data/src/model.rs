// File: crates/chart-data/src/model.rs
// Summary: Aggregate snapshot model and the extrema/step/stacking calculator.

use std::collections::BTreeMap;

use crate::diff::RangeSnapshot;
use crate::series::{Series, XKey};

/// Immutable aggregate snapshot of one or more series.
///
/// Built once by [`EntryModel::compute`] (or by the diff engine for
/// interpolated frames) and never mutated afterwards; consumers swap whole
/// snapshots by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryModel {
    series: Vec<Series>,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    step: f64,
    stacked_min_y: f64,
    stacked_max_y: f64,
    is_empty: bool,
}

impl EntryModel {
    /// Aggregate raw series into a snapshot.
    ///
    /// Single pass per series for the x/y extrema; `step` is the smallest
    /// positive adjacent-x gap found in any series (series with fewer than
    /// two points, or without a positive gap, contribute nothing; 1 when no
    /// series contributes). Stacked extrema come from per-x sums across all
    /// series.
    ///
    /// Input with no points yields the degenerate snapshot: every extremum
    /// and the step equal 1 and [`EntryModel::is_empty`] reports true.
    /// Callers should branch on the flag rather than on the sentinel values.
    pub fn compute(series: Vec<Series>) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut step = f64::INFINITY;

        for s in &series {
            for p in &s.points {
                min_x = min_x.min(p.x);
                max_x = max_x.max(p.x);
                min_y = min_y.min(p.y);
                max_y = max_y.max(p.y);
            }
            for w in s.points.windows(2) {
                let gap = (w[1].x - w[0].x).abs();
                if gap > 0.0 {
                    step = step.min(gap);
                }
            }
        }

        if !min_x.is_finite() || !max_x.is_finite() || !min_y.is_finite() || !max_y.is_finite() {
            return Self {
                series,
                min_x: 1.0,
                max_x: 1.0,
                min_y: 1.0,
                max_y: 1.0,
                step: 1.0,
                stacked_min_y: 1.0,
                stacked_max_y: 1.0,
                is_empty: true,
            };
        }

        let sums = stacked_sums(&series);
        let mut stacked_min_y = f64::INFINITY;
        let mut stacked_max_y = f64::NEG_INFINITY;
        for &(_, sum) in &sums {
            stacked_min_y = stacked_min_y.min(sum);
            stacked_max_y = stacked_max_y.max(sum);
        }

        Self {
            series,
            min_x,
            max_x,
            min_y,
            max_y,
            step: if step.is_finite() { step } else { 1.0 },
            stacked_min_y,
            stacked_max_y,
            is_empty: false,
        }
    }

    /// Assemble a snapshot from already-derived parts (interpolated frames).
    /// The parts must come from invariant-holding snapshots; linear blends of
    /// two valid range sets keep every ordering invariant.
    pub(crate) fn from_parts(
        series: Vec<Series>,
        min_x: f64,
        max_x: f64,
        ranges: RangeSnapshot,
        is_empty: bool,
    ) -> Self {
        debug_assert!(min_x <= max_x);
        debug_assert!(ranges.min_y <= ranges.max_y);
        debug_assert!(ranges.stacked_min_y <= ranges.stacked_max_y);
        debug_assert!(ranges.step > 0.0);
        Self {
            series,
            min_x,
            max_x,
            min_y: ranges.min_y,
            max_y: ranges.max_y,
            step: ranges.step,
            stacked_min_y: ranges.stacked_min_y,
            stacked_max_y: ranges.stacked_max_y,
            is_empty,
        }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Smallest positive adjacent-x gap; always > 0.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn stacked_min_y(&self) -> f64 {
        self.stacked_min_y
    }

    pub fn stacked_max_y(&self) -> f64 {
        self.stacked_max_y
    }

    /// True when the snapshot was built from input with no points. The
    /// extrema then hold the documented sentinel value 1.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Number of x slots the model spans at its own step.
    pub fn segment_count(&self) -> usize {
        if self.is_empty {
            0
        } else {
            ((self.max_x - self.min_x) / self.step).round() as usize + 1
        }
    }
}

/// Per-x sums of y across all series, in ascending x order.
/// This is the stacking map behind `stacked_min_y`/`stacked_max_y`, exposed
/// for stacked-column renderers.
pub fn stacked_sums(series: &[Series]) -> Vec<(f64, f64)> {
    let mut sums: BTreeMap<XKey, f64> = BTreeMap::new();
    for s in series {
        for p in &s.points {
            *sums.entry(XKey(p.x)).or_insert(0.0) += p.y;
        }
    }
    sums.into_iter().map(|(k, v)| (k.0, v)).collect()
}
