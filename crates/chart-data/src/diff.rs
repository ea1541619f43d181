// File: crates/chart-data/src/diff.rs
// Summary: Keyed diff between two aggregate snapshots, interpolatable by progress.

use std::collections::BTreeMap;

use crate::model::EntryModel;
use crate::series::{DataPoint, Series, XKey};

#[inline]
fn lerp(from: f64, to: f64, p: f64) -> f64 {
    from + (to - from) * p
}

/// The interpolatable scalar ranges of a snapshot. `step` rides along so
/// derived segment counts stay continuous while a transition is in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeSnapshot {
    pub min_y: f64,
    pub max_y: f64,
    pub stacked_min_y: f64,
    pub stacked_max_y: f64,
    pub step: f64,
}

impl RangeSnapshot {
    pub fn of(model: &EntryModel) -> Self {
        Self {
            min_y: model.min_y(),
            max_y: model.max_y(),
            stacked_min_y: model.stacked_min_y(),
            stacked_max_y: model.stacked_max_y(),
            step: model.step(),
        }
    }

    /// Matches the degenerate model sentinel.
    pub fn degenerate() -> Self {
        Self {
            min_y: 1.0,
            max_y: 1.0,
            stacked_min_y: 1.0,
            stacked_max_y: 1.0,
            step: 1.0,
        }
    }

    pub fn lerp(self, target: Self, p: f64) -> Self {
        Self {
            min_y: lerp(self.min_y, target.min_y, p),
            max_y: lerp(self.max_y, target.max_y, p),
            stacked_min_y: lerp(self.stacked_min_y, target.stacked_min_y, p),
            stacked_max_y: lerp(self.stacked_max_y, target.stacked_max_y, p),
            step: lerp(self.step, target.step, p),
        }
    }
}

/// The "old" side of a transition: series plus their ranges.
///
/// Usually taken from a published model; when a running transition is
/// superseded it is taken from [`DiffProcessor::snapshot_at`] instead, so the
/// next transition starts exactly where the last frame left off.
#[derive(Clone, Debug)]
pub struct SourceSnapshot {
    pub series: Vec<Series>,
    pub ranges: RangeSnapshot,
}

impl SourceSnapshot {
    pub fn of(model: &EntryModel) -> Self {
        Self {
            series: model.series().to_vec(),
            ranges: RangeSnapshot::of(model),
        }
    }

    /// Seed for a first transition: everything fades in from zero.
    pub fn empty() -> Self {
        Self {
            series: Vec::new(),
            ranges: RangeSnapshot::degenerate(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct PointDiff {
    old_y: Option<f64>,
    new_y: Option<f64>,
}

/// Builds and samples the per-series x-keyed diff between two snapshots.
///
/// The diff state is transient and owned exclusively by one processor; every
/// [`DiffProcessor::set_source`] discards and rebuilds it.
#[derive(Clone, Debug)]
pub struct DiffProcessor {
    diffs: Vec<BTreeMap<XKey, PointDiff>>,
    old_ranges: RangeSnapshot,
    new_ranges: RangeSnapshot,
    min_x: f64,
    max_x: f64,
    has_entries: bool,
}

impl Default for DiffProcessor {
    fn default() -> Self {
        Self {
            diffs: Vec::new(),
            old_ranges: RangeSnapshot::degenerate(),
            new_ranges: RangeSnapshot::degenerate(),
            min_x: 1.0,
            max_x: 1.0,
            has_entries: false,
        }
    }
}

impl DiffProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the diff state for a transition from `old` to `new`.
    ///
    /// The shorter series list is padded with empty series, so a length
    /// mismatch means a full fade-in or fade-out for the unmatched tail
    /// rather than an error. Per series, old points are inserted keyed by x
    /// and new points overlay their y on the same key, creating the entry
    /// when absent.
    pub fn set_source(&mut self, old: SourceSnapshot, new: &EntryModel) {
        self.diffs.clear();
        let count = old.series.len().max(new.series().len());
        for i in 0..count {
            let mut map: BTreeMap<XKey, PointDiff> = BTreeMap::new();
            if let Some(s) = old.series.get(i) {
                for p in &s.points {
                    map.insert(
                        XKey(p.x),
                        PointDiff {
                            old_y: Some(p.y),
                            new_y: None,
                        },
                    );
                }
            }
            if let Some(s) = new.series().get(i) {
                for p in &s.points {
                    map.entry(XKey(p.x)).or_default().new_y = Some(p.y);
                }
            }
            self.diffs.push(map);
        }

        self.old_ranges = old.ranges;
        self.new_ranges = RangeSnapshot::of(new);

        // Union x extent over both key sets; fading points stay in bounds.
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for map in &self.diffs {
            if let Some((k, _)) = map.first_key_value() {
                min_x = min_x.min(k.0);
            }
            if let Some((k, _)) = map.last_key_value() {
                max_x = max_x.max(k.0);
            }
        }
        self.has_entries = min_x.is_finite();
        if self.has_entries {
            self.min_x = min_x;
            self.max_x = max_x;
        } else {
            self.min_x = 1.0;
            self.max_x = 1.0;
        }
    }

    /// Interpolated series at progress `p`.
    ///
    /// Keys present only in the old side fade toward 0 as p approaches 1;
    /// keys present only in the new side fade in from 0. Ascending-x order is
    /// preserved per series.
    pub fn progress_diff(&self, p: f64) -> Vec<Series> {
        let p = p.clamp(0.0, 1.0);
        self.diffs
            .iter()
            .map(|map| {
                Series::with_points(
                    map.iter()
                        .map(|(k, d)| {
                            let old_y = d.old_y.unwrap_or(0.0);
                            let new_y = d.new_y.unwrap_or(0.0);
                            DataPoint::new(k.0, lerp(old_y, new_y, p))
                        })
                        .collect(),
                )
            })
            .collect()
    }

    /// Interpolated ranges at progress `p`, computed independently from the
    /// source snapshots so axis bounds animate in lockstep with the points.
    pub fn range_progress(&self, p: f64) -> RangeSnapshot {
        self.old_ranges.lerp(self.new_ranges, p.clamp(0.0, 1.0))
    }

    /// The full interpolated state at `p`, usable as the old side of the next
    /// transition when this one is superseded.
    pub fn snapshot_at(&self, p: f64) -> SourceSnapshot {
        SourceSnapshot {
            series: self.progress_diff(p),
            ranges: self.range_progress(p),
        }
    }

    /// Assemble an invariant-holding interpolated snapshot at `p`.
    pub fn model_at(&self, p: f64) -> EntryModel {
        EntryModel::from_parts(
            self.progress_diff(p),
            self.min_x,
            self.max_x,
            self.range_progress(p),
            !self.has_entries,
        )
    }
}
