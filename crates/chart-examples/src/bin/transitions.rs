// File: crates/chart-examples/src/bin/transitions.rs
// Summary: Minimal example sampling an animated transition between two snapshots.

use chart_data::{DiffProcessor, EntryModel, SourceSnapshot, Series};

fn main() {
    let before = EntryModel::compute(vec![Series::from_pairs([
        (0.0, 2.0),
        (1.0, 5.0),
        (2.0, 3.0),
        (3.0, 7.0),
    ])]);
    let after = EntryModel::compute(vec![Series::from_pairs([
        (0.0, 6.0),
        (1.0, 1.0),
        (2.0, 8.0),
        (4.0, 4.0),
    ])]);

    let mut processor = DiffProcessor::new();
    processor.set_source(SourceSnapshot::of(&before), &after);

    for step in 0..=4 {
        let p = f64::from(step) / 4.0;
        let series = processor.progress_diff(p);
        let ranges = processor.range_progress(p);
        let ys: Vec<String> = series[0]
            .points
            .iter()
            .map(|q| format!("({:.0}, {:.2})", q.x, q.y))
            .collect();
        println!(
            "p={:.2}  y-range [{:.2}, {:.2}]  {}",
            p,
            ranges.min_y,
            ranges.max_y,
            ys.join(" ")
        );
    }
}
