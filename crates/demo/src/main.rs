// File: crates/demo/src/main.rs
// Summary: Demo feeds dated CSV (or synthetic) series through the producer and
// prints animated model frames plus the negotiated layout.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chart_data::{
    AnimationConfig, Axis, ChartConfig, ChartController, ColumnLayer, EntryProducer, Layer,
    LineLayer, Marker, Series,
};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (revenue, cost) = match std::env::args().nth(1) {
        Some(path) => load_value_csv(Path::new(&path))
            .with_context(|| format!("failed to load CSV '{path}'"))?,
        None => synthetic_series(),
    };
    println!(
        "Loaded {} revenue points, {} cost points",
        revenue.points.len(),
        cost.points.len()
    );

    let config = ChartConfig {
        animation: AnimationConfig {
            enabled: true,
            duration_ms: 160,
        },
        ..ChartConfig::default()
    };
    let mut controller = ChartController::new(config)?;
    controller.add_layer(Layer::Composed(vec![
        Layer::Column(ColumnLayer::new(8.0, 4.0)),
        Layer::Line(LineLayer::new(12.0)),
    ]));
    controller.add_axis(Axis::start().with_label_metrics(40.0, 12.0));
    controller.add_axis(Axis::bottom());
    controller.add_marker(Marker::new(16.0));
    controller.set_bounds(480.0, 270.0);

    let mut producer = EntryProducer::new();
    controller.connect(&producer, "demo");
    producer.set_series(vec![revenue.clone(), cost.clone()]);
    producer.flush();

    // Drive some frames; push an updated dataset partway through so the
    // transition re-seeds mid-flight instead of jumping.
    for frame in 0..24 {
        controller.on_frame(Instant::now());
        if let Some(model) = controller.current_model() {
            println!(
                "frame {frame:2}  p={:.2}  y=[{:7.2}, {:7.2}]  stacked=[{:7.2}, {:7.2}]",
                controller.current_progress(),
                model.min_y(),
                model.max_y(),
                model.stacked_min_y(),
                model.stacked_max_y(),
            );
        }
        if frame == 8 {
            let bumped: Vec<Series> = [&revenue, &cost]
                .iter()
                .map(|s| {
                    Series::from_pairs(s.points.iter().map(|q| (q.x, q.y * 1.5 + 4.0)))
                })
                .collect();
            producer.set_series(bumped);
            producer.flush();
            println!("-- pushed updated dataset --");
        }
        std::thread::sleep(Duration::from_millis(16));
    }

    let segment = controller.segment_properties();
    let insets = controller.insets();
    println!(
        "segment: cell {:.1}px + margin {:.1}px, labels {:?}",
        segment.cell_width, segment.margin_width, segment.label_position
    );
    println!(
        "insets: start {:.1} top {:.1} end {:.1} bottom {:.1}",
        insets.start, insets.top, insets.end, insets.bottom
    );

    let consumed = controller.scroll_mut().handle_scroll_delta(-40.0);
    println!(
        "scrolled {:.1}px (value {:.1} of max {:.1})",
        -consumed,
        controller.scroll().value(),
        controller.scroll().max_value()
    );

    Ok(())
}

/// Load `date,revenue,cost` rows; x becomes days since the first row's date.
fn load_value_csv(path: &Path) -> Result<(Series, Series)> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut origin: Option<NaiveDate> = None;
    let mut revenue = Vec::new();
    let mut cost = Vec::new();

    for result in reader.records() {
        let record = result?;
        let date = NaiveDate::parse_from_str(record.get(0).unwrap_or_default().trim(), "%Y-%m-%d")
            .context("first column must be a %Y-%m-%d date")?;
        let first = *origin.get_or_insert(date);
        let x = (date - first).num_days() as f64;
        let rev: f64 = record.get(1).unwrap_or("0").trim().parse()?;
        let cst: f64 = record.get(2).unwrap_or("0").trim().parse()?;
        revenue.push((x, rev));
        cost.push((x, cst));
    }

    if revenue.is_empty() {
        anyhow::bail!("no rows loaded — check headers/delimiter.");
    }
    Ok((Series::from_pairs(revenue), Series::from_pairs(cost)))
}

fn synthetic_series() -> (Series, Series) {
    let revenue =
        Series::from_pairs((0..12).map(|i| (f64::from(i), 40.0 + 12.0 * (f64::from(i) * 0.7).sin())));
    let cost =
        Series::from_pairs((0..12).map(|i| (f64::from(i), 22.0 + 6.0 * (f64::from(i) * 0.4).cos())));
    (revenue, cost)
}
