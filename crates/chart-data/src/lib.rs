// File: crates/chart-data/src/lib.rs
// Summary: Core library entry point; exports the chart data-layer API.

pub mod series;
pub mod model;
pub mod diff;
pub mod animator;
pub mod layout;
pub mod layer;
pub mod axis;
pub mod marker;
pub mod scroll;
pub mod producer;
pub mod config;
pub mod error;
pub mod chart;

pub use series::{DataPoint, Series};
pub use model::{stacked_sums, EntryModel};
pub use diff::{DiffProcessor, RangeSnapshot, SourceSnapshot};
pub use animator::TransitionAnimator;
pub use layout::{
    negotiate_segments, InsetContributor, Insets, LabelPosition, LayoutContext, LayoutNegotiator,
    NegotiatedLayout, SegmentProperties, SegmentSpec,
};
pub use layer::{ColumnLayer, Layer, LineLayer};
pub use axis::{Axis, AxisPosition};
pub use marker::Marker;
pub use scroll::{ScrollHandler, ScrollListener};
pub use producer::{BoxError, EntryProducer};
pub use config::{AnimationConfig, ChartConfig, InitialScroll};
pub use error::ConfigError;
pub use chart::ChartController;
