// File: crates/chart-data/src/chart.rs
// Summary: Facade wiring producer updates through diff, animation, layout and scroll.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::animator::TransitionAnimator;
use crate::axis::Axis;
use crate::config::ChartConfig;
use crate::diff::DiffProcessor;
use crate::error::ConfigError;
use crate::layer::Layer;
use crate::layout::{
    InsetContributor, Insets, LayoutContext, LayoutNegotiator, NegotiatedLayout,
    SegmentProperties, SegmentSpec,
};
use crate::marker::Marker;
use crate::model::EntryModel;
use crate::producer::EntryProducer;
use crate::scroll::ScrollHandler;

struct PendingUpdate {
    new: Arc<EntryModel>,
    old: Option<Arc<EntryModel>>,
}

/// Owns the render-path state of one chart: the in-flight transition, the
/// negotiated layout and the scroll bound. Confined to the render/UI thread;
/// the only cross-thread handoff is the pending-update slot filled by the
/// producer worker.
///
/// The renderer polls [`ChartController::current_model`],
/// [`ChartController::current_progress`],
/// [`ChartController::segment_properties`] and [`ChartController::insets`]
/// once per frame after calling [`ChartController::on_frame`].
pub struct ChartController {
    config: ChartConfig,
    processor: DiffProcessor,
    animator: TransitionAnimator,
    negotiator: LayoutNegotiator,
    scroll: ScrollHandler,
    layers: Vec<Layer>,
    axes: Vec<Axis>,
    markers: Vec<Marker>,
    zoom: f32,
    width: f32,
    height: f32,
    pending: Arc<Mutex<Option<PendingUpdate>>>,
    target: Arc<Mutex<Option<Arc<EntryModel>>>>,
    dirty: Rc<Cell<bool>>,
    current: Option<Arc<EntryModel>>,
    layout: NegotiatedLayout,
}

impl ChartController {
    /// Validates `config` eagerly; an inverted or non-positive zoom range is
    /// rejected here, not clamped later.
    pub fn new(config: ChartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            animator: TransitionAnimator::new(&config.animation),
            scroll: ScrollHandler::new(config.initial_scroll),
            zoom: config.clamp_zoom(1.0),
            config,
            processor: DiffProcessor::new(),
            negotiator: LayoutNegotiator::new(),
            layers: Vec::new(),
            axes: Vec::new(),
            markers: Vec::new(),
            width: 0.0,
            height: 0.0,
            pending: Arc::new(Mutex::new(None)),
            target: Arc::new(Mutex::new(None)),
            dirty: Rc::new(Cell::new(false)),
            current: None,
            layout: NegotiatedLayout::default(),
        })
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
        self.negotiator.invalidate();
    }

    pub fn add_axis(&mut self, axis: Axis) {
        self.axes.push(axis);
        self.negotiator.invalidate();
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
        self.negotiator.invalidate();
    }

    /// Register with a producer under `key`. Published snapshots land in the
    /// pending slot; the next [`ChartController::on_frame`] picks them up on
    /// the render thread.
    pub fn connect(&self, producer: &EntryProducer, key: impl Into<String>) {
        let pending = Arc::clone(&self.pending);
        let target = Arc::clone(&self.target);
        producer.register(
            key,
            move |new, old| {
                *pending.lock().expect("pending slot poisoned") = Some(PendingUpdate { new, old });
                Ok(())
            },
            move || target.lock().expect("target slot poisoned").clone(),
        );
    }

    /// Per-frame entry point: drains a pending producer update (seeding the
    /// transition with the re-seed rule), advances animation progress, and
    /// rebuilds the interpolated model and layout only when progress moved.
    pub fn on_frame(&mut self, now: Instant) {
        let update = self.pending.lock().expect("pending slot poisoned").take();
        if let Some(update) = update {
            *self.target.lock().expect("target slot poisoned") = Some(Arc::clone(&update.new));
            let dirty = Rc::clone(&self.dirty);
            self.animator.transition(
                &mut self.processor,
                update.old.as_deref(),
                &update.new,
                move |_| dirty.set(true),
            );
        }
        self.animator.tick_at(now);
        if self.dirty.replace(false) {
            self.current = Some(Arc::new(
                self.processor.model_at(self.animator.current_progress()),
            ));
            self.negotiator.invalidate();
            self.refresh_layout();
        }
    }

    /// Viewport from the host, in pixels.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.refresh_layout();
    }

    /// Clamp `factor` into the validated zoom range and rescale the x-grid.
    pub fn set_zoom(&mut self, factor: f32) {
        if !factor.is_finite() {
            return;
        }
        let zoom = self.config.clamp_zoom(factor);
        if zoom == self.zoom {
            return;
        }
        self.zoom = zoom;
        self.refresh_layout();
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn current_model(&self) -> Option<Arc<EntryModel>> {
        self.current.clone()
    }

    pub fn current_progress(&self) -> f64 {
        self.animator.current_progress()
    }

    /// Negotiated segment geometry, scaled by the current zoom factor.
    pub fn segment_properties(&self) -> SegmentProperties {
        self.layout.segment.scaled(self.zoom)
    }

    pub fn insets(&self) -> Insets {
        self.layout.insets
    }

    pub fn scroll(&self) -> &ScrollHandler {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollHandler {
        &mut self.scroll
    }

    pub fn cancel_transition(&mut self) {
        self.animator.cancel();
    }

    fn refresh_layout(&mut self) {
        let Some(model) = self.current.as_deref() else {
            return;
        };
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        let ctx = LayoutContext {
            model,
            width: self.width,
            height: self.height,
        };
        let specs: Vec<SegmentSpec> = self.layers.iter().map(Layer::segment_spec).collect();
        let mut contributors: Vec<&dyn InsetContributor> = Vec::new();
        for axis in &self.axes {
            contributors.push(axis);
        }
        for layer in &self.layers {
            contributors.push(layer);
        }
        for marker in &self.markers {
            contributors.push(marker);
        }
        self.layout = self.negotiator.negotiate(&ctx, &specs, &contributors);

        let plot_width = (self.width - self.layout.insets.hsum()).max(0.0);
        let content_width =
            self.layout.segment.segment_width() * self.zoom * model.segment_count() as f32;
        self.scroll.set_max_value((content_width - plot_width).max(0.0));
        if !model.is_empty() {
            self.scroll.handle_initial_scroll();
        }
    }
}
