// File: crates/chart-data/src/animator.rs
// Summary: Cooperative progress clock driving diff transitions frame by frame.

use std::time::{Duration, Instant};

use crate::config::AnimationConfig;
use crate::diff::{DiffProcessor, SourceSnapshot};
use crate::model::EntryModel;

#[derive(Clone, Copy)]
struct Active {
    started: Instant,
    from: f64,
    duration: Duration,
}

/// Advances transition progress toward 1 on the render path's frame clock.
///
/// All state lives on the ticking thread; there is no locking. Progress moves
/// at constant speed: a transition started partway through covers only the
/// remaining distance over a proportionally shorter duration.
pub struct TransitionAnimator {
    duration: Duration,
    enabled: bool,
    progress: f64,
    seeded: bool,
    active: Option<Active>,
    on_frame: Option<Box<dyn FnMut(f64)>>,
}

impl TransitionAnimator {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            duration: config.duration(),
            enabled: config.is_animated(),
            progress: 0.0,
            seeded: false,
            active: None,
            on_frame: None,
        }
    }

    /// Seed the processor for a transition to `new` and start animating.
    ///
    /// If a previous transition has not reached its end (still ticking, or
    /// frozen by a cancel), the old side is that diff sampled at the current
    /// progress, never the pre-animation original, so rapid successive
    /// updates stay visually continuous. Otherwise the old side is the last
    /// published model (or an empty fade-in seed).
    pub fn transition<F>(
        &mut self,
        processor: &mut DiffProcessor,
        old: Option<&EntryModel>,
        new: &EntryModel,
        on_frame: F,
    ) where
        F: FnMut(f64) + 'static,
    {
        let seed = if self.seeded && self.progress < 1.0 {
            processor.snapshot_at(self.progress)
        } else {
            match old {
                Some(model) => SourceSnapshot::of(model),
                None => SourceSnapshot::empty(),
            }
        };
        processor.set_source(seed, new);
        self.seeded = true;
        self.progress = 0.0;
        self.start(on_frame);
    }

    /// Begin advancing from the current progress to 1, invoking `on_frame`
    /// with every emitted progress value. With animation disabled by
    /// configuration, `on_frame(1.0)` runs once, synchronously.
    pub fn start<F>(&mut self, on_frame: F)
    where
        F: FnMut(f64) + 'static,
    {
        self.start_at(Instant::now(), on_frame);
    }

    /// [`TransitionAnimator::start`] with an explicit clock, for
    /// deterministic frame drivers.
    pub fn start_at<F>(&mut self, now: Instant, mut on_frame: F)
    where
        F: FnMut(f64) + 'static,
    {
        if !self.enabled || self.duration.is_zero() || self.progress >= 1.0 {
            self.active = None;
            self.on_frame = None;
            self.progress = 1.0;
            on_frame(1.0);
            return;
        }
        let remaining = 1.0 - self.progress;
        self.active = Some(Active {
            started: now,
            from: self.progress,
            duration: self.duration.mul_f64(remaining),
        });
        self.on_frame = Some(Box::new(on_frame));
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance to `now`, emit the progress value, and complete at 1.
    pub fn tick_at(&mut self, now: Instant) {
        let Some(active) = self.active else {
            return;
        };
        let t = if active.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(active.started);
            (elapsed.as_secs_f64() / active.duration.as_secs_f64()).clamp(0.0, 1.0)
        };
        let p = active.from + (1.0 - active.from) * t;
        self.progress = p;
        if let Some(cb) = self.on_frame.as_mut() {
            cb(p);
        }
        if t >= 1.0 {
            self.active = None;
            self.on_frame = None;
        }
    }

    /// Stop ticking synchronously. No frame callback can run after this
    /// returns; progress stays frozen at the last emitted value so a later
    /// start resumes without a jump.
    pub fn cancel(&mut self) {
        self.active = None;
        self.on_frame = None;
    }

    pub fn current_progress(&self) -> f64 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}
