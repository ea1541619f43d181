// File: crates/chart-data/src/producer.rs
// Summary: Background aggregation producer publishing snapshots to registered consumers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::model::EntryModel;
use crate::series::Series;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type UpdateFn = Box<dyn Fn(Arc<EntryModel>, Option<Arc<EntryModel>>) -> Result<(), BoxError> + Send + Sync>;
type OldModelFn = Box<dyn Fn() -> Option<Arc<EntryModel>> + Send + Sync>;

struct Registration {
    on_update: UpdateFn,
    get_old_model: OldModelFn,
}

#[derive(Default)]
struct Shared {
    model: Option<Arc<EntryModel>>,
    consumers: HashMap<String, Arc<Registration>>,
}

struct Worker {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Turns raw series into published snapshots on a background worker.
///
/// At most one recomputation is in flight; a newer [`EntryProducer::set_series`]
/// supersedes a pending one by setting its cancel flag and joining the worker
/// before spawning the next, so a stale publish can never race a newer one.
/// Publication is a single reference swap under a short lock; consumer
/// callbacks run outside it, and a failing callback is logged without
/// unseating the published snapshot or affecting other consumers.
pub struct EntryProducer {
    shared: Arc<Mutex<Shared>>,
    worker: Option<Worker>,
}

impl Default for EntryProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryProducer {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            worker: None,
        }
    }

    /// Schedule aggregation of `series`, superseding any pending request.
    pub fn set_series(&mut self, series: Vec<Series>) {
        self.supersede();

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let shared = Arc::clone(&self.shared);

        let handle = thread::Builder::new()
            .name("chart-data-aggregate".to_string())
            .spawn(move || {
                let model = Arc::new(EntryModel::compute(series));
                if flag.load(Ordering::SeqCst) {
                    debug!("aggregation superseded before publish");
                    return;
                }
                let consumers: Vec<(String, Arc<Registration>)> = {
                    let mut state = shared.lock().expect("producer state poisoned");
                    if flag.load(Ordering::SeqCst) {
                        debug!("aggregation superseded before publish");
                        return;
                    }
                    state.model = Some(Arc::clone(&model));
                    state
                        .consumers
                        .iter()
                        .map(|(k, r)| (k.clone(), Arc::clone(r)))
                        .collect()
                };
                debug!(consumers = consumers.len(), "published aggregate snapshot");
                for (key, registration) in consumers {
                    dispatch(&key, &registration, &model);
                }
            })
            .expect("failed to spawn aggregation worker");

        self.worker = Some(Worker { cancel, handle });
    }

    /// Register a consumer. `on_update` receives every published snapshot
    /// together with `get_old_model()` evaluated at dispatch time, so each
    /// consumer's transition seeds against its own last-seen model. A cached
    /// snapshot is delivered immediately.
    pub fn register<U, G>(&self, key: impl Into<String>, on_update: U, get_old_model: G)
    where
        U: Fn(Arc<EntryModel>, Option<Arc<EntryModel>>) -> Result<(), BoxError> + Send + Sync + 'static,
        G: Fn() -> Option<Arc<EntryModel>> + Send + Sync + 'static,
    {
        let key = key.into();
        let registration = Arc::new(Registration {
            on_update: Box::new(on_update),
            get_old_model: Box::new(get_old_model),
        });
        let cached = {
            let mut state = self.shared.lock().expect("producer state poisoned");
            state.consumers.insert(key.clone(), Arc::clone(&registration));
            state.model.clone()
        };
        if let Some(model) = cached {
            dispatch(&key, &registration, &model);
        }
    }

    pub fn unregister(&self, key: &str) {
        self.shared
            .lock()
            .expect("producer state poisoned")
            .consumers
            .remove(key);
    }

    /// Latest published snapshot, if any.
    pub fn model(&self) -> Option<Arc<EntryModel>> {
        self.shared.lock().expect("producer state poisoned").model.clone()
    }

    /// Wait for the in-flight recomputation, if any, to finish.
    pub fn flush(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.handle.join();
        }
    }

    fn supersede(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel.store(true, Ordering::SeqCst);
            let _ = worker.handle.join();
        }
    }
}

impl Drop for EntryProducer {
    fn drop(&mut self) {
        self.supersede();
    }
}

fn dispatch(key: &str, registration: &Registration, model: &Arc<EntryModel>) {
    let old = (registration.get_old_model)();
    if let Err(err) = (registration.on_update)(Arc::clone(model), old) {
        warn!(consumer = key, error = %err, "consumer update failed; published snapshot unaffected");
    }
}
