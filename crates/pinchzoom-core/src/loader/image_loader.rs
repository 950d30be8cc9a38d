use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::geometry::NaturalSize;

use super::bitmap::{decode_bitmap, Bitmap};
use super::catalog::ResourceCatalog;
use super::descriptor::ImageDescriptor;
use super::fetch::{default_fetcher, Fetcher};

/// Called from a loader thread after a completion has been queued, so the
/// rendering thread can schedule a `poll` (e.g. request a repaint).
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Debug, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        generation: u64,
    },
    Loaded {
        natural_size: NaturalSize,
        bitmap: Bitmap,
    },
    Failed(LoadError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        match self {
            Self::Loaded { bitmap, .. } => Some(bitmap),
            _ => None,
        }
    }

    pub fn natural_size(&self) -> Option<NaturalSize> {
        match self {
            Self::Loaded { natural_size, .. } => Some(*natural_size),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Terminal outcome of the current request, returned once by `poll`/`wait`.
#[derive(Clone, Debug)]
pub enum LoadEvent {
    Loaded {
        generation: u64,
        natural_size: NaturalSize,
        bitmap: Bitmap,
    },
    Failed {
        generation: u64,
        error: LoadError,
    },
}

impl LoadEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Loaded { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Shared flag telling a superseded loader thread to skip remaining work.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

enum Outcome {
    Done(Result<Bitmap, LoadError>),
    Cancelled,
}

struct Completion {
    generation: u64,
    outcome: Outcome,
}

/// Everything a loader thread needs; owns only shared or immutable data.
struct LoadJob {
    generation: u64,
    descriptor: ImageDescriptor,
    fetcher: Arc<dyn Fetcher>,
    catalog: Arc<ResourceCatalog>,
    max_pixels: u64,
    token: CancelToken,
    tx: mpsc::Sender<Completion>,
    notifier: Option<Notifier>,
}

impl LoadJob {
    fn run(self) {
        let bytes = if self.descriptor.is_remote() {
            self.fetcher.fetch(self.descriptor.uri())
        } else {
            self.catalog.resolve(self.descriptor.uri())
        };

        let outcome = if self.token.is_cancelled() {
            Outcome::Cancelled
        } else {
            Outcome::Done(bytes.and_then(|b| decode_bitmap(&b, self.max_pixels)))
        };

        let _ = self.tx.send(Completion {
            generation: self.generation,
            outcome,
        });
        if let Some(notify) = &self.notifier {
            notify();
        }
    }
}

/// Resolves image descriptors to bitmaps on background threads.
///
/// All state lives on the thread that owns the loader. Each `load` bumps a
/// generation counter; `poll` only accepts the completion of the latest
/// generation while it is still loading, so superseded results are dropped
/// even when their thread finishes last.
pub struct ImageLoader {
    config: LoaderConfig,
    fetcher: Arc<dyn Fetcher>,
    catalog: Arc<ResourceCatalog>,
    notifier: Option<Notifier>,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
    generation: u64,
    in_flight: Option<CancelToken>,
    current: Option<ImageDescriptor>,
    state: LoadState,
    stale_dropped: usize,
}

impl ImageLoader {
    pub fn new(
        config: LoaderConfig,
        fetcher: Arc<dyn Fetcher>,
        catalog: ResourceCatalog,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            config,
            fetcher,
            catalog: Arc::new(catalog),
            notifier: None,
            tx,
            rx,
            generation: 0,
            in_flight: None,
            current: None,
            state: LoadState::Idle,
            stale_dropped: 0,
        }
    }

    /// Loader with the default fetcher and a catalog built from `config`.
    pub fn from_config(config: LoaderConfig) -> Self {
        let fetcher = default_fetcher(&config);
        let catalog = ResourceCatalog::from_config(&config);
        Self::new(config, fetcher, catalog)
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Start resolving `descriptor`, superseding any request in flight.
    /// Returns the generation of the new request.
    pub fn load(&mut self, descriptor: ImageDescriptor) -> u64 {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.generation += 1;
        let generation = self.generation;
        let token = CancelToken::default();

        self.state = LoadState::Loading { generation };
        self.current = Some(descriptor.clone());
        self.in_flight = Some(token.clone());

        debug!(generation, %descriptor, "Loading image");

        let job = LoadJob {
            generation,
            descriptor,
            fetcher: Arc::clone(&self.fetcher),
            catalog: Arc::clone(&self.catalog),
            max_pixels: self.config.max_pixels,
            token,
            tx: self.tx.clone(),
            notifier: self.notifier.clone(),
        };

        let spawned = std::thread::Builder::new()
            .name(format!("pinchzoom-loader-{generation}"))
            .spawn(move || job.run());

        if let Err(e) = spawned {
            self.report_spawn_failure(generation, e);
        }

        generation
    }

    /// Queue a failure for a request whose thread never started, waking the
    /// owner the same way a finished thread would.
    fn report_spawn_failure(&self, generation: u64, error: std::io::Error) {
        warn!(generation, %error, "Could not start loader thread");
        let _ = self.tx.send(Completion {
            generation,
            outcome: Outcome::Done(Err(LoadError::WorkerSpawn(error.to_string()))),
        });
        if let Some(notify) = &self.notifier {
            notify();
        }
    }

    /// Abandon the request in flight, if any. Its completion will be dropped.
    pub fn cancel(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        if self.state.is_loading() {
            self.state = LoadState::Idle;
        }
    }

    /// Drain queued completions without blocking. Returns the outcome of the
    /// current request the first time it is seen.
    pub fn poll(&mut self) -> Option<LoadEvent> {
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(event) = self.accept(completion) {
                return Some(event);
            }
        }
        None
    }

    /// Block until the current request completes or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<LoadEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(event) = self.accept(completion) {
                        return Some(event);
                    }
                }
                Err(_) => return None,
            }
        }
    }

    fn accept(&mut self, completion: Completion) -> Option<LoadEvent> {
        let generation = completion.generation;
        let current = matches!(self.state, LoadState::Loading { generation: g } if g == generation);

        let result = match completion.outcome {
            Outcome::Done(result) if current => result,
            _ => {
                self.stale_dropped += 1;
                debug!(generation, latest = self.generation, "Dropping stale load result");
                return None;
            }
        };

        self.in_flight = None;
        match result {
            Ok(bitmap) => {
                let natural_size = bitmap.natural_size();
                info!(generation, size = %natural_size, "Image loaded");
                self.state = LoadState::Loaded {
                    natural_size,
                    bitmap: bitmap.clone(),
                };
                Some(LoadEvent::Loaded {
                    generation,
                    natural_size,
                    bitmap,
                })
            }
            Err(error) => {
                warn!(generation, %error, "Image load failed");
                self.state = LoadState::Failed(error.clone());
                Some(LoadEvent::Failed { generation, error })
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_descriptor(&self) -> Option<&ImageDescriptor> {
        self.current.as_ref()
    }

    /// Completions discarded because a newer request superseded them.
    pub fn stale_dropped(&self) -> usize {
        self.stale_dropped
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn test_spawn_failure_is_delivered_and_notified() {
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakeups);
        let fetcher: Arc<dyn Fetcher> = Arc::new(|uri: &str| -> Result<Vec<u8>, LoadError> {
            Err(LoadError::ResourceNotFound(uri.to_string()))
        });
        let mut loader = ImageLoader::new(LoaderConfig::default(), fetcher, ResourceCatalog::new())
            .with_notifier(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        loader.generation = 1;
        loader.state = LoadState::Loading { generation: 1 };
        loader.report_spawn_failure(1, std::io::Error::other("no threads left"));

        assert_eq!(wakeups.load(Ordering::SeqCst), 1);
        match loader.poll() {
            Some(LoadEvent::Failed { generation: 1, error }) => {
                assert!(matches!(error, LoadError::WorkerSpawn(_)));
            }
            other => panic!("expected spawn failure, got {other:?}"),
        }
        assert!(loader.state().error().is_some());
    }
}
