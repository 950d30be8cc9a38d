#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

use pinchzoom_core::config::LoaderConfig;
use pinchzoom_core::error::LoadError;
use pinchzoom_core::loader::{Fetcher, ImageLoader, ResourceCatalog};

/// Generous upper bound for background work in tests.
pub const WAIT: Duration = Duration::from_secs(10);

/// Encode a solid-color PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

/// Loader backed by an in-memory catalog and the given fetcher.
pub fn loader_with(fetcher: Arc<dyn Fetcher>, entries: &[(&str, Vec<u8>)]) -> ImageLoader {
    let mut catalog = ResourceCatalog::new();
    for (name, bytes) in entries {
        catalog.insert(*name, bytes.clone());
    }
    ImageLoader::new(LoaderConfig::default(), fetcher, catalog)
}

/// Fetcher that fails every request; for tests that only use local images.
pub fn offline() -> Arc<dyn Fetcher> {
    Arc::new(|uri: &str| -> Result<Vec<u8>, LoadError> {
        Err(LoadError::NetworkFailure {
            uri: uri.to_string(),
            reason: "offline".into(),
        })
    })
}

/// Fetcher serving canned responses, optionally held back until released.
#[derive(Default)]
pub struct GatedFetcher {
    responses: Mutex<HashMap<String, (Option<mpsc::Receiver<()>>, Vec<u8>)>>,
    calls: AtomicUsize,
}

impl GatedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add(&self, uri: &str, bytes: Vec<u8>) {
        self.responses
            .lock()
            .unwrap()
            .insert(uri.to_string(), (None, bytes));
    }

    /// Register a response whose fetch blocks until the returned sender fires.
    pub fn add_gated(&self, uri: &str, bytes: Vec<u8>) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.responses
            .lock()
            .unwrap()
            .insert(uri.to_string(), (Some(rx), bytes));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for GatedFetcher {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (gate, bytes) = {
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(uri) {
                Some((gate, bytes)) => (gate.take(), bytes.clone()),
                None => {
                    return Err(LoadError::HttpStatus {
                        uri: uri.to_string(),
                        status: 404,
                    })
                }
            }
        };
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        Ok(bytes)
    }
}

/// Spin on `condition` until it holds or `WAIT` elapses.
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}
