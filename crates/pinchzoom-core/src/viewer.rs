use std::time::Duration;

use tracing::debug;

use crate::config::ViewerConfig;
use crate::error::{LoadError, Result};
use crate::geometry::{NaturalSize, Point, Size};
use crate::loader::{Bitmap, ImageDescriptor, ImageLoader, LoadEvent, LoadState};
use crate::viewport::{ViewportController, ZoomPhase, ZoomTransition};

/// Lifecycle callbacks delivered to the hosting shell on the rendering thread.
pub trait ViewerEvents {
    fn on_load_complete(&mut self, _natural_size: NaturalSize) {}
    fn on_load_failed(&mut self, _error: &LoadError) {}
    fn on_request_close(&mut self) {}
}

/// Shell that ignores every callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl ViewerEvents for NoEvents {}

/// Wires an [`ImageLoader`] to a [`ViewportController`].
///
/// Load completions are routed to the controller only from `poll`/`wait`,
/// which run on the thread that owns the viewer.
pub struct ZoomViewer<E: ViewerEvents = NoEvents> {
    loader: ImageLoader,
    controller: ViewportController,
    events: E,
    viewport_size: Option<Size>,
}

impl ZoomViewer<NoEvents> {
    pub fn from_config(config: ViewerConfig) -> Self {
        Self::new(
            ImageLoader::from_config(config.loader),
            ViewportController::new(config.zoom),
            NoEvents,
        )
    }
}

impl<E: ViewerEvents> ZoomViewer<E> {
    pub fn new(loader: ImageLoader, controller: ViewportController, events: E) -> Self {
        Self {
            loader,
            controller,
            events,
            viewport_size: None,
        }
    }

    /// Show a new image. The controller returns to unconfigured until the
    /// load completes.
    pub fn open(&mut self, descriptor: ImageDescriptor) -> u64 {
        self.controller.reset();
        self.loader.load(descriptor)
    }

    /// Retry the current descriptor.
    pub fn reload(&mut self) -> Option<u64> {
        let descriptor = self.loader.current_descriptor()?.clone();
        Some(self.open(descriptor))
    }

    pub fn poll(&mut self) -> Option<LoadEvent> {
        let event = self.loader.poll()?;
        self.route(&event);
        Some(event)
    }

    pub fn wait(&mut self, timeout: Duration) -> Option<LoadEvent> {
        let event = self.loader.wait(timeout)?;
        self.route(&event);
        Some(event)
    }

    fn route(&mut self, event: &LoadEvent) {
        match event {
            LoadEvent::Loaded { natural_size, .. } => {
                if let Some(viewport) = self.viewport_size {
                    if let Err(e) = self.controller.configure(viewport, *natural_size) {
                        debug!(%e, "Loaded image could not be configured");
                    }
                }
                self.events.on_load_complete(*natural_size);
            }
            LoadEvent::Failed { error, .. } => {
                self.controller.reset();
                self.events.on_load_failed(error);
            }
        }
    }

    /// Record the viewport size (mount, resize, rotation) and reconfigure
    /// if an image is loaded. An empty size is reported as an error and
    /// leaves the current zoom in place.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<()> {
        self.viewport_size = Some(size);
        if self.controller.is_configured() {
            return self.controller.set_viewport_size(size);
        }
        match self.loader.state().natural_size() {
            Some(natural) => self.controller.configure(size, natural),
            None => Ok(()),
        }
    }

    pub fn pinch(&mut self, scale_delta: f32, focal_point: Point) {
        self.controller.apply_pinch(scale_delta, focal_point);
    }

    pub fn pan(&mut self, translation: Point) {
        self.controller.apply_pan(translation);
    }

    pub fn double_tap(&mut self, tap_point: Point) -> Option<ZoomTransition> {
        self.controller.handle_double_tap(tap_point)
    }

    /// Host-driven zoom, e.g. a zoom control or restored setting.
    pub fn set_scale(&mut self, scale: f32) -> Option<ZoomTransition> {
        self.controller.set_scale(scale)
    }

    pub fn request_close(&mut self) {
        self.events.on_request_close();
    }

    pub fn phase(&self) -> ZoomPhase {
        self.controller.phase()
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.loader.state().bitmap()
    }

    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn viewport_size(&self) -> Option<Size> {
        self.viewport_size
    }
}
