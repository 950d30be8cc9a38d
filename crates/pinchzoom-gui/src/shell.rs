use std::time::Instant;

use pinchzoom_core::error::LoadError;
use pinchzoom_core::geometry::NaturalSize;
use pinchzoom_core::viewer::ViewerEvents;
use tracing::{info, warn};

/// Window-side handler for viewer lifecycle callbacks.
pub struct Shell {
    ctx: egui::Context,
    /// When the current image finished loading; drives the fade-in.
    pub shown_at: Option<Instant>,
}

impl Shell {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            shown_at: None,
        }
    }
}

impl ViewerEvents for Shell {
    fn on_load_complete(&mut self, natural_size: NaturalSize) {
        info!(%natural_size, "Image shown");
        self.shown_at = Some(Instant::now());
        self.ctx.request_repaint();
    }

    fn on_load_failed(&mut self, error: &LoadError) {
        warn!(%error, "Image not shown");
        self.shown_at = None;
        self.ctx.request_repaint();
    }

    fn on_request_close(&mut self) {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}
