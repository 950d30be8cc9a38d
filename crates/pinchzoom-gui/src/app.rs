use std::sync::Arc;
use std::time::{Duration, Instant};

use pinchzoom_core::config::ViewerConfig;
use pinchzoom_core::loader::{ImageDescriptor, ImageLoader, LoadEvent};
use pinchzoom_core::viewer::ZoomViewer;
use pinchzoom_core::viewport::{ViewportController, ZoomTransition};

use crate::convert::bitmap_to_color_image;
use crate::panels;
use crate::shell::Shell;

/// Fade-in applied when an image first appears.
pub const FADE_IN: Duration = Duration::from_millis(300);

pub struct ViewerApp {
    pub viewer: ZoomViewer<Shell>,
    pub title: String,
    pub background: egui::Color32,
    pub texture: Option<egui::TextureHandle>,
    /// Double-tap animation in progress and when it started.
    pub transition: Option<(ZoomTransition, Instant)>,
}

impl ViewerApp {
    pub fn new(
        ctx: &egui::Context,
        config: ViewerConfig,
        descriptor: ImageDescriptor,
        title: String,
        background: egui::Color32,
    ) -> Self {
        let ViewerConfig { zoom, loader } = config;

        let repaint_ctx = ctx.clone();
        let loader = ImageLoader::from_config(loader)
            .with_notifier(Arc::new(move || repaint_ctx.request_repaint()));

        let mut viewer = ZoomViewer::new(
            loader,
            ViewportController::new(zoom),
            Shell::new(ctx.clone()),
        );
        viewer.open(descriptor);

        Self {
            viewer,
            title,
            background,
            texture: None,
            transition: None,
        }
    }

    /// Drain finished loads from the loader thread.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        while let Some(event) = self.viewer.poll() {
            self.transition = None;
            match event {
                LoadEvent::Loaded { bitmap, .. } => {
                    let image = bitmap_to_color_image(&bitmap);
                    self.texture =
                        Some(ctx.load_texture("image", image, egui::TextureOptions::LINEAR));
                }
                LoadEvent::Failed { .. } => {
                    self.texture = None;
                }
            }
        }
    }

    /// Animated zoom to `scale`; ignored until an image is configured.
    pub fn zoom_to(&mut self, scale: f32) {
        if let Some(transition) = self.viewer.set_scale(scale) {
            self.transition = Some((transition, Instant::now()));
        }
    }

    pub fn retry(&mut self) {
        self.texture = None;
        self.transition = None;
        self.viewer.reload();
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.viewer.request_close();
        }

        panels::header::show(ctx, self);
        panels::footer::show(ctx, self);
        panels::viewport::show(ctx, self);
    }
}
