use std::time::Instant;

use pinchzoom_core::geometry::Point;
use pinchzoom_core::loader::LoadState;
use tracing::debug;

use crate::app::{ViewerApp, FADE_IN};
use crate::convert::{fade_alpha, to_local, to_screen_rect, to_size};

/// Mouse-wheel zoom sensitivity (per scroll point).
const SCROLL_ZOOM_RATE: f32 = 0.005;

pub fn show(ctx: &egui::Context, app: &mut ViewerApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(app.background))
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            sync_viewport_size(app, rect);

            let texture = app.texture.as_ref().map(|t| t.id());
            match texture {
                Some(texture_id) if app.viewer.controller().is_configured() => {
                    let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
                    handle_pinch(ui, &response, app, rect);
                    handle_pan(ui, &response, app);
                    handle_double_tap(&response, app, rect);
                    draw_image(ui, app, texture_id, rect);
                }
                _ => show_placeholder(ui, app),
            }
        });
}

/// Mount, window resize and rotation all arrive here as a new rect size.
fn sync_viewport_size(app: &mut ViewerApp, rect: egui::Rect) {
    let size = to_size(rect.size());
    if app.viewer.viewport_size() == Some(size) {
        return;
    }
    app.transition = None;
    if let Err(e) = app.viewer.set_viewport_size(size) {
        debug!(%e, "Viewport not usable yet");
    }
}

fn handle_pinch(ui: &egui::Ui, response: &egui::Response, app: &mut ViewerApp, rect: egui::Rect) {
    if !response.hovered() {
        return;
    }
    let (zoom, scroll, focal) = ui.input(|i| {
        let focal = i
            .multi_touch()
            .map(|t| t.center_pos)
            .or_else(|| i.pointer.hover_pos());
        (i.zoom_delta(), i.smooth_scroll_delta.y, focal)
    });

    let factor = zoom * (scroll * SCROLL_ZOOM_RATE).exp();
    if (factor - 1.0).abs() < f32::EPSILON {
        return;
    }
    let focal = focal.unwrap_or_else(|| rect.center());
    app.transition = None;
    app.viewer.pinch(factor, to_local(focal, rect.min));
}

fn handle_pan(ui: &egui::Ui, response: &egui::Response, app: &mut ViewerApp) {
    // Two-finger gestures are pinches, not drags.
    if ui.input(|i| i.multi_touch().is_some()) {
        return;
    }
    if response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            app.transition = None;
            // Dragging right reveals content to the left.
            app.viewer.pan(Point::new(-delta.x, -delta.y));
        }
    }
}

fn handle_double_tap(response: &egui::Response, app: &mut ViewerApp, rect: egui::Rect) {
    if !response.double_clicked() {
        return;
    }
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };
    if let Some(transition) = app.viewer.double_tap(to_local(pos, rect.min)) {
        app.transition = Some((transition, Instant::now()));
    }
}

fn draw_image(ui: &egui::Ui, app: &mut ViewerApp, texture_id: egui::TextureId, rect: egui::Rect) {
    let Some(settled) = app.viewer.controller().content_frame() else {
        return;
    };

    let frame = match app.transition {
        Some((transition, started)) => {
            let elapsed = started.elapsed();
            if transition.is_finished(elapsed) {
                app.transition = None;
                settled
            } else {
                ui.ctx().request_repaint();
                transition.frame_at(elapsed)
            }
        }
        None => settled,
    };

    let alpha = match app.viewer.events().shown_at {
        Some(shown) => {
            let elapsed = shown.elapsed();
            if elapsed < FADE_IN {
                ui.ctx().request_repaint();
            }
            fade_alpha(elapsed, FADE_IN)
        }
        None => 1.0,
    };

    ui.painter_at(rect).image(
        texture_id,
        to_screen_rect(frame, rect.min),
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::from_white_alpha((alpha * 255.0) as u8),
    );
}

fn show_placeholder(ui: &mut egui::Ui, app: &mut ViewerApp) {
    let mut retry = false;
    ui.centered_and_justified(|ui| match app.viewer.load_state() {
        LoadState::Loading { .. } => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 2.0 - 16.0);
                ui.spinner();
                ui.label(
                    egui::RichText::new("Loading image...")
                        .color(egui::Color32::from_gray(160)),
                );
            });
        }
        LoadState::Failed(error) => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 2.0 - 24.0);
                ui.label(
                    egui::RichText::new(format!("Could not load image: {error}"))
                        .color(egui::Color32::from_rgb(220, 120, 120)),
                );
                retry = ui.button("Retry").clicked();
            });
        }
        _ => {
            ui.label(
                egui::RichText::new("No image")
                    .size(18.0)
                    .color(egui::Color32::from_gray(100)),
            );
        }
    });
    if retry {
        app.retry();
    }
}
