use pinchzoom_core::viewport::ZoomPhase;

use crate::app::ViewerApp;

pub fn show(ctx: &egui::Context, app: &mut ViewerApp) {
    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            let controller = app.viewer.controller();
            if let Some(natural) = controller.natural_size() {
                ui.label(natural.to_string());
                ui.separator();
            }
            match (controller.scale(), controller.min_scale()) {
                (Some(scale), Some(min)) => {
                    ui.label(format!("Zoom: {:.0}%", scale * 100.0));
                    ui.separator();
                    ui.label(format!("{:.1}x fit", scale / min));
                }
                _ => {
                    ui.label("Zoom: -");
                }
            }
            ui.separator();
            ui.label(match controller.phase() {
                ZoomPhase::Unconfigured => "No image",
                ZoomPhase::Fitted => "Fit to screen",
                ZoomPhase::Zoomed => "Zoomed",
            });

            let fit = controller.min_scale();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let enabled = fit.is_some();
                if ui
                    .add_enabled(enabled, egui::Button::new("1:1"))
                    .on_hover_text("Actual pixels")
                    .clicked()
                {
                    app.zoom_to(1.0);
                }
                if ui.add_enabled(enabled, egui::Button::new("Fit")).clicked() {
                    if let Some(min) = fit {
                        app.zoom_to(min);
                    }
                }
            });
        });
        ui.add_space(2.0);
    });
}
