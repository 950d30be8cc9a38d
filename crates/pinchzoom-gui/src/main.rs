mod app;
mod convert;
mod panels;
mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pinchzoom_core::config::ViewerConfig;
use pinchzoom_core::loader::ImageDescriptor;

#[derive(Parser)]
#[command(name = "pinchzoom-gui", about = "Full-screen pinch and double-tap image viewer")]
#[command(version)]
struct Args {
    /// Image URL (http/https) or local resource name
    uri: String,

    /// Header title
    #[arg(long)]
    title: Option<String>,

    /// Background color behind the image, as #RRGGBB or #RRGGBBAA
    #[arg(long, value_parser = convert::parse_color, default_value = "#000000")]
    background: egui::Color32,

    /// Viewer configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = match args.config {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str::<ViewerConfig>(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ViewerConfig::default(),
    };

    let descriptor = ImageDescriptor::from_uri(args.uri.as_str());
    let background = args.background;
    let title = args.title.unwrap_or_else(|| descriptor.uri().to_string());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([240.0, 240.0])
            .with_title(format!("PinchZoom - {title}")),
        ..Default::default()
    };

    eframe::run_native(
        "PinchZoom",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ViewerApp::new(
                &cc.egui_ctx,
                config,
                descriptor,
                title,
                background,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
