use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pinchzoom_core::config::ViewerConfig;
use pinchzoom_core::error::ZoomError;
use pinchzoom_core::geometry::Size;
use pinchzoom_core::loader::{ImageDescriptor, LoadEvent};
use pinchzoom_core::viewer::ZoomViewer;

use crate::parse::parse_size;
use crate::summary::print_image_summary;

/// Extra time beyond the fetch timeout allowed for decoding.
const DECODE_GRACE: Duration = Duration::from_secs(30);

#[derive(Args)]
pub struct InfoArgs {
    /// Image URL (http/https) or local resource name
    pub uri: String,

    /// Viewport to fit the image into, e.g. 390x844
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<Size>,

    /// Directory holding local resources
    #[arg(long)]
    pub resources: Option<PathBuf>,
}

pub fn run(args: &InfoArgs, mut config: ViewerConfig) -> Result<()> {
    if let Some(ref dir) = args.resources {
        config.loader.resource_dir = Some(dir.clone());
    }
    let timeout = Duration::from_secs(config.loader.timeout_secs) + DECODE_GRACE;
    let descriptor = ImageDescriptor::from_uri(args.uri.as_str());

    let mut viewer = ZoomViewer::from_config(config);
    if let Some(viewport) = args.viewport {
        if !viewport.is_positive() {
            bail!("Viewport must be positive, got {viewport}");
        }
        viewer.set_viewport_size(viewport)?;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(format!("Loading {}", descriptor.uri()));
    pb.enable_steady_tick(Duration::from_millis(80));

    viewer.open(descriptor.clone());
    let event = viewer.wait(timeout);
    pb.finish_and_clear();

    match event {
        Some(LoadEvent::Loaded { natural_size, .. }) => {
            print_image_summary(&descriptor, natural_size, viewer.controller());
            Ok(())
        }
        Some(LoadEvent::Failed { error, .. }) => Err(ZoomError::from(error))
            .with_context(|| format!("Failed to load {}", descriptor.uri())),
        None => bail!("Timed out loading {}", descriptor.uri()),
    }
}
