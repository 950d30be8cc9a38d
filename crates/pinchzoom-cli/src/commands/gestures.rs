use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use pinchzoom_core::config::ViewerConfig;
use pinchzoom_core::error::ZoomError;
use pinchzoom_core::geometry::{NaturalSize, Size};
use pinchzoom_core::loader::{ImageDescriptor, ImageLoader, LoadEvent};
use pinchzoom_core::viewport::ViewportController;

use crate::parse::{parse_size, Gesture};
use crate::summary::{print_step, print_step_header};

#[derive(Args)]
pub struct GesturesArgs {
    /// Image URL or local resource name (omit when using --size)
    #[arg(required_unless_present = "size")]
    pub uri: Option<String>,

    /// Natural image size to simulate instead of loading an image, e.g. 1200x800
    #[arg(long, value_parser = parse_size, conflicts_with = "uri")]
    pub size: Option<Size>,

    /// Viewport size, e.g. 300x600
    #[arg(long, value_parser = parse_size)]
    pub viewport: Size,

    /// Directory holding local resources
    #[arg(long)]
    pub resources: Option<PathBuf>,

    /// Gesture step (repeatable): pinch:F@X,Y  pan:DX,DY  tap:X,Y  resize:WxH  scale:F
    #[arg(short, long = "step")]
    pub steps: Vec<Gesture>,
}

pub fn run(args: &GesturesArgs, mut config: ViewerConfig) -> Result<()> {
    if let Some(ref dir) = args.resources {
        config.loader.resource_dir = Some(dir.clone());
    }

    let natural = match (args.size, &args.uri) {
        (Some(size), _) => size,
        (None, Some(uri)) => load_natural_size(uri, &config)?,
        (None, None) => bail!("Either an image or --size is required"),
    };

    let mut controller = ViewportController::new(config.zoom);
    controller
        .configure(args.viewport, natural)
        .with_context(|| format!("Cannot fit {natural} into {}", args.viewport))?;

    print_step_header();
    print_step(0, "configure", &controller);

    for (i, gesture) in args.steps.iter().enumerate() {
        apply(&mut controller, gesture)?;
        print_step(i + 1, &gesture.to_string(), &controller);
    }

    Ok(())
}

fn apply(controller: &mut ViewportController, gesture: &Gesture) -> Result<()> {
    match *gesture {
        Gesture::Pinch { factor, focal } => controller.apply_pinch(factor, focal),
        Gesture::Pan { delta } => controller.apply_pan(delta),
        Gesture::Tap { at } => {
            controller.handle_double_tap(at);
        }
        Gesture::Resize { size } => controller.set_viewport_size(size)?,
        Gesture::Scale { scale } => {
            controller.set_scale(scale);
        }
    }
    Ok(())
}

fn load_natural_size(uri: &str, config: &ViewerConfig) -> Result<NaturalSize> {
    let timeout = Duration::from_secs(config.loader.timeout_secs.saturating_add(30));
    let mut loader = ImageLoader::from_config(config.loader.clone());
    loader.load(ImageDescriptor::from_uri(uri));

    match loader.wait(timeout) {
        Some(LoadEvent::Loaded { natural_size, .. }) => Ok(natural_size),
        Some(LoadEvent::Failed { error, .. }) => {
            Err(ZoomError::from(error)).with_context(|| format!("Failed to load {uri}"))
        }
        None => bail!("Timed out loading {uri}"),
    }
}
