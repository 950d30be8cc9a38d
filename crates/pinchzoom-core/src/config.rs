use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_FETCH_BYTES, DEFAULT_MAX_PIXELS,
    DEFAULT_MAX_ZOOM_FACTOR, DEFAULT_RESOURCE_EXTENSIONS, DEFAULT_TAP_RECT_SIZE,
    DEFAULT_ZOOM_ANIMATION_MS,
};

/// Top-level viewer configuration, loadable from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Scale limits and double-tap policy for the viewport controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Absolute minimum scale. `None` means fit-to-screen.
    pub min_scale: Option<f32>,
    /// Absolute maximum scale. `None` means `max_zoom_factor` x fit.
    pub max_scale: Option<f32>,
    /// Maximum zoom relative to the fit-to-screen scale.
    pub max_zoom_factor: f32,
    pub double_tap: DoubleTapZoom,
    /// Duration of the animated double-tap transition.
    pub animation_ms: u64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: None,
            max_scale: None,
            max_zoom_factor: DEFAULT_MAX_ZOOM_FACTOR,
            double_tap: DoubleTapZoom::default(),
            animation_ms: DEFAULT_ZOOM_ANIMATION_MS,
        }
    }
}

/// Zoom-in target used when a double-tap happens at the minimum scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DoubleTapZoom {
    /// Zoom to the maximum scale, keeping the tapped point under the finger.
    MaxScale,
    /// Zoom so a square of `size` image pixels around the tapped point fills
    /// the viewport.
    TapRect { size: f32 },
}

impl Default for DoubleTapZoom {
    fn default() -> Self {
        Self::TapRect {
            size: DEFAULT_TAP_RECT_SIZE,
        }
    }
}

impl fmt::Display for DoubleTapZoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxScale => write!(f, "Max Scale"),
            Self::TapRect { size } => write!(f, "Tap Rect ({size}px)"),
        }
    }
}

/// Limits for the image loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub timeout_secs: u64,
    pub max_fetch_bytes: u64,
    pub max_pixels: u64,
    /// Root directory of the local resource catalog.
    pub resource_dir: Option<std::path::PathBuf>,
    pub resource_extensions: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_fetch_bytes: DEFAULT_MAX_FETCH_BYTES,
            max_pixels: DEFAULT_MAX_PIXELS,
            resource_dir: None,
            resource_extensions: DEFAULT_RESOURCE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
