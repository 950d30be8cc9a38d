use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoomError {
    #[error("Invalid natural image size: {width}x{height}")]
    InvalidNaturalSize { width: f32, height: f32 },

    #[error("Invalid viewport size: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Image load failed: {0}")]
    Load(#[from] LoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),
}

/// Terminal failure of an image load. Delivered as `LoadState::Failed`,
/// never thrown across the worker boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Network failure fetching {uri}: {reason}")]
    NetworkFailure { uri: String, reason: String },

    #[error("HTTP status {status} fetching {uri}")]
    HttpStatus { uri: String, status: u16 },

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("Failed to start loader thread: {0}")]
    WorkerSpawn(String),
}

impl LoadError {
    /// True for failures that happened before any bytes were obtained.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure { .. } | Self::HttpStatus { .. } | Self::ResourceNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ZoomError>;
