/// Default maximum zoom, as a multiple of the fit-to-screen scale.
pub const DEFAULT_MAX_ZOOM_FACTOR: f32 = 3.0;

/// Default edge length (image pixels) of the double-tap zoom rectangle.
pub const DEFAULT_TAP_RECT_SIZE: f32 = 100.0;

/// Duration of the animated double-tap zoom, in milliseconds.
pub const DEFAULT_ZOOM_ANIMATION_MS: u64 = 300;

/// Tolerance when deciding whether the current scale sits at the minimum.
pub const SCALE_EPSILON: f32 = 1e-5;

/// Network timeout for remote image fetches, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Largest response body accepted from a remote fetch (64 MiB).
pub const DEFAULT_MAX_FETCH_BYTES: u64 = 64 * 1024 * 1024;

/// Largest decoded image accepted, in pixels (256 megapixels).
pub const DEFAULT_MAX_PIXELS: u64 = 256 * 1024 * 1024;

/// Extensions tried, in order, when a local resource name has none.
pub const DEFAULT_RESOURCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

pub const USER_AGENT: &str = concat!("pinchzoom/", env!("CARGO_PKG_VERSION"));

/// Floor for the decoder allocation limit, so small pixel caps do not starve
/// the decoder's working buffers.
pub const MIN_DECODE_ALLOC: u64 = 16 * 1024 * 1024;
