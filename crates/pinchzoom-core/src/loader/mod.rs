mod bitmap;
mod catalog;
mod descriptor;
mod fetch;
mod image_loader;

pub use bitmap::{decode_bitmap, Bitmap};
pub use catalog::ResourceCatalog;
pub use descriptor::ImageDescriptor;
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{default_fetcher, status_error, Fetcher};
pub use image_loader::{CancelToken, ImageLoader, LoadEvent, LoadState, Notifier};
