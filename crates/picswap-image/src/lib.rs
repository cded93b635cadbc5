//! Image acquisition for picture puzzles.
//!
//! The tile engine needs exactly one thing from this crate: an image to cut
//! into tiles. [`ImageSource::fetch_image`] always delivers one. When the
//! network is down, the request fails, or the bytes are not an image, the
//! well-known default image is returned instead and the cause is logged.
//!
//! # Examples
//!
//! ```
//! use picswap_core::TileSource;
//! use picswap_image::{ImageDescriptor, ImageLoader, ImageSource, Offline};
//!
//! let loader = ImageLoader::new(Offline);
//! let loaded = loader.fetch_image(&ImageDescriptor::default());
//!
//! // Offline, so the default image stands in.
//! assert!(loaded.origin.is_fallback());
//! assert_eq!(loaded.dimensions(), (1024, 1024));
//! ```

mod connectivity;
mod fallback;
mod loader;
mod source;

pub use self::{
    connectivity::{Connectivity, Offline, TcpProbe},
    fallback::{DEFAULT_IMAGE_NAME, DEFAULT_IMAGE_SIZE, default_image},
    loader::{DEFAULT_IMAGE_URL, DEFAULT_TIMEOUT, FetchError, ImageLoader},
    source::{ImageDescriptor, ImageOrigin, ImageSource, LoadedImage},
};
