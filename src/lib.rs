//! cloud-loaders
//!
//! Async loaders for the two kinds of assets a WebGL point cloud demo needs:
//! images (textures, sprites) and point clouds stored as CSV. Both work
//! natively and on WASM. The platform specific parts (HTTP, file system,
//! `HTMLImageElement`) sit behind small capability traits that are injected
//! into the loaders, so the loaders themselves can be driven by in-memory
//! fakes.
//!
//! High-level modules
//! - `config`: loader configuration (asset root, CORS mode, timeout, parse mode)
//! - `data_structures`: the loaded values, [`ImageHandle`] and [`PointCloud`]
//! - `error`: the [`LoadError`] returned by every loader
//! - `logging`: platform logger setup
//! - `resources`: the loaders, their capability traits and default implementations
//!

pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;
mod platform;
pub mod resources;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use config::{LoaderConfig, ParseMode};
pub use data_structures::image::{CrossOrigin, ImageHandle};
pub use data_structures::point_cloud::PointCloud;
pub use error::LoadError;
pub use logging::init_logging;
pub use resources::{
    AssetFetcher, Fetch, ImageLoader, ImageSource, PointCloudLoader, load_image, parse_csv,
    point_cloud_from_csv, resolve_url,
};
