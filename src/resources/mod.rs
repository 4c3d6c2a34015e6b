//! This module contains all logic for loading images and point clouds from external files.
//!
//! The loaders never talk to the network or the file system themselves. They receive a
//! [`Fetch`] or [`ImageSource`] capability at construction, which keeps them usable from
//! tests and lets the caller decide where resources come from.

use std::future::Future;

use crate::{
    config::LoaderConfig,
    data_structures::{image::{CrossOrigin, ImageHandle}, point_cloud::PointCloud},
    error::Result,
};

pub mod fetch;
pub mod image;
pub mod point_cloud;

pub use fetch::{AssetFetcher, resolve_url};
pub use self::image::{ImageLoader, PlatformImageSource};
#[cfg(not(target_arch = "wasm32"))]
pub use self::image::DecodingImageSource;
#[cfg(target_arch = "wasm32")]
pub use self::image::BrowserImageSource;
pub use point_cloud::{PointCloudLoader, parse_csv};

/// Something that can retrieve a named resource, e.g. over HTTP or from disk.
pub trait Fetch {
    fn fetch_text(&self, path: &str) -> impl Future<Output = anyhow::Result<String>>;

    fn fetch_binary(&self, path: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>>;
}

/// Something that can turn a URL into a decoded image.
pub trait ImageSource {
    type Handle;

    fn load(
        &self,
        url: &str,
        cross_origin: CrossOrigin,
    ) -> impl Future<Output = anyhow::Result<Self::Handle>>;
}

impl<F: Fetch> Fetch for &F {
    fn fetch_text(&self, path: &str) -> impl Future<Output = anyhow::Result<String>> {
        (**self).fetch_text(path)
    }

    fn fetch_binary(&self, path: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> {
        (**self).fetch_binary(path)
    }
}

impl<S: ImageSource> ImageSource for &S {
    type Handle = S::Handle;

    fn load(
        &self,
        url: &str,
        cross_origin: CrossOrigin,
    ) -> impl Future<Output = anyhow::Result<Self::Handle>> {
        (**self).load(url, cross_origin)
    }
}

/// Load an image with the platform's default image source and configuration.
pub async fn load_image(url: &str) -> Result<ImageHandle> {
    ImageLoader::from_config(&LoaderConfig::default())
        .load_image(url)
        .await
}

/// Fetch and parse a CSV point cloud with the platform's default fetcher and configuration.
pub async fn point_cloud_from_csv(path: &str) -> Result<PointCloud> {
    PointCloudLoader::from_config(&LoaderConfig::default())
        .point_cloud_from_csv(path)
        .await
}
