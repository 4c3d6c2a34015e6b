//! Data types produced by the loaders.
//!
//! - `image` holds the opaque decoded [`ImageHandle`](self::image::ImageHandle) and the CORS mode
//! - `point_cloud` holds the flat [`PointCloud`](self::point_cloud::PointCloud) position buffer

pub mod image;
pub mod point_cloud;
