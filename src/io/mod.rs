//! Raster export.
//!
//! Encoding is left to the `image` crate; the file format follows the path
//! extension given to [`Raster::save`](crate::raster::Raster::save).

#[cfg(feature = "image-io")]
mod image;

#[cfg(feature = "image-io")]
pub use self::image::DARK_THRESHOLD;
