//! Grayscale image conversion for rasters.

use crate::errors::RasterError;
use crate::float_types::Real;
use crate::raster::Raster;
use geo::Rect;
use image::{GrayImage, Luma};
use std::path::Path;
use tracing::debug;

/// Pixels darker than this read back as filled.
pub const DARK_THRESHOLD: u8 = 128;

impl Raster {
    /// Monochrome image of the raster: filled cells black on a white background.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let value = self.data[y as usize * self.width + x as usize];
            Luma([255 - 255 * value.min(1)])
        })
    }

    /// Reads a monochrome image back, treating dark pixels as filled.
    /// `bounds` is the world area the image covers.
    pub fn from_image(image: &GrayImage, bounds: Rect<Real>) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let data = image.pixels().map(|pixel| u8::from(pixel[0] < DARK_THRESHOLD)).collect();
        Self { width, height, data, bounds }
    }

    /// Writes the raster as an image; the format is chosen from the
    /// extension of `path`.
    ///
    /// # Example
    /// ```no_run
    /// # use shapelib::raster::rasterize;
    /// # use shapelib::sketch::Sketch;
    /// let ring = Sketch::ring(0.0, 0.0, 2.0, 0.5, 64).unwrap();
    /// rasterize(&ring, 50.0, None, None).unwrap().save("png/ring.png").unwrap();
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), width = self.width, height = self.height, "saving raster");
        self.to_image().save(path)?;
        Ok(())
    }

    /// Loads an image written by [`Raster::save`].
    pub fn load(path: impl AsRef<Path>, bounds: Rect<Real>) -> Result<Self, RasterError> {
        let image = ::image::open(path)?.to_luma8();
        Ok(Self::from_image(&image, bounds))
    }
}
