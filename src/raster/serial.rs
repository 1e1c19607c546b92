//! Serial implementation of `RasterOps`.

use super::traits::{RasterOps, Rasterizable};
use super::{Grid, Raster};

/// Serial implementation of `RasterOps`.
pub struct SerialRasterOps;

impl Default for SerialRasterOps {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialRasterOps {
    pub const fn new() -> Self {
        Self
    }
}

impl RasterOps for SerialRasterOps {
    fn rasterize<G: Rasterizable + Sync>(&self, grid: &Grid, geometry: &G) -> Raster {
        let mut raster = Raster::blank(grid);
        let Some(window) = geometry.raster_bounds().and_then(|b| grid.window(&b)) else {
            return raster;
        };
        let width = grid.cols();
        for row in window.rows.clone() {
            for col in window.cols.clone() {
                if geometry.covers(&grid.cell(row, col)) {
                    raster.data[row * width + col] = 1;
                }
            }
        }
        raster
    }
}
