//! Parallel implementation of `RasterOps`

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::traits::{RasterOps, Rasterizable};
use super::{Grid, Raster};

/// Parallel implementation of `RasterOps`: one rayon task per row.
#[cfg(feature = "parallel")]
pub struct ParallelRasterOps;

#[cfg(feature = "parallel")]
impl Default for ParallelRasterOps {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "parallel")]
impl ParallelRasterOps {
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(feature = "parallel")]
impl RasterOps for ParallelRasterOps {
    fn rasterize<G: Rasterizable + Sync>(&self, grid: &Grid, geometry: &G) -> Raster {
        let mut raster = Raster::blank(grid);
        let Some(window) = geometry.raster_bounds().and_then(|b| grid.window(&b)) else {
            return raster;
        };
        raster
            .data
            .par_chunks_mut(grid.cols())
            .enumerate()
            .filter(|(row, _)| window.rows.contains(row))
            .for_each(|(row, cells)| {
                for col in window.cols.clone() {
                    if geometry.covers(&grid.cell(row, col)) {
                        cells[col] = 1;
                    }
                }
            });
        raster
    }
}
