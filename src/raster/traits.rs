//! Traits for rasterization.

use super::{Grid, Raster};
use crate::curve::Curve;
use crate::float_types::Real;
use crate::sketch::Sketch;
use geo::{Contains, Intersects, Point, Rect};

/// Something that can be binned into grid cells.
pub trait Rasterizable {
    /// Extent of the geometry, `None` when it is empty.
    fn raster_bounds(&self) -> Option<Rect<Real>>;

    /// Whether the cell is set.
    fn covers(&self, cell: &Rect<Real>) -> bool;
}

/// Regions use the cell-centre rule, so that neighbours sharing an edge with
/// the region stay empty.
impl Rasterizable for Sketch {
    fn raster_bounds(&self) -> Option<Rect<Real>> {
        self.bounding_rect()
    }

    fn covers(&self, cell: &Rect<Real>) -> bool {
        self.geometry.contains(&Point::from(cell.center()))
    }
}

/// Curves have no area, so any cell they touch is set.
impl Rasterizable for Curve {
    fn raster_bounds(&self) -> Option<Rect<Real>> {
        Some(self.bounding_rect())
    }

    fn covers(&self, cell: &Rect<Real>) -> bool {
        self.line_string().intersects(cell)
    }
}

/// Trait for binning a geometry into a [`Grid`].
pub trait RasterOps {
    fn rasterize<G: Rasterizable + Sync>(&self, grid: &Grid, geometry: &G) -> Raster;
}
