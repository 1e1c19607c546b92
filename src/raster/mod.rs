//! Rasterization of sketches and curves to pixel arrays.
//!
//! A [`Grid`] splits a world-space rectangle into cells; a geometry is
//! binned by asking, cell by cell, whether it covers the cell (see
//! [`Rasterizable`]). Only cells inside the geometry's bounding box are
//! tested. The result is a [`Raster`] whose row 0 is the top of the world
//! rectangle, the way images are laid out.

pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use traits::{RasterOps, Rasterizable};

#[cfg(not(feature = "parallel"))]
pub use serial::SerialRasterOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelRasterOps;

use crate::errors::RasterError;
use crate::float_types::Real;
use geo::{Rect, coord};
use std::ops::Range;
use tracing::debug;

pub type Result<T> = std::result::Result<T, RasterError>;

/// Selection of one axis of the rendered area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisRange {
    /// Keep the geometry's lower bound, clamp the upper bound to this value.
    Max(Real),
    /// Render exactly this span, which may exceed the geometry.
    Span(Real, Real),
}

impl From<Real> for AxisRange {
    fn from(max: Real) -> Self {
        AxisRange::Max(max)
    }
}

impl From<(Real, Real)> for AxisRange {
    fn from((start, end): (Real, Real)) -> Self {
        AxisRange::Span(start, end)
    }
}

impl AxisRange {
    fn apply(self, lower: Real, upper: Real) -> (Real, Real) {
        match self {
            AxisRange::Max(max) => (lower, upper.min(max)),
            AxisRange::Span(start, end) => (start, end),
        }
    }
}

/// `bounds` with the optional axis selections applied.
pub fn select_bounds(bounds: Rect<Real>, x_range: Option<AxisRange>, y_range: Option<AxisRange>) -> Rect<Real> {
    let (mut x0, mut x1) = (bounds.min().x, bounds.max().x);
    let (mut y0, mut y1) = (bounds.min().y, bounds.max().y);
    if let Some(range) = x_range {
        (x0, x1) = range.apply(x0, x1);
    }
    if let Some(range) = y_range {
        (y0, y1) = range.apply(y0, y1);
    }
    Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 })
}

/// Cells of a [`Grid`] overlapping some rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

/// A world-space rectangle divided into `cols x rows` cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    bounds: Rect<Real>,
    step_x: Real,
    step_y: Real,
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Cells of `step_x x step_y` starting at the lower-left corner of
    /// `bounds`; the last column and row may stick out past it.
    pub fn new(bounds: Rect<Real>, step_x: Real, step_y: Real) -> Result<Self> {
        for (name, step) in [("step_x", step_x), ("step_y", step_y)] {
            if !(step > 0.0) || !step.is_finite() {
                return Err(RasterError::InvalidGrid(format!("{name} must be positive, got {step}")));
            }
        }
        let cols = (bounds.width() / step_x).ceil();
        let rows = (bounds.height() / step_y).ceil();
        Self::with_shape(bounds, step_x, step_y, cols, rows)
    }

    /// `pixratio` pixels per world unit on both axes, the pixel count
    /// rounded to the nearest integer.
    pub fn from_pixratio(bounds: Rect<Real>, pixratio: Real) -> Result<Self> {
        if !(pixratio > 0.0) || !pixratio.is_finite() {
            return Err(RasterError::InvalidGrid(format!("pixratio must be positive, got {pixratio}")));
        }
        let step = 1.0 / pixratio;
        let cols = (bounds.width() * pixratio + 0.5).floor();
        let rows = (bounds.height() * pixratio + 0.5).floor();
        Self::with_shape(bounds, step, step, cols, rows)
    }

    fn with_shape(bounds: Rect<Real>, step_x: Real, step_y: Real, cols: Real, rows: Real) -> Result<Self> {
        if !(cols >= 1.0) || !(rows >= 1.0) || !cols.is_finite() || !rows.is_finite() {
            return Err(RasterError::InvalidGrid(format!(
                "{} x {} area gives a {cols} x {rows} grid",
                bounds.width(),
                bounds.height()
            )));
        }
        Ok(Self { bounds, step_x, step_y, cols: cols as usize, rows: rows as usize })
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn bounds(&self) -> Rect<Real> {
        self.bounds
    }

    pub const fn steps(&self) -> (Real, Real) {
        (self.step_x, self.step_y)
    }

    /// The world rectangle of a cell; row 0 is the top row.
    pub fn cell(&self, row: usize, col: usize) -> Rect<Real> {
        let x0 = self.bounds.min().x + col as Real * self.step_x;
        let y0 = self.bounds.min().y + (self.rows - 1 - row) as Real * self.step_y;
        Rect::new(coord! { x: x0, y: y0 }, coord! { x: x0 + self.step_x, y: y0 + self.step_y })
    }

    /// Cells overlapping `area`, `None` when there are none.
    pub fn window(&self, area: &Rect<Real>) -> Option<Window> {
        let min = self.bounds.min();
        let col_of = |x: Real| ((x - min.x) / self.step_x).floor();
        // counted from the bottom
        let level_of = |y: Real| ((y - min.y) / self.step_y).floor();

        let first_col = col_of(area.min().x).max(0.0);
        let last_col = col_of(area.max().x).min(self.cols as Real - 1.0);
        let low = level_of(area.min().y).max(0.0);
        let high = level_of(area.max().y).min(self.rows as Real - 1.0);
        if first_col > last_col || low > high {
            return None;
        }
        let (low, high) = (low as usize, high as usize);
        Some(Window {
            rows: (self.rows - 1 - high)..(self.rows - low),
            cols: (first_col as usize)..(last_col as usize + 1),
        })
    }
}

/// Binned geometry: `height` rows of `width` cells, 0 or 1, row 0 at the
/// top of `bounds`.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
    pub bounds: Rect<Real>,
}

impl Raster {
    /// An all-zero raster shaped like `grid`.
    pub fn blank(grid: &Grid) -> Self {
        Self {
            width: grid.cols(),
            height: grid.rows(),
            data: vec![0; grid.cols() * grid.rows()],
            bounds: grid.bounds(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.height && col < self.width {
            Some(self.data[row * self.width + col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks(self.width.max(1))
    }

    /// Number of set cells.
    pub fn filled(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Rasterizes `geometry` at `pixratio` pixels per unit.
///
/// `x_range` and `y_range` select part of the geometry (or an area larger
/// than it); `None` renders the whole bounding box.
///
/// # Example
/// ```
/// # use shapelib::raster::rasterize;
/// # use shapelib::sketch::Sketch;
/// let square = Sketch::rectangle(0.0, 0.0, 2.0, 1.0);
/// let raster = rasterize(&square, 2.0, None, None).unwrap();
/// assert_eq!((raster.width, raster.height, raster.filled()), (4, 2, 8));
/// ```
pub fn rasterize<G: Rasterizable + Sync>(
    geometry: &G,
    pixratio: Real,
    x_range: Option<AxisRange>,
    y_range: Option<AxisRange>,
) -> Result<Raster> {
    let bounds = geometry.raster_bounds().ok_or(RasterError::EmptyGeometry)?;
    let grid = Grid::from_pixratio(select_bounds(bounds, x_range, y_range), pixratio)?;
    debug!(cols = grid.cols(), rows = grid.rows(), "rasterizing");

    #[cfg(feature = "parallel")]
    let ops = ParallelRasterOps::new();
    #[cfg(not(feature = "parallel"))]
    let ops = SerialRasterOps::new();

    Ok(ops.rasterize(&grid, geometry))
}
