//! 2D Shapes as `Sketch`s

use crate::curve::{Curve, linestr};
use crate::disk::Disk;
use crate::errors::ShapeError;
use crate::float_types::Real;
use crate::sketch::Sketch;
use crate::traits::BooleanOps;
use geo::{LineString, Point, Polygon as GeoPolygon, Rect, coord};

fn positive(parameter: &'static str, value: Real) -> Result<Real, ShapeError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ShapeError::InvalidDimension { parameter, value })
    }
}

impl Sketch {
    /// A filled rectangle spanned by two corners, in any order.
    ///
    /// # Example
    /// ```
    /// # use shapelib::sketch::Sketch;
    /// let r = Sketch::rectangle(0.0, 0.0, 2.0, 3.0);
    /// assert_eq!(r.area(), 6.0);
    /// ```
    pub fn rectangle(x0: Real, y0: Real, x1: Real, y1: Real) -> Self {
        Sketch::from(Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 }))
    }

    /// A filled polygon through `points`, closed automatically. Fewer than
    /// three points give an empty sketch.
    pub fn polygon(points: &[[Real; 2]]) -> Self {
        if points.len() < 3 {
            return Sketch::new();
        }
        let mut coords: Vec<(Real, Real)> = points.iter().map(|p| (p[0], p[1])).collect();
        if coords.first() != coords.last() {
            coords.push(coords[0]);
        }
        Sketch::from(GeoPolygon::new(LineString::from(coords), vec![]))
    }

    /// A disk of `radius` around `(cx, cy)`, approximated with `segments`
    /// polygon edges.
    pub fn circle(cx: Real, cy: Real, radius: Real, segments: usize) -> Result<Self, ShapeError> {
        let radius = positive("radius", radius)?;
        let disk = Disk::new(Point::new(cx, cy), radius)?;
        Ok(Sketch::from(disk.to_polygon(segments)))
    }

    /// A circular ring: the disk of `radius` minus the disk of
    /// `radius - width`.
    pub fn ring(cx: Real, cy: Real, radius: Real, width: Real, segments: usize) -> Result<Self, ShapeError> {
        let radius = positive("radius", radius)?;
        let width = positive("width", width)?;
        if width >= radius {
            return Err(ShapeError::InvalidDimension { parameter: "width", value: width });
        }
        let outer = Self::circle(cx, cy, radius, segments)?;
        let inner = Self::circle(cx, cy, radius - width, segments)?;
        Ok(outer.difference(&inner))
    }

    /// The segment from `(x0, y0)` to `(x1, y1)` thickened by `width` on
    /// each side, with round ends.
    pub fn line(x0: Real, y0: Real, x1: Real, y1: Real, width: Real, segments: usize) -> Result<Self, ShapeError> {
        let curve = linestr([(x0, y0), (x1, y1)])?;
        Self::from_curve_buffer(&curve, width, segments)
    }

    /// Every point within `distance` of `curve`.
    pub fn from_curve_buffer(curve: &Curve, distance: Real, segments: usize) -> Result<Self, ShapeError> {
        let distance = positive("distance", distance)?;
        Ok(Sketch::from(curve.buffer(distance, segments)?))
    }
}
