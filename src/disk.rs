//! Probe disks

use crate::curve::Curve;
use crate::errors::ResolveError;
use crate::float_types::{Real, TAU};
use geo::{Coord, Distance, Euclidean, LineString, Point, Polygon, coord};

/// A circle of `radius` around `center`. Only ever used as a probing
/// instrument; constructed per query and dropped afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    center: Point<Real>,
    radius: Real,
}

impl Disk {
    /// # Errors
    /// `DegenerateInput` unless `radius` is finite and strictly positive.
    pub fn new(center: Point<Real>, radius: Real) -> Result<Self, ResolveError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ResolveError::DegenerateInput(format!(
                "probe radius must be positive and finite, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }

    pub const fn center(&self) -> Point<Real> {
        self.center
    }

    pub const fn radius(&self) -> Real {
        self.radius
    }

    /// True when every point of `curve` lies strictly inside the disk.
    /// Checking the vertices is enough since the disk is convex.
    pub fn contains_curve(&self, curve: &Curve) -> bool {
        curve
            .coords()
            .all(|c| Euclidean::distance(self.center, Point::from(*c)) < self.radius)
    }

    /// The boundary circle sampled at `segments` uniformly spaced angles,
    /// explicitly closed. Fewer than 3 segments are raised to 3.
    pub fn boundary(&self, segments: usize) -> LineString<Real> {
        let segments = segments.max(3);
        let mut coords: Vec<Coord<Real>> = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                coord! {
                    x: self.center.x() + self.radius * theta.cos(),
                    y: self.center.y() + self.radius * theta.sin(),
                }
            })
            .collect();
        coords.push(coords[0]);
        LineString::new(coords)
    }

    /// The disk as a filled polygon with `segments` edges.
    pub fn to_polygon(&self, segments: usize) -> Polygon<Real> {
        Polygon::new(self.boundary(segments), vec![])
    }
}
