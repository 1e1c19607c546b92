//! 2D regions over `geo::MultiPolygon`

pub mod shapes;
pub mod tube;

pub use tube::{CapStyle, extend, extrapolate_point, perpendicular_at};

use crate::curve::{Curve, largest_polygon};
use crate::errors::ResolveError;
use crate::float_types::Real;
use crate::traits::BooleanOps;
use geo::{Area, BooleanOps as GeoBool, BoundingRect, Contains, MultiPolygon, Point, Polygon, Rect};

/// A filled 2D region, possibly made of several polygons with holes.
#[derive(Clone, Debug, PartialEq)]
pub struct Sketch {
    pub geometry: MultiPolygon<Real>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self { geometry: MultiPolygon::new(vec![]) }
    }
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn from_geo(geometry: MultiPolygon<Real>) -> Self {
        Self { geometry }
    }

    pub fn to_multipolygon(&self) -> MultiPolygon<Real> {
        self.geometry.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    pub fn area(&self) -> Real {
        self.geometry.unsigned_area()
    }

    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        self.geometry.bounding_rect()
    }

    pub fn contains_point(&self, point: &Point<Real>) -> bool {
        self.geometry.contains(point)
    }

    /// Exterior ring of the largest polygon.
    pub fn edge(&self) -> Result<Curve, ResolveError> {
        Curve::edge_of(&geo::Geometry::MultiPolygon(self.geometry.clone()))
    }

    /// The largest polygon (by envelope area) with its holes filled in.
    pub fn tight_envelope(&self) -> Sketch {
        match largest_polygon(&self.geometry) {
            Some(polygon) => Sketch::from(Polygon::new(polygon.exterior().clone(), vec![])),
            None => Sketch::new(),
        }
    }

    /// The region that would fill the holes of this sketch.
    pub fn holes(&self) -> Sketch {
        self.tight_envelope().difference(self)
    }
}

impl From<Polygon<Real>> for Sketch {
    fn from(polygon: Polygon<Real>) -> Self {
        Self { geometry: MultiPolygon::new(vec![polygon]) }
    }
}

impl From<MultiPolygon<Real>> for Sketch {
    fn from(geometry: MultiPolygon<Real>) -> Self {
        Self { geometry }
    }
}

impl From<Rect<Real>> for Sketch {
    fn from(rect: Rect<Real>) -> Self {
        Self::from(rect.to_polygon())
    }
}

impl BooleanOps for Sketch {
    type Output = Self;

    fn union(&self, other: &Self) -> Self {
        Self { geometry: self.geometry.union(&other.geometry) }
    }

    fn difference(&self, other: &Self) -> Self {
        Self { geometry: self.geometry.difference(&other.geometry) }
    }

    fn intersection(&self, other: &Self) -> Self {
        Self { geometry: self.geometry.intersection(&other.geometry) }
    }

    fn xor(&self, other: &Self) -> Self {
        Self { geometry: self.geometry.xor(&other.geometry) }
    }
}
