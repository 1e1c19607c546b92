//! Open polylines and closed rings over `geo::LineString`

use crate::disk::Disk;
use crate::errors::ResolveError;
use crate::float_types::{Real, tolerance};
use geo::line_intersection::{LineIntersection, line_intersection};
use geo::{
    BooleanOps, BoundingRect, Coord, Distance, Euclidean, Geometry, Line, LineString,
    MultiPolygon, Point, Polygon, Rect, coord,
};

/// Radius of the disk whose boundary stands in for the edge of a point.
const POINT_EDGE_RADIUS: Real = 1e-8;

/// An ordered, non-self-crossing sequence of points, either open (a
/// polyline) or closed (a ring, whose last coordinate repeats the first).
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    line_string: LineString<Real>,
}

impl Curve {
    /// Builds an open polyline through `points`.
    ///
    /// # Errors
    /// `DegenerateInput` when there are fewer than two distinct points, a
    /// coordinate is not finite, or the polyline has zero length.
    pub fn open<P: Into<Coord<Real>>>(points: impl IntoIterator<Item = P>) -> Result<Self, ResolveError> {
        let coords: Vec<Coord<Real>> = points.into_iter().map(Into::into).collect();
        Self::from_line_string(LineString::new(coords))
    }

    /// Builds a closed ring through `points`, repeating the first point at
    /// the end when the caller did not.
    pub fn closed<P: Into<Coord<Real>>>(points: impl IntoIterator<Item = P>) -> Result<Self, ResolveError> {
        let mut coords: Vec<Coord<Real>> = points.into_iter().map(Into::into).collect();
        if coords.len() < 3 {
            return Err(ResolveError::DegenerateInput(format!(
                "a ring needs at least 3 points, got {}",
                coords.len()
            )));
        }
        if coords.first() != coords.last() {
            coords.push(coords[0]);
        }
        Self::from_line_string(LineString::new(coords))
    }

    /// Wraps an existing line string. Closed-ness is inferred from the
    /// first and last coordinates.
    pub fn from_line_string(line_string: LineString<Real>) -> Result<Self, ResolveError> {
        if line_string.0.len() < 2 {
            return Err(ResolveError::DegenerateInput(format!(
                "a curve needs at least 2 points, got {}",
                line_string.0.len()
            )));
        }
        if let Some(bad) = line_string.0.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(ResolveError::DegenerateInput(format!(
                "non-finite coordinate ({}, {})",
                bad.x, bad.y
            )));
        }
        let curve = Self { line_string };
        if curve.length() <= 0.0 {
            return Err(ResolveError::DegenerateInput("curve has zero length".into()));
        }
        Ok(curve)
    }

    /// Returns a curve describing the edge of `geometry`:
    ///
    /// - polygons: the exterior ring (of the largest polygon, for multipolygons)
    /// - lines and line strings: the geometry itself
    /// - points: the boundary of a tiny disk around the point
    pub fn edge_of(geometry: &Geometry<Real>) -> Result<Self, ResolveError> {
        match geometry {
            Geometry::Polygon(polygon) => Self::from_line_string(polygon.exterior().clone()),
            Geometry::MultiPolygon(multi) => {
                let largest = largest_polygon(multi).ok_or_else(|| {
                    ResolveError::DegenerateInput("empty multipolygon has no edge".into())
                })?;
                Self::from_line_string(largest.exterior().clone())
            },
            Geometry::Rect(rect) => Self::from_line_string(rect.to_polygon().exterior().clone()),
            Geometry::Triangle(triangle) => {
                Self::from_line_string(triangle.to_polygon().exterior().clone())
            },
            Geometry::Line(line) => Self::open([line.start, line.end]),
            Geometry::LineString(line_string) => Self::from_line_string(line_string.clone()),
            Geometry::Point(point) => {
                let disk = Disk::new(*point, POINT_EDGE_RADIUS)?;
                Self::from_line_string(disk.boundary(crate::float_types::CIRCLE_SEGMENTS))
            },
            other => Err(ResolveError::UnsupportedGeometry(format!(
                "no edge rule for {}",
                geometry_name(other)
            ))),
        }
    }

    pub fn line_string(&self) -> &LineString<Real> {
        &self.line_string
    }

    pub fn coords(&self) -> impl Iterator<Item = &Coord<Real>> {
        self.line_string.0.iter()
    }

    pub fn lines(&self) -> impl Iterator<Item = Line<Real>> + '_ {
        self.line_string.lines()
    }

    pub fn is_closed(&self) -> bool {
        self.line_string.is_closed()
    }

    pub fn start(&self) -> Point<Real> {
        Point::from(self.line_string.0[0])
    }

    pub fn end(&self) -> Point<Real> {
        Point::from(self.line_string.0[self.line_string.0.len() - 1])
    }

    /// Sum of the segment lengths.
    pub fn length(&self) -> Real {
        self.lines().map(|line| line.dx().hypot(line.dy())).sum()
    }

    pub fn bounding_rect(&self) -> Rect<Real> {
        // from_line_string rejects curves with fewer than two points
        self.line_string
            .bounding_rect()
            .unwrap_or_else(|| Rect::new(self.line_string.0[0], self.line_string.0[0]))
    }

    /// Euclidean distance from `point` to the nearest point of the curve.
    pub fn distance(&self, point: &Point<Real>) -> Real {
        Euclidean::distance(point, &self.line_string)
    }

    /// True when `point` lies on the curve within [`tolerance`].
    pub fn contains(&self, point: &Point<Real>) -> bool {
        self.distance(point) <= tolerance()
    }

    /// A point guaranteed to lie on the curve.
    pub fn representative_point(&self) -> Point<Real> {
        self.start()
    }

    /// The points where the vertical line at `x`, spanning the curve's
    /// bounding box, crosses the curve. Collinear overlaps contribute both
    /// of their ends.
    pub fn line_at_x(&self, x: Real) -> Vec<Point<Real>> {
        let bounds = self.bounding_rect();
        let probe = Line::new(coord! { x: x, y: bounds.min().y }, coord! { x: x, y: bounds.max().y });
        let mut hits = Vec::new();
        for line in self.lines() {
            match line_intersection(probe, line) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    push_distinct(&mut hits, Point::from(intersection));
                },
                Some(LineIntersection::Collinear { intersection }) => {
                    push_distinct(&mut hits, Point::from(intersection.start));
                    push_distinct(&mut hits, Point::from(intersection.end));
                },
                None => {},
            }
        }
        hits
    }

    /// Region covering every point within `distance` of the curve, with
    /// round joins and round caps.
    ///
    /// Built as the union of one quad per segment and one disk (of
    /// `segments` sides) per vertex.
    pub fn buffer(&self, distance: Real, segments: usize) -> Result<MultiPolygon<Real>, ResolveError> {
        if !(distance > 0.0) {
            return Ok(MultiPolygon::new(vec![]));
        }
        let mut region = MultiPolygon::new(vec![]);
        for line in self.lines() {
            let length = line.dx().hypot(line.dy());
            if length <= 0.0 {
                continue;
            }
            let nx = -line.dy() / length * distance;
            let ny = line.dx() / length * distance;
            let quad = Polygon::new(
                LineString::from(vec![
                    (line.start.x + nx, line.start.y + ny),
                    (line.start.x - nx, line.start.y - ny),
                    (line.end.x - nx, line.end.y - ny),
                    (line.end.x + nx, line.end.y + ny),
                    (line.start.x + nx, line.start.y + ny),
                ]),
                vec![],
            );
            region = region.union(&MultiPolygon::new(vec![quad]));
        }
        for coord in self.coords() {
            let disk = Disk::new(Point::from(*coord), distance)?;
            region = region.union(&MultiPolygon::new(vec![disk.to_polygon(segments)]));
        }
        Ok(region)
    }
}

/// Creates an open curve from the given points.
///
/// # Example
/// ```
/// # use shapelib::curve::linestr;
/// let l = linestr([(0.0, 0.0), (1.0, 1.0), (2.0, -1.0)]).unwrap();
/// let bounds = l.bounding_rect();
/// assert_eq!((bounds.min().y, bounds.max().x), (-1.0, 2.0));
/// ```
pub fn linestr<P: Into<Coord<Real>>>(points: impl IntoIterator<Item = P>) -> Result<Curve, ResolveError> {
    Curve::open(points)
}

/// Creates a closed ring (the border of a polygon, unfilled) from the given points.
pub fn linering<P: Into<Coord<Real>>>(points: impl IntoIterator<Item = P>) -> Result<Curve, ResolveError> {
    Curve::closed(points)
}

/// The perimeter of the rectangle spanned by two corners.
pub fn rect_line(x0: Real, y0: Real, x1: Real, y1: Real) -> Result<Curve, ResolveError> {
    Curve::closed([(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

pub(crate) fn largest_polygon(multi: &MultiPolygon<Real>) -> Option<&Polygon<Real>> {
    use geo::Area;

    multi.0.iter().max_by(|a, b| {
        let a = a.bounding_rect().map_or(0.0, |r| r.unsigned_area());
        let b = b.bounding_rect().map_or(0.0, |r| r.unsigned_area());
        a.total_cmp(&b)
    })
}

fn push_distinct(points: &mut Vec<Point<Real>>, point: Point<Real>) {
    if !points.iter().any(|p| Euclidean::distance(*p, point) <= tolerance()) {
        points.push(point);
    }
}

const fn geometry_name(geometry: &Geometry<Real>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_curves() {
        assert!(Curve::open([(0.0, 0.0)]).is_err());
        assert!(Curve::open([(1.0, 1.0), (1.0, 1.0)]).is_err());
        assert!(Curve::open([(0.0, 0.0), (Real::NAN, 1.0)]).is_err());
        assert!(Curve::closed([(0.0, 0.0), (1.0, 0.0)]).is_err());
    }

    #[test]
    fn closed_repeats_first_point() {
        let ring = Curve::closed([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        assert!(ring.is_closed());
        assert_eq!(ring.coords().count(), 4);
        assert!((ring.length() - (2.0 + (2.0 as Real).sqrt())).abs() < 1e-12);
    }

    #[test]
    fn distance_to_segments_and_vertices() {
        let corner = linestr([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        assert!((corner.distance(&Point::new(0.5, -2.0)) - 2.0).abs() < 1e-12);
        assert!((corner.distance(&Point::new(2.0, -1.0)) - (2.0 as Real).sqrt()).abs() < 1e-12);
        assert_eq!(corner.distance(&Point::new(1.0, 0.5)), 0.0);
    }

    #[test]
    fn line_at_x_crosses_each_segment() {
        let zigzag = linestr([(0.0, 0.0), (1.0, 1.0), (2.0, -1.0)]).unwrap();
        let hits = zigzag.line_at_x(0.5);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].y() - 0.5).abs() < 1e-12);

        let ring = rect_line(0.0, 0.0, 2.0, 1.0).unwrap();
        let hits = ring.line_at_x(1.0);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn edge_of_polygon_is_exterior() {
        let polygon = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0), (0.0, 0.0)]),
            vec![],
        );
        let edge = Curve::edge_of(&Geometry::Polygon(polygon)).unwrap();
        assert!(edge.is_closed());
        assert!((edge.length() - 12.0).abs() < 1e-12);
        assert!(edge.contains(&Point::new(1.5, 3.0)));
        assert!(!edge.contains(&Point::new(1.5, 1.5)));
    }

    #[test]
    fn edge_of_point_is_tiny_ring() {
        let edge = Curve::edge_of(&Geometry::Point(Point::new(2.0, 2.0))).unwrap();
        assert!(edge.is_closed());
        assert!(edge.length() < 1e-6);
    }
}
