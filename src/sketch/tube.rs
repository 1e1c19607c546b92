//! Tubes, perpendicular cross-sections and curve extrapolation.

use crate::curve::{Curve, linestr};
use crate::errors::{ResolveError, ShapeError};
use crate::float_types::{FRAC_PI_2, PI, Real, tolerance};
use crate::resolver::{angle_at, nearest_point};
use crate::sketch::Sketch;
use crate::traits::BooleanOps;
use geo::{ConvexHull, Coord, Distance, Euclidean, Line, MultiPoint, Point};
use nalgebra::Vector2;
use std::fmt;
use std::str::FromStr;

/// Over-reach of an end mask past the tube's outer radius.
const MASK_OVERREACH: Real = 1.01;

/// Shape of a tube extreme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CapStyle {
    /// Rounded wall closing the end.
    #[default]
    Closed,
    /// A solid flat block past the end.
    Flat,
    /// Cut square at the end, leaving the bore open.
    Open,
}

impl FromStr for CapStyle {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "closed" => Ok(CapStyle::Closed),
            "flat" => Ok(CapStyle::Flat),
            "open" => Ok(CapStyle::Open),
            _ => Err(ShapeError::UnknownCapStyle(s.to_string())),
        }
    }
}

impl fmt::Display for CapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CapStyle::Closed => "closed",
            CapStyle::Flat => "flat",
            CapStyle::Open => "open",
        })
    }
}

/// Unit vector of a bearing measured clockwise from north.
fn bearing_vector(bearing: Real) -> Vector2<Real> {
    Vector2::new(bearing.sin(), bearing.cos())
}

fn offset(point: Point<Real>, by: Vector2<Real>) -> Point<Real> {
    Point::new(point.x() + by.x, point.y() + by.y)
}

/// A segment of `length` centred on `point`, perpendicular to the tangent of
/// `curve` at the curve point nearest to `point`.
pub fn perpendicular_at(curve: &Curve, point: Point<Real>, length: Real) -> Result<Line<Real>, ResolveError> {
    let reference = nearest_point(curve, point, None)?;
    let across = angle_at(curve, reference, None)? + FRAC_PI_2;
    let half = bearing_vector(across) * (length * 0.5);
    Ok(Line::new(offset(point, half), offset(point, -half)))
}

/// Which extreme of an open curve `point` sits on.
fn extreme_of(curve: &Curve, point: &Point<Real>) -> Result<Extreme, ResolveError> {
    if curve.is_closed() {
        return Err(ResolveError::UnsupportedGeometry("a closed curve has no extremes".into()));
    }
    let to_start = Euclidean::distance(*point, curve.start());
    let to_end = Euclidean::distance(*point, curve.end());
    if to_start <= tolerance() && to_start <= to_end {
        Ok(Extreme::Start)
    } else if to_end <= tolerance() {
        Ok(Extreme::End)
    } else {
        Err(ResolveError::UnsupportedGeometry(format!(
            "({}, {}) is not an extreme of the curve",
            point.x(),
            point.y()
        )))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Extreme {
    Start,
    End,
}

/// The point `length` past the extreme `point` of `curve`, continuing the
/// curve's direction there.
///
/// # Example
/// ```
/// # use shapelib::curve::linestr;
/// # use shapelib::sketch::extrapolate_point;
/// # use geo::Point;
/// let l = linestr([(0.0, 0.0), (1.0, 0.0)]).unwrap();
/// let p = extrapolate_point(&l, Point::new(1.0, 0.0), 1.0).unwrap();
/// assert!((p.x() - 2.0).abs() < 1e-9 && p.y().abs() < 1e-9);
/// ```
pub fn extrapolate_point(curve: &Curve, point: Point<Real>, length: Real) -> Result<Point<Real>, ResolveError> {
    extreme_of(curve, &point)?;
    // at an extreme the tangent bearing points back into the curve
    let outward = angle_at(curve, point, None)? + PI;
    Ok(offset(point, bearing_vector(outward) * length))
}

/// `curve` lengthened by `distance` past its extreme `point`.
pub fn extend(curve: &Curve, point: Point<Real>, distance: Real) -> Result<Curve, ResolveError> {
    let extreme = extreme_of(curve, &point)?;
    let beyond = Coord::from(extrapolate_point(curve, point, distance)?);
    let mut coords: Vec<Coord<Real>> = curve.coords().copied().collect();
    match extreme {
        Extreme::Start => coords.insert(0, beyond),
        Extreme::End => coords.push(beyond),
    }
    Curve::open(coords)
}

/// Solid quadrilateral past the extreme `point`, as wide as the tube.
fn end_mask(curve: &Curve, point: Point<Real>, outer_radius: Real) -> Result<Sketch, ResolveError> {
    let width = outer_radius * 2.0;
    let near = perpendicular_at(curve, point, width)?;
    let beyond = extrapolate_point(curve, point, outer_radius * MASK_OVERREACH)?;
    let far = perpendicular_at(curve, beyond, width)?;
    let corners: MultiPoint<Real> = vec![
        Point::from(near.start),
        Point::from(near.end),
        Point::from(far.end),
        Point::from(far.start),
    ]
    .into();
    Ok(Sketch::from(corners.convex_hull()))
}

impl Sketch {
    /// A tube along the polyline through `points`: two parallel walls of
    /// `wall_width` around a bore of `diameter`, with `begin` and `end`
    /// giving the shape of the two extremes.
    pub fn tube<P: Into<Coord<Real>>>(
        points: impl IntoIterator<Item = P>,
        diameter: Real,
        wall_width: Real,
        begin: CapStyle,
        end: CapStyle,
        segments: usize,
    ) -> Result<Self, ShapeError> {
        let curve = linestr(points)?;
        Self::tube_from_curve(&curve, diameter, wall_width, begin, end, segments)
    }

    /// [`Sketch::tube`] along an existing curve. Closed curves have no
    /// extremes, so the cap styles are ignored for them.
    pub fn tube_from_curve(
        curve: &Curve,
        diameter: Real,
        wall_width: Real,
        begin: CapStyle,
        end: CapStyle,
        segments: usize,
    ) -> Result<Self, ShapeError> {
        if !(diameter > 0.0) || !diameter.is_finite() {
            return Err(ShapeError::InvalidDimension { parameter: "diameter", value: diameter });
        }
        if !(wall_width > 0.0) || !wall_width.is_finite() {
            return Err(ShapeError::InvalidDimension { parameter: "wall_width", value: wall_width });
        }
        let radius = diameter * 0.5;
        let outer_radius = radius + wall_width;
        let outer = Sketch::from(curve.buffer(outer_radius, segments)?);
        let inner = Sketch::from(curve.buffer(radius, segments)?);
        let mut tube = outer.difference(&inner);
        if curve.is_closed() {
            return Ok(tube);
        }

        for (style, extreme) in [(begin, curve.start()), (end, curve.end())] {
            tube = match style {
                CapStyle::Closed => tube,
                CapStyle::Open => tube.difference(&end_mask(curve, extreme, outer_radius)?),
                CapStyle::Flat => tube.union(&end_mask(curve, extreme, outer_radius)?),
            };
        }
        Ok(tube)
    }
}
