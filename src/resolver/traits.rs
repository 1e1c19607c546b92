//! The probe seam: intersecting a disk boundary with a curve.

use crate::curve::Curve;
use crate::disk::Disk;
use crate::float_types::Real;
use geo::{Distance, Euclidean, Line, Point};
use std::cmp::Ordering;

/// Where a probe circle meets a curve.
///
/// Points are ordered along the curve, duplicates at shared vertices
/// already merged.
#[derive(Clone, Debug, PartialEq)]
pub enum Intersection {
    /// The circle misses the curve.
    Empty,
    /// A single crossing or tangency.
    Single(Point<Real>),
    /// Two or more discrete crossings.
    Points(Vec<Point<Real>>),
    /// The circle boundary runs along one piece of the curve.
    Segment(Line<Real>),
    /// The circle boundary runs along several pieces of the curve.
    MultiSegment(Vec<Line<Real>>),
}

/// Why a probe could not produce an [`Intersection`].
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeError {
    /// Numerical breakdown (non-finite values, degenerate configuration).
    /// Recoverable: the resolver grows the probe and tries again.
    Topology(String),
    /// A result shape no resolution rule covers, e.g. isolated points
    /// mixed with overlapping segments.
    Unsupported(String),
}

/// Intersects the boundary circle of a [`Disk`] with a [`Curve`].
pub trait BoundaryProbe {
    fn intersect(&self, disk: &Disk, curve: &Curve) -> Result<Intersection, ProbeError>;
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Hit {
    Point(Point<Real>),
    Segment(Line<Real>),
}

/// A hit keyed by its position along the curve: segment index, then the
/// parameter within that segment.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OrderedHit {
    pub index: usize,
    pub t: Real,
    pub hit: Hit,
}

impl OrderedHit {
    pub const fn point(index: usize, t: Real, point: Point<Real>) -> Self {
        Self { index, t, hit: Hit::Point(point) }
    }

    pub const fn segment(index: usize, t: Real, line: Line<Real>) -> Self {
        Self { index, t, hit: Hit::Segment(line) }
    }

    fn cmp_position(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index).then(self.t.total_cmp(&other.t))
    }
}

/// Distance under which two hits are the same point: a relative share of
/// the probe radius, floored by the float spacing at the disk's scale.
pub(crate) fn merge_distance(disk: &Disk) -> Real {
    let center = disk.center();
    let scale = center.x().abs().max(center.y().abs()) + disk.radius();
    (disk.radius() * Real::EPSILON.sqrt()).max(scale * Real::EPSILON * 64.0)
}

/// Index of the last segment of a ring whose first vertex lies inside the
/// disk. Along the ring, hits on that segment come before hits on segment 0.
pub(crate) fn seam_segment(disk: &Disk, curve: &Curve) -> Option<usize> {
    if !curve.is_closed() || Euclidean::distance(disk.center(), curve.start()) >= disk.radius() {
        return None;
    }
    curve.lines().count().checked_sub(1)
}

impl Intersection {
    /// Normalizes raw hits into one of the closed variants.
    ///
    /// `seam` is the value of [`seam_segment`] for the probed disk.
    pub(crate) fn from_hits(
        mut hits: Vec<OrderedHit>,
        merge: Real,
        closed: bool,
        seam: Option<usize>,
    ) -> Result<Self, ProbeError> {
        hits.sort_by(OrderedHit::cmp_position);

        let mut points: Vec<(usize, Point<Real>)> = Vec::new();
        let mut segments: Vec<(usize, Line<Real>)> = Vec::new();
        for ordered in &hits {
            match ordered.hit {
                Hit::Point(p) => {
                    if !p.x().is_finite() || !p.y().is_finite() {
                        return Err(ProbeError::Topology("non-finite intersection point".into()));
                    }
                    if points.last().is_none_or(|(_, last)| Euclidean::distance(*last, p) > merge) {
                        points.push((ordered.index, p));
                    }
                },
                Hit::Segment(line) => segments.push((ordered.index, line)),
            }
        }
        if closed && points.len() > 1 {
            if let (Some((_, first)), Some((_, last))) = (points.first(), points.last()) {
                if Euclidean::distance(*first, *last) <= merge {
                    points.pop();
                }
            }
        }
        if let Some(seam) = seam {
            rotate_seam(&mut points, seam);
            rotate_seam(&mut segments, seam);
        }
        let points: Vec<Point<Real>> = points.into_iter().map(|(_, p)| p).collect();
        let segments: Vec<Line<Real>> = segments.into_iter().map(|(_, s)| s).collect();

        if segments.is_empty() {
            return Ok(match points.len() {
                0 => Intersection::Empty,
                1 => Intersection::Single(points[0]),
                _ => Intersection::Points(points),
            });
        }

        // crossings where an overlap starts or ends are part of that overlap
        let points: Vec<Point<Real>> = points
            .into_iter()
            .filter(|p| segments.iter().all(|s| Euclidean::distance(p, s) > merge))
            .collect();
        if !points.is_empty() {
            return Err(ProbeError::Unsupported(format!(
                "{} isolated points mixed with {} overlapping segments",
                points.len(),
                segments.len()
            )));
        }
        Ok(if segments.len() == 1 {
            Intersection::Segment(segments[0])
        } else {
            Intersection::MultiSegment(segments)
        })
    }
}

/// Moves the trailing hits on the `seam` segment to the front.
fn rotate_seam<T>(hits: &mut [(usize, T)], seam: usize) {
    if hits.len() < 2 || hits[0].0 == seam {
        return;
    }
    let trailing = hits.iter().rev().take_while(|(index, _)| *index == seam).count();
    if trailing < hits.len() {
        hits.rotate_right(trailing);
    }
}
