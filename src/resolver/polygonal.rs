//! Disk boundary approximated by a regular polygon.

use super::traits::{BoundaryProbe, Intersection, OrderedHit, ProbeError, merge_distance, seam_segment};
use crate::curve::Curve;
use crate::disk::Disk;
use crate::float_types::{CIRCLE_SEGMENTS, Real};
use geo::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line, Point};

/// Intersects each edge of the disk's polygon (the same parametric circle
/// `Sketch::circle` builds) with each curve segment using
/// `geo::line_intersection`. Collinear overlaps come back as segments.
#[derive(Clone, Copy, Debug)]
pub struct PolygonalProbe {
    segments: usize,
}

impl PolygonalProbe {
    /// `segments` below 3 are raised to 3.
    pub const fn new(segments: usize) -> Self {
        Self { segments: if segments < 3 { 3 } else { segments } }
    }

    pub const fn segments(&self) -> usize {
        self.segments
    }
}

impl Default for PolygonalProbe {
    fn default() -> Self {
        Self::new(CIRCLE_SEGMENTS)
    }
}

/// Parameter of `coord` projected on `line`.
fn parameter(line: &Line<Real>, coord: Coord<Real>) -> Real {
    let (dx, dy) = (line.dx(), line.dy());
    ((coord.x - line.start.x) * dx + (coord.y - line.start.y) * dy) / (dx * dx + dy * dy)
}

impl BoundaryProbe for PolygonalProbe {
    fn intersect(&self, disk: &Disk, curve: &Curve) -> Result<Intersection, ProbeError> {
        let ring = disk.boundary(self.segments);
        let merge = merge_distance(disk);
        let mut hits = Vec::new();

        for (index, line) in curve.lines().enumerate() {
            if line.dx() == 0.0 && line.dy() == 0.0 {
                continue;
            }
            for edge in ring.lines() {
                match line_intersection(line, edge) {
                    Some(LineIntersection::SinglePoint { intersection, .. }) => {
                        let t = parameter(&line, intersection);
                        hits.push(OrderedHit::point(index, t, Point::from(intersection)));
                    },
                    Some(LineIntersection::Collinear { intersection }) => {
                        let (t0, t1) = (
                            parameter(&line, intersection.start),
                            parameter(&line, intersection.end),
                        );
                        // keep overlaps pointing the way the curve runs
                        let overlap = if t0 <= t1 {
                            intersection
                        } else {
                            Line::new(intersection.end, intersection.start)
                        };
                        if overlap.dx().hypot(overlap.dy()) <= merge {
                            hits.push(OrderedHit::point(index, t0.min(t1), Point::from(overlap.start)));
                        } else {
                            hits.push(OrderedHit::segment(index, t0.min(t1), overlap));
                        }
                    },
                    None => {},
                }
            }
        }

        Intersection::from_hits(hits, merge, curve.is_closed(), seam_segment(disk, curve))
    }
}
