//! Analytic circle/segment intersection.

use super::traits::{BoundaryProbe, Intersection, OrderedHit, ProbeError, merge_distance, seam_segment};
use crate::curve::Curve;
use crate::disk::Disk;
use crate::float_types::Real;
use geo::Point;

/// Slack on the segment parameter so a crossing exactly at a shared vertex
/// is kept by at least one of the two segments.
const PARAM_SLACK: Real = 1e-12;

/// Solves `|start + t (end - start) - center| = radius` for every segment
/// of the curve, keeping roots with `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactProbe;

impl ExactProbe {
    pub const fn new() -> Self {
        Self
    }
}

impl BoundaryProbe for ExactProbe {
    fn intersect(&self, disk: &Disk, curve: &Curve) -> Result<Intersection, ProbeError> {
        let center = disk.center();
        let radius = disk.radius();
        let mut hits = Vec::new();

        for (index, line) in curve.lines().enumerate() {
            let (dx, dy) = (line.dx(), line.dy());
            let a = dx * dx + dy * dy;
            if a == 0.0 {
                continue;
            }
            let fx = line.start.x - center.x();
            let fy = line.start.y - center.y();
            let b = 2.0 * (fx * dx + fy * dy);
            let c = fx * fx + fy * fy - radius * radius;
            let discriminant = b * b - 4.0 * a * c;
            if !discriminant.is_finite() {
                return Err(ProbeError::Topology(format!(
                    "non-finite discriminant on segment {index}"
                )));
            }
            if discriminant < 0.0 {
                continue;
            }

            let root = discriminant.sqrt();
            let roots = if root == 0.0 {
                [Some(-b / (2.0 * a)), None]
            } else {
                [Some((-b - root) / (2.0 * a)), Some((-b + root) / (2.0 * a))]
            };
            for t in roots.into_iter().flatten() {
                if !(-PARAM_SLACK..=1.0 + PARAM_SLACK).contains(&t) {
                    continue;
                }
                let t = t.clamp(0.0, 1.0);
                let point = if t == 1.0 {
                    Point::from(line.end)
                } else {
                    Point::new(line.start.x + t * dx, line.start.y + t * dy)
                };
                hits.push(OrderedHit::point(index, t, point));
            }
        }

        Intersection::from_hits(hits, merge_distance(disk), curve.is_closed(), seam_segment(disk, curve))
    }
}
