//! Boundary angle and proximity resolution by iterative probing.
//!
//! Both questions the resolver answers, "which way does the curve run here"
//! and "which point of the curve is closest to this one", are settled by
//! centring a small disk on the query point and looking at where its
//! boundary circle meets the curve. When the circle misses, the radius grows
//! and the probe runs again, up to [`ProbeConfig::max_attempts`] times.
//!
//! Bearings are measured in radians clockwise from north (+y):
//! east is π/2, south π, west 3π/2.

pub mod exact;
pub mod polygonal;
pub mod traits;

pub use exact::ExactProbe;
pub use polygonal::PolygonalProbe;
pub use traits::{BoundaryProbe, Intersection, ProbeError};

use crate::curve::Curve;
use crate::disk::Disk;
use crate::errors::ResolveError;
use crate::float_types::{PI, Real, TAU};
use geo::{Centroid, Distance, Euclidean, Line, Point};
use tracing::{debug, trace, warn};

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Knobs of the probing loops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeConfig {
    /// Upper bound for the default angle probe radius (the curve length is
    /// used when shorter).
    pub default_step: Real,
    /// Factor applied to the angle probe radius when the circle misses.
    pub angle_growth: Real,
    /// Default epsilon as a share of the point-to-curve distance.
    pub epsilon_ratio: Real,
    /// Factor applied to epsilon when the nearest-point probe misses.
    pub epsilon_growth: Real,
    /// Distances below this are treated as zero...
    pub min_distance: Real,
    /// ...and then epsilon is at least this.
    pub min_epsilon: Real,
    /// Attempts per probing loop; also bounds nearest-point refinements.
    pub max_attempts: usize,
    /// Allowed mismatch between the representative point's distance and the
    /// curve distance when the probe disk swallows the whole curve.
    pub representative_tolerance: Real,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            default_step: 1e-3,
            angle_growth: 3.0,
            epsilon_ratio: 1e-4,
            epsilon_growth: 6.0,
            min_distance: 1e-16,
            min_epsilon: 1e-12,
            max_attempts: 10,
            representative_tolerance: 1e-3,
        }
    }
}

impl ProbeConfig {
    pub const fn with_default_step(mut self, step: Real) -> Self {
        self.default_step = step;
        self
    }

    pub const fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub const fn with_epsilon_growth(mut self, growth: Real) -> Self {
        self.epsilon_growth = growth;
        self
    }

    pub const fn with_angle_growth(mut self, growth: Real) -> Self {
        self.angle_growth = growth;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ResolveError::DegenerateInput("max_attempts must be at least 1".into()));
        }
        if !(self.angle_growth > 1.0) || !(self.epsilon_growth > 1.0) {
            return Err(ResolveError::DegenerateInput(format!(
                "growth factors must exceed 1 (angle {}, epsilon {})",
                self.angle_growth, self.epsilon_growth
            )));
        }
        if !(self.default_step > 0.0) || !(self.epsilon_ratio > 0.0) || !(self.min_epsilon > 0.0) {
            return Err(ResolveError::DegenerateInput(
                "default_step, epsilon_ratio and min_epsilon must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one probing attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeStep<T> {
    Resolved(T),
    /// Probe again with this (strictly larger) parameter.
    Retry(Real),
    Failed(ResolveError),
}

/// Runs `attempt` with a monotonically growing parameter until it resolves,
/// fails, or `max_attempts` is spent. `radius_of` maps the parameter to the
/// probe radius reported on exhaustion.
fn drive<T>(
    initial: Real,
    max_attempts: usize,
    radius_of: impl Fn(Real) -> Real,
    mut attempt: impl FnMut(Real) -> ProbeStep<T>,
) -> Result<T> {
    let mut parameter = initial;
    for number in 1..=max_attempts {
        match attempt(parameter) {
            ProbeStep::Resolved(value) => return Ok(value),
            ProbeStep::Failed(error) => return Err(error),
            ProbeStep::Retry(next) => {
                if !(next > parameter) || !next.is_finite() {
                    return Err(ResolveError::ProbeExhausted {
                        attempts: number,
                        last_radius: radius_of(parameter),
                    });
                }
                if number == max_attempts {
                    return Err(ResolveError::ProbeExhausted {
                        attempts: number,
                        last_radius: radius_of(parameter),
                    });
                }
                debug!(attempt = number, from = parameter, to = next, "probe missed, growing");
                parameter = next;
            },
        }
    }
    // max_attempts >= 1 is validated by ProbeConfig
    Err(ResolveError::ProbeExhausted { attempts: max_attempts, last_radius: radius_of(parameter) })
}

/// Bearing from `a` to `b` in radians, clockwise from north, in `[0, 2π)`.
/// Coincident points give 0.
///
/// # Example
/// ```
/// # use shapelib::resolver::angle_from_points;
/// # use shapelib::float_types::PI;
/// assert_eq!(angle_from_points((0.0, 0.0), (0.0, 1.0)), 0.0);
/// assert!((angle_from_points((0.0, 0.0), (1.0, 1.0)) - PI / 4.0).abs() < 1e-12);
/// ```
pub fn angle_from_points(a: impl Into<Point<Real>>, b: impl Into<Point<Real>>) -> Real {
    let (a, b) = (a.into(), b.into());
    let opposite = b.x() - a.x();
    let adjacent = b.y() - a.y();
    let hypotenuse = opposite.hypot(adjacent);
    if hypotenuse == 0.0 {
        return 0.0;
    }
    let mut alpha = (opposite / hypotenuse).asin();
    if b.y() < a.y() {
        // asin only covers the northern half-plane
        alpha = PI - alpha;
    }
    let alpha = alpha.rem_euclid(TAU);
    if alpha >= TAU { 0.0 } else { alpha }
}

/// Tangent bearing of `curve` at the point nearest to `point`, using the
/// default [`Resolver`].
pub fn angle_at(curve: &Curve, point: Point<Real>, probe_step: Option<Real>) -> Result<Real> {
    Resolver::new().angle_at(curve, point, probe_step)
}

/// Point of `curve` nearest to `point`, using the default [`Resolver`].
pub fn nearest_point(curve: &Curve, point: Point<Real>, epsilon: Option<Real>) -> Result<Point<Real>> {
    Resolver::new().nearest_point(curve, point, epsilon)
}

/// Angle and nearest-point queries over a [`BoundaryProbe`].
#[derive(Clone, Debug, Default)]
pub struct Resolver<P: BoundaryProbe = ExactProbe> {
    probe: P,
    config: ProbeConfig,
}

impl Resolver<ExactProbe> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: BoundaryProbe> Resolver<P> {
    pub const fn with_probe(probe: P, config: ProbeConfig) -> Self {
        Self { probe, config }
    }

    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub const fn probe(&self) -> &P {
        &self.probe
    }

    /// Local tangent bearing of `curve` at `point`, or at its nearest point
    /// on the curve when `point` is off it.
    ///
    /// The probe radius starts at `probe_step`, defaulting to
    /// `min(curve.length(), default_step)`.
    ///
    /// - two hits `a`, `b`: the bearing from `a` to `b`, i.e. along the curve
    /// - one hit (an extreme of an open curve): the bearing from that hit to
    ///   the first hit of a probe twice as large, pointing into the curve
    /// - an overlap: the bearing along it
    ///
    /// # Errors
    /// `DegenerateInput` for a non-positive step or more than two hits,
    /// `ProbeExhausted` when the circle keeps missing.
    pub fn angle_at(&self, curve: &Curve, point: Point<Real>, probe_step: Option<Real>) -> Result<Real> {
        self.config.validate()?;
        let length = curve.length();
        if !(length > 0.0) {
            return Err(ResolveError::DegenerateInput("curve has zero length".into()));
        }
        let point = if curve.contains(&point) {
            point
        } else {
            self.nearest_point(curve, point, None)?
        };
        let initial = match probe_step {
            Some(step) => step,
            None => self.default_step(curve, point, length),
        };
        if !(initial > 0.0) || !initial.is_finite() {
            return Err(ResolveError::DegenerateInput(format!(
                "probe step must be positive and finite, got {initial}"
            )));
        }

        drive(initial, self.config.max_attempts, |radius| radius, |radius| {
            let disk = match Disk::new(point, radius) {
                Ok(disk) => disk,
                Err(error) => return ProbeStep::Failed(error),
            };
            let intersection = self.probe.intersect(&disk, curve);
            trace!(radius, ?intersection, "angle probe");
            match intersection {
                Ok(Intersection::Empty) => ProbeStep::Retry(radius * self.config.angle_growth),
                Err(ProbeError::Topology(reason)) => {
                    debug!(%reason, "angle probe topology failure");
                    ProbeStep::Retry(radius * self.config.angle_growth)
                },
                Err(ProbeError::Unsupported(reason)) => {
                    ProbeStep::Failed(ResolveError::UnsupportedGeometry(reason))
                },
                Ok(Intersection::Single(a)) => self.extreme_angle(curve, point, a, radius),
                Ok(Intersection::Points(points)) if points.len() == 2 => {
                    ProbeStep::Resolved(angle_from_points(points[0], points[1]))
                },
                Ok(Intersection::Points(points)) => {
                    ProbeStep::Failed(ResolveError::DegenerateInput(format!(
                        "{} probe hits around ({}, {}) at radius {radius}",
                        points.len(),
                        point.x(),
                        point.y()
                    )))
                },
                Ok(Intersection::Segment(line)) => {
                    ProbeStep::Resolved(angle_from_points(line.start, line.end))
                },
                Ok(Intersection::MultiSegment(lines)) => match lines.first() {
                    Some(line) => ProbeStep::Resolved(angle_from_points(line.start, line.end)),
                    None => ProbeStep::Retry(radius * self.config.angle_growth),
                },
            }
        })
    }

    /// `min(length, default_step)`, or a quarter of the length when a disk
    /// that large would swallow the whole (short) curve and never cross it.
    fn default_step(&self, curve: &Curve, point: Point<Real>, length: Real) -> Real {
        let step = length.min(self.config.default_step);
        match Disk::new(point, step) {
            Ok(disk) if disk.contains_curve(curve) => {
                debug!(step, length, "default step covers the curve, using a quarter of its length");
                length / 4.0
            },
            _ => step,
        }
    }

    /// Second probe at twice the radius, for a point at an extreme of the curve.
    fn extreme_angle(&self, curve: &Curve, point: Point<Real>, a: Point<Real>, radius: Real) -> ProbeStep<Real> {
        let disk = match Disk::new(point, radius * 2.0) {
            Ok(disk) => disk,
            Err(error) => return ProbeStep::Failed(error),
        };
        let b = match self.probe.intersect(&disk, curve) {
            Ok(Intersection::Single(b)) => b,
            Ok(Intersection::Points(points)) => points[0],
            Ok(Intersection::Segment(line)) => Point::from(line.start),
            Ok(Intersection::MultiSegment(lines)) if !lines.is_empty() => Point::from(lines[0].start),
            Err(ProbeError::Unsupported(reason)) => {
                return ProbeStep::Failed(ResolveError::UnsupportedGeometry(reason));
            },
            // the whole curve is shorter than the second probe
            Ok(_) | Err(ProbeError::Topology(_)) => {
                return ProbeStep::Resolved(angle_from_points(point, a));
            },
        };
        ProbeStep::Resolved(angle_from_points(a, b))
    }

    /// The point of `curve` nearest to `point`.
    ///
    /// Points already on the curve (within [`tolerance`](crate::float_types::tolerance))
    /// come back unchanged. Otherwise a disk of radius `distance + epsilon`
    /// probes the curve:
    ///
    /// - the disk swallows the whole curve: the curve's representative point
    /// - the circle misses: epsilon grows by `epsilon_growth`
    /// - two or more hits: the midpoint of the first two
    /// - one hit: that point, or the curve's extreme if it lies inside the disk
    /// - overlaps: the centroid of the first one
    ///
    /// A midpoint across a vertex can land off the curve; the search then
    /// restarts from it, within the same attempt budget.
    ///
    /// # Errors
    /// `ProbeExhausted` when no usable probe or no on-curve candidate is found,
    /// `UnsupportedGeometry` for unexpected intersection shapes or an
    /// inconsistent representative point.
    pub fn nearest_point(&self, curve: &Curve, point: Point<Real>, epsilon: Option<Real>) -> Result<Point<Real>> {
        self.config.validate()?;
        if let Some(epsilon) = epsilon {
            if !(epsilon > 0.0) || !epsilon.is_finite() {
                return Err(ResolveError::DegenerateInput(format!(
                    "epsilon must be positive and finite, got {epsilon}"
                )));
            }
        }

        let mut query = point;
        let mut epsilon = epsilon;
        for refinement in 0..self.config.max_attempts {
            if curve.contains(&query) {
                return Ok(query);
            }
            let candidate = self.probe_nearest(curve, query, epsilon.take())?;
            trace!(refinement, x = candidate.x(), y = candidate.y(), "nearest candidate");
            query = candidate;
        }
        if curve.contains(&query) {
            return Ok(query);
        }
        Err(ResolveError::ProbeExhausted {
            attempts: self.config.max_attempts,
            last_radius: curve.distance(&query),
        })
    }

    fn probe_nearest(&self, curve: &Curve, point: Point<Real>, epsilon: Option<Real>) -> Result<Point<Real>> {
        let distance = curve.distance(&point);
        if let Some(vertex) = vertex_at_distance(curve, point, distance) {
            trace!(x = vertex.x(), y = vertex.y(), "nearest point is a vertex");
            return Ok(vertex);
        }
        let mut initial = epsilon.unwrap_or(distance * self.config.epsilon_ratio);
        if distance < self.config.min_distance {
            initial = initial.max(self.config.min_epsilon);
        }
        let initial = if initial > 0.0 { initial } else { self.config.min_epsilon };

        drive(initial, self.config.max_attempts, |eps| distance + eps, |eps| {
            let disk = match Disk::new(point, distance + eps) {
                Ok(disk) => disk,
                Err(error) => return ProbeStep::Failed(error),
            };

            if disk.contains_curve(curve) {
                // the query sits near the middle of the shape
                let representative = curve.representative_point();
                let gap = (Euclidean::distance(representative, point) - distance).abs();
                if gap >= self.config.representative_tolerance {
                    warn!(gap, distance, "representative point disagrees with curve distance");
                    return ProbeStep::Failed(ResolveError::UnsupportedGeometry(format!(
                        "representative point is {gap} farther than the curve distance {distance}"
                    )));
                }
                return ProbeStep::Resolved(representative);
            }

            let intersection = self.probe.intersect(&disk, curve);
            trace!(epsilon = eps, ?intersection, "nearest probe");
            match intersection {
                Ok(Intersection::Empty) => ProbeStep::Retry(eps * self.config.epsilon_growth),
                Err(ProbeError::Topology(reason)) => {
                    debug!(%reason, "nearest probe topology failure");
                    ProbeStep::Retry(eps * self.config.epsilon_growth)
                },
                Err(ProbeError::Unsupported(reason)) => {
                    ProbeStep::Failed(ResolveError::UnsupportedGeometry(reason))
                },
                Ok(Intersection::Single(hit)) => {
                    ProbeStep::Resolved(extreme_inside(curve, &disk).unwrap_or(hit))
                },
                Ok(Intersection::Points(points)) => {
                    ProbeStep::Resolved(Line::new(points[0], points[1]).centroid())
                },
                Ok(Intersection::Segment(line)) => ProbeStep::Resolved(line.centroid()),
                Ok(Intersection::MultiSegment(lines)) => match lines.first() {
                    Some(line) => ProbeStep::Resolved(line.centroid()),
                    None => ProbeStep::Retry(eps * self.config.epsilon_growth),
                },
            }
        })
    }
}

/// A vertex of `curve` exactly `distance` away from `point`, i.e. the
/// nearest point of the curve when it sits on a corner.
fn vertex_at_distance(curve: &Curve, point: Point<Real>, distance: Real) -> Option<Point<Real>> {
    let slack = distance.max(1.0) * Real::EPSILON * 64.0;
    curve
        .coords()
        .map(|c| Point::from(*c))
        .find(|vertex| Euclidean::distance(point, *vertex) - distance <= slack)
}

/// The extreme of an open curve lying inside `disk`, closest to its centre.
fn extreme_inside(curve: &Curve, disk: &Disk) -> Option<Point<Real>> {
    if curve.is_closed() {
        return None;
    }
    let center = disk.center();
    [curve.start(), curve.end()]
        .into_iter()
        .map(|p| (Euclidean::distance(center, p), p))
        .filter(|(d, _)| *d < disk.radius())
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)
}
