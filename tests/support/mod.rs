//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use geo::Point;
use shapelib::curve::{Curve, linestr, rect_line};
use shapelib::float_types::{Real, TAU};

pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn approx_point(p: Point<Real>, x: Real, y: Real, eps: Real) -> bool {
    approx_eq(p.x(), x, eps) && approx_eq(p.y(), y, eps)
}

/// Difference of two bearings folded into `[0, 2π)`.
pub fn bearing_difference(a: Real, b: Real) -> Real {
    (a - b).rem_euclid(TAU)
}

/// Boundary of the unit square, counter-clockwise from the origin.
pub fn unit_square() -> Curve {
    rect_line(0.0, 0.0, 1.0, 1.0).unwrap()
}

/// Straight curve from `(0, 0)` to `(1, 0)`.
pub fn unit_segment() -> Curve {
    linestr([(0.0, 0.0), (1.0, 0.0)]).unwrap()
}

/// Area of a regular polygon with `segments` sides inscribed in a circle.
pub fn ngon_area(radius: Real, segments: usize) -> Real {
    let n = segments as Real;
    0.5 * n * radius * radius * (TAU / n).sin()
}
