mod support;

use geo::Point;
use shapelib::curve::{linestr, rect_line};
use shapelib::errors::{ResolveError, ShapeError};
use shapelib::float_types::{PI, Real};
use shapelib::sketch::{CapStyle, Sketch, extend, extrapolate_point, perpendicular_at};
use shapelib::traits::BooleanOps;
use support::{approx_eq, approx_point, ngon_area, unit_segment};

const SEGMENTS: usize = 64;

// --------------------------------------------------------
//   extrapolation
// --------------------------------------------------------

#[test]
fn extrapolate_past_each_extreme() {
    let h = Real::sqrt(0.5);
    let cases = [
        ([(0.0, 0.0), (1.0, 0.0)], (0.0, 0.0), (-1.0, 0.0)),
        ([(0.0, 0.0), (1.0, 0.0)], (1.0, 0.0), (2.0, 0.0)),
        ([(0.0, 0.0), (1.0, 1.0)], (1.0, 1.0), (1.0 + h, 1.0 + h)),
        ([(0.0, 0.0), (1.0, 1.0)], (0.0, 0.0), (-h, -h)),
        ([(0.0, 1.0), (1.0, 0.0)], (0.0, 1.0), (-h, 1.0 + h)),
        ([(0.0, 1.0), (1.0, 0.0)], (1.0, 0.0), (1.0 + h, -h)),
        ([(0.0, 0.0), (0.0, 1.0)], (0.0, 1.0), (0.0, 2.0)),
        ([(0.0, 0.0), (0.0, 1.0)], (0.0, 0.0), (0.0, -1.0)),
    ];
    for (points, (px, py), (ex, ey)) in cases {
        let curve = linestr(points).unwrap();
        let p = extrapolate_point(&curve, Point::new(px, py), 1.0).unwrap();
        assert!(approx_point(p, ex, ey, 1e-9), "{points:?} at ({px}, {py}): {p:?}");
    }
}

#[test]
fn extrapolating_from_the_middle_is_unsupported() {
    let line = unit_segment();
    assert!(matches!(
        extrapolate_point(&line, Point::new(0.5, 0.0), 1.0),
        Err(ResolveError::UnsupportedGeometry(_))
    ));
    let square = rect_line(0.0, 0.0, 1.0, 1.0).unwrap();
    assert!(extrapolate_point(&square, Point::new(0.0, 0.0), 1.0).is_err());
}

#[test]
fn extend_grows_the_right_end() {
    let line = unit_segment();
    let longer = extend(&line, Point::new(1.0, 0.0), 0.5).unwrap();
    assert_eq!(longer.coords().count(), 3);
    assert!(approx_point(longer.end(), 1.5, 0.0, 1e-9));
    assert!(approx_eq(longer.length(), 1.5, 1e-9));

    let earlier = extend(&line, Point::new(0.0, 0.0), 0.5).unwrap();
    assert!(approx_point(earlier.start(), -0.5, 0.0, 1e-9));
    assert_eq!(earlier.end(), line.end());
}

#[test]
fn perpendicular_crosses_the_curve() {
    let line = unit_segment();
    let across = perpendicular_at(&line, Point::new(0.5, 0.0), 2.0).unwrap();
    let (a, b) = (Point::from(across.start), Point::from(across.end));
    assert!(approx_eq(a.x(), 0.5, 1e-9) && approx_eq(b.x(), 0.5, 1e-9));
    assert!(approx_eq((a.y() - b.y()).abs(), 2.0, 1e-9));
    assert!(approx_eq(a.y() + b.y(), 0.0, 1e-9));
}

#[test]
fn perpendicular_is_centred_on_the_given_point() {
    let line = unit_segment();
    let across = perpendicular_at(&line, Point::new(2.0, 0.0), 1.0).unwrap();
    assert!(approx_eq(across.start.x, 2.0, 1e-9) && approx_eq(across.end.x, 2.0, 1e-9));
}

// --------------------------------------------------------
//   shapes
// --------------------------------------------------------

#[test]
fn default_sketch_is_empty() {
    let sketch = Sketch::default();
    assert!(sketch.is_empty());
    assert_eq!(sketch.area(), 0.0);
    assert!(sketch.bounding_rect().is_none());
    assert_eq!(sketch, Sketch::new());
}

#[test]
fn ring_area_and_hole() {
    let ring = Sketch::ring(1.0, -1.0, 2.0, 0.5, SEGMENTS).unwrap();
    let outer = ngon_area(2.0, SEGMENTS);
    let inner = ngon_area(1.5, SEGMENTS);
    assert!(approx_eq(ring.area(), outer - inner, 1e-6), "{}", ring.area());
    assert!(approx_eq(ring.holes().area(), inner, 1e-6));
    assert!(approx_eq(ring.tight_envelope().area(), outer, 1e-6));
    assert!(!ring.contains_point(&Point::new(1.0, -1.0)));
    assert!(ring.contains_point(&Point::new(2.75, -1.0)));
}

#[test]
fn ring_width_must_be_smaller_than_radius() {
    assert!(matches!(
        Sketch::ring(0.0, 0.0, 1.0, 1.0, SEGMENTS),
        Err(ShapeError::InvalidDimension { parameter: "width", .. })
    ));
    assert!(Sketch::ring(0.0, 0.0, -1.0, 0.5, SEGMENTS).is_err());
}

#[test]
fn rectangle_edge_is_its_perimeter() {
    let rect = Sketch::rectangle(2.0, 1.0, 0.0, 0.0);
    assert!(approx_eq(rect.area(), 2.0, 1e-12));
    let edge = rect.edge().unwrap();
    assert!(edge.is_closed());
    assert!(approx_eq(edge.length(), 6.0, 1e-12));
    assert!(rect.holes().is_empty() || rect.holes().area() < 1e-9);
}

#[test]
fn thick_line_lies_between_its_bounds() {
    let bar = Sketch::line(0.0, 0.0, 4.0, 0.0, 0.5, SEGMENTS).unwrap();
    let body = 4.0 * 1.0;
    let area = bar.area();
    assert!(area > body && area < body + PI * 0.25, "{area}");
    assert!(bar.contains_point(&Point::new(-0.4, 0.0)));
    assert!(!bar.contains_point(&Point::new(2.0, 0.6)));
}

#[test]
fn boolean_ops_on_sketches() {
    let a = Sketch::rectangle(0.0, 0.0, 2.0, 2.0);
    let b = Sketch::rectangle(1.0, 1.0, 3.0, 3.0);
    assert!(approx_eq(a.union(&b).area(), 7.0, 1e-6));
    assert!(approx_eq(a.intersection(&b).area(), 1.0, 1e-6));
    assert!(approx_eq(a.difference(&b).area(), 3.0, 1e-6));
    assert!(approx_eq(a.xor(&b).area(), 6.0, 1e-6));
}

#[test]
fn short_polygon_is_empty() {
    assert!(Sketch::polygon(&[[0.0, 0.0], [1.0, 0.0]]).is_empty());
    let tri = Sketch::polygon(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]]);
    assert!(approx_eq(tri.area(), 2.0, 1e-12));
}

// --------------------------------------------------------
//   tubes
// --------------------------------------------------------

fn tube(cap: CapStyle) -> Sketch {
    Sketch::tube([(0.0, 0.0), (3.0, 0.0), (3.0, 2.0)], 1.0, 0.2, cap, cap, SEGMENTS).unwrap()
}

#[test]
fn cap_styles_order_tube_areas() {
    let open = tube(CapStyle::Open).area();
    let closed = tube(CapStyle::Closed).area();
    let flat = tube(CapStyle::Flat).area();
    assert!(open < closed, "open {open} closed {closed}");
    assert!(closed < flat, "closed {closed} flat {flat}");
}

#[test]
fn tube_has_a_bore() {
    let t = tube(CapStyle::Closed);
    // on the centre line
    assert!(!t.contains_point(&Point::new(1.5, 0.0)));
    // inside the wall
    assert!(t.contains_point(&Point::new(1.5, 0.6)));
    assert!(!t.contains_point(&Point::new(1.5, 0.8)));
}

#[test]
fn open_cap_leaves_the_bore_unclosed() {
    let closed = tube(CapStyle::Closed);
    let open = tube(CapStyle::Open);
    // past the start, inside the rounded cap
    let cap_point = Point::new(-0.6, 0.0);
    assert!(closed.contains_point(&cap_point));
    assert!(!open.contains_point(&cap_point));
}

#[test]
fn flat_cap_is_solid() {
    let flat = tube(CapStyle::Flat);
    assert!(flat.contains_point(&Point::new(-0.3, 0.0)));
    assert!(flat.contains_point(&Point::new(-0.6, 0.65)));
}

#[test]
fn closed_curve_tube_ignores_caps() {
    let square = rect_line(0.0, 0.0, 4.0, 4.0).unwrap();
    let a = Sketch::tube_from_curve(&square, 1.0, 0.2, CapStyle::Open, CapStyle::Open, SEGMENTS).unwrap();
    let b = Sketch::tube_from_curve(&square, 1.0, 0.2, CapStyle::Flat, CapStyle::Closed, SEGMENTS).unwrap();
    assert!(approx_eq(a.area(), b.area(), 1e-9));
    assert!(a.area() > 0.0);
}

#[test]
fn tube_dimensions_are_validated() {
    let points = [(0.0, 0.0), (1.0, 0.0)];
    assert!(matches!(
        Sketch::tube(points, 0.0, 0.2, CapStyle::Closed, CapStyle::Closed, SEGMENTS),
        Err(ShapeError::InvalidDimension { parameter: "diameter", .. })
    ));
    assert!(matches!(
        Sketch::tube(points, 1.0, -0.1, CapStyle::Closed, CapStyle::Closed, SEGMENTS),
        Err(ShapeError::InvalidDimension { parameter: "wall_width", .. })
    ));
}

#[test]
fn unknown_cap_style_is_rejected() {
    assert!(matches!("round".parse::<CapStyle>(), Err(ShapeError::UnknownCapStyle(_))));
}
