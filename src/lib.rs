//! Boundary orientation and proximity queries for 2D polylines, built on
//! [`geo`].
//!
//! The core questions, answered by the [`resolver`], are *which way does a
//! boundary run at this point* ([`angle_at`]) and *where on the boundary is
//! the point closest to this one* ([`nearest_point`]). Both work by probing
//! the curve with a small disk and reading off where the disk's boundary
//! meets it, growing the disk until the answer is unambiguous.
//!
//! On top of that sit construction helpers for 2D regions ([`Sketch`]):
//! rings, thickened lines and tubes with configurable ends, plus
//! [`raster`]ization of sketches and curves to pixel arrays.
//!
//! Angles are compass bearings: radians clockwise from north (+y), in
//! `[0, 2π)`.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **image-io**: write rasters as PNG images
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for rasterization and `geo`'s multithreaded boolean ops

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod curve;
pub mod disk;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod raster;
pub mod resolver;
pub mod sketch;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use curve::{Curve, linering, linestr, rect_line};
pub use errors::{RasterError, ResolveError, ShapeError};
pub use resolver::{Resolver, angle_at, angle_from_points, nearest_point};
pub use sketch::Sketch;
pub use traits::BooleanOps;
