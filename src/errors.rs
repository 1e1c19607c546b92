//! Error types

use crate::float_types::Real;
use thiserror::Error;

/// Failures of the angle and nearest-point resolver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// A zero-length curve, too few points, or a query that has no
    /// meaningful answer (e.g. more than two probe hits around a point).
    #[error("(DegenerateInput) {0}")]
    DegenerateInput(String),

    /// The probe radius grew through every allowed retry without producing
    /// a usable intersection.
    #[error("(ProbeExhausted) no usable intersection after {attempts} attempts (last radius {last_radius})")]
    ProbeExhausted { attempts: usize, last_radius: Real },

    /// The intersection had a shape the resolver has no rule for.
    #[error("(UnsupportedGeometry) {0}")]
    UnsupportedGeometry(String),
}

/// Failures while building shapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("invalid dimension: {parameter} = {value}")]
    InvalidDimension { parameter: &'static str, value: Real },

    #[error("unknown cap style '{0}', expected one of closed, flat, open")]
    UnknownCapStyle(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Failures while rasterizing or exporting rasters.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("geometry is empty, nothing to rasterize")]
    EmptyGeometry,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image-io")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
