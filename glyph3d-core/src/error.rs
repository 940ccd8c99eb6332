/// Error types for geometry validation and frame rendering
use std::io;
use thiserror::Error;

/// Validation errors raised while building or sampling geometry.
///
/// These are never retried internally; the caller has to fix its input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A geometry needs at least two control vertices
    #[error("expected 2 or more vertices, got {count}")]
    TooFewVertices { count: usize },

    /// Tessellation interval outside (0, 1]
    #[error("invalid tessellation interval {0} (expected 0 < interval <= 1)")]
    InvalidInterval(f64),

    /// `lerp_gen` was given a different number of weights than vertices
    #[error("got {coeffs} coefficients for {vertices} vertices")]
    CoefficientCountMismatch { vertices: usize, coeffs: usize },

    /// Barycentric weights must sum to one
    #[error("coefficients sum to {0}, expected 1")]
    CoefficientSum(f64),

    /// A vector was built from a source without exactly 3 components
    #[error("expected 3 components, got {0}")]
    InvalidComponentCount(usize),

    /// The camera needs at least one illumination character
    #[error("illumination ramp must not be empty")]
    EmptyRamp,
}

/// Failures while producing or publishing a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("display error: {0}")]
    Io(#[from] io::Error),

    /// The other end of the frame handoff went away
    #[error("frame handoff closed")]
    HandoffClosed,
}

pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
