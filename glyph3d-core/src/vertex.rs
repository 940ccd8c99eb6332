/// Vertex type and the interpolation helpers used by tessellation
use nalgebra::Vector3;

use crate::error::{GeometryError, GeometryResult};

/// Colour tag attached to a vertex. `0` means "unset".
pub type ColorTag = u8;

/// How far a set of barycentric weights may stray from summing to one
pub const COEFF_SUM_TOLERANCE: f64 = 1e-9;

/// A 3D vertex with position and colour tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector3<f64>,
    pub color: ColorTag,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            color: 0,
        }
    }

    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = color;
        self
    }

    pub fn from_vector(position: Vector3<f64>) -> Self {
        Self { position, color: 0 }
    }

    /// Build a vertex from exactly three components.
    pub fn from_slice(components: &[f64]) -> GeometryResult<Self> {
        match components {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(GeometryError::InvalidComponentCount(components.len())),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Keep an existing tag, otherwise take `color`.
    pub fn or_color(mut self, color: ColorTag) -> Self {
        if self.color == 0 {
            self.color = color;
        }
        self
    }

    /// Linear interpolation weighted as `v0 * t + v1 * (1 - t)`.
    ///
    /// `t = 0` yields `v1` and `t = 1` yields `v0`. The tessellation sweeps
    /// rely on this ordering, so it is not the textbook `(1 - t)*a + t*b`.
    pub fn lerp(v0: &Vertex, v1: &Vertex, t: f64) -> Vertex {
        Vertex::from_vector(v0.position * t + v1.position * (1.0 - t))
    }

    /// Weighted sum `Σ vertices[i] * coeffs[i]` over barycentric weights.
    pub fn lerp_gen(vertices: &[Vertex], coeffs: &[f64]) -> GeometryResult<Vertex> {
        if vertices.len() != coeffs.len() {
            return Err(GeometryError::CoefficientCountMismatch {
                vertices: vertices.len(),
                coeffs: coeffs.len(),
            });
        }

        let sum: f64 = coeffs.iter().sum();
        // Written so that a NaN sum is rejected too
        if !((sum - 1.0).abs() <= COEFF_SUM_TOLERANCE) {
            return Err(GeometryError::CoefficientSum(sum));
        }

        let position = vertices
            .iter()
            .zip(coeffs)
            .fold(Vector3::zeros(), |acc, (v, c)| acc + v.position * *c);

        Ok(Vertex::from_vector(position))
    }

    /// Component-wise comparison within `epsilon`, ignoring colour.
    pub fn approx_eq(&self, other: &Vertex, epsilon: f64) -> bool {
        (self.position - other.position).amax() <= epsilon
    }
}

impl From<Vector3<f64>> for Vertex {
    fn from(position: Vector3<f64>) -> Self {
        Self::from_vector(position)
    }
}
