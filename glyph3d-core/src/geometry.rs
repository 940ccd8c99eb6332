/// Geometry primitives and their tessellation into point clouds
use crate::error::{GeometryError, GeometryResult};
use nalgebra::Rotation3;

use crate::transform::{RotationState, Transform};
use crate::vertex::{ColorTag, Vertex};

/// Sampling interval used when none is configured
pub const DEFAULT_INTERVAL: f64 = 0.01;

/// How a geometry is turned into points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tessellation {
    /// Sample the segment between every pair of control vertices
    #[default]
    Edges,
    /// Sample the triangle spanned by every triple of control vertices
    Surfaces,
}

/// An enclosed set of two or more control vertices in 3D space
///
/// The control vertices are never modified after construction. Rotation is
/// tracked as a cumulative orientation about `pivot` and applied to a fresh
/// copy of the vertices whenever the geometry is tessellated.
#[derive(Debug, Clone)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    pivot: Vertex,
    color: ColorTag,
    mode: Tessellation,
    interval: f64,
    orientation: Rotation3<f64>,
    spin: RotationState,
}

fn check_interval(interval: f64) -> GeometryResult<()> {
    // Also rejects NaN
    if interval > 0.0 && interval <= 1.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidInterval(interval))
    }
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, pivot: Vertex) -> GeometryResult<Self> {
        if vertices.len() < 2 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }

        Ok(Self {
            vertices,
            pivot,
            color: 0,
            mode: Tessellation::default(),
            interval: DEFAULT_INTERVAL,
            orientation: Rotation3::identity(),
            spin: RotationState::zero(),
        })
    }

    /// A single segment from `start` to `end`
    pub fn line(start: Vertex, end: Vertex, pivot: Vertex) -> Self {
        Self {
            vertices: vec![start, end],
            pivot,
            color: 0,
            mode: Tessellation::Edges,
            interval: DEFAULT_INTERVAL,
            orientation: Rotation3::identity(),
            spin: RotationState::zero(),
        }
    }

    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = color;
        self
    }

    pub fn with_mode(mut self, mode: Tessellation) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_interval(mut self, interval: f64) -> GeometryResult<Self> {
        check_interval(interval)?;
        self.interval = interval;
        Ok(self)
    }

    /// Rotation added by every call to [`Geometry::advance`]
    pub fn with_spin(mut self, spin: RotationState) -> Self {
        self.spin = spin;
        self
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn pivot(&self) -> &Vertex {
        &self.pivot
    }

    pub fn color(&self) -> ColorTag {
        self.color
    }

    pub fn mode(&self) -> Tessellation {
        self.mode
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Product of every rotation applied so far
    pub fn orientation(&self) -> &Rotation3<f64> {
        &self.orientation
    }

    pub fn spin(&self) -> &RotationState {
        &self.spin
    }

    /// Compose a further rotation onto the current one.
    ///
    /// The new rotation acts after the existing orientation, so `n` calls
    /// pose the vertices exactly like `n` chained
    /// [`Transform::rotate_about_pivot`] calls.
    pub fn rotate(&mut self, alpha: f64, beta: f64, gamma: f64) {
        let step = Transform::rotation(&RotationState::new(alpha, beta, gamma));
        self.orientation = step * self.orientation;
    }

    /// Replace the orientation with a single rotation
    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.orientation = Transform::rotation(&rotation);
    }

    /// Apply one step of the geometry's spin
    pub fn advance(&mut self) {
        let spin = self.spin;
        self.rotate(spin.x, spin.y, spin.z);
    }

    /// Set the orientation reached after `frame` spin steps.
    ///
    /// The spin rotation is raised to the power `frame` directly instead of
    /// being multiplied in step by step, so frame `n` always renders
    /// identically.
    pub fn pose_for_frame(&mut self, frame: u64) {
        self.orientation = if frame == 0 {
            Rotation3::identity()
        } else {
            Transform::rotation(&self.spin).powf(frame as f64)
        };
    }

    /// Control vertices with the current rotation applied about the pivot
    pub fn posed_vertices(&self) -> Vec<Vertex> {
        if self.orientation == Rotation3::identity() {
            return self.vertices.clone();
        }

        let matrix = self.orientation.matrix();
        self.vertices
            .iter()
            .map(|v| Transform::apply_about(matrix, v, &self.pivot))
            .collect()
    }

    /// Tessellate with the configured mode and interval
    pub fn tessellate(&self) -> GeometryResult<Vec<Vertex>> {
        match self.mode {
            Tessellation::Edges => self.generate_edges(self.interval),
            Tessellation::Surfaces => self.generate_surfaces(self.interval),
        }
    }

    /// Sample an edge between every unordered pair of control vertices.
    ///
    /// `t` is advanced by repeated addition, so the last sample is the last
    /// accumulated value that is still `<= 1`. With `interval = 0.01` the
    /// sum overshoots 1 and t = 1 itself is never sampled.
    pub fn generate_edges(&self, interval: f64) -> GeometryResult<Vec<Vertex>> {
        check_interval(interval)?;

        let vertices = self.posed_vertices();
        let n = vertices.len();
        let mut points = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                let (v0, v1) = (&vertices[i], &vertices[j]);
                let mut t = 0.0;
                while t <= 1.0 {
                    points.push(Vertex::lerp(v0, v1, t).or_color(self.color));
                    t += interval;
                }
            }
        }

        Ok(points)
    }

    /// Sample the 2-simplex spanned by every unordered triple of control
    /// vertices with barycentric weights stepped by `interval`.
    ///
    /// `coeff0` is the outer loop and `coeff1` the inner one; output order
    /// depends on it.
    pub fn generate_surfaces(&self, interval: f64) -> GeometryResult<Vec<Vertex>> {
        check_interval(interval)?;

        let vertices = self.posed_vertices();
        let n = vertices.len();
        let mut points = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let simplex = [vertices[i], vertices[j], vertices[k]];
                    let mut coeff0 = 0.0;
                    while coeff0 <= 1.0 {
                        let mut coeff1 = 0.0;
                        while coeff1 <= 1.0 - coeff0 {
                            let coeff2 = 1.0 - coeff0 - coeff1;
                            let point = Vertex::lerp_gen(&simplex, &[coeff0, coeff1, coeff2])?;
                            points.push(point.or_color(self.color));
                            coeff1 += interval;
                        }
                        coeff0 += interval;
                    }
                }
            }
        }

        Ok(points)
    }
}
