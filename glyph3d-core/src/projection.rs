/// Camera and projection utilities
use nalgebra::Point3;

use crate::error::{GeometryError, GeometryResult};
use crate::vertex::Vertex;

/// Characters from sparse/dark to dense/bright
pub const DEFAULT_RAMP: &str = " .,-~:;=!*#$@";

pub const DEFAULT_DOF: f64 = 20.0;
pub const DEFAULT_MAX_DEPTH: f64 = 100.0;

/// Perspective camera looking down +z
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3<f64>,
    dof: f64,
    max_depth: f64,
    ramp: Vec<char>,
}

impl Camera {
    /// `dof` is the distance from the camera to the projection plane,
    /// `max_depth` the depth at which the illumination ramp runs out.
    pub fn new(position: Point3<f64>, dof: f64, max_depth: f64) -> Self {
        Self {
            position,
            dof,
            max_depth,
            ramp: DEFAULT_RAMP.chars().collect(),
        }
    }

    pub fn with_ramp(mut self, ramp: &str) -> GeometryResult<Self> {
        if ramp.is_empty() {
            return Err(GeometryError::EmptyRamp);
        }
        self.ramp = ramp.chars().collect();
        Ok(self)
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    pub fn dof(&self) -> f64 {
        self.dof
    }

    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }

    pub fn ramp(&self) -> &[char] {
        &self.ramp
    }

    /// Character drawn for cells nothing was projected onto
    pub fn background(&self) -> char {
        self.ramp[0]
    }

    /// Marker returned for points behind the camera.
    ///
    /// Its x/y lie outside every screen, so the rasterizer drops it during the
    /// bounds check.
    pub fn sentinel(&self) -> Vertex {
        Vertex::new(f64::MAX, f64::MAX, self.max_depth + 1.0)
    }

    /// Perspective-project `v`. The result keeps `v`'s colour and carries the
    /// camera-relative depth as its z.
    pub fn project(&self, v: &Vertex) -> Vertex {
        let depth = v.z() - self.position.z;
        if depth <= 0.0 {
            return self.sentinel();
        }

        let scale = self.dof / (depth + self.dof);
        Vertex::new(scale * v.x(), scale * v.y(), depth).with_color(v.color)
    }

    /// Map a depth to a ramp character, nearer points getting denser glyphs.
    ///
    /// The ramp is indexed from its end: `idx = ceil(depth / max_depth * len)`
    /// selects `ramp[len - idx]`. An index of zero (or below) wraps to the
    /// first character just like an end-relative index of `-0` would, and
    /// depths past `max_depth` stay on the first character.
    pub fn get_illumination(&self, depth: f64) -> char {
        let len = self.ramp.len();
        let idx = (depth / self.max_depth * len as f64).ceil();

        // NaN fails both comparisons and lands on the first character
        if idx >= 1.0 && idx <= len as f64 {
            self.ramp[len - idx as usize]
        } else {
            self.ramp[0]
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::origin(), DEFAULT_DOF, DEFAULT_MAX_DEPTH)
    }
}
