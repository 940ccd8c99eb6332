/// Rigid rotation of vertices and cumulative rotation state
use nalgebra::{Matrix3, Rotation3};

use crate::vertex::Vertex;

/// Rotation around the three axes (in radians)
///
/// `x`, `y` and `z` are the α, β and γ angles of `Rz(γ)·Ry(β)·Rx(α)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rigid transforms applied to single vertices
pub struct Transform;

impl Transform {
    /// `Rz(γ)·Ry(β)·Rx(α)` written out entry by entry
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f64> {
        let (sa, ca) = rotation.x.sin_cos();
        let (sb, cb) = rotation.y.sin_cos();
        let (sg, cg) = rotation.z.sin_cos();

        Matrix3::new(
            cg * cb,
            cg * sb * sa - sg * ca,
            cg * sb * ca + sg * sa,
            sg * cb,
            sg * sb * sa + cg * ca,
            sg * sb * ca - cg * sa,
            -sb,
            cb * sa,
            cb * ca,
        )
    }

    /// The same rotation as a composable [`Rotation3`].
    ///
    /// Angle triples do not compose by addition once more than one axis is
    /// involved, so cumulative orientations are kept in this form.
    pub fn rotation(rotation: &RotationState) -> Rotation3<f64> {
        Rotation3::from_matrix_unchecked(Self::rotation_matrix(rotation))
    }

    /// Rotate `v` about the coordinate origin. The colour tag is kept.
    pub fn rotate(v: &Vertex, alpha: f64, beta: f64, gamma: f64) -> Vertex {
        let matrix = Self::rotation_matrix(&RotationState::new(alpha, beta, gamma));
        Self::apply(&matrix, v)
    }

    /// Rotate `v` about `pivot` instead of the origin.
    pub fn rotate_about_pivot(
        v: &Vertex,
        pivot: &Vertex,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Vertex {
        let matrix = Self::rotation_matrix(&RotationState::new(alpha, beta, gamma));
        Self::apply_about(&matrix, v, pivot)
    }

    /// Apply a precomputed rotation about `pivot`.
    ///
    /// Tessellation poses every control vertex with the same matrix, so it is
    /// built once per geometry rather than once per vertex.
    pub fn apply_about(matrix: &Matrix3<f64>, v: &Vertex, pivot: &Vertex) -> Vertex {
        let local = v.position - pivot.position;
        Vertex {
            position: matrix * local + pivot.position,
            color: v.color,
        }
    }

    fn apply(matrix: &Matrix3<f64>, v: &Vertex) -> Vertex {
        Vertex {
            position: matrix * v.position,
            color: v.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state, RotationState::default());

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-12);
        assert!((state.y - 0.2).abs() < 1e-12);
        assert!((state.z - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_matches_matrix() {
        let state = RotationState::new(0.8, 0.9, -0.4);
        let rotation = Transform::rotation(&state);
        assert!((rotation.matrix() - Transform::rotation_matrix(&state)).norm() < 1e-15);

        // Two multi-axis turns compose as a product, not as summed angles
        let twice = rotation * rotation;
        let summed = Transform::rotation_matrix(&RotationState::new(1.6, 1.8, -0.8));
        assert!((twice.matrix() - summed).norm() > 1e-3);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&RotationState::zero());
        assert!((matrix - Matrix3::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_matrix_is_orthonormal() {
        let matrix = Transform::rotation_matrix(&RotationState::new(0.3, -1.1, 2.4));
        assert!((matrix * matrix.transpose() - Matrix3::identity()).norm() < 1e-12);
        assert!((matrix.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_axis_rotations() {
        let v = Vertex::new(1.0, 0.0, 0.0);

        // Quarter turn about z sends +x to +y
        let r = Transform::rotate(&v, 0.0, 0.0, FRAC_PI_2);
        assert!(r.approx_eq(&Vertex::new(0.0, 1.0, 0.0), 1e-12));

        // Quarter turn about y sends +x to -z
        let r = Transform::rotate(&v, 0.0, FRAC_PI_2, 0.0);
        assert!(r.approx_eq(&Vertex::new(0.0, 0.0, -1.0), 1e-12));

        // Quarter turn about x sends +y to +z
        let r = Transform::rotate(&Vertex::new(0.0, 1.0, 0.0), FRAC_PI_2, 0.0, 0.0);
        assert!(r.approx_eq(&Vertex::new(0.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_composition_order_is_x_then_y_then_z() {
        let v = Vertex::new(0.0, 1.0, 0.0);
        let combined = Transform::rotate(&v, FRAC_PI_2, FRAC_PI_2, 0.0);

        let step = Transform::rotate(&v, FRAC_PI_2, 0.0, 0.0);
        let step = Transform::rotate(&step, 0.0, FRAC_PI_2, 0.0);
        assert!(combined.approx_eq(&step, 1e-12));
    }

    #[test]
    fn test_pivot_is_fixed_point() {
        let pivot = Vertex::new(3.0, -2.0, 7.5);
        for &(a, b, g) in &[(0.0, 0.0, 0.0), (0.4, 1.3, -2.2), (PI, PI / 3.0, 5.0)] {
            let r = Transform::rotate_about_pivot(&pivot, &pivot, a, b, g);
            assert!(r.approx_eq(&pivot, 1e-12));
        }
    }

    #[test]
    fn test_rotate_about_pivot_keeps_distance_and_color() {
        let pivot = Vertex::new(1.0, 1.0, 1.0);
        let v = Vertex::new(4.0, 5.0, 1.0).with_color(3);
        let r = Transform::rotate_about_pivot(&v, &pivot, 0.2, 0.7, -1.4);

        let before = (v.position - pivot.position).norm();
        let after = (r.position - pivot.position).norm();
        assert!((before - after).abs() < 1e-12);
        assert_eq!(r.color, 3);
    }
}
