/// Built-in demo scenes
use clap::ValueEnum;
use crossterm::style::Color;
use glyph3d_core::{
    error::GeometryResult, ColorTag, Geometry, RotationState, Scene, Tessellation, Vertex,
};

pub const CYAN: ColorTag = 1;
pub const YELLOW: ColorTag = 2;
pub const MAGENTA: ColorTag = 3;
pub const GREEN: ColorTag = 4;

/// Colour registered with the display for each tag used below
pub const PALETTE: &[(ColorTag, Color)] = &[
    (CYAN, Color::Cyan),
    (YELLOW, Color::Yellow),
    (MAGENTA, Color::Magenta),
    (GREEN, Color::Green),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Wireframe triangle spinning about one corner
    Plane,
    /// A single segment sweeping around its start point
    Line,
    /// Solid tetrahedron sampled over its faces
    Tetra,
    /// Wireframe cube built from twelve lines sharing one pivot
    Cube,
}

fn centroid(vertices: &[Vertex]) -> Vertex {
    let sum = vertices
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.position);
    Vertex::from_vector(sum / vertices.len() as f64)
}

fn plane() -> GeometryResult<Vec<Geometry>> {
    let corner = Vertex::new(-10.0, 0.0, 3.0);
    let plane = Geometry::new(
        vec![
            corner,
            Vertex::new(10.0, -10.0, 20.0),
            Vertex::new(10.0, 10.0, 20.0),
        ],
        corner,
    )?
    .with_color(CYAN)
    .with_spin(RotationState::new(0.0, 0.0, 0.04));
    Ok(vec![plane])
}

fn line() -> GeometryResult<Vec<Geometry>> {
    let start = Vertex::new(0.0, 0.0, 5.0);
    let line = Geometry::line(start, Vertex::new(40.0, 0.0, 60.0), start)
        .with_color(YELLOW)
        .with_spin(RotationState::new(0.0, 0.0, 0.05));
    Ok(vec![line])
}

fn tetra() -> GeometryResult<Vec<Geometry>> {
    let vertices = vec![
        Vertex::new(0.0, 10.0, 30.0),
        Vertex::new(-10.0, -6.0, 24.0),
        Vertex::new(10.0, -6.0, 24.0),
        Vertex::new(0.0, -6.0, 40.0),
    ];
    let pivot = centroid(&vertices);
    let tetra = Geometry::new(vertices, pivot)?
        .with_mode(Tessellation::Surfaces)
        .with_interval(0.04)?
        .with_color(MAGENTA)
        .with_spin(RotationState::new(0.03, 0.05, 0.01));
    Ok(vec![tetra])
}

fn cube() -> GeometryResult<Vec<Geometry>> {
    let half = 8.0;
    let center = Vertex::new(0.0, 0.0, 35.0);
    let corner = |i: usize| {
        let sign = |bit: usize| if i & bit == 0 { -half } else { half };
        Vertex::new(sign(1), sign(2), center.z() + sign(4))
    };

    let spin = RotationState::new(0.02, 0.035, 0.0);
    let mut edges = Vec::with_capacity(12);
    for a in 0..8usize {
        for bit in [1, 2, 4] {
            // Corners one bit apart share an edge; emit each once
            if a & bit == 0 {
                edges.push(
                    Geometry::line(corner(a), corner(a | bit), center)
                        .with_color(GREEN)
                        .with_spin(spin),
                );
            }
        }
    }
    Ok(edges)
}

/// Build a scene, overriding every geometry's interval when `interval` is set
pub fn build(kind: SceneKind, interval: Option<f64>) -> GeometryResult<Scene> {
    let geometries = match kind {
        SceneKind::Plane => plane()?,
        SceneKind::Line => line()?,
        SceneKind::Tetra => tetra()?,
        SceneKind::Cube => cube()?,
    };

    let mut scene = Scene::new();
    for geometry in geometries {
        let geometry = match interval {
            Some(interval) => geometry.with_interval(interval)?,
            None => geometry,
        };
        scene.push(geometry);
    }
    Ok(scene)
}
