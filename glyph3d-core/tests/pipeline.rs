use std::io;

use glyph3d_core::{
    Camera, DisplaySink, Frame, FrameBuffer, Geometry, Scene, SurfaceSize, Tessellation, Vertex,
};

const PLANE_FRAME: &str = concat!(
    "            $###    \n",
    "         $$$$  #    \n",
    "      $$$$     #    \n",
    "    @@@        #    \n",
    " @@@           #    \n",
    " @@@           #    \n",
    "    @@@        #    \n",
    "      $$$$     #    \n",
    "         $$$$  #    \n",
    "            $###    \n",
);

fn plane() -> Geometry {
    let a = Vertex::new(-10.0, 0.0, 3.0);
    Geometry::new(
        vec![a, Vertex::new(10.0, -10.0, 20.0), Vertex::new(10.0, 10.0, 20.0)],
        a,
    )
    .unwrap()
}

fn bar(z: f64, color: u8) -> Geometry {
    let start = Vertex::new(-1.0, 0.0, z);
    Geometry::line(start, Vertex::new(1.0, 0.0, z), start)
        .with_interval(0.5)
        .unwrap()
        .with_color(color)
}

struct Recorder {
    frames: Vec<Frame>,
}

impl DisplaySink for Recorder {
    fn flush(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

struct Fixed(usize, usize);

impl SurfaceSize for Fixed {
    fn surface_size(&self) -> io::Result<(usize, usize)> {
        Ok((self.0, self.1))
    }
}

#[test]
fn test_plane_wireframe_frame() {
    let mut scene = Scene::new();
    scene.push(plane());

    let mut buffer = FrameBuffer::new(20, 10);
    let frame = scene.render(&Camera::default(), &mut buffer).unwrap();
    assert_eq!(frame.to_text(), PLANE_FRAME);
}

#[test]
fn test_plane_edges_at_unit_interval() {
    let g = plane();
    let points = g.generate_edges(1.0).unwrap();
    assert_eq!(points.len(), 6);
    assert!(points
        .iter()
        .all(|p| g.vertices().iter().any(|v| v.position == p.position)));
}

#[test]
fn test_nearer_geometry_wins_in_either_order() {
    let camera = Camera::default();
    let expected = camera.get_illumination(10.0);

    for order in [[10.0, 30.0], [30.0, 10.0]] {
        let mut scene = Scene::new();
        for z in order {
            scene.push(bar(z, if z == 10.0 { 1 } else { 2 }));
        }

        let mut buffer = FrameBuffer::new(20, 10);
        let frame = scene.render(&camera, &mut buffer).unwrap();
        let cell = frame.get(10, 5).unwrap();
        assert_eq!(cell.color, 1);
        assert_eq!(cell.ch, expected);
        assert_eq!(buffer.depth_at(10, 5), Some(10.0));
    }
}

#[test]
fn test_equal_depth_keeps_first_geometry() {
    let mut scene = Scene::new();
    scene.push(bar(10.0, 1));
    scene.push(bar(10.0, 2));

    let mut buffer = FrameBuffer::new(20, 10);
    scene.render(&Camera::default(), &mut buffer).unwrap();
    assert_eq!(buffer.color_at(10, 5), 1);
}

#[test]
fn test_surface_mode_fills_interior() {
    let mut edges = Scene::new();
    edges.push(plane().with_interval(0.05).unwrap());
    let mut surfaces = Scene::new();
    surfaces.push(
        plane()
            .with_interval(0.05)
            .unwrap()
            .with_mode(Tessellation::Surfaces),
    );

    let camera = Camera::default();
    let mut buffer = FrameBuffer::new(20, 10);
    let count = |frame: &Frame| frame.cells().iter().filter(|c| c.ch != ' ').count();

    let outline = count(&edges.render(&camera, &mut buffer).unwrap());
    let filled = count(&surfaces.render(&camera, &mut buffer).unwrap());
    assert!(filled > outline);
}

#[test]
fn test_render_to_flushes_surface_sized_frames() {
    let mut scene = Scene::new();
    scene.push(plane());

    let camera = Camera::default();
    let mut buffer = FrameBuffer::new(1, 1);
    let mut sink = Recorder { frames: Vec::new() };

    scene
        .render_to(&camera, &mut buffer, &mut sink, &Fixed(20, 10))
        .unwrap();
    scene
        .render_to(&camera, &mut buffer, &mut sink, &Fixed(40, 20))
        .unwrap();

    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.frames[0].to_text(), PLANE_FRAME);
    assert_eq!((sink.frames[1].width(), sink.frames[1].height()), (40, 20));
}

#[test]
fn test_posed_frames_are_reproducible() {
    let mut scene = Scene::new();
    scene.push(plane().with_spin(glyph3d_core::RotationState::new(0.02, 0.03, 0.0)));

    let camera = Camera::default();
    let mut buffer = FrameBuffer::new(20, 10);

    scene.pose_for_frame(40);
    let first = scene.render(&camera, &mut buffer).unwrap();
    scene.pose_for_frame(7);
    scene.render(&camera, &mut buffer).unwrap();
    scene.pose_for_frame(40);
    let again = scene.render(&camera, &mut buffer).unwrap();

    assert_eq!(first, again);
}

#[test]
fn test_geometry_behind_camera_draws_nothing() {
    let mut scene = Scene::new();
    let a = Vertex::new(-5.0, 0.0, -1.0);
    scene.push(Geometry::line(a, Vertex::new(5.0, 0.0, -10.0), a));

    let mut buffer = FrameBuffer::new(20, 10);
    let stats = scene.rasterize(&Camera::default(), &mut buffer).unwrap();
    assert_eq!(stats.plotted, 0);
    assert_eq!(stats.discarded, stats.points);
}
