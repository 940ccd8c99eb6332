/// Scene rasterizer: tessellate, project, depth-test and flush
use std::io;

use tracing::trace;

use crate::error::RenderResult;
use crate::framebuffer::{Frame, FrameBuffer};
use crate::geometry::Geometry;
use crate::projection::Camera;

/// Where finished frames go
pub trait DisplaySink {
    fn flush(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Source of the current output surface size in cells
pub trait SurfaceSize {
    fn surface_size(&self) -> io::Result<(usize, usize)>;
}

/// Point counts for a single rasterization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Points produced by tessellation
    pub points: usize,
    /// Points that won their depth test
    pub plotted: usize,
    /// Points behind the camera or off screen
    pub discarded: usize,
}

/// Ordered list of geometries rendered together
#[derive(Debug, Clone, Default)]
pub struct Scene {
    geometries: Vec<Geometry>,
}

/// Screen cell for a projected point, `None` when it falls outside.
///
/// Rows grow downwards while world +y points up, hence the negated y.
fn to_pixel(x: f64, y: f64, width: usize, height: usize) -> Option<(usize, usize)> {
    let px = (x + (width / 2) as f64).floor();
    let py = (-y + (height / 2) as f64).floor();

    // Comparisons are false for NaN, which drops it as well
    if px >= 0.0 && py >= 0.0 && px < width as f64 && py < height as f64 {
        Some((px as usize, py as usize))
    } else {
        None
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            geometries: Vec::new(),
        }
    }

    pub fn push(&mut self, geometry: Geometry) {
        self.geometries.push(geometry);
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn geometries_mut(&mut self) -> &mut [Geometry] {
        &mut self.geometries
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Step every geometry by its spin
    pub fn advance(&mut self) {
        for geometry in &mut self.geometries {
            geometry.advance();
        }
    }

    /// Pose every geometry for frame `frame`
    pub fn pose_for_frame(&mut self, frame: u64) {
        for geometry in &mut self.geometries {
            geometry.pose_for_frame(frame);
        }
    }

    /// Depth-test every tessellated point of the scene into `buffer`.
    ///
    /// The buffer is cleared first; whatever it held is discarded.
    pub fn rasterize(&self, camera: &Camera, buffer: &mut FrameBuffer) -> RenderResult<RasterStats> {
        buffer.clear();
        let (width, height) = (buffer.width(), buffer.height());
        let mut stats = RasterStats::default();

        for geometry in &self.geometries {
            let points = geometry.tessellate()?;
            stats.points += points.len();

            for point in &points {
                let projected = camera.project(point);
                match to_pixel(projected.x(), projected.y(), width, height) {
                    Some((x, y)) => {
                        if buffer.plot(x, y, projected.z(), projected.color) {
                            stats.plotted += 1;
                        }
                    }
                    None => stats.discarded += 1,
                }
            }
        }

        trace!(
            points = stats.points,
            plotted = stats.plotted,
            discarded = stats.discarded,
            "rasterized scene"
        );
        Ok(stats)
    }

    /// Rasterize and resolve into a finished frame
    pub fn render(&self, camera: &Camera, buffer: &mut FrameBuffer) -> RenderResult<Frame> {
        self.rasterize(camera, buffer)?;
        Ok(buffer.resolve(camera))
    }

    /// Size `buffer` to the surface, render, and flush to `sink`
    pub fn render_to<D, S>(
        &self,
        camera: &Camera,
        buffer: &mut FrameBuffer,
        sink: &mut D,
        surface: &S,
    ) -> RenderResult<RasterStats>
    where
        D: DisplaySink + ?Sized,
        S: SurfaceSize + ?Sized,
    {
        let (width, height) = surface.surface_size()?;
        if buffer.resize(width, height) {
            trace!(width, height, "frame buffer resized");
        }

        let stats = self.rasterize(camera, buffer)?;
        sink.flush(&buffer.resolve(camera))?;
        Ok(stats)
    }
}
