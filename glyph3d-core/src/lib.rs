/// glyph3d Core Library - point-cloud rendering of 3D primitives to character grids
///
/// This library provides the terminal-independent pipeline: vertex algebra,
/// rigid rotation, tessellation of geometry into points, perspective
/// projection, and depth-tested rasterization into a character frame.

pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod handoff;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod vertex;

// Re-export commonly used types
pub use error::{GeometryError, RenderError};
pub use framebuffer::{Cell, Frame, FrameBuffer};
pub use geometry::{Geometry, Tessellation};
pub use handoff::{frame_slot, FramePublisher, FrameReceiver};
pub use projection::Camera;
pub use scene::{DisplaySink, RasterStats, Scene, SurfaceSize};
pub use transform::{RotationState, Transform};
pub use vertex::{ColorTag, Vertex};
