/// Command line configuration
use anyhow::{ensure, Context, Result};
use clap::Parser;
use glyph3d_core::{
    projection::{DEFAULT_DOF, DEFAULT_MAX_DEPTH},
    Camera,
};
use nalgebra::Point3;
use std::path::PathBuf;
use std::time::Duration;

use crate::scenes::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "glyph3d", version, about = "Render spinning 3D primitives as characters")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Plane)]
    pub scene: SceneKind,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 33)]
    pub frame_ms: u64,

    /// Stop after this many frames instead of running until interrupted
    #[arg(long)]
    pub frames: Option<u64>,

    /// Distance from the camera to the projection plane
    #[arg(long, default_value_t = DEFAULT_DOF)]
    pub dof: f64,

    /// Depth at which the illumination ramp runs out
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: f64,

    /// Camera position along z
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub camera_z: f64,

    /// Tessellation interval for every geometry, in (0, 1]
    #[arg(long)]
    pub interval: Option<f64>,

    /// Illumination characters from sparse to dense
    #[arg(long)]
    pub ramp: Option<String>,

    /// Render on a separate thread and hand complete frames to the display
    #[arg(long)]
    pub pipelined: bool,

    /// Append-only diagnostic log
    #[arg(long, default_value = "glyph3d.log")]
    pub log_file: PathBuf,

    /// Minimum log level, ignored when RUST_LOG is set
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

/// Settings for the frame loop
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scene: SceneKind,
    pub frame_time: Duration,
    pub frames: Option<u64>,
    pub interval: Option<f64>,
    pub pipelined: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Plane,
            frame_time: Duration::from_millis(33),
            frames: None,
            interval: None,
            pipelined: false,
        }
    }
}

impl Args {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            scene: self.scene,
            frame_time: Duration::from_millis(self.frame_ms),
            frames: self.frames,
            interval: self.interval,
            pipelined: self.pipelined,
        }
    }

    pub fn camera(&self) -> Result<Camera> {
        ensure!(self.dof > 0.0, "--dof must be positive, got {}", self.dof);
        ensure!(
            self.max_depth > 0.0,
            "--max-depth must be positive, got {}",
            self.max_depth
        );

        let camera = Camera::new(Point3::new(0.0, 0.0, self.camera_z), self.dof, self.max_depth);
        match &self.ramp {
            Some(ramp) => camera.with_ramp(ramp).context("invalid --ramp"),
            None => Ok(camera),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["glyph3d"]).unwrap();
        assert_eq!(args.scene, SceneKind::Plane);
        assert_eq!(args.log_level, tracing::Level::INFO);

        let config = args.app_config();
        assert_eq!(config.frame_time, Duration::from_millis(33));
        assert!(config.frames.is_none());
        assert!(!config.pipelined);

        let camera = args.camera().unwrap();
        assert_eq!(camera.dof(), 20.0);
        assert_eq!(camera.max_depth(), 100.0);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "glyph3d",
            "--scene",
            "cube",
            "--frames",
            "10",
            "--camera-z",
            "-15",
            "--ramp",
            ".oO",
            "--pipelined",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, SceneKind::Cube);
        assert_eq!(args.app_config().frames, Some(10));
        assert!(args.pipelined);
        assert_eq!(args.log_level, tracing::Level::DEBUG);

        let camera = args.camera().unwrap();
        assert_eq!(camera.position().z, -15.0);
        assert_eq!(camera.ramp(), &['.', 'o', 'O']);
    }

    #[test]
    fn test_invalid_camera() {
        let args = Args::try_parse_from(["glyph3d", "--dof", "0"]).unwrap();
        assert!(args.camera().is_err());

        let args = Args::try_parse_from(["glyph3d", "--ramp", ""]).unwrap();
        assert!(args.camera().is_err());
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Args::try_parse_from(["glyph3d", "--scene", "teapot"]).is_err());
    }
}
