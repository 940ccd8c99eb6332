/// glyph3d - spinning 3D primitives drawn as terminal characters
///
/// Controls:
///   - Q / Esc / Ctrl-C: Quit
use anyhow::{Context, Result};
use clap::Parser;
use glyph3d_terminal::{logging, scenes, Args, RunOutcome, TerminalApp};
use std::process::ExitCode;
use tracing::{error, info};

fn run(args: &Args) -> Result<RunOutcome> {
    let camera = args.camera()?;
    let config = args.app_config();
    let scene = scenes::build(config.scene, config.interval)
        .with_context(|| format!("failed to build scene {:?}", config.scene))?;

    let mut app = TerminalApp::new(scene, camera, config);
    app.run()
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(&args.log_file, args.log_level) {
        eprintln!("glyph3d: {e:#}");
        return ExitCode::FAILURE;
    }
    info!(version = env!("CARGO_PKG_VERSION"), ?args, "starting glyph3d");

    match run(&args) {
        Ok(RunOutcome::Interrupted { frames }) => {
            info!(frames, "interrupted, shutting down");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Completed { frames }) => {
            info!(frames, "all frames rendered");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("render loop failed: {e:?}");
            eprintln!("glyph3d: {e:#}");
            ExitCode::FAILURE
        }
    }
}
