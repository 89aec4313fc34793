/// rast3d - Rotating triangle through a software rasterizer
///
/// Batch:       rast3d -r <angle> <output.png>
/// Interactive: rast3d            (a/d rotate by 10 degrees, Esc quits)

use anyhow::Context;
use clap::Parser;
use rast3d_core::{stl, Mesh};
use rast3d_terminal::{cli::DEFAULT_OUTPUT, run_batch, Cli, ParseError, Pipeline, RunMode, TerminalApp};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let parsed = match cli.into_parsed() {
        Ok(parsed) => parsed,
        Err(ParseError::MissingOutput { angle_deg }) => {
            // Nothing to render; report the usage and leave successfully.
            log::warn!("no output file given for angle {}", angle_deg);
            eprintln!("usage: rast3d -r <angle> <output>  (e.g. rast3d -r {angle_deg} {DEFAULT_OUTPUT})");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mesh = match &parsed.mesh {
        Some(path) => stl::load_stl(path)
            .with_context(|| format!("failed to load mesh {}", path.display()))?,
        None => Mesh::default_triangle(),
    };

    let mut pipeline = Pipeline::new(&parsed.config, mesh)?;

    match parsed.mode {
        RunMode::Batch { angle_deg, output } => {
            log::info!("Rendering single frame at {} degrees", angle_deg);
            run_batch(&mut pipeline, angle_deg, &output)
        }
        RunMode::Interactive => {
            log::info!("Starting interactive renderer (Esc to quit)");
            let mut app = TerminalApp::new(pipeline).context("failed to query terminal size")?;
            app.run()
        }
    }
}
