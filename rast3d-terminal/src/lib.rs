/// rast3d terminal front end: batch rendering and the interactive loop
use std::io::{self, stdout, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};

pub mod cli;
pub mod pipeline;
pub mod renderer;

pub use cli::{Cli, ParseError, ParsedArgs, RunMode};
pub use pipeline::{Command, FrameState, Pipeline, PipelineError};
pub use renderer::AsciiRenderer;

/// How long each frame waits for a key press
const KEY_WAIT: Duration = Duration::from_millis(10);

/// Render one frame at `angle_deg` and write it to `output`.
pub fn run_batch(pipeline: &mut Pipeline, angle_deg: f32, output: &Path) -> anyhow::Result<()> {
    let state = FrameState::new(angle_deg);
    let rasterizer = pipeline
        .render(&state)
        .with_context(|| format!("failed to render frame at {angle_deg} degrees"))?;
    rasterizer
        .save_png(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

/// Interactive terminal session
pub struct TerminalApp {
    pipeline: Pipeline,
    state: FrameState,
    renderer: AsciiRenderer,
    running: bool,
}

impl TerminalApp {
    pub fn new(pipeline: Pipeline) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            pipeline,
            state: FrameState::default(),
            renderer: AsciiRenderer::new(cols as usize, rows.saturating_sub(1) as usize),
            running: true,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        while self.running {
            self.render()?;

            log::debug!("frame count: {}", self.state.frame_count);
            self.state.frame_count += 1;

            if event::poll(KEY_WAIT)? {
                self.handle_input()?;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
            if kind == KeyEventKind::Release {
                return Ok(());
            }
            if let Some(command) = Command::from_key(code) {
                self.running = self.state.apply(command);
                log::debug!("{:?} -> angle {}", command, self.state.angle_deg);
            }
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.renderer
            .resize(cols as usize, rows.saturating_sub(1) as usize);

        let rasterizer = self.pipeline.render(&self.state)?;
        self.renderer.rasterize_frame(
            rasterizer.frame_buffer(),
            rasterizer.width(),
            rasterizer.height(),
        );

        // Output to terminal
        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "rast3d | angle: {:.0} deg | frame: {} | a/d=Rotate Esc=Quit",
                self.state.angle_deg, self.state.frame_count
            )),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;

        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}
