/// Per-frame driver: composes the three transforms and runs the rasterizer
use crossterm::event::KeyCode;
use rast3d_core::angle::ANGLE_STEP_DEG;
use rast3d_core::{Camera, Mesh, RenderConfig, RotationMode, TransformError};
use rast3d_raster::{Buffers, IndBufId, PosBufId, Primitive, RasterError, Rasterizer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// State carried from one frame to the next. Owned by the driver; the
/// transform builders only ever see its values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    pub angle_deg: f32,
    pub frame_count: u64,
}

/// Input commands understood by the interactive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `a`: +10 degrees
    RotateCounterClockwise,
    /// `d`: -10 degrees
    RotateClockwise,
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('a') => Some(Command::RotateCounterClockwise),
            KeyCode::Char('d') => Some(Command::RotateClockwise),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

impl FrameState {
    pub fn new(angle_deg: f32) -> Self {
        Self {
            angle_deg,
            frame_count: 0,
        }
    }

    /// Apply `command`, returning `false` once the loop should stop.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::RotateCounterClockwise => self.angle_deg += ANGLE_STEP_DEG,
            Command::RotateClockwise => self.angle_deg -= ANGLE_STEP_DEG,
            Command::Quit => return false,
        }
        true
    }
}

pub struct Pipeline {
    rasterizer: Rasterizer,
    pos_id: PosBufId,
    ind_id: IndBufId,
    camera: Camera,
    rotation: RotationMode,
    primitive: Primitive,
}

impl Pipeline {
    /// Load `mesh` and check that the configured transforms can be built.
    pub fn new(config: &RenderConfig, mesh: Mesh) -> Result<Self, PipelineError> {
        let camera = config.camera();
        let rotation = config.rotation_mode();
        rotation.model_matrix(0.0)?;
        camera.projection_matrix()?;

        let mut rasterizer = Rasterizer::new(config.width as usize, config.height as usize);
        rasterizer.set_depth_range(camera.z_near, camera.z_far);
        let pos_id = rasterizer.load_positions(mesh.positions);
        let ind_id = rasterizer.load_indices(mesh.indices);

        let primitive = if config.fill {
            Primitive::FilledTriangle
        } else {
            Primitive::Triangle
        };
        log::debug!(
            "pipeline ready: {}x{}, {:?}, {:?}",
            config.width,
            config.height,
            rotation,
            primitive
        );

        Ok(Self {
            rasterizer,
            pos_id,
            ind_id,
            camera,
            rotation,
            primitive,
        })
    }

    /// Render one frame for `state` and return the rasterizer holding it.
    pub fn render(&mut self, state: &FrameState) -> Result<&Rasterizer, PipelineError> {
        let model = self.rotation.model_matrix(state.angle_deg)?;
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix()?;

        let r = &mut self.rasterizer;
        r.clear(Buffers::COLOR | Buffers::DEPTH);
        r.set_model(model);
        r.set_view(view);
        r.set_projection(projection);
        r.draw(self.pos_id, self.ind_id, self.primitive)?;

        Ok(&self.rasterizer)
    }
}
