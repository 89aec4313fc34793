/// CLI argument definitions for rast3d
use std::num::ParseFloatError;
use std::path::PathBuf;

use clap::Parser;
use rast3d_core::{ConfigError, RenderConfig};
use thiserror::Error;

pub const DEFAULT_OUTPUT: &str = "output.png";

#[derive(Parser, Debug)]
#[command(name = "rast3d")]
#[command(about = "Rotate a triangle mesh through a software rasterizer")]
#[command(after_help = "Without -r the frame is shown in the terminal: \
    `a`/`d` rotate by +/-10 degrees, Esc quits.\n\
    Batch example: rast3d -r 20 output.png")]
#[command(version)]
pub struct Cli {
    /// Render a single frame at this angle (degrees) instead of running interactively
    #[arg(short = 'r', long = "rotate", value_name = "ANGLE", allow_hyphen_values = true)]
    pub angle: Option<String>,

    /// Image written in batch mode
    #[arg(value_name = "OUTPUT", requires = "angle")]
    pub output: Option<PathBuf>,

    /// Rotate about this axis instead of +Z, e.g. `--axis 1,1,0`
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_axis, allow_hyphen_values = true)]
    pub axis: Option<[f32; 3]>,

    /// STL mesh to render instead of the built-in triangle
    #[arg(long, value_name = "FILE")]
    pub mesh: Option<PathBuf>,

    /// TOML render configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fill triangles instead of drawing their outlines
    #[arg(long)]
    pub fill: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Interactive,
    Batch { angle_deg: f32, output: PathBuf },
}

/// Fully resolved command line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    pub mode: RunMode,
    pub config: RenderConfig,
    pub mesh: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid angle `{value}`")]
    InvalidAngle {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// An angle without an output file renders nothing.
    #[error("angle {angle_deg} given without an output file; try `rast3d -r {angle_deg} output.png`")]
    MissingOutput { angle_deg: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn parse_axis(value: &str) -> Result<[f32; 3], String> {
    let components = value
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid axis component: {e}"))?;
    match components[..] {
        [x, y, z] => Ok([x, y, z]),
        _ => Err(format!("expected 3 components, got {}", components.len())),
    }
}

impl Cli {
    /// Resolve run mode and configuration. File values are loaded first and
    /// then overridden by flags.
    pub fn into_parsed(self) -> Result<ParsedArgs, ParseError> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if self.axis.is_some() {
            config.rotation_axis = self.axis;
        }
        config.fill |= self.fill;
        config.validate()?;

        let mode = match self.angle {
            None => RunMode::Interactive,
            Some(value) => {
                let angle_deg = value
                    .trim()
                    .parse::<f32>()
                    .map_err(|source| ParseError::InvalidAngle {
                        value: value.clone(),
                        source,
                    })?;
                match self.output {
                    Some(output) => RunMode::Batch { angle_deg, output },
                    None => return Err(ParseError::MissingOutput { angle_deg }),
                }
            }
        };

        Ok(ParsedArgs {
            mode,
            config,
            mesh: self.mesh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArgs, ParseError> {
        let cli = Cli::try_parse_from(std::iter::once("rast3d").chain(args.iter().copied()))
            .expect("clap rejected arguments");
        cli.into_parsed()
    }

    #[test]
    fn test_no_arguments_is_interactive() {
        let parsed = parse(&[]).unwrap();
        assert_eq!(parsed.mode, RunMode::Interactive);
        assert_eq!(parsed.config, RenderConfig::default());
        assert_eq!(parsed.mesh, None);
    }

    #[test]
    fn test_batch_mode() {
        let parsed = parse(&["-r", "20", "frame.png"]).unwrap();
        assert_eq!(
            parsed.mode,
            RunMode::Batch {
                angle_deg: 20.0,
                output: PathBuf::from("frame.png")
            }
        );
    }

    #[test]
    fn test_negative_angle() {
        let parsed = parse(&["-r", "-45.5", "out.png"]).unwrap();
        assert!(matches!(parsed.mode, RunMode::Batch { angle_deg, .. } if angle_deg == -45.5));
    }

    #[test]
    fn test_angle_without_output() {
        let err = parse(&["-r", "20"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingOutput { angle_deg } if angle_deg == 20.0));
    }

    #[test]
    fn test_malformed_angle() {
        let err = parse(&["-r", "twenty", "out.png"]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAngle { ref value, .. } if value == "twenty"));
    }

    #[test]
    fn test_output_without_angle_rejected() {
        let result = Cli::try_parse_from(["rast3d", "out.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_angle_needs_rotate_flag() {
        assert!(Cli::try_parse_from(["rast3d", "-r", "20", "out.png"]).is_ok());
        assert!(Cli::try_parse_from(["rast3d", "--rotate", "20", "out.png"]).is_ok());
        assert!(Cli::try_parse_from(["rast3d", "x", "20", "out.png"]).is_err());
        assert!(Cli::try_parse_from(["rast3d", "20", "out.png"]).is_err());
    }

    #[test]
    fn test_axis_and_fill_override() {
        let parsed = parse(&["--axis", "1,-1,0", "--fill", "-r", "60", "a.png"]).unwrap();
        assert_eq!(parsed.config.rotation_axis, Some([1.0, -1.0, 0.0]));
        assert!(parsed.config.fill);
    }

    #[test]
    fn test_axis_requires_three_components() {
        let result = Cli::try_parse_from(["rast3d", "--axis", "1,2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");
        std::fs::write(&path, "fov_deg = 60.0\nrotation_axis = [0.0, 1.0, 0.0]\n").unwrap();

        let path_arg = path.to_str().unwrap();
        let parsed = parse(&["--config", path_arg, "--axis", "1,0,0"]).unwrap();
        assert_eq!(parsed.config.fov_deg, 60.0);
        assert_eq!(parsed.config.rotation_axis, Some([1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_missing_config_file() {
        let err = parse(&["--config", "/nonexistent/rast3d.toml"]).unwrap_err();
        assert!(matches!(err, ParseError::Config(ConfigError::Io(_))));
    }
}
