//! psxmodel: PS1 mesh exporter and wireframe previewer
//!
//! `export` turns a Wavefront OBJ into C source arrays (deduplicated
//! fixed-point tables plus per-face index quads) ready for the GTE.
//! `preview` reads such a file back and spins it as a wireframe.

mod config;
mod export;
mod format;
mod mesh;
mod preview;
mod projection;

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use export::{Exporter, ScaleMode, UvSpace, WindingPolicy};
use format::{load_model, ModelFileError};
use mesh::ObjImporter;

#[derive(Parser)]
#[command(name = "psxmodel")]
#[command(about = "PS1 mesh exporter and wireframe previewer")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an OBJ mesh as PS1 model arrays
    Export {
        /// Input OBJ file
        input: PathBuf,

        /// Output .c file (defaults to the input path with a .c extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model identifier used as the array name prefix
        #[arg(long)]
        name: Option<String>,

        /// Scale factor (units per authoring unit, or a multiplier when normalizing)
        #[arg(long)]
        scale: Option<f32>,

        /// Scaling mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Emit one face per polygon or a front/back pair
        #[arg(long, value_enum)]
        winding: Option<WindingArg>,

        /// Input file is Y-up and needs converting to Z-up
        #[arg(long)]
        y_up: bool,

        /// Write texel coordinates for a WIDTHxHEIGHT texture page
        #[arg(long, value_name = "WxH", value_parser = parse_texture_size)]
        uv_pixels: Option<(u32, u32)>,
    },

    /// Preview an exported model as a rotating wireframe
    Preview {
        /// Model identifier (file name without extension)
        model_id: String,

        /// Directory holding the model folder
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Fixed,
    Normalize,
}

impl From<ModeArg> for ScaleMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fixed => ScaleMode::Fixed,
            ModeArg::Normalize => ScaleMode::NormalizeToBounds,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WindingArg {
    Single,
    Dual,
}

impl From<WindingArg> for WindingPolicy {
    fn from(winding: WindingArg) -> Self {
        match winding {
            WindingArg::Single => WindingPolicy::Single,
            WindingArg::Dual => WindingPolicy::DualSided,
        }
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `256x256`
fn parse_texture_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width '{}'", w))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height '{}'", h))?;
    if w == 0 || h == 0 {
        return Err("texture size must be non-zero".to_string());
    }
    Ok((w, h))
}

/// Model id from the output file name
fn default_model_name(output: &Path) -> Option<String> {
    output.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

fn main() -> Result<()> {
    // Initialize crash logging FIRST (before any other code)
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Export {
            input,
            output,
            name,
            scale,
            mode,
            winding,
            y_up,
            uv_pixels,
        } => {
            let mut settings = config.export;
            if let Some(scale) = scale {
                settings.scale_factor = scale;
            }
            if let Some(mode) = mode {
                settings.scale_mode = mode.into();
            }
            if let Some(winding) = winding {
                settings.winding = winding.into();
            }
            if let Some((width, height)) = uv_pixels {
                settings.uv_space = UvSpace::Pixels { width, height };
            }

            let output = output.unwrap_or_else(|| input.with_extension(format::MODEL_EXT));
            let name = match name {
                Some(name) => name,
                None => default_model_name(&output)
                    .with_context(|| format!("cannot derive a model name from {:?}", output))?,
            };
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let mesh = ObjImporter::new(y_up)
                .load_from_file(&input)
                .with_context(|| format!("failed to read {:?}", input))?;
            let model = Exporter::new(settings)
                .export_to_file(&mesh, &output, &name)
                .with_context(|| format!("failed to export {:?}", input))?;

            tracing::info!(
                "Done! {} verts, {} normals, {} uvs, {} faces",
                model.vertices.len(),
                model.normals.len(),
                model.uvs.len(),
                model.face_count()
            );
        }

        Commands::Preview { model_id, base_dir } => {
            let settings = config.preview;
            let parsed = match load_model(&base_dir, &settings.model_dir, &model_id) {
                Ok(parsed) => parsed,
                Err(ModelFileError::NotFound(path)) => {
                    tracing::error!("Could not find {:?}", path);
                    return Ok(());
                }
                Err(e) => return Err(e).context("failed to load model"),
            };

            macroquad::Window::from_config(
                preview::window_conf(&model_id, &settings),
                preview::run(parsed, settings),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_texture_size() {
        assert_eq!(parse_texture_size("256x128"), Ok((256, 128)));
        assert_eq!(parse_texture_size("64X64"), Ok((64, 64)));
        assert!(parse_texture_size("256").is_err());
        assert!(parse_texture_size("0x64").is_err());
        assert!(parse_texture_size("ax64").is_err());
    }

    #[test]
    fn test_default_model_name() {
        assert_eq!(default_model_name(Path::new("out/cube.c")), Some("cube".to_string()));
    }

    #[test]
    fn test_cli_parses_export_flags() {
        let cli = Cli::try_parse_from([
            "psxmodel", "export", "cube.obj", "--mode", "normalize", "--winding", "dual",
            "--uv-pixels", "128x64", "--y-up",
        ])
        .unwrap();
        match cli.command {
            Commands::Export { input, mode, winding, uv_pixels, y_up, .. } => {
                assert_eq!(input, PathBuf::from("cube.obj"));
                assert!(matches!(mode, Some(ModeArg::Normalize)));
                assert!(matches!(winding, Some(WindingArg::Dual)));
                assert_eq!(uv_pixels, Some((128, 64)));
                assert!(y_up);
            }
            Commands::Preview { .. } => panic!("expected export"),
        }
    }
}
