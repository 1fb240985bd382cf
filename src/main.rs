use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use nalgebra::Vector3;
use pathtracer::{Camera, Engine, FrameBuffer, RenderSettings};
use rand::Rng;

#[cfg(feature = "preview")]
mod preview;
mod scenes;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    /// A few spheres of each material on a ground sphere
    Spheres,
    /// A random lattice of small spheres
    Grid,
}

#[derive(Parser, Debug)]
#[command(name = "pathtracer", about = "Progressive Monte Carlo path tracer")]
struct Args {
    #[arg(long, default_value_t = 640)]
    width: usize,
    #[arg(long, default_value_t = 360)]
    height: usize,
    /// Samples per pixel
    #[arg(short, long, default_value_t = 32)]
    samples: usize,
    /// Bounces a path may take after the first hit
    #[arg(short, long, default_value_t = 8)]
    bounces: usize,
    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f64,
    /// Camera position as x,y,z
    #[arg(long, value_parser = parse_vector, default_value = "-2,0,0", allow_hyphen_values = true)]
    position: Vector3<f64>,
    /// Look direction as x,y,z
    #[arg(long, value_parser = parse_vector, default_value = "1,0,0", allow_hyphen_values = true)]
    look: Vector3<f64>,
    #[arg(long, value_enum, default_value_t = SceneKind::Spheres)]
    scene: SceneKind,
    /// Random seed, drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads, 0 for one per core
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
    /// Show the image in a window while it renders
    #[cfg(feature = "preview")]
    #[arg(long)]
    preview: bool,
}

fn parse_vector(s: &str) -> Result<Vector3<f64>, String> {
    let components = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("{c:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match components.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected 3 comma separated numbers, got {}", components.len())),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = match args.seed {
        Some(seed) => seed,
        None => {
            let mut rng = rand::rngs::OsRng;
            rng.gen()
        }
    };
    let settings = RenderSettings {
        width: args.width,
        height: args.height,
        samples: args.samples,
        max_bounces: args.bounces,
        seed,
        threads: args.threads,
    };
    settings.validate()?;

    let camera = Camera::new(args.position, args.look, settings.aspect_ratio(), args.fov)?;
    let scene = match args.scene {
        SceneKind::Spheres => scenes::spheres(),
        SceneKind::Grid => scenes::grid(seed),
    };
    info!("scene {:?} with seed {seed}", args.scene);

    let engine = Engine::new(&camera, &scene, settings)?;
    let mut buffer = engine.frame_buffer();
    render(&engine, &mut buffer, &args)?;
    save(&buffer, &args.output)
}

#[cfg(feature = "preview")]
fn render(engine: &Engine<'_>, buffer: &mut FrameBuffer, args: &Args) -> anyhow::Result<()> {
    if args.preview {
        preview::run(engine, buffer)
    } else {
        engine.trace(buffer)?;
        Ok(())
    }
}

#[cfg(not(feature = "preview"))]
fn render(engine: &Engine<'_>, buffer: &mut FrameBuffer, _args: &Args) -> anyhow::Result<()> {
    engine.trace(buffer)?;
    Ok(())
}

fn save(buffer: &FrameBuffer, path: &Path) -> anyhow::Result<()> {
    let width = u32::try_from(buffer.width())?;
    let height = u32::try_from(buffer.height())?;
    let image = image::RgbaImage::from_raw(width, height, buffer.to_rgba8())
        .context("frame buffer does not match image size")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vector("-2, 0,1.5"), Ok(Vector3::new(-2.0, 0.0, 1.5)));
        assert!(parse_vector("1,2").is_err());
        assert!(parse_vector("1,a,2").is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
