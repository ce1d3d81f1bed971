//! Disk Box headless runner
//!
//! Builds a world, drives it through the frame clock as a renderer would, and
//! reports statistics. Set `RUST_LOG=debug` for per-step contact counts.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use disk_box::consts::SIM_DT;
use disk_box::{FrameClock, World, WorldConfig, WorldPreset};

#[derive(Debug, Parser)]
#[command(name = "disk-box", about = "Run the 2D disk simulation without a window")]
struct Args {
    /// JSON world config (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in world setup: viewer or compact
    #[arg(long, default_value = "viewer")]
    preset: String,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to run
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Simulated wall time per frame (seconds)
    #[arg(long, default_value_t = SIM_DT)]
    frame_time: f32,

    /// Log a summary every N frames (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u32,

    /// Write the final positions here as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("disk-box: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> disk_box::Result<()> {
    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path)?,
        None => {
            let preset = WorldPreset::from_str(&args.preset).ok_or_else(|| {
                disk_box::Error::InvalidParam(format!("unknown preset '{}'", args.preset))
            })?;
            log::info!("Using {} preset", preset.as_str());
            WorldConfig::from_preset(preset)
        }
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut world = World::new(config)?;
    let mut clock = FrameClock::for_world(&world);
    let energy_start = world.kinetic_energy();

    for frame in 1..=args.frames {
        clock.advance(args.frame_time, &mut world);

        if args.report_every > 0 && frame % args.report_every == 0 {
            let stats = world.last_stats();
            log::info!(
                "Frame {frame}: tick {}, {} contacts, mean speed {:.2}, energy {:.1}",
                stats.tick,
                stats.contacts,
                world.mean_speed(),
                world.kinetic_energy()
            );
        }
    }

    println!(
        "{} particles, {} ticks, kinetic energy {:.1} -> {:.1}",
        world.len(),
        world.time_ticks(),
        energy_start,
        world.kinetic_energy()
    );

    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string(&world.snapshot())?;
        fs::write(path, json)?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
