use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hovercraft::{FrameInput, GameConfig, Simulation};
use hovercraft_physics::ThrustInput;
use hovercraft_world::{Terrain, FACES_PER_CELL, VERTICES_PER_CELL};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hovercraft")]
#[command(about = "Hovercraft physics simulation over procedural terrain", long_about = None)]
struct Cli {
    /// Config file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation headless for a number of frames
    Run {
        /// Frames to simulate
        #[arg(short, long, default_value_t = 600)]
        frames: u32,

        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Hold forward thrust
        #[arg(long)]
        forward: bool,

        /// Hold reverse thrust
        #[arg(long)]
        reverse: bool,

        /// Hold left turn
        #[arg(long)]
        left: bool,

        /// Hold right turn
        #[arg(long)]
        right: bool,
    },
    /// Generate the terrain and print its statistics
    Terrain,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };

    match cli.command {
        Commands::Run {
            frames,
            dt,
            forward,
            reverse,
            left,
            right,
        } => {
            let thrust = ThrustInput {
                forward,
                reverse,
                left,
                right,
            };
            run(config, frames, dt, thrust)?;
        }
        Commands::Terrain => terrain(config)?,
    }

    Ok(())
}

fn run(config: GameConfig, frames: u32, dt: f32, thrust: ThrustInput) -> Result<()> {
    let mut simulation = Simulation::new(config)?;
    let input = FrameInput::with_thrust(thrust);
    let start = simulation.vehicle().position();

    for _ in 0..frames {
        simulation.frame(dt, &input);
    }

    let vehicle = simulation.vehicle();
    let position = vehicle.position();
    println!("Frames:            {}", simulation.frame_count());
    println!(
        "Position:          ({:.2}, {:.2}, {:.2})",
        position.x, position.y, position.z
    );
    println!("Distance covered:  {:.2}", position.distance(start));
    println!("Speed:             {:.2}", vehicle.velocity().length());
    println!("On ground:         {}", vehicle.is_on_ground());
    println!(
        "Visible cells:     {}",
        simulation.terrain().visible_cell_count()
    );
    println!(
        "Shadow vertices:   {}",
        simulation.hull().shadow_volume().vertex_count()
    );
    println!(
        "Engine:            {} Hz, {} mB",
        simulation.engine_sound().frequency(),
        simulation.engine_sound().volume_millibels()
    );
    Ok(())
}

fn terrain(config: GameConfig) -> Result<()> {
    let terrain = Terrain::new(config.terrain)?;
    let (min, max) = terrain.heightfield().min_max();
    let cells = terrain.quadtree().leaf_count();

    println!("Cells:        {} x {}", config.terrain.cells_dim, config.terrain.cells_dim);
    println!("Extent:       {:.0} units", terrain.terrain_size());
    println!("Heights:      {:.2} .. {:.2}", min, max);
    println!("Quadtree:     {} nodes", terrain.quadtree().len());
    println!("Vertices:     {}", cells as u64 * VERTICES_PER_CELL as u64);
    println!("Faces:        {}", cells as u64 * FACES_PER_CELL as u64);
    Ok(())
}
