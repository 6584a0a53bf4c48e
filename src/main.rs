use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod run;

#[derive(Parser)]
#[command(about = "Smoothed particle hydrodynamics fluid simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulation and stream its frames to a dataset directory.
    Run {
        /// Directory the frame dataset is written to. Must not exist yet.
        #[arg(short, long)]
        output: PathBuf,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: u64,

        /// Playback rate the dataset is timed for.
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Number of particles to spawn.
        #[arg(short, long, default_value_t = 1000)]
        particles: usize,

        /// Sweep a sphere obstacle through the tank while the fluid settles.
        #[arg(long, default_value_t = false)]
        sweep: bool,
    },
    /// Print the metadata of an existing dataset.
    Info {
        /// Directory of the frame dataset.
        data: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { output, frames, fps, particles, sweep } => {
            run::run(output, frames, fps, particles, sweep);
        }
        Command::Info { data } => {
            run::info(data);
        }
    }
}
