//! Dungeon map generator
//!
//! Generates a room-and-maze map and prints it as ASCII art or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strum::IntoEnumIterator;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use dg_core::{DungeonError, Generator, GeneratorConfig, TileKind};

/// Room-and-maze dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungeon")]
#[command(author, version, about = "Generate a room-and-maze dungeon map", long_about = None)]
struct Args {
    /// JSON configuration file; command-line options override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Map width (odd)
    #[arg(short = 'W', long = "width")]
    width: Option<i32>,

    /// Map height (odd)
    #[arg(short = 'H', long = "height")]
    height: Option<i32>,

    /// Random seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of room placement attempts
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<u32>,

    /// Chance to keep carving in the same direction (0-100)
    #[arg(long = "straight")]
    straight: Option<u32>,

    /// Chance for each extra connection attempt (0-100)
    #[arg(long = "loops")]
    loops: Option<u32>,

    /// Extra connection attempts per region
    #[arg(long = "extra-connections")]
    extra_connections: Option<u32>,

    /// Share of floor tiles to keep when pruning dead ends (0-100)
    #[arg(short = 'k', long = "keep")]
    keep: Option<u32>,

    /// Print a JSON snapshot instead of ASCII art
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Print the tile legend and exit
    #[arg(long = "legend")]
    legend: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn build_config(&self) -> Result<GeneratorConfig, DungeonError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rooms) = self.rooms {
            config.room_placement_retries = rooms;
        }
        if let Some(straight) = self.straight {
            config.keep_same_direction_percentage = straight;
        }
        if let Some(loops) = self.loops {
            config.add_another_connection_percentage = loops;
        }
        if let Some(extra) = self.extra_connections {
            config.additional_connection_attempts = extra;
        }
        if let Some(keep) = self.keep {
            config.tiles_to_keep_percentage = keep;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "dungeon=debug,dg_core=debug"
    } else {
        "dungeon=info,dg_core=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn print_legend() {
    for kind in TileKind::iter() {
        println!("{}  {}", kind.symbol(), kind);
    }
}

fn run(args: &Args) -> Result<(), DungeonError> {
    let config = args.build_config()?;
    let mut generator = Generator::new(config)?;
    let report = generator.generate_map();

    if !report.is_fully_connected() {
        info!(
            regions = report.final_regions,
            "map is not fully connected"
        );
    }

    if args.json {
        println!("{}", generator.snapshot().to_json()?);
    } else {
        print!("{}", generator.grid());
        println!("seed: {}", generator.seed());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.legend {
        print_legend();
        return ExitCode::SUCCESS;
    }

    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("dungeon: {e}");
            ExitCode::FAILURE
        }
    }
}
