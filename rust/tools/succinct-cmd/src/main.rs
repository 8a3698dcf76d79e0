use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

use commands::ptable::TableMode;

#[derive(Parser)]
#[command(name = "succinct-cmd")]
#[command(about = "Command-line utility for inspecting bit-packed arrays and popcount tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a popcount table and display its contents
    Ptable {
        /// Pattern width in bits (overrides the configuration file)
        #[arg(short, long)]
        width: Option<usize>,

        /// Path to a JSON file with the table configuration
        #[arg(long)]
        config: Option<String>,

        /// How to render the table
        #[arg(short, long, value_enum, default_value_t = TableMode::Counts)]
        mode: TableMode,

        /// Print a JSON summary instead of the text rendering
        #[arg(long)]
        json: bool,
    },

    /// Pack values into fixed-width fields and display the resulting words
    Pack {
        /// Bits per field
        #[arg(short, long)]
        width: usize,

        /// Number of fields (defaults to the number of values)
        #[arg(short, long)]
        capacity: Option<usize>,

        /// Also print every storage word on its own line
        #[arg(short, long)]
        verbose: bool,

        /// Print a JSON summary instead of the text rendering
        #[arg(long)]
        json: bool,

        /// Values written at indices 0, 1, 2, ...
        values: Vec<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ptable {
            width,
            config,
            mode,
            json,
        } => commands::ptable::run(width, config, mode, json),
        Commands::Pack {
            width,
            capacity,
            verbose,
            json,
            values,
        } => commands::pack::run(width, capacity, values, verbose, json),
    }
}
