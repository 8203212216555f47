//! externals - Synchronize external git repositories
//!
//! Main entry point for the externals CLI.

use clap::{Parser, Subcommand};
use externals::external::Externals;
use std::path::PathBuf;
use std::process;

/// Synchronize external git repositories from a declarative manifest
#[derive(Parser, Debug)]
#[command(name = "externals")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Externals configuration file
    #[arg(short = 'c', long, default_value = "externals.json")]
    configuration: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch every external and check out its declared revision
    Fetch,

    /// Write the configuration to stdout
    Dump {
        /// Replace each revision with the commit hash it resolves to
        #[arg(short = 's', long)]
        sha1: bool,
    },
}

fn main() {
    if let Err(e) = externals::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> externals::Result<()> {
    let externals = Externals::load(&cli.configuration)?;

    match cli.command {
        Commands::Fetch => externals.fetch(),
        Commands::Dump { sha1 } => {
            println!("{}", externals.dump(sha1)?);
            Ok(())
        }
    }
}
