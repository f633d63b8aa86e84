//! Shapeforge - runtime type synthesis from JSON schemas

mod cli;

use clap::{Parser, Subcommand};
use shapeforge_logging::LogConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shapeforge")]
#[command(about = "Synthesize property-bag types from JSON schemas")]
#[command(version)]
struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a type and list its properties
    Inspect {
        /// Schema file (JSON)
        schema: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Report synthesis failures instead of suppressing them
        #[arg(long)]
        propagate: bool,
    },

    /// Synthesize a type, instantiate it, and apply assignments
    Set {
        /// Schema file (JSON)
        schema: PathBuf,

        /// Assignment in NAME=VALUE form; repeat to set several properties
        #[arg(short, long = "assign", value_name = "NAME=VALUE", required = true)]
        assignments: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Report synthesis failures instead of suppressing them
        #[arg(long)]
        propagate: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match shapeforge_logging::init_logging(LogConfig {
        app_name: "shapeforge",
        verbose: cli.verbose,
        log_to_file: true,
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Inspect {
            schema,
            json,
            propagate,
        } => cli::inspect::run(cli::inspect::InspectArgs {
            schema,
            json,
            propagate,
        }),
        Commands::Set {
            schema,
            assignments,
            json,
            propagate,
        } => cli::set::run(cli::set::SetArgs {
            schema,
            assignments,
            json,
            propagate,
        }),
    }
}
