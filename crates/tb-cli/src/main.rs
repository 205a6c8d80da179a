//! CLI frontend for the Tabula random table engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tabula",
    about = "Tabula — roll on random tables from the command line",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a table name, dice expression, or template
    Roll {
        /// Text to evaluate, e.g. `oracle`, `2d6` or `"There are ${2d6} orcs."`
        text: String,

        /// Table files to load (repeatable)
        #[arg(short, long = "tables")]
        tables: Vec<PathBuf>,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of times to evaluate
        #[arg(
            short = 'n',
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        count: u64,

        /// Print the input above each result
        #[arg(short, long)]
        echo: bool,
    },

    /// List public tables
    List {
        /// Table files to load (repeatable)
        #[arg(short, long = "tables")]
        tables: Vec<PathBuf>,
    },

    /// Validate table files and their reuse references
    Check {
        /// Table files to load (repeatable)
        #[arg(short, long = "tables")]
        tables: Vec<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            text,
            tables,
            seed,
            count,
            echo,
        } => commands::roll::run(&tables, &text, seed, count, echo),
        Commands::List { tables } => commands::list::run(&tables),
        Commands::Check { tables } => commands::check::run(&tables),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
