//! # tamis
//!
//! Tamis - Build-time tree-shaker and chunker for utility-first CSS.
//!
//! ## Name Origin
//!
//! **Tamis** (/ta.mi/) is the cook's drum sieve. This binary is the command
//! line front of the sieve: it reads `tamis.config.json`, applies the flags
//! on top and runs one optimization over the project.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tamis")]
#[command(about = "Build-time tree-shaker for utility-first CSS", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long, action = clap::ArgAction::Version)]
    version: (),
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize the framework stylesheet for the classes in use (default command)
    Optimize(commands::optimize::OptimizeArgs),

    /// Print or write the JSON Schema for tamis.config.json
    Schema(commands::schema::SchemaArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Optimize(args)) => commands::optimize::run(args),
        Some(Commands::Schema(args)) => commands::schema::run(args),
        None => {
            // Default to optimize command with default args
            commands::optimize::run(commands::optimize::OptimizeArgs::default());
        }
    }
}
