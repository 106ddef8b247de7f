//! # maquette
//!
//! Command-line gateway to the Maquette toolchain: export an editor
//! schema document into a runnable source project.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "maquette")]
#[command(about = "Visual page builder core in Rust", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a schema document to a runnable source project
    #[command(visible_alias = "atelier")]
    Export(commands::export::ExportArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export(args) => commands::export::run(args),
    }
}
