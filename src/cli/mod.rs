pub mod config;
pub mod routes;

use crate::errors::{AutogenError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "swagger-autogen",
    version,
    about = "Derive typed client and data-fetching hook configuration from OpenAPI routes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive request, schema and hook configuration for every route of a document
    Routes(routes::RoutesArgs),
    /// Inspect the resolved configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Routes(args) => routes::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

fn resolve_working_dir(path: &Option<PathBuf>) -> Result<PathBuf> {
    let p = path.clone().unwrap_or_else(|| PathBuf::from("."));
    p.canonicalize()
        .map_err(|_| AutogenError::Config(format!("Invalid path: {}", p.display())))
}
