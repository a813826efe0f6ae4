use crate::cli::resolve_working_dir;
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::show::{render_explain, render_show};
use crate::errors::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance and output paths
    Show {
        /// Working directory (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Explain where an artifact category's output path comes from
    Explain {
        /// Artifact category to explain (e.g., dto, queries, apiInstance)
        category: String,
        /// Working directory (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    let mut stdout = std::io::stdout();
    match &args.action {
        ConfigAction::Show { path } => {
            let working_dir = resolve_working_dir(path)?;
            let config = resolve_config(&working_dir, &CliOverrides::default())?;
            render_show(&mut stdout, &config)?;
        }
        ConfigAction::Explain { category, path } => {
            let working_dir = resolve_working_dir(path)?;
            let config = resolve_config(&working_dir, &CliOverrides::default())?;
            render_explain(&mut stdout, &config, category)?;
        }
    }
    Ok(())
}
