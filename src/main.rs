use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use dirmagic::cli::{Cli, Commands};
use dirmagic::config::Config;
use dirmagic::logging::{init_early_logging, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match load_config(cli.config.as_deref(), &current_dir) {
        Ok(config) => config,
        Err(e) => {
            init_early_logging();
            tracing::error!("{:#}", e);
            return Err(e);
        }
    };

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &current_dir)?;

    tracing::debug!("Working directory: {}", current_dir.display());

    match cli.command {
        Commands::Root {
            path,
            markers,
            types,
            limit_parents,
            reason,
            tree,
        } => {
            dirmagic::commands::root::run(
                &config,
                &path,
                &markers,
                &types,
                limit_parents,
                reason,
                tree,
            )?;
        }
        Commands::Projects {
            path,
            maxdepth,
            markers,
            types,
        } => {
            dirmagic::commands::projects::run(&config, &path, maxdepth, &markers, &types)?;
        }
        Commands::Identify { path } => {
            dirmagic::commands::identify::run(&path)?;
        }
        Commands::Types => {
            dirmagic::commands::types::run()?;
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>, current_dir: &Path) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_file(path),
        None => Config::load(current_dir),
    }
}
