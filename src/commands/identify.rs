//! `dirmagic identify`: classify a directory.

use anyhow::{Context, Result};
use std::path::Path;

use crate::search::identify_project;

pub fn run(path: &Path) -> Result<()> {
    let matched = identify_project(path, None)
        .with_context(|| format!("Failed to identify {}", path.display()))?;

    if matched.is_empty() {
        eprintln!("No known project type matches {}", path.display());
        return Ok(());
    }

    for (category, name) in matched {
        println!("{}: {}", category, name);
    }

    Ok(())
}
