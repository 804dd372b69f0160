//! `dirmagic root`: find the root directory of a project.

use anyhow::{Context, Result};
use std::path::Path;

use crate::search::RootFinder;
use crate::Config;

use super::selected_criteria;

/// Print the root directory found from `path`.
///
/// Markers and types given on the command line replace the configured
/// markers; `limit_parents` overrides the configured limit.
pub fn run(
    config: &Config,
    path: &Path,
    markers: &[String],
    types: &[String],
    limit_parents: Option<isize>,
    reason: bool,
    tree: bool,
) -> Result<()> {
    let criteria = selected_criteria(markers, types)?;
    let finder = if criteria.is_empty() {
        config.root_finder()?
    } else {
        RootFinder::new(criteria)
            .limit_parents(config.search.limit_parents)
            .resolve_symlinks(config.search.resolve_symlinks)
    };
    let finder = match limit_parents {
        Some(limit) => finder.limit_parents(Some(limit)),
        None => finder,
    };

    let found = finder
        .find_with_reason(path)
        .with_context(|| format!("Failed to find the root of {}", path.display()))?;

    println!("{}", found.root.display());
    if reason {
        println!("reason: {}", found.reason());
    }
    if tree {
        println!("{}", found.result.simple_tree());
    }

    Ok(())
}
