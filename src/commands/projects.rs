//! `dirmagic projects`: list the projects below a directory.

use anyhow::{Context, Result};
use std::path::Path;

use crate::criterion::Criterion;
use crate::project_types::VCS;
use crate::search::find_projects;
use crate::Config;

use super::selected_criteria;

/// Print every project found below `path`, one per line.
pub fn run(
    config: &Config,
    path: &Path,
    maxdepth: Option<i64>,
    markers: &[String],
    types: &[String],
) -> Result<()> {
    let criteria = selected_criteria(markers, types)?;
    let criterion = if criteria.is_empty() {
        VCS.clone()
    } else {
        Criterion::any_of(criteria)
    };
    let maxdepth = maxdepth.unwrap_or(config.search.maxdepth);

    let projects = find_projects(path, &criterion, maxdepth)
        .with_context(|| format!("Failed to search projects in {}", path.display()))?;

    if projects.is_empty() {
        eprintln!("No projects found in {}", path.display());
        return Ok(());
    }

    for project in &projects {
        println!("{}", project.display());
    }

    Ok(())
}
