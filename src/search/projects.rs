//! Downward search for projects and project classification.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::criterion::Criterion;
use crate::error::Result;
use crate::filesystem::{as_root_criterion, list_dir, CriterionSpec};
use crate::project_types;

use super::ancestors::start_path;

/// Subdirectories of `path` satisfying `criterion`.
///
/// Each level is collected before descending into the directories that did
/// not match; a matching directory is never searched for nested projects.
/// `maxdepth` bounds the levels searched, unlimited if negative and nothing
/// at all when 0. Cyclic symbolic links are not detected.
pub fn find_projects(
    path: impl AsRef<Path>,
    criterion: &Criterion,
    maxdepth: i64,
) -> Result<Vec<PathBuf>> {
    if maxdepth == 0 {
        return Ok(Vec::new());
    }
    let start = start_path(path, false)?;
    debug!(start = %start.display(), maxdepth, "Searching for projects");

    let found = search_level(&start, criterion, maxdepth)?;
    debug!(count = found.len(), "Project search finished");
    Ok(found)
}

/// [`find_projects`] for any input [`as_root_criterion`] accepts: marker
/// file names, lists and maps of them, functions or criteria.
pub fn find_projects_by(
    path: impl AsRef<Path>,
    criterion: impl Into<CriterionSpec>,
    maxdepth: i64,
) -> Result<Vec<PathBuf>> {
    let criterion = as_root_criterion(criterion)?;
    find_projects(path, &criterion, maxdepth)
}

fn search_level(dir: &Path, criterion: &Criterion, maxdepth: i64) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut other_dirs = Vec::new();

    for entry in list_dir(dir)? {
        if !entry.is_dir() {
            continue;
        }
        if criterion.test(&entry)?.result {
            trace!(dir = %entry.display(), "Found project");
            found.push(entry);
        } else {
            other_dirs.push(entry);
        }
    }

    if maxdepth != 1 {
        for other in other_dirs {
            found.extend(search_level(&other, criterion, maxdepth.saturating_sub(1))?);
        }
    }

    Ok(found)
}

/// `(category, name)` of every project type matching `path`, sorted.
///
/// `types` defaults to the built-in catalog. Criteria without a project type
/// label are tested but never reported.
pub fn identify_project(
    path: impl AsRef<Path>,
    types: Option<&[Criterion]>,
) -> Result<Vec<(String, String)>> {
    let dir = start_path(path, false)?;
    let types = match types {
        Some(types) => types,
        None => project_types::all_project_types(),
    };

    let mut matched = Vec::new();
    for project_type in types {
        if !project_type.test(&dir)?.result {
            continue;
        }
        if let (Some(category), Some(name)) = (project_type.category(), project_type.name()) {
            matched.push((category.to_string(), name.to_string()));
        }
    }
    matched.sort();
    Ok(matched)
}
