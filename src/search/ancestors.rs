//! Start path resolution and the ancestor chain.

use std::path::{Component, Path, PathBuf};

use crate::error::{CriterionError, Result};

/// Resolve the directory a search starts from.
///
/// The path is made absolute and lexically normalized (`..` removes the
/// previous component), or fully resolved through symbolic links when
/// `resolve_symlinks` is set. A file resolves to its parent directory and an
/// empty path to the current directory.
pub fn start_path(path: impl AsRef<Path>, resolve_symlinks: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let not_found = || CriterionError::NotFound {
        path: path.to_path_buf(),
    };

    let absolute = if resolve_symlinks {
        path.canonicalize().map_err(|_| not_found())?
    } else {
        let absolute = std::path::absolute(path).map_err(|e| CriterionError::io(path, e))?;
        normalize(&absolute)
    };

    if !absolute.exists() {
        return Err(not_found());
    }
    if !absolute.is_dir() {
        if let Some(parent) = absolute.parent() {
            return Ok(parent.to_path_buf());
        }
    }
    Ok(absolute)
}

/// Lexical normalization of an absolute path, without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.parent().is_some() {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// The directories a root search tests, innermost first.
///
/// `limit_parents` selects the parents considered beyond the start
/// directory: `None` keeps all of them, `Some(n)` the first `n`, and
/// `Some(-n)` all but the outermost `n`.
pub fn list_search_dirs(
    path: impl AsRef<Path>,
    limit_parents: Option<isize>,
    resolve_symlinks: bool,
) -> Result<Vec<PathBuf>> {
    let start = start_path(path, resolve_symlinks)?;
    let parents: Vec<PathBuf> = start.ancestors().skip(1).map(Path::to_path_buf).collect();

    let keep = match limit_parents {
        None => parents.len(),
        Some(n) if n >= 0 => (n as usize).min(parents.len()),
        Some(n) => parents.len().saturating_sub(n.unsigned_abs()),
    };

    let mut dirs = Vec::with_capacity(keep + 1);
    dirs.push(start);
    dirs.extend(parents.into_iter().take(keep));
    Ok(dirs)
}
