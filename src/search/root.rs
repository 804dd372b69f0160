//! Upward search for a project root.

use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::criterion::{Criterion, CriterionResult};
use crate::error::{CriterionError, Result};
use crate::filesystem::{as_root_criterion, CriterionSpec, HasDir, HasEntryGlob, HasFile};

use super::ancestors::list_search_dirs;

lazy_static! {
    /// Markers of common project roots, tested in this order.
    pub static ref DEFAULT_ROOT_CRITERIA: Vec<Criterion> = vec![
        Criterion::leaf(HasFile::new(".here")),
        Criterion::leaf(HasDir::new(".git")),
        Criterion::leaf(HasEntryGlob::new("*.Rproj").expect("Failed to create *.Rproj glob")),
        Criterion::leaf(HasFile::new("requirements.txt")),
        Criterion::leaf(HasFile::new("setup.py")),
        Criterion::leaf(HasDir::new(".dvc")),
        Criterion::leaf(HasDir::new(".spyproject")),
        Criterion::leaf(HasFile::new("pyproject.toml")),
        Criterion::leaf(HasDir::new(".idea")),
        Criterion::leaf(HasDir::new(".vscode")),
    ];
}

/// A root directory together with the result that selected it.
#[derive(Debug, Clone)]
pub struct RootMatch {
    pub root: PathBuf,
    pub result: CriterionResult,
}

impl RootMatch {
    /// Why the root was selected.
    pub fn reason(&self) -> String {
        self.result.reason()
    }
}

/// Finds the innermost ancestor satisfying one of a list of criteria.
///
/// Ancestors are visited from the start directory outwards and every
/// criterion is tried at each ancestor before moving on, so a closer
/// directory always wins over a farther one.
///
/// ```no_run
/// use dirmagic::search::RootFinder;
///
/// let root = RootFinder::default().limit_parents(Some(3)).find(".")?;
/// println!("{}", root.display());
/// # Ok::<(), dirmagic::CriterionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RootFinder {
    criteria: Vec<Criterion>,
    limit_parents: Option<isize>,
    resolve_symlinks: bool,
}

impl Default for RootFinder {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_CRITERIA.iter().cloned())
    }
}

impl RootFinder {
    /// Search with the given criteria, in order.
    pub fn new<I: IntoIterator<Item = Criterion>>(criteria: I) -> Self {
        Self {
            criteria: criteria.into_iter().collect(),
            limit_parents: None,
            resolve_symlinks: false,
        }
    }

    /// Search with criteria built from loosely typed input.
    ///
    /// A list gives one criterion per element, tried in order; anything else
    /// is converted into a single criterion.
    pub fn from_spec(spec: impl Into<CriterionSpec>) -> Result<Self> {
        let criteria = match spec.into() {
            CriterionSpec::List(items) => items
                .into_iter()
                .map(as_root_criterion)
                .collect::<Result<Vec<_>>>()?,
            other => vec![as_root_criterion(other)?],
        };
        Ok(Self::new(criteria))
    }

    /// Limit the parents searched, see [`list_search_dirs`].
    pub fn limit_parents(mut self, limit_parents: Option<isize>) -> Self {
        self.limit_parents = limit_parents;
        self
    }

    /// Resolve symbolic links in the start path.
    pub fn resolve_symlinks(mut self, resolve_symlinks: bool) -> Self {
        self.resolve_symlinks = resolve_symlinks;
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// The root directory found from `path`.
    pub fn find(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.find_with_reason(path).map(|found| found.root)
    }

    /// The root directory found from `path`, with the winning result.
    pub fn find_with_reason(&self, path: impl AsRef<Path>) -> Result<RootMatch> {
        let parents = list_search_dirs(path, self.limit_parents, self.resolve_symlinks)?;
        debug!(
            start = %parents[0].display(),
            parents = parents.len(),
            criteria = self.criteria.len(),
            "Searching for root directory"
        );

        for dir in &parents {
            trace!(dir = %dir.display(), "Checking directory");
            for criterion in &self.criteria {
                let result = criterion.test(dir)?;
                if result.result {
                    debug!(root = %dir.display(), criterion = %criterion, "Found root directory");
                    return Ok(RootMatch {
                        root: dir.clone(),
                        result,
                    });
                }
            }
        }

        Err(CriterionError::NoRootFound {
            start: parents[0].clone(),
        })
    }
}

/// Root directory of `path` according to the default markers.
pub fn find_root(path: impl AsRef<Path>) -> Result<PathBuf> {
    RootFinder::default().find(path)
}

/// Root directory of `path` according to the default markers, with the reason.
pub fn find_root_with_reason(path: impl AsRef<Path>) -> Result<(PathBuf, String)> {
    let found = RootFinder::default().find_with_reason(path)?;
    let reason = found.reason();
    Ok((found.root, reason))
}
