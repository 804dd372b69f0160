//! Leaf criteria testing the filesystem directly.
//!
//! Names given to these criteria are joined onto the tested directory.
//! Joining normalizes the name first, so `a/`, `a/.` and `a` are the same
//! entry. A consequence is that `HasEntry::new("my_file/")` matches a
//! regular file; use [`HasDir`] to require a directory.
//!
//! Names are templates: inside a quantified match (see
//! [`crate::pattern::MatchCriterion`]) placeholders such as `{1}` are
//! replaced with the captures of the matched entry.

mod coerce;
mod contents;

pub use coerce::{as_root_criterion, CriterionSpec};
pub use contents::{read_lines, ContentMatcher};

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

use crate::criterion::Predicate;
use crate::error::{CriterionError, Result};
use crate::pattern::Captures;

/// Join a (possibly sloppy) entry name onto `dir`.
pub(crate) fn join_entry(dir: &Path, name: &str) -> PathBuf {
    let normalized: PathBuf = Path::new(name).components().collect();
    dir.join(normalized)
}

/// Direct entries of `dir` sorted by name; empty if `dir` is not a directory.
pub(crate) fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| CriterionError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| CriterionError::io(dir, e))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

fn glob_entries(dir: &Path, pattern: &str) -> Result<impl Iterator<Item = PathBuf>> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = Path::new(&escaped_dir).join(pattern);
    let paths = glob::glob(&full_pattern.to_string_lossy())?;
    Ok(paths.filter_map(|entry| match entry {
        Ok(path) => Some(path),
        Err(e) => {
            trace!(error = %e, "Skipping unreadable glob entry");
            None
        }
    }))
}

fn check_contents(contents: &Option<ContentMatcher>, file: &Path) -> Result<bool> {
    match contents {
        Some(matcher) => matcher.matches_file(file),
        None => Ok(true),
    }
}

fn describe_with_contents(description: String, contents: &Option<ContentMatcher>) -> String {
    match contents {
        Some(matcher) => format!("{} and {}", description, matcher.describe()),
        None => description,
    }
}

/// The named file is present, optionally with matching contents.
///
/// The name may point into a subdirectory (`a/b.txt`).
#[derive(Debug, Clone)]
pub struct HasFile {
    filename: String,
    contents: Option<ContentMatcher>,
}

impl HasFile {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: None,
        }
    }

    /// A file that must also contain a line matching `contents`.
    ///
    /// See [`ContentMatcher::new`] for `max_lines` and `fixed`.
    pub fn with_contents(
        filename: impl Into<String>,
        contents: impl Into<String>,
        max_lines: Option<usize>,
        fixed: bool,
    ) -> Result<Self> {
        Ok(Self {
            filename: filename.into(),
            contents: Some(ContentMatcher::new(contents, max_lines, fixed)?),
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl Predicate for HasFile {
    fn test(&self, dir: &Path) -> Result<bool> {
        let file = join_entry(dir, &self.filename);
        // contents are only read once the file is known to exist
        Ok(file.is_file() && check_contents(&self.contents, &file)?)
    }

    fn describe(&self) -> String {
        describe_with_contents(format!("has a file `{}`", self.filename), &self.contents)
    }

    fn kind(&self) -> &'static str {
        "HasFile"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self {
            filename: captures.expand(&self.filename)?,
            contents: self.contents.clone(),
        })))
    }
}

/// A direct entry is a file whose name matches a regular expression.
#[derive(Debug, Clone)]
pub struct HasFilePattern {
    pattern: Regex,
    contents: Option<ContentMatcher>,
}

impl HasFilePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            contents: None,
        })
    }

    pub fn with_contents(
        pattern: &str,
        contents: impl Into<String>,
        max_lines: Option<usize>,
        fixed: bool,
    ) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            contents: Some(ContentMatcher::new(contents, max_lines, fixed)?),
        })
    }
}

impl Predicate for HasFilePattern {
    fn test(&self, dir: &Path) -> Result<bool> {
        for entry in list_dir(dir)? {
            let name_matches = entry
                .file_name()
                .map(|name| self.pattern.is_match(&name.to_string_lossy()))
                .unwrap_or(false);
            if name_matches && entry.is_file() && check_contents(&self.contents, &entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn describe(&self) -> String {
        describe_with_contents(
            format!(
                "has a file matching the regular expression `{}`",
                self.pattern.as_str()
            ),
            &self.contents,
        )
    }

    fn kind(&self) -> &'static str {
        "HasFilePattern"
    }
}

/// A file matches a glob pattern, which may reach into subdirectories.
#[derive(Debug, Clone)]
pub struct HasFileGlob {
    pattern: String,
    contents: Option<ContentMatcher>,
}

impl HasFileGlob {
    pub fn new(pattern: &str) -> Result<Self> {
        glob::Pattern::new(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            contents: None,
        })
    }

    pub fn with_contents(
        pattern: &str,
        contents: impl Into<String>,
        max_lines: Option<usize>,
        fixed: bool,
    ) -> Result<Self> {
        glob::Pattern::new(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            contents: Some(ContentMatcher::new(contents, max_lines, fixed)?),
        })
    }
}

impl Predicate for HasFileGlob {
    fn test(&self, dir: &Path) -> Result<bool> {
        for entry in glob_entries(dir, &self.pattern)? {
            if entry.is_file() && check_contents(&self.contents, &entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn describe(&self) -> String {
        describe_with_contents(format!("has a file matching `{}`", self.pattern), &self.contents)
    }

    fn kind(&self) -> &'static str {
        "HasFileGlob"
    }
}

/// A directory of the given name is present.
#[derive(Debug, Clone)]
pub struct HasDir {
    dirname: String,
}

impl HasDir {
    pub fn new(dirname: impl Into<String>) -> Self {
        Self {
            dirname: dirname.into(),
        }
    }
}

impl Predicate for HasDir {
    fn test(&self, dir: &Path) -> Result<bool> {
        Ok(join_entry(dir, &self.dirname).is_dir())
    }

    fn describe(&self) -> String {
        format!("contains the directory `{}`", self.dirname)
    }

    fn kind(&self) -> &'static str {
        "HasDir"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self::new(captures.expand(&self.dirname)?))))
    }
}

/// A filesystem entry (file, directory, link target, ...) of this name exists.
#[derive(Debug, Clone)]
pub struct HasEntry {
    entryname: String,
}

/// Alias of [`HasEntry`].
pub type Exists = HasEntry;

impl HasEntry {
    pub fn new(entryname: impl Into<String>) -> Self {
        Self {
            entryname: entryname.into(),
        }
    }
}

impl Predicate for HasEntry {
    fn test(&self, dir: &Path) -> Result<bool> {
        Ok(join_entry(dir, &self.entryname).exists())
    }

    fn describe(&self) -> String {
        format!("contains the entry `{}`", self.entryname)
    }

    fn kind(&self) -> &'static str {
        "HasEntry"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self::new(captures.expand(&self.entryname)?))))
    }
}

/// Any entry matches the glob pattern.
#[derive(Debug, Clone)]
pub struct HasEntryGlob {
    pattern: String,
}

impl HasEntryGlob {
    pub fn new(pattern: &str) -> Result<Self> {
        glob::Pattern::new(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }
}

impl Predicate for HasEntryGlob {
    fn test(&self, dir: &Path) -> Result<bool> {
        Ok(glob_entries(dir, &self.pattern)?.next().is_some())
    }

    fn describe(&self) -> String {
        format!("has a file matching `{}`", self.pattern)
    }

    fn kind(&self) -> &'static str {
        "HasEntryGlob"
    }
}

/// The tested directory's own name equals `basename`.
#[derive(Debug, Clone)]
pub struct HasBasename {
    basename: String,
}

impl HasBasename {
    pub fn new(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
        }
    }
}

impl Predicate for HasBasename {
    fn test(&self, dir: &Path) -> Result<bool> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        Ok(name == self.basename.as_str())
    }

    fn describe(&self) -> String {
        format!("has the basename `{}`", self.basename)
    }

    fn kind(&self) -> &'static str {
        "HasBasename"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self::new(captures.expand(&self.basename)?))))
    }
}
