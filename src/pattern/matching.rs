//! Quantified criteria over the entries matching a pattern.
//!
//! The entries below a directory are enumerated level by level. At each
//! directory the pattern is searched in the path of every direct entry,
//! relative to the starting directory. Matching entries are reported;
//! subdirectories that do not match are searched next, so a matching
//! directory consumes its subtree.
//!
//! The walk is not protected against cyclic symbolic links.

use regex::Regex;
use std::ops::ControlFlow;
use std::path::Path;

use crate::criterion::{Criterion, CriterionNode, CriterionResult};
use crate::error::Result;
use crate::filesystem::list_dir;

use super::{glob_to_regex, Captures};

/// Visit the captures of every entry below `root` matching `pattern`.
///
/// `maxdepth` limits the levels searched, unlimited if negative and nothing
/// at all when 0. The visitor stops the walk by returning `Break`.
pub fn visit_matching_entries<F>(
    root: &Path,
    pattern: &Regex,
    maxdepth: i64,
    visit: &mut F,
) -> Result<ControlFlow<()>>
where
    F: FnMut(Captures) -> Result<ControlFlow<()>>,
{
    visit_level(root, Path::new(""), pattern, maxdepth, visit)
}

fn visit_level<F>(
    root: &Path,
    subpath: &Path,
    pattern: &Regex,
    maxdepth: i64,
    visit: &mut F,
) -> Result<ControlFlow<()>>
where
    F: FnMut(Captures) -> Result<ControlFlow<()>>,
{
    if maxdepth == 0 {
        return Ok(ControlFlow::Continue(()));
    }

    let current = if subpath.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(subpath)
    };

    let mut other_dirs = Vec::new();
    for entry in list_dir(&current)? {
        let Some(file_name) = entry.file_name() else {
            continue;
        };
        let relative = subpath.join(file_name);
        let relative_str = relative.to_string_lossy();

        match pattern.captures(&relative_str) {
            Some(caps) => {
                if visit(Captures::from_match(pattern, &caps))?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
            None if maxdepth != 1 && entry.is_dir() => other_dirs.push(relative.clone()),
            None => {}
        }
    }

    for dir in other_dirs {
        if visit_level(root, &dir, pattern, maxdepth.saturating_sub(1), visit)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }

    Ok(ControlFlow::Continue(()))
}

/// Captures of all entries below `root` matching `pattern`, in walk order.
pub fn matching_entries(root: &Path, pattern: &Regex, maxdepth: i64) -> Result<Vec<Captures>> {
    let mut found = Vec::new();
    visit_matching_entries(root, pattern, maxdepth, &mut |captures| {
        found.push(captures);
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(found)
}

/// Whether one or every matching entry has to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Any,
    All,
}

/// Tests an inner criterion once per entry matching a pattern.
///
/// The inner criterion is expanded with the entry's captures (whole match,
/// positional and named groups) and tested against the starting directory.
/// `Any` succeeds on the first passing entry and fails when nothing
/// matches; `All` fails on the first failing entry and succeeds vacuously
/// when nothing matches.
#[derive(Debug, Clone)]
pub struct MatchCriterion {
    quantifier: Quantifier,
    pattern: Regex,
    inner: Criterion,
}

impl MatchCriterion {
    pub fn new(quantifier: Quantifier, pattern: &str, inner: Criterion) -> Result<Self> {
        Ok(Self {
            quantifier,
            pattern: Regex::new(pattern)?,
            inner,
        })
    }

    /// True if the criterion holds for at least one entry matching the regex.
    pub fn any(pattern: &str, inner: Criterion) -> Result<Criterion> {
        Ok(Self::new(Quantifier::Any, pattern, inner)?.into_criterion())
    }

    /// True if the criterion holds for every entry matching the regex.
    pub fn all(pattern: &str, inner: Criterion) -> Result<Criterion> {
        Ok(Self::new(Quantifier::All, pattern, inner)?.into_criterion())
    }

    /// Like [`MatchCriterion::any`] with a shell glob instead of a regex.
    pub fn any_glob(glob: &str, inner: Criterion) -> Result<Criterion> {
        Ok(Self {
            quantifier: Quantifier::Any,
            pattern: glob_to_regex(glob)?,
            inner,
        }
        .into_criterion())
    }

    /// Like [`MatchCriterion::all`] with a shell glob instead of a regex.
    pub fn all_glob(glob: &str, inner: Criterion) -> Result<Criterion> {
        Ok(Self {
            quantifier: Quantifier::All,
            pattern: glob_to_regex(glob)?,
            inner,
        }
        .into_criterion())
    }

    pub fn into_criterion(self) -> Criterion {
        Criterion::from_node(CriterionNode::Match(self))
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn inner(&self) -> &Criterion {
        &self.inner
    }

    pub fn kind(&self) -> &'static str {
        match self.quantifier {
            Quantifier::Any => "AnyMatch",
            Quantifier::All => "AllMatch",
        }
    }

    pub fn describe(&self) -> String {
        let scope = match self.quantifier {
            Quantifier::Any => "at least one entry",
            Quantifier::All => "all entries",
        };
        format!(
            "Tests whether the criterion `{}` is true for {} matching `{}`",
            self.inner.describe(),
            scope,
            self.pattern.as_str()
        )
    }

    pub(crate) fn outline_label(&self) -> String {
        match self.quantifier {
            Quantifier::Any => format!("for at least one file matching `{}`", self.pattern.as_str()),
            Quantifier::All => format!("for all files matching `{}`", self.pattern.as_str()),
        }
    }

    /// Evaluate against `dir`, returning the verdict and the per-entry results.
    pub(crate) fn evaluate(&self, dir: &Path) -> Result<(bool, Vec<CriterionResult>)> {
        let stop_on = self.quantifier == Quantifier::Any;
        let mut sub_results = Vec::new();

        let flow = visit_matching_entries(dir, &self.pattern, -1, &mut |captures| {
            let entry_result = self.inner.expand(&captures)?.test(dir)?;
            let verdict = entry_result.result;
            sub_results.push(entry_result);
            Ok(if verdict == stop_on {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        })?;

        let result = if flow.is_break() { stop_on } else { !stop_on };
        Ok((result, sub_results))
    }
}
