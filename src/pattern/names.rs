//! Criteria testing a (template expanded) name instead of the directory.
//!
//! These only make sense inside a quantified match, where the template is
//! filled with the captures of the matched entry. The tested directory is
//! ignored.

use regex::Regex;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::criterion::Predicate;
use crate::error::Result;

use super::Captures;

/// Suffix of the last path component, including the dot.
///
/// Leading dots (`.bashrc`) and trailing dots (`name.`) give no suffix.
pub fn suffix(name: &str) -> &str {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    match file_name.rfind('.') {
        Some(i) if i > 0 && i + 1 < file_name.len() => &file_name[i..],
        _ => "",
    }
}

/// The expanded name matches a regular expression (searched, not anchored).
#[derive(Debug, Clone)]
pub struct MatchesPattern {
    name_template: String,
    pattern: Regex,
}

impl MatchesPattern {
    pub fn new(name_template: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self {
            name_template: name_template.into(),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Predicate for MatchesPattern {
    fn test(&self, _dir: &Path) -> Result<bool> {
        Ok(self.pattern.is_match(&self.name_template))
    }

    fn describe(&self) -> String {
        format!(
            "`{}` matches `{}`",
            self.name_template,
            self.pattern.as_str()
        )
    }

    fn kind(&self) -> &'static str {
        "MatchesPattern"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self {
            name_template: captures.expand(&self.name_template)?,
            pattern: self.pattern.clone(),
        })))
    }
}

/// The file name is one of the listed names.
///
/// Expansion keeps only the last path component of the expanded template.
#[derive(Debug, Clone)]
pub struct IsIn {
    name_template: String,
    names: Vec<String>,
}

impl IsIn {
    pub fn new<I, S>(name_template: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name_template: name_template.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for IsIn {
    fn test(&self, _dir: &Path) -> Result<bool> {
        Ok(self.names.iter().any(|n| *n == self.name_template))
    }

    fn describe(&self) -> String {
        format!("`{}` is in {:?}", self.name_template, self.names)
    }

    fn kind(&self) -> &'static str {
        "IsIn"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        let expanded = captures.expand(&self.name_template)?;
        let file_name = Path::new(&expanded)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Some(Arc::new(Self {
            name_template: file_name,
            names: self.names.clone(),
        })))
    }
}

/// The suffix of the file name is one of the listed suffixes (`.txt`, ...).
#[derive(Debug, Clone)]
pub struct SuffixIsIn {
    name_template: String,
    suffixes: Vec<String>,
}

impl SuffixIsIn {
    pub fn new<I, S>(name_template: impl Into<String>, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name_template: name_template.into(),
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predicate for SuffixIsIn {
    fn test(&self, _dir: &Path) -> Result<bool> {
        let name_suffix = suffix(&self.name_template);
        Ok(self.suffixes.iter().any(|s| s == name_suffix))
    }

    fn describe(&self) -> String {
        format!(
            "the suffix of `{}` is in {:?}",
            self.name_template, self.suffixes
        )
    }

    fn kind(&self) -> &'static str {
        "SuffixIsIn"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self {
            name_template: captures.expand(&self.name_template)?,
            suffixes: self.suffixes.clone(),
        })))
    }
}

/// The mime type guessed from the file name equals `mimetype`.
#[derive(Debug, Clone)]
pub struct FileMimeType {
    filename: String,
    mimetype: String,
}

impl FileMimeType {
    pub fn new(filename: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mimetype: mimetype.into(),
        }
    }
}

impl Predicate for FileMimeType {
    fn test(&self, _dir: &Path) -> Result<bool> {
        Ok(mime_guess::from_path(&self.filename)
            .first()
            .map(|mime| mime.essence_str() == self.mimetype)
            .unwrap_or(false))
    }

    fn describe(&self) -> String {
        format!(
            "the mime type of filename `{}` is `{}`",
            self.filename, self.mimetype
        )
    }

    fn kind(&self) -> &'static str {
        "FileMimeType"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self::new(
            captures.expand(&self.filename)?,
            self.mimetype.clone(),
        ))))
    }
}

/// Always true; logs the directory and the captures it was expanded with.
///
/// And it with the criteria under investigation to see what they receive.
#[derive(Debug, Clone, Default)]
pub struct Spy {
    captures: Captures,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Predicate for Spy {
    fn test(&self, dir: &Path) -> Result<bool> {
        info!(dir = %dir.display(), captures = ?self.captures, "spy output");
        Ok(true)
    }

    fn describe(&self) -> String {
        "Spy: always true and logs the test parameters".to_string()
    }

    fn kind(&self) -> &'static str {
        "Spy"
    }

    fn expand(&self, captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(Some(Arc::new(Self {
            captures: captures.clone(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::Criterion;
    use tempfile::tempdir;

    fn holds(criterion: &Criterion, captures: &Captures) -> bool {
        let dir = tempdir().unwrap();
        criterion
            .expand(captures)
            .unwrap()
            .test(dir.path())
            .unwrap()
            .result
    }

    #[test]
    fn test_suffix() {
        assert_eq!(suffix("a.png"), ".png");
        assert_eq!(suffix("dir/archive.tar.gz"), ".gz");
        assert_eq!(suffix(".bashrc"), "");
        assert_eq!(suffix("name."), "");
        assert_eq!(suffix("README"), "");
    }

    #[test]
    fn test_matches_pattern_expands_template() {
        let criterion = Criterion::leaf(MatchesPattern::new("{1}", r".*\.png$").unwrap());
        assert!(holds(&criterion, &Captures::new().with_positional("a.png").with_positional("a.png")));
        assert!(!holds(&criterion, &Captures::new().with_positional("a.jpg").with_positional("a.jpg")));
        assert_eq!(criterion.describe(), r"`{1}` matches `.*\.png$`");
    }

    #[test]
    fn test_is_in_uses_file_name() {
        let criterion = Criterion::leaf(IsIn::new("{0}", ["setup.py", "setup.cfg"]));
        assert!(holds(&criterion, &Captures::new().with_positional("pkg/setup.py")));
        assert!(!holds(&criterion, &Captures::new().with_positional("pkg/main.py")));
    }

    #[test]
    fn test_suffix_is_in() {
        let criterion = Criterion::leaf(SuffixIsIn::new("{0}", [".png", ".jpg"]));
        assert!(holds(&criterion, &Captures::new().with_positional("b.jpg")));
        assert!(!holds(&criterion, &Captures::new().with_positional("c.txt")));
    }

    #[test]
    fn test_file_mime_type() {
        let criterion = Criterion::leaf(FileMimeType::new("{0}", "image/png"));
        assert!(holds(&criterion, &Captures::new().with_positional("a.png")));
        assert!(!holds(&criterion, &Captures::new().with_positional("a.txt")));
        assert!(!holds(&criterion, &Captures::new().with_positional("no_extension")));
    }

    #[test]
    fn test_spy_is_always_true() {
        let criterion = Criterion::leaf(Spy::new());
        assert!(holds(&criterion, &Captures::new().with_positional("anything")));
    }
}
