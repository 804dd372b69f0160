//! Evaluation results and their explanation.

use std::path::{Path, PathBuf};

use super::render::{PlainTextRenderer, TreeRenderer};
use super::{Criterion, CriterionNode};

/// Outcome of testing a criterion against a directory.
///
/// The record keeps the criterion that produced it and the results of the
/// children that were actually evaluated. For `Any`/`All` nodes this is only
/// the prefix evaluated before short-circuiting.
///
/// ```no_run
/// use std::path::Path;
/// use dirmagic::project_types::DVC;
///
/// let data_repo = Path::new("/data/repo");
/// if DVC.test(data_repo)?.result {
///     println!("{} is a DVC project", data_repo.display());
/// }
/// # Ok::<(), dirmagic::CriterionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CriterionResult {
    /// Test result.
    pub result: bool,
    /// The criterion that was tested.
    pub criterion: Criterion,
    /// The directory that was tested.
    pub path: PathBuf,
    /// Results of the sub-tests this result is based on.
    pub sub_results: Vec<CriterionResult>,
}

impl CriterionResult {
    pub fn new(
        result: bool,
        criterion: Criterion,
        path: impl AsRef<Path>,
        sub_results: Vec<CriterionResult>,
    ) -> Self {
        Self {
            result,
            criterion,
            path: path.as_ref().to_path_buf(),
            sub_results,
        }
    }

    /// Human readable text explaining why the test came out as it did.
    ///
    /// A failed `Any`/`All` lists its evaluated children each wrapped in
    /// `not (...)`, even children whose reason is already negated.
    pub fn reason(&self) -> String {
        match self.criterion.node() {
            CriterionNode::Any(_) => {
                if self.result {
                    self.join_reasons(" or ")
                } else {
                    self.join_negated_reasons(" and ")
                }
            }
            CriterionNode::All(_) => {
                if self.result {
                    self.join_reasons(" and ")
                } else {
                    self.join_negated_reasons(" or ")
                }
            }
            CriterionNode::Not(inner) => {
                if self.result {
                    self.criterion.describe()
                } else {
                    // the inner criterion held, avoid "not (not (...))"
                    inner.describe()
                }
            }
            _ => {
                if self.result {
                    self.criterion.describe()
                } else {
                    format!("not ({})", self.criterion.describe())
                }
            }
        }
    }

    fn join_reasons(&self, separator: &str) -> String {
        self.sub_results
            .iter()
            .map(CriterionResult::reason)
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn join_negated_reasons(&self, separator: &str) -> String {
        self.sub_results
            .iter()
            .map(|r| format!("not ({})", r.reason()))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Number of children skipped by short-circuit evaluation.
    pub fn untested(&self) -> usize {
        match self.criterion.node() {
            CriterionNode::Any(children) | CriterionNode::All(children) => {
                children.len().saturating_sub(self.sub_results.len())
            }
            _ => 0,
        }
    }

    /// Label of this node in a rendered result tree, without the verdict.
    pub fn label(&self) -> String {
        if self.sub_results.is_empty() {
            return self.criterion.describe();
        }

        let untested_note = match self.untested() {
            0 => String::new(),
            n => format!(" ({} untested criteria not listed)", n),
        };

        match self.criterion.node() {
            CriterionNode::Any(_) => format!("OR{}", untested_note),
            CriterionNode::All(_) => format!("AND{}", untested_note),
            CriterionNode::Not(_) => "NOT".to_string(),
            CriterionNode::Labeled { name, .. } => format!("`{}` project type", name),
            _ => format!("`{}` criterion", self.criterion.kind()),
        }
    }

    /// Plain text result tree with nested indented lines.
    pub fn simple_tree(&self) -> String {
        PlainTextRenderer::default().render(self)
    }

    /// Render the result tree with any renderer.
    pub fn render<R: TreeRenderer>(&self, renderer: &R) -> R::Output {
        renderer.render(self)
    }
}

impl From<&CriterionResult> for bool {
    fn from(result: &CriterionResult) -> bool {
        result.result
    }
}

impl From<CriterionResult> for bool {
    fn from(result: CriterionResult) -> bool {
        result.result
    }
}

#[cfg(test)]
mod tests {
    use crate::criterion::Criterion;
    use crate::filesystem::{HasDir, HasEntry};
    use std::fs;
    use tempfile::tempdir;

    fn entry(name: &str) -> Criterion {
        Criterion::leaf(HasEntry::new(name))
    }

    #[test]
    fn test_leaf_reason() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let found = Criterion::leaf(HasDir::new("a")).test(dir.path()).unwrap();
        assert_eq!(found.reason(), "contains the directory `a`");

        let missing = Criterion::leaf(HasDir::new("b")).test(dir.path()).unwrap();
        assert_eq!(missing.reason(), "not (contains the directory `b`)");
    }

    #[test]
    fn test_composite_reasons() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let any = entry("x") | entry("a");
        assert_eq!(
            any.test(dir.path()).unwrap().reason(),
            "not (contains the entry `x`) or contains the entry `a`"
        );

        let any = entry("x") | entry("y");
        assert_eq!(
            any.test(dir.path()).unwrap().reason(),
            "not (not (contains the entry `x`)) and not (not (contains the entry `y`))"
        );

        let all = entry("a") & entry("x");
        assert_eq!(
            all.test(dir.path()).unwrap().reason(),
            "not (contains the entry `a`) or not (not (contains the entry `x`))"
        );
    }

    #[test]
    fn test_not_reason() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let not_x = !entry("x");
        assert_eq!(
            not_x.test(dir.path()).unwrap().reason(),
            "not (contains the entry `x`)"
        );

        let not_a = !entry("a");
        let result = not_a.test(dir.path()).unwrap();
        assert!(!result.result);
        assert_eq!(result.reason(), "contains the entry `a`");
    }

    #[test]
    fn test_simple_tree() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let criterion = (entry("a") | entry("b")) & !entry("c");
        let tree = criterion.test(dir.path()).unwrap().simple_tree();
        assert_eq!(
            tree,
            "TRUE: AND\n\
             \x20   TRUE: OR (1 untested criteria not listed)\n\
             \x20       TRUE: contains the entry `a`\n\
             \x20   TRUE: NOT\n\
             \x20       FALSE: contains the entry `c`"
        );
    }

    #[test]
    fn test_labeled_tree() {
        let dir = tempdir().unwrap();
        let criterion = Criterion::labeled("git", "version control", entry(".git"));
        let tree = criterion.test(dir.path()).unwrap().simple_tree();
        assert_eq!(
            tree,
            "FALSE: `git` project type\n    FALSE: contains the entry `.git`"
        );
    }

    #[test]
    fn test_truthiness() {
        let dir = tempdir().unwrap();
        let result = entry(".").test(dir.path()).unwrap();
        assert!(bool::from(&result));
    }
}
