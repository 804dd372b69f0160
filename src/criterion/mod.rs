//! Criterion algebra for testing directories.
//!
//! A [`Criterion`] is an immutable predicate over a directory path. Leaf
//! criteria test the filesystem directly (see [`crate::filesystem`] and
//! [`crate::pattern`]); composite criteria combine other criteria with
//! boolean logic. Evaluating a criterion with [`Criterion::test`] yields a
//! [`CriterionResult`] tree which both carries the verdict and explains it.
//!
//! # Composition
//!
//! Criteria are combined with [`or_of`], [`and_of`] and [`not_of`] or the
//! equivalent `|`, `&` and `!` operators. Combining never mutates the
//! operands; a new criterion is returned every time.
//!
//! ```
//! use dirmagic::criterion::Criterion;
//! use dirmagic::filesystem::{HasDir, HasFile};
//!
//! let python = Criterion::leaf(HasFile::new("setup.py")) | Criterion::leaf(HasFile::new("pyproject.toml"));
//! let not_git = !Criterion::leaf(HasDir::new(".git"));
//! let criterion = python & not_git;
//! assert_eq!(
//!     criterion.describe(),
//!     "(has a file `setup.py` or has a file `pyproject.toml`) and not (contains the directory `.git`)"
//! );
//! ```
//!
//! # Normalization
//!
//! Two normalizations happen when criteria are built, never during
//! evaluation:
//!
//! - `!(!c)` returns `c` itself instead of nesting two negations.
//! - Or-ing two `Any` nodes (and-ing two `All` nodes) produces a single node
//!   holding the concatenated children, preserving their order. Only one
//!   level is merged.

mod render;
mod result;

pub use render::{PlainTextRenderer, TreeRenderer};
pub use result::CriterionResult;

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::path::Path;
use std::sync::Arc;

use tracing::trace;

use crate::error::Result;
use crate::pattern::{Captures, MatchCriterion};

/// A concrete filesystem test, the leaf of a criterion tree.
///
/// Implementations must be deterministic for a fixed filesystem snapshot and
/// must report a missing directory as `Ok(false)`, never as an error.
pub trait Predicate: fmt::Debug + Send + Sync {
    /// Test the predicate against `dir`.
    fn test(&self, dir: &Path) -> Result<bool>;

    /// Human readable description, usable standalone and nested.
    fn describe(&self) -> String;

    /// Short name of the predicate type, used when rendering result trees.
    fn kind(&self) -> &'static str;

    /// Specialize the predicate's name template with match captures.
    ///
    /// Returns `None` when the predicate carries no template.
    fn expand(&self, _captures: &Captures) -> Result<Option<Arc<dyn Predicate>>> {
        Ok(None)
    }
}

/// Test function wrapped by [`Criterion::from_fn`].
pub type TestFn = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// The node variants of a criterion tree.
pub enum CriterionNode {
    /// Concrete filesystem test.
    Leaf(Arc<dyn Predicate>),
    /// True if at least one child is true.
    Any(Vec<Criterion>),
    /// True if every child is true.
    All(Vec<Criterion>),
    /// Logical negation.
    Not(Criterion),
    /// A named project type, transparent for evaluation.
    Labeled {
        name: String,
        category: String,
        inner: Criterion,
    },
    /// Arbitrary test function with a description.
    FromFunction { test: TestFn, description: String },
    /// Quantified test over the entries matching a pattern.
    Match(MatchCriterion),
}

/// An immutable, cheaply clonable predicate over a directory path.
#[derive(Clone)]
pub struct Criterion(Arc<CriterionNode>);

impl Criterion {
    /// Wrap a node.
    pub fn from_node(node: CriterionNode) -> Self {
        Self(Arc::new(node))
    }

    /// Create a leaf criterion from a predicate.
    pub fn leaf<P: Predicate + 'static>(predicate: P) -> Self {
        Self::from_node(CriterionNode::Leaf(Arc::new(predicate)))
    }

    /// `Any` over the given criteria, without flattening.
    pub fn any_of<I: IntoIterator<Item = Criterion>>(criteria: I) -> Self {
        Self::from_node(CriterionNode::Any(criteria.into_iter().collect()))
    }

    /// `All` over the given criteria, without flattening.
    pub fn all_of<I: IntoIterator<Item = Criterion>>(criteria: I) -> Self {
        Self::from_node(CriterionNode::All(criteria.into_iter().collect()))
    }

    /// Attach a project type name and category to a criterion.
    pub fn labeled(name: impl Into<String>, category: impl Into<String>, inner: Criterion) -> Self {
        Self::from_node(CriterionNode::Labeled {
            name: name.into(),
            category: category.into(),
            inner,
        })
    }

    /// Criterion from a test function, described by the function's name.
    pub fn from_fn<F>(test: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        let full_name = std::any::type_name::<F>();
        let short_name = full_name.rsplit("::").next().unwrap_or(full_name);
        Self::from_fn_with_description(format!("Test Function `{}`", short_name), test)
    }

    /// Criterion from a test function with an explicit description.
    pub fn from_fn_with_description<F>(description: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self::from_node(CriterionNode::FromFunction {
            test: Arc::new(test),
            description: description.into(),
        })
    }

    /// The node this criterion wraps.
    pub fn node(&self) -> &CriterionNode {
        &self.0
    }

    /// Whether both handles point at the very same node.
    pub fn same_as(&self, other: &Criterion) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Direct children of a composite criterion.
    pub fn children(&self) -> &[Criterion] {
        match self.node() {
            CriterionNode::Any(children) | CriterionNode::All(children) => children,
            CriterionNode::Not(inner) | CriterionNode::Labeled { inner, .. } => {
                std::slice::from_ref(inner)
            }
            CriterionNode::Match(m) => std::slice::from_ref(m.inner()),
            _ => &[],
        }
    }

    /// Project type name, for labeled criteria.
    pub fn name(&self) -> Option<&str> {
        match self.node() {
            CriterionNode::Labeled { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Project type category, for labeled criteria.
    pub fn category(&self) -> Option<&str> {
        match self.node() {
            CriterionNode::Labeled { category, .. } => Some(category),
            _ => None,
        }
    }

    /// Name of the concrete criterion kind.
    pub fn kind(&self) -> &'static str {
        match self.node() {
            CriterionNode::Leaf(predicate) => predicate.kind(),
            CriterionNode::Any(_) => "Any",
            CriterionNode::All(_) => "All",
            CriterionNode::Not(_) => "Not",
            CriterionNode::Labeled { .. } => "ProjectType",
            CriterionNode::FromFunction { .. } => "FromFunction",
            CriterionNode::Match(m) => m.kind(),
        }
    }

    /// Describe the criterion.
    ///
    /// An `Any` nested in an `All` is parenthesized to keep its grouping.
    pub fn describe(&self) -> String {
        match self.node() {
            CriterionNode::Leaf(predicate) => predicate.describe(),
            CriterionNode::Any(children) => children
                .iter()
                .map(Criterion::describe)
                .collect::<Vec<_>>()
                .join(" or "),
            CriterionNode::All(children) => children
                .iter()
                .map(|c| match c.node() {
                    CriterionNode::Any(_) => format!("({})", c.describe()),
                    _ => c.describe(),
                })
                .collect::<Vec<_>>()
                .join(" and "),
            CriterionNode::Not(inner) => format!("not ({})", inner.describe()),
            CriterionNode::Labeled { name, category, .. } => format!("{}, {}", category, name),
            CriterionNode::FromFunction { description, .. } => description.clone(),
            CriterionNode::Match(m) => m.describe(),
        }
    }

    /// Test the criterion against `dir`.
    ///
    /// `Any` stops at the first true child, `All` at the first false one, so
    /// `sub_results` may hold fewer entries than there are children.
    pub fn test(&self, dir: &Path) -> Result<CriterionResult> {
        let (result, sub_results) = match self.node() {
            CriterionNode::Leaf(predicate) => (predicate.test(dir)?, Vec::new()),
            CriterionNode::Any(children) => short_circuit(children, dir, true)?,
            CriterionNode::All(children) => short_circuit(children, dir, false)?,
            CriterionNode::Not(inner) => {
                let inner_result = inner.test(dir)?;
                (!inner_result.result, vec![inner_result])
            }
            CriterionNode::Labeled { inner, .. } => {
                let inner_result = inner.test(dir)?;
                (inner_result.result, vec![inner_result])
            }
            CriterionNode::FromFunction { test, .. } => ((**test)(dir), Vec::new()),
            CriterionNode::Match(m) => m.evaluate(dir)?,
        };

        trace!(
            criterion = self.kind(),
            dir = %dir.display(),
            result,
            "Tested criterion"
        );

        Ok(CriterionResult::new(result, self.clone(), dir, sub_results))
    }

    /// Specialize every name template in the tree with `captures`.
    ///
    /// The criterion itself is left untouched. Quantified criteria and test
    /// functions are returned as they are.
    pub fn expand(&self, captures: &Captures) -> Result<Criterion> {
        let node = match self.node() {
            CriterionNode::Leaf(predicate) => match predicate.expand(captures)? {
                Some(expanded) => CriterionNode::Leaf(expanded),
                None => return Ok(self.clone()),
            },
            CriterionNode::Any(children) => CriterionNode::Any(expand_all(children, captures)?),
            CriterionNode::All(children) => CriterionNode::All(expand_all(children, captures)?),
            CriterionNode::Not(inner) => CriterionNode::Not(inner.expand(captures)?),
            CriterionNode::Labeled {
                name,
                category,
                inner,
            } => CriterionNode::Labeled {
                name: name.clone(),
                category: category.clone(),
                inner: inner.expand(captures)?,
            },
            CriterionNode::FromFunction { .. } | CriterionNode::Match(_) => {
                return Ok(self.clone())
            }
        };
        Ok(Criterion::from_node(node))
    }

    /// `self | other`.
    pub fn or(&self, other: &Criterion) -> Criterion {
        or_of(self, other)
    }

    /// `self & other`.
    pub fn and(&self, other: &Criterion) -> Criterion {
        and_of(self, other)
    }

    /// `!self`.
    pub fn negate(&self) -> Criterion {
        not_of(self)
    }
}

fn short_circuit(
    children: &[Criterion],
    dir: &Path,
    stop_on: bool,
) -> Result<(bool, Vec<CriterionResult>)> {
    let mut sub_results = Vec::with_capacity(children.len());
    for child in children {
        let child_result = child.test(dir)?;
        let verdict = child_result.result;
        sub_results.push(child_result);
        if verdict == stop_on {
            return Ok((stop_on, sub_results));
        }
    }
    Ok((!stop_on, sub_results))
}

fn expand_all(children: &[Criterion], captures: &Captures) -> Result<Vec<Criterion>> {
    children.iter().map(|c| c.expand(captures)).collect()
}

/// Logical or of two criteria, merging `Any` operands.
pub fn or_of(left: &Criterion, right: &Criterion) -> Criterion {
    let mut children = match left.node() {
        CriterionNode::Any(children) => children.clone(),
        _ => vec![left.clone()],
    };
    match right.node() {
        CriterionNode::Any(more) => children.extend(more.iter().cloned()),
        _ => children.push(right.clone()),
    }
    Criterion::from_node(CriterionNode::Any(children))
}

/// Logical and of two criteria, merging `All` operands.
pub fn and_of(left: &Criterion, right: &Criterion) -> Criterion {
    let mut children = match left.node() {
        CriterionNode::All(children) => children.clone(),
        _ => vec![left.clone()],
    };
    match right.node() {
        CriterionNode::All(more) => children.extend(more.iter().cloned()),
        _ => children.push(right.clone()),
    }
    Criterion::from_node(CriterionNode::All(children))
}

/// Logical negation; negating a `Not` returns its inner criterion.
pub fn not_of(criterion: &Criterion) -> Criterion {
    match criterion.node() {
        CriterionNode::Not(inner) => inner.clone(),
        _ => Criterion::from_node(CriterionNode::Not(criterion.clone())),
    }
}

impl BitOr for Criterion {
    type Output = Criterion;

    fn bitor(self, rhs: Criterion) -> Criterion {
        or_of(&self, &rhs)
    }
}

impl<'a> BitOr<&'a Criterion> for &'a Criterion {
    type Output = Criterion;

    fn bitor(self, rhs: &'a Criterion) -> Criterion {
        or_of(self, rhs)
    }
}

impl BitAnd for Criterion {
    type Output = Criterion;

    fn bitand(self, rhs: Criterion) -> Criterion {
        and_of(&self, &rhs)
    }
}

impl<'a> BitAnd<&'a Criterion> for &'a Criterion {
    type Output = Criterion;

    fn bitand(self, rhs: &'a Criterion) -> Criterion {
        and_of(self, rhs)
    }
}

impl Not for Criterion {
    type Output = Criterion;

    fn not(self) -> Criterion {
        not_of(&self)
    }
}

impl Not for &Criterion {
    type Output = Criterion;

    fn not(self) -> Criterion {
        not_of(self)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl fmt::Debug for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = self.describe();
        let mut chars = description.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        write!(f, "<{}: {}>", self.kind(), capitalized)
    }
}
