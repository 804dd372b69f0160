//! Rendering of result trees and criterion outlines.
//!
//! The plain text renderer is the only renderer owned by this crate. Other
//! front ends (rich terminal trees, HTML, ...) implement [`TreeRenderer`]
//! on top of [`CriterionResult::label`] and `sub_results`.

use super::{Criterion, CriterionNode, CriterionResult};

/// Turns a result tree into some presentation.
pub trait TreeRenderer {
    type Output;

    fn render(&self, result: &CriterionResult) -> Self::Output;
}

/// Renders `TRUE: <label>` lines with children indented below their parent.
#[derive(Debug, Clone)]
pub struct PlainTextRenderer {
    indent: usize,
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl PlainTextRenderer {
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }
}

impl TreeRenderer for PlainTextRenderer {
    type Output = String;

    fn render(&self, result: &CriterionResult) -> String {
        let verdict = if result.result { "TRUE" } else { "FALSE" };
        let head = format!("{}: {}", verdict, result.label());
        if result.sub_results.is_empty() {
            return head;
        }

        let pad = " ".repeat(self.indent);
        let children = result
            .sub_results
            .iter()
            .map(|r| indent_text(&self.render(r), &pad))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}", head, children)
    }
}

fn indent_text(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Criterion {
    /// Plain text outline of the criterion itself, without any results.
    pub fn outline(&self) -> String {
        let label = match self.node() {
            CriterionNode::Any(_) => "OR".to_string(),
            CriterionNode::All(_) => "AND".to_string(),
            CriterionNode::Not(_) => "NOT".to_string(),
            CriterionNode::Labeled { name, .. } => format!("`{}` project type", name),
            CriterionNode::Match(m) => m.outline_label(),
            CriterionNode::Leaf(_) | CriterionNode::FromFunction { .. } => {
                return self.describe()
            }
        };

        let mut lines = vec![label];
        for child in self.children() {
            lines.push(indent_text(&child.outline(), "    "));
        }
        lines.join("\n")
    }
}
