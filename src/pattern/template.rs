//! Capture groups and name template expansion.
//!
//! Templates use brace placeholders: `{0}` is the whole match, `{1}` the
//! first group, `{name}` a named group and `{}` the next positional value.
//! `{{` and `}}` produce literal braces.

use regex::Regex;
use std::collections::BTreeMap;

use crate::error::{CriterionError, Result};

/// Values available to a template: positional and named captures.
///
/// An optional group that did not participate in the match is `None` and
/// expands to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    positional: Vec<Option<String>>,
    named: BTreeMap<String, Option<String>>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures of a regex match: the whole match first, then every group.
    pub fn from_match(regex: &Regex, captures: &regex::Captures<'_>) -> Self {
        let positional = captures
            .iter()
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();
        let named = regex
            .capture_names()
            .flatten()
            .map(|name| {
                (
                    name.to_string(),
                    captures.name(name).map(|m| m.as_str().to_string()),
                )
            })
            .collect();
        Self { positional, named }
    }

    /// Append a positional value.
    pub fn with_positional(mut self, value: impl Into<String>) -> Self {
        self.positional.push(Some(value.into()));
        self
    }

    /// Add a named value.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(name.into(), Some(value.into()));
        self
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.positional.get(index).and_then(|v| v.as_deref())
    }

    pub fn name(&self, name: &str) -> Option<&str> {
        self.named.get(name).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Substitute the placeholders of `template`.
    pub fn expand(&self, template: &str) -> Result<String> {
        let fail = |reason: String| CriterionError::Template {
            template: template.to_string(),
            reason,
        };

        let mut expanded = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        let mut next_auto = 0usize;
        let mut used_auto = false;
        let mut used_manual = false;

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    expanded.push('{');
                }
                '{' => {
                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => return Err(fail("unexpected '{' in field name".into())),
                            Some(ch) => field.push(ch),
                            None => return Err(fail("single '{' encountered".into())),
                        }
                    }

                    if field.contains([':', '!']) {
                        return Err(fail(format!(
                            "format specification in `{{{}}}` is not supported",
                            field
                        )));
                    }

                    let value = if field.is_empty() {
                        used_auto = true;
                        next_auto += 1;
                        self.positional_value(next_auto - 1)
                    } else if let Ok(index) = field.parse::<usize>() {
                        used_manual = true;
                        self.positional_value(index)
                    } else {
                        self.named
                            .get(&field)
                            .map(|v| v.as_deref().unwrap_or(""))
                            .ok_or_else(|| format!("no capture named `{}`", field))
                    };

                    if used_auto && used_manual {
                        return Err(fail(
                            "cannot switch between automatic and manual field numbering".into(),
                        ));
                    }
                    expanded.push_str(value.map_err(fail)?);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    expanded.push('}');
                }
                '}' => return Err(fail("single '}' encountered".into())),
                other => expanded.push(other),
            }
        }

        Ok(expanded)
    }

    fn positional_value(&self, index: usize) -> std::result::Result<&str, String> {
        self.positional
            .get(index)
            .map(|v| v.as_deref().unwrap_or(""))
            .ok_or_else(|| format!("replacement index {} out of range", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_match() {
        let regex = Regex::new(r"(?P<stem>.*)\.(txt)(x)?").unwrap();
        let caps = regex.captures("labels/a.txt").unwrap();
        let captures = Captures::from_match(&regex, &caps);

        assert_eq!(captures.get(0), Some("labels/a.txt"));
        assert_eq!(captures.get(1), Some("labels/a"));
        assert_eq!(captures.get(2), Some("txt"));
        assert_eq!(captures.get(3), None);
        assert_eq!(captures.len(), 4);
        assert_eq!(captures.name("stem"), Some("labels/a"));
    }

    #[test]
    fn test_expand_positional_and_named() {
        let captures = Captures::new()
            .with_positional("labels/a.txt")
            .with_positional("a")
            .with_named("ext", "png");

        assert_eq!(captures.expand("images/{1}.{ext}").unwrap(), "images/a.png");
        assert_eq!(captures.expand("{0}").unwrap(), "labels/a.txt");
        assert_eq!(captures.expand("{}-{}").unwrap(), "labels/a.txt-a");
        assert_eq!(captures.expand("{{{1}}}").unwrap(), "{a}");
        assert_eq!(captures.expand("plain").unwrap(), "plain");
    }

    #[test]
    fn test_unmatched_group_expands_empty() {
        let regex = Regex::new(r"(a)(b)?").unwrap();
        let caps = regex.captures("a").unwrap();
        let captures = Captures::from_match(&regex, &caps);
        assert_eq!(captures.expand("[{2}]").unwrap(), "[]");
    }

    #[test]
    fn test_expand_errors() {
        let captures = Captures::new().with_positional("x");

        for template in ["{3}", "{missing}", "{", "}", "{0:>4}", "{}{0}"] {
            assert!(
                matches!(captures.expand(template), Err(CriterionError::Template { .. })),
                "expected error for {}",
                template
            );
        }
    }
}
