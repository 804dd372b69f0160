//! Turning loosely typed inputs into criteria.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::criterion::{Criterion, TestFn};
use crate::error::{CriterionError, Result};

use super::HasFile;

/// Every input shape accepted where a criterion is expected.
///
/// | input | criterion |
/// |---|---|
/// | a criterion | itself |
/// | a file name or path | [`HasFile`] |
/// | a test function | `FromFunction` |
/// | a list | `Any` over the converted elements |
/// | a map | `Any` over the converted values (keys are ignored) |
/// | a TOML value | string, array and table as above, anything else is an error |
#[derive(Clone)]
pub enum CriterionSpec {
    Criterion(Criterion),
    Path(PathBuf),
    Function { description: String, test: TestFn },
    List(Vec<CriterionSpec>),
    Map(Vec<(String, CriterionSpec)>),
    Value(toml::Value),
}

impl CriterionSpec {
    /// A test function, described by the function's name.
    pub fn function<F>(test: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        let full_name = std::any::type_name::<F>();
        let short_name = full_name.rsplit("::").next().unwrap_or(full_name);
        Self::Function {
            description: format!("Test Function `{}`", short_name),
            test: Arc::new(test),
        }
    }
}

impl From<Criterion> for CriterionSpec {
    fn from(criterion: Criterion) -> Self {
        Self::Criterion(criterion)
    }
}

impl From<&Criterion> for CriterionSpec {
    fn from(criterion: &Criterion) -> Self {
        Self::Criterion(criterion.clone())
    }
}

impl From<&str> for CriterionSpec {
    fn from(name: &str) -> Self {
        Self::Path(PathBuf::from(name))
    }
}

impl From<String> for CriterionSpec {
    fn from(name: String) -> Self {
        Self::Path(PathBuf::from(name))
    }
}

impl From<&Path> for CriterionSpec {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for CriterionSpec {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<toml::Value> for CriterionSpec {
    fn from(value: toml::Value) -> Self {
        Self::Value(value)
    }
}

impl<T: Into<CriterionSpec>> From<Vec<T>> for CriterionSpec {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CriterionSpec>> From<BTreeMap<String, T>> for CriterionSpec {
    fn from(items: BTreeMap<String, T>) -> Self {
        Self::Map(items.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Convert any accepted input into a criterion.
pub fn as_root_criterion(spec: impl Into<CriterionSpec>) -> Result<Criterion> {
    match spec.into() {
        CriterionSpec::Criterion(criterion) => Ok(criterion),
        CriterionSpec::Path(path) => Ok(Criterion::leaf(HasFile::new(
            path.to_string_lossy().into_owned(),
        ))),
        CriterionSpec::Function { description, test } => Ok(Criterion::from_fn_with_description(
            description,
            move |dir: &Path| (*test)(dir),
        )),
        CriterionSpec::List(items) => any_over(items),
        CriterionSpec::Map(items) => any_over(items.into_iter().map(|(_, v)| v).collect()),
        CriterionSpec::Value(value) => from_value(value),
    }
}

fn any_over(items: Vec<CriterionSpec>) -> Result<Criterion> {
    let criteria = items
        .into_iter()
        .map(as_root_criterion)
        .collect::<Result<Vec<_>>>()?;
    Ok(Criterion::any_of(criteria))
}

fn from_value(value: toml::Value) -> Result<Criterion> {
    match value {
        toml::Value::String(name) => Ok(Criterion::leaf(HasFile::new(name))),
        toml::Value::Array(items) => any_over(items.into_iter().map(CriterionSpec::Value).collect()),
        toml::Value::Table(table) => {
            any_over(table.into_iter().map(|(_, v)| CriterionSpec::Value(v)).collect())
        }
        other => Err(CriterionError::Config(format!(
            "cannot convert {} to criterion",
            other.type_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::CriterionNode;
    use crate::filesystem::HasDir;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_criterion_passes_through() {
        let criterion = Criterion::leaf(HasDir::new(".git"));
        let converted = as_root_criterion(&criterion).unwrap();
        assert!(converted.same_as(&criterion));
    }

    #[test]
    fn test_name_becomes_has_file() {
        let criterion = as_root_criterion("setup.py").unwrap();
        assert_eq!(criterion.describe(), "has a file `setup.py`");
        assert_eq!(criterion.kind(), "HasFile");

        let criterion = as_root_criterion(PathBuf::from("a/b.txt")).unwrap();
        assert_eq!(criterion.describe(), "has a file `a/b.txt`");
    }

    #[test]
    fn test_list_and_map_become_any() {
        let criterion = as_root_criterion(vec!["a", "b"]).unwrap();
        assert!(matches!(criterion.node(), CriterionNode::Any(_)));
        assert_eq!(criterion.describe(), "has a file `a` or has a file `b`");

        let mut map = BTreeMap::new();
        map.insert("first".to_string(), "x");
        map.insert("second".to_string(), "y");
        let criterion = as_root_criterion(map).unwrap();
        assert_eq!(criterion.describe(), "has a file `x` or has a file `y`");
    }

    fn has_marker(dir: &Path) -> bool {
        dir.join("marker").exists()
    }

    #[test]
    fn test_function_becomes_criterion() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("marker"), "").unwrap();

        let criterion = as_root_criterion(CriterionSpec::function(has_marker)).unwrap();
        assert_eq!(criterion.describe(), "Test Function `has_marker`");
        assert!(criterion.test(dir.path()).unwrap().result);
    }

    #[test]
    fn test_toml_values() {
        let value: toml::Value = toml::from_str(
            r#"
            markers = [".here", ["setup.py", "pyproject.toml"], { r = "DESCRIPTION" }]
            "#,
        )
        .unwrap();
        let markers = value.get("markers").cloned().unwrap();
        let criterion = as_root_criterion(markers).unwrap();
        assert_eq!(criterion.children().len(), 3);
        assert_eq!(
            criterion.describe(),
            "has a file `.here` or has a file `setup.py` or has a file `pyproject.toml` or has a file `DESCRIPTION`"
        );
    }

    #[test]
    fn test_unsupported_value_is_config_error() {
        let result = as_root_criterion(toml::Value::Integer(3));
        assert!(matches!(result, Err(CriterionError::Config(_))));

        let result = as_root_criterion(vec![toml::Value::Boolean(true)]);
        assert!(matches!(result, Err(CriterionError::Config(_))));
    }
}
