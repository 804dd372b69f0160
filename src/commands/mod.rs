//! Implementations of the `dirmagic` subcommands.

pub mod identify;
pub mod projects;
pub mod root;
pub mod types;

use anyhow::{anyhow, Result};

use crate::criterion::Criterion;
use crate::filesystem::as_root_criterion;
use crate::project_types::find_project_type;

/// Criteria selected on the command line: marker files first, then project types.
pub(crate) fn selected_criteria(markers: &[String], types: &[String]) -> Result<Vec<Criterion>> {
    let mut criteria = markers
        .iter()
        .map(|marker| as_root_criterion(marker.as_str()))
        .collect::<crate::Result<Vec<_>>>()?;

    for name in types {
        let project_type = find_project_type(name).ok_or_else(|| {
            anyhow!(
                "Unknown project type '{}'. Run 'dirmagic types' to list them.",
                name
            )
        })?;
        criteria.push(project_type.clone());
    }

    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_criteria() {
        let criteria =
            selected_criteria(&["Makefile".to_string()], &["git".to_string()]).unwrap();
        assert_eq!(criteria.len(), 2);
        assert_eq!(criteria[0].describe(), "has a file `Makefile`");
        assert_eq!(criteria[1].name(), Some("git"));

        assert!(selected_criteria(&[], &[]).unwrap().is_empty());
        assert!(selected_criteria(&[], &["mercurial".to_string()]).is_err());
    }
}
