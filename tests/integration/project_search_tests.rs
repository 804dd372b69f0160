use anyhow::Result;

use dirmagic::criterion::Criterion;
use dirmagic::filesystem::HasFile;
use dirmagic::project_types::{PYTHON_PACKAGE, RUST_CRATE, VCS};
use dirmagic::{find_projects, identify_project, CriterionError};

use crate::helpers::test_harness::TestTree;

#[test]
fn test_find_repositories() -> Result<()> {
    let tree = TestTree::new()?;
    tree.dir("a/.git")?;
    tree.dir("b/c/.git")?;
    tree.file("not_dir", "")?;

    assert_eq!(
        find_projects(tree.path(), &VCS, -1)?,
        vec![tree.join("a"), tree.join("b/c")]
    );
    assert_eq!(find_projects(tree.path(), &VCS, 1)?, vec![tree.join("a")]);
    assert!(find_projects(tree.path(), &VCS, 0)?.is_empty());
    Ok(())
}

#[test]
fn test_level_order_collection() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("x/deep/Cargo.toml", "")?;
    tree.file("y/Cargo.toml", "")?;
    tree.file("z/Cargo.toml", "")?;

    // y and z are collected at the first level before x is descended
    assert_eq!(
        find_projects(tree.path(), &RUST_CRATE, -1)?,
        vec![tree.join("y"), tree.join("z"), tree.join("x/deep")]
    );
    assert_eq!(
        find_projects(tree.path(), &RUST_CRATE, 2)?,
        vec![tree.join("y"), tree.join("z"), tree.join("x/deep")]
    );
    Ok(())
}

#[test]
fn test_find_projects_missing_start() -> Result<()> {
    let tree = TestTree::new()?;
    let criterion = Criterion::leaf(HasFile::new("Cargo.toml"));
    assert!(matches!(
        find_projects(tree.join("missing"), &criterion, -1),
        Err(CriterionError::NotFound { .. })
    ));
    Ok(())
}

#[test]
fn test_identify_mixed_project() -> Result<()> {
    let tree = TestTree::new()?;
    tree.dir(".git")?;
    tree.file("pyproject.toml", "")?;
    tree.file("Cargo.toml", "")?;
    tree.file(".vscode/settings.json", "{}")?;

    assert_eq!(
        identify_project(tree.path(), None)?,
        vec![
            ("IDE".to_string(), "Visual Studio Code project".to_string()),
            ("packaging".to_string(), "Rust crate".to_string()),
            ("packaging".to_string(), "python package".to_string()),
            ("version control".to_string(), "git".to_string()),
            ("version control".to_string(), "repository".to_string()),
        ]
    );

    let only = [PYTHON_PACKAGE.clone()];
    assert_eq!(
        identify_project(tree.path(), Some(&only))?,
        vec![("packaging".to_string(), "python package".to_string())]
    );
    Ok(())
}
