use anyhow::Result;

use dirmagic::criterion::Criterion;
use dirmagic::filesystem::{HasEntry, HasFile};
use dirmagic::project_types::VCS;
use dirmagic::{find_root, find_root_with_reason, CriterionError, RootFinder};

use crate::helpers::test_harness::TestTree;

#[test]
fn test_default_markers_find_git_root() -> Result<()> {
    let tree = TestTree::new()?;
    tree.dir(".git")?;
    let deep = tree.dir("a/b/c")?;

    assert_eq!(find_root(&deep)?, tree.path());

    let (root, reason) = find_root_with_reason(&deep)?;
    assert_eq!(root, tree.path());
    assert_eq!(reason, "contains the directory `.git`");
    Ok(())
}

#[test]
fn test_start_from_file() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("setup.py", "")?;
    let module = tree.file("pkg/module.py", "")?;

    assert_eq!(find_root(&module)?, tree.path());
    Ok(())
}

#[test]
fn test_project_type_as_root_criterion() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("my_file", "")?;
    tree.dir("a/.git")?;
    let b = tree.dir("a/b")?;

    let finder = RootFinder::new([Criterion::leaf(HasEntry::new("my_file.txt")), VCS.clone()]);
    let found = finder.find_with_reason(&b)?;
    assert_eq!(found.root, tree.join("a"));
    assert_eq!(found.result.criterion.name(), Some("repository"));
    assert_eq!(
        found.result.simple_tree(),
        "TRUE: `repository` project type\n\
         \x20   TRUE: OR (1 untested criteria not listed)\n\
         \x20       TRUE: `git` project type\n\
         \x20           TRUE: OR (1 untested criteria not listed)\n\
         \x20               TRUE: contains the directory `.git`"
    );
    Ok(())
}

#[test]
fn test_content_criterion_reason() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("my_file", "a\nb\nc\nd\n")?;
    let deep = tree.dir("a/b/c")?;

    let finder = RootFinder::new([Criterion::leaf(HasFile::new("my_file"))]);
    assert_eq!(finder.find(&deep)?, tree.path());

    let finder = RootFinder::new([Criterion::leaf(HasFile::with_contents(
        "my_file",
        "a",
        Some(1),
        true,
    )?)]);
    let found = finder.find_with_reason(tree.path())?;
    assert_eq!(
        found.reason(),
        "has a file `my_file` and file contains a line with the contents `a` in the first 1 line/s"
    );
    Ok(())
}

#[test]
fn test_exhausted_search_names_start() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("my_file", "")?;

    let finder = RootFinder::new([Criterion::leaf(HasEntry::new("my_file_not there"))]);
    match finder.find(tree.path()) {
        Err(CriterionError::NoRootFound { start }) => assert_eq!(start, tree.path()),
        other => panic!("expected NoRootFound, got {:?}", other),
    }

    let missing = finder.find(tree.join("b"));
    assert!(matches!(missing, Err(CriterionError::NotFound { .. })));
    Ok(())
}

#[test]
fn test_negative_limit_skips_outer_levels() -> Result<()> {
    let tree = TestTree::new()?;
    let start = tree.dir("projects/fancy/src")?;
    tree.file("marker", "")?;

    let finder = RootFinder::new([Criterion::leaf(HasFile::new("marker"))]);
    assert_eq!(finder.clone().find(&start)?, tree.path());

    // count the levels above the tree root and cut exactly those away
    let levels_above = tree.path().ancestors().count() - 1;
    let limit = -(levels_above as isize);
    assert_eq!(finder.clone().limit_parents(Some(limit)).find(&start)?, tree.path());
    assert!(matches!(
        finder.limit_parents(Some(limit - 1)).find(&start),
        Err(CriterionError::NoRootFound { .. })
    ));
    Ok(())
}
