use anyhow::Result;

use dirmagic::Config;

use crate::helpers::test_harness::TestTree;

#[test]
fn test_configured_markers_drive_root_search() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file(
        ".dirmagic.toml",
        r#"
[search]
markers = ["WORKSPACE", { bazel = "MODULE.bazel" }]
maxdepth = -1

[logging]
stderr = false
"#,
    )?;
    tree.file("service/MODULE.bazel", "")?;
    let start = tree.dir("service/src/handlers")?;

    let config = Config::load(tree.path())?;
    assert_eq!(config.search.maxdepth, -1);
    assert!(!config.logging.stderr);

    let found = config.root_finder()?.find_with_reason(&start)?;
    assert_eq!(found.root, tree.join("service"));
    assert_eq!(found.reason(), "has a file `MODULE.bazel`");

    tree.file("service/src/WORKSPACE", "")?;
    assert_eq!(config.root_finder()?.find(&start)?, tree.join("service/src"));
    Ok(())
}

#[test]
fn test_configured_limit_parents() -> Result<()> {
    let tree = TestTree::new()?;
    let config_path = tree.file(
        "custom.toml",
        "[search]\nmarkers = [\"marker\"]\nlimit_parents = 1\n",
    )?;
    tree.file("marker", "")?;
    let start = tree.dir("a/b")?;

    let config = Config::load_file(&config_path)?;
    assert!(config.root_finder()?.find(&start).is_err());
    assert_eq!(
        config.root_finder()?.limit_parents(None).find(&start)?,
        tree.path()
    );
    Ok(())
}
