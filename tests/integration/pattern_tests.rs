use anyhow::Result;

use dirmagic::criterion::Criterion;
use dirmagic::filesystem::HasFile;
use dirmagic::pattern::{matching_entries, translate, MatchCriterion, Spy, SuffixIsIn};

use crate::helpers::test_harness::TestTree;

fn file(name: &str) -> Criterion {
    Criterion::leaf(HasFile::new(name))
}

fn labeled_images_data() -> Result<Criterion> {
    let labels_are_text = MatchCriterion::all(
        "labels/.*$",
        file("{0}") & Criterion::leaf(SuffixIsIn::new("{0}", [".txt"])),
    )?;
    let every_label_has_image = MatchCriterion::all(
        r"labels/(.*)\.txt$",
        file("images/{1}.png") | file("images/{1}.jpg"),
    )?;
    Ok(file("classes.txt") & labels_are_text & every_label_has_image)
}

#[test]
fn test_file_pair_use_case() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("images/a.png", "")?;
    tree.file("images/b.jpg", "")?;
    tree.file("images/c.jpg", "")?;
    tree.file("labels/a.txt", "")?;
    tree.file("labels/b.txt", "")?;
    tree.file("classes.txt", "")?;

    let criterion = labeled_images_data()?;
    assert!(criterion.test(tree.path())?.result);

    tree.file("labels/d.txt", "")?;
    let result = criterion.test(tree.path())?;
    assert!(!result.result);
    assert_eq!(result.sub_results.len(), 3);

    tree.file("images/d.jpg", "")?;
    assert!(criterion.test(tree.path())?.result);
    Ok(())
}

#[test]
fn test_glob_pairs_with_named_groups() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("data/2023.csv", "")?;
    tree.file("data/2023.meta", "")?;
    tree.file("data/2024.csv", "")?;

    let every_csv_has_meta = MatchCriterion::all(
        r"^data/(?P<year>\d+)\.csv$",
        file("data/{year}.meta"),
    )?;
    let result = every_csv_has_meta.test(tree.path())?;
    assert!(!result.result);
    assert_eq!(
        result.sub_results.last().map(|r| r.reason()),
        Some("not (has a file `data/2024.meta`)".to_string())
    );

    tree.file("data/2024.meta", "")?;
    assert!(every_csv_has_meta.test(tree.path())?.result);

    let glob = MatchCriterion::any_glob("data/*.meta", file("data/{1}.csv"))?;
    assert!(glob.test(tree.path())?.result);
    Ok(())
}

#[test]
fn test_spy_sees_every_match() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("one.txt", "")?;
    tree.file("two.txt", "")?;

    let criterion = MatchCriterion::all(r"(.*)\.txt", file("{0}") & Criterion::leaf(Spy::new()))?;
    let result = criterion.test(tree.path())?;
    assert!(result.result);
    assert_eq!(result.sub_results.len(), 2);
    Ok(())
}

#[test]
fn test_matching_entries_relative_paths() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("src/lib.rs", "")?;
    tree.file("src/bin/main.rs", "")?;
    tree.file("README.md", "")?;

    let pattern = regex::Regex::new(&translate("*.rs"))?;
    let found: Vec<String> = matching_entries(tree.path(), &pattern, -1)?
        .iter()
        .filter_map(|c| c.get(0).map(str::to_string))
        .collect();
    assert_eq!(found, vec!["src/lib.rs", "src/bin/main.rs"]);
    Ok(())
}
