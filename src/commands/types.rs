//! `dirmagic types`: list the built-in project types.

use anyhow::Result;

use crate::project_types::all_project_types;

pub fn run() -> Result<()> {
    let mut types: Vec<_> = all_project_types()
        .iter()
        .filter_map(|t| Some((t.category()?, t.name()?, t)))
        .collect();
    types.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    println!("{:<16} {:<28} CRITERION", "CATEGORY", "NAME");
    println!("{}", "-".repeat(80));

    for (category, name, project_type) in types {
        let description = project_type
            .children()
            .first()
            .map(|inner| inner.describe())
            .unwrap_or_default();
        println!("{:<16} {:<28} {}", category, name, description);
    }

    Ok(())
}
