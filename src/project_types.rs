//! Built-in catalog of project types.
//!
//! Every entry is a labeled criterion with a display name and a category.
//! [`crate::search::identify_project`] tests all of them by default.

use lazy_static::lazy_static;

use crate::criterion::Criterion;
use crate::filesystem::{HasBasename, HasDir, HasFile, HasFilePattern};

fn file(name: &str) -> Criterion {
    Criterion::leaf(HasFile::new(name))
}

fn dir(name: &str) -> Criterion {
    Criterion::leaf(HasDir::new(name))
}

lazy_static! {
    // ============================================================================
    // Data pipelines
    // ============================================================================

    /// [DVC](https://dvc.org/) project directory.
    pub static ref DVC: Criterion = Criterion::labeled("DVC project", "data pipelines", dir(".dvc"));

    /// [remake](https://github.com/richfitz/remake) project directory.
    pub static ref REMAKE: Criterion = Criterion::labeled("remake", "data pipelines", file("remake.yml"));

    /// [drake](https://docs.ropensci.org/drake/) project directory, superseded by targets.
    pub static ref DRAKE: Criterion = Criterion::labeled("drake", "data pipelines", dir(".drake"));

    /// [targets](https://docs.ropensci.org/targets/) project directory.
    pub static ref TARGETS: Criterion = Criterion::labeled("targets", "data pipelines", file("_targets.R"));

    // ============================================================================
    // IDE
    // ============================================================================

    /// Visual Studio Code project.
    ///
    /// Requires `.vscode/settings.json`; a bare `.vscode` directory also
    /// exists in the home directory.
    pub static ref VSCODE: Criterion = Criterion::labeled(
        "Visual Studio Code project",
        "IDE",
        file(".vscode/settings.json"),
    );

    pub static ref IDEA: Criterion = Criterion::labeled("IntelliJ IDEA project", "IDE", dir(".idea"));

    pub static ref SPYDER: Criterion = Criterion::labeled("Spyder project", "IDE", dir(".spyproject"));

    pub static ref ANACONDA: Criterion =
        Criterion::labeled("Anaconda project", "IDE", file("anaconda-project.yml"));

    /// RStudio/Posit project: a `.Rproj` file starting with its version line.
    pub static ref RSTUDIO: Criterion = Criterion::labeled(
        "RStudio/Posit",
        "IDE",
        Criterion::leaf(
            HasFilePattern::with_contents("[.]Rproj$", "^Version: ", Some(1), false)
                .expect("Failed to create RStudio criterion"),
        ),
    );

    pub static ref PROJECTILE: Criterion =
        Criterion::labeled("projectile project", "IDE", file(".projectile"));

    // ============================================================================
    // Packaging
    // ============================================================================

    pub static ref PYTHON_PACKAGE: Criterion = Criterion::labeled(
        "python package",
        "packaging",
        file("setup.py") | file("setup.cfg") | file("pyproject.toml"),
    );

    pub static ref CONDA_FEEDSTOCK: Criterion = Criterion::labeled(
        "conda feedstock",
        "packaging",
        file("recipes/meta.yaml") & file("conda-forge.yml"),
    );

    /// R source package: a `DESCRIPTION` file declaring the package name.
    pub static ref R_PACKAGE: Criterion = Criterion::labeled(
        "R package",
        "packaging",
        Criterion::leaf(
            HasFile::with_contents("DESCRIPTION", "^Package: ", None, false)
                .expect("Failed to create R package criterion"),
        ),
    );

    pub static ref RUST_CRATE: Criterion = Criterion::labeled("Rust crate", "packaging", file("Cargo.toml"));

    pub static ref NODE_PACKAGE: Criterion =
        Criterion::labeled("Node.js package", "packaging", file("package.json"));

    pub static ref GO_MODULE: Criterion = Criterion::labeled("Go module", "packaging", file("go.mod"));

    pub static ref MAVEN: Criterion = Criterion::labeled("Maven project", "packaging", file("pom.xml"));

    pub static ref GRADLE: Criterion = Criterion::labeled(
        "Gradle project",
        "packaging",
        file("build.gradle") | file("build.gradle.kts"),
    );

    // ============================================================================
    // Misc
    // ============================================================================

    pub static ref PKGDOWN: Criterion = Criterion::labeled(
        "pkgdown",
        "misc",
        file("_pkgdown.yml") | file("_pkgdown.yaml") | file("pkgdown/_pkgdown.yml") | file("inst/_pkgdown.yml"),
    );

    // TODO: also accept `tests/testthat` and `testthat` subdirectories once
    // a search can report the matching subdirectory instead of its parent.
    pub static ref TESTTHAT: Criterion =
        Criterion::labeled("testthat project", "misc", Criterion::leaf(HasBasename::new("testthat")));

    // ============================================================================
    // Version control
    // ============================================================================

    /// git repository, including worktrees whose `.git` is a `gitdir:` file.
    pub static ref GIT: Criterion = Criterion::labeled(
        "git",
        "version control",
        dir(".git")
            | Criterion::leaf(
                HasFile::with_contents(".git", "^gitdir: ", None, false)
                    .expect("Failed to create git worktree criterion"),
            ),
    );

    pub static ref SVN: Criterion = Criterion::labeled("subversion", "version control", dir(".svn"));

    /// Any version control repository.
    pub static ref VCS: Criterion = Criterion::labeled("repository", "version control", &*GIT | &*SVN);

    static ref ALL: Vec<Criterion> = vec![
        DVC.clone(),
        VSCODE.clone(),
        IDEA.clone(),
        SPYDER.clone(),
        ANACONDA.clone(),
        PYTHON_PACKAGE.clone(),
        CONDA_FEEDSTOCK.clone(),
        RSTUDIO.clone(),
        R_PACKAGE.clone(),
        REMAKE.clone(),
        DRAKE.clone(),
        TARGETS.clone(),
        PKGDOWN.clone(),
        PROJECTILE.clone(),
        TESTTHAT.clone(),
        RUST_CRATE.clone(),
        NODE_PACKAGE.clone(),
        GO_MODULE.clone(),
        MAVEN.clone(),
        GRADLE.clone(),
        GIT.clone(),
        SVN.clone(),
        VCS.clone(),
    ];
}

/// Every built-in project type.
pub fn all_project_types() -> &'static [Criterion] {
    &ALL
}

/// Look up a built-in project type by name, ignoring ASCII case.
pub fn find_project_type(name: &str) -> Option<&'static Criterion> {
    all_project_types()
        .iter()
        .find(|project_type| project_type.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
}
