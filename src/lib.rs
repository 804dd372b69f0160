//! Composable filesystem criteria for finding and classifying project
//! directories.
//!
//! - [`criterion`] - the criterion algebra and explainable results
//! - [`filesystem`] - leaf criteria testing files and directories
//! - [`pattern`] - criteria parametrized by pattern matches
//! - [`search`] - root search, project search and classification
//! - [`project_types`] - built-in catalog of project types

pub mod cli;
pub mod commands;
pub mod config;
pub mod criterion;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod pattern;
pub mod project_types;
pub mod search;

pub use config::Config;
pub use criterion::{and_of, not_of, or_of, Criterion, CriterionResult};
pub use error::{CriterionError, Result};
pub use filesystem::as_root_criterion;
pub use search::{
    find_projects, find_projects_by, find_root, find_root_with_reason, identify_project,
    list_search_dirs, start_path, RootFinder,
};
