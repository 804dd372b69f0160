//! Search algorithms driving criteria over the filesystem.
//!
//! - `ancestors` - start path resolution and the ancestor chain
//! - `root` - upward search for the innermost matching ancestor
//! - `projects` - downward search for matching subdirectories and
//!   classification against the project type catalog
//!
//! Everything runs synchronously on the calling thread; the filesystem is
//! read but never written.

mod ancestors;
mod projects;
mod root;

pub use ancestors::{list_search_dirs, start_path};
pub use projects::{find_projects, find_projects_by, identify_project};
pub use root::{find_root, find_root_with_reason, RootFinder, RootMatch, DEFAULT_ROOT_CRITERIA};
