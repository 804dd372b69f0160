//! Criteria parametrized by the entries matching a pattern.
//!
//! A quantified criterion ([`MatchCriterion`]) enumerates the entries below
//! a directory whose relative path matches a regex (or a glob compiled with
//! [`translate`]). The capture groups of each match fill the name templates
//! of an inner criterion, which is then tested against the directory.
//!
//! ```
//! use dirmagic::criterion::Criterion;
//! use dirmagic::filesystem::HasFile;
//! use dirmagic::pattern::MatchCriterion;
//!
//! // every image needs a label file next to it
//! let labeled = MatchCriterion::all_glob("images/*.png", Criterion::leaf(HasFile::new("labels/{1}.txt")))?;
//! assert_eq!(labeled.kind(), "AllMatch");
//! # Ok::<(), dirmagic::CriterionError>(())
//! ```

mod matching;
mod names;
mod template;
mod translate;

pub use matching::{matching_entries, visit_matching_entries, MatchCriterion, Quantifier};
pub use names::{suffix, FileMimeType, IsIn, MatchesPattern, SuffixIsIn, Spy};
pub use template::Captures;
pub use translate::{glob_to_regex, translate};
