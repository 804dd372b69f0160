use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirmagic")]
#[command(author, version, about = "Find and classify project directories")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: ./.dirmagic.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the root directory of the project containing PATH
    Root {
        /// Start directory or file
        #[arg(default_value = ".")]
        path: PathBuf,

        /// File marking the root (repeatable)
        #[arg(short, long = "marker")]
        markers: Vec<String>,

        /// Project type marking the root, see `dirmagic types` (repeatable)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Parents searched beyond PATH; negative skips the outermost levels
        #[arg(long, allow_negative_numbers = true)]
        limit_parents: Option<isize>,

        /// Print why the root matched
        #[arg(long)]
        reason: bool,

        /// Print the result tree of the matching criterion
        #[arg(long)]
        tree: bool,
    },

    /// List the projects below PATH
    Projects {
        /// Directory to search
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Levels to search (negative = unlimited)
        #[arg(short = 'd', long, allow_negative_numbers = true)]
        maxdepth: Option<i64>,

        /// File marking a project (repeatable)
        #[arg(short, long = "marker")]
        markers: Vec<String>,

        /// Project type to look for (repeatable, default: repository)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,
    },

    /// Show the project types matching PATH
    Identify {
        /// Directory to classify
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List the built-in project types
    Types,
}
