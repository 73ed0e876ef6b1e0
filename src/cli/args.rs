//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Course planner: load a course catalog, list it in order and look up courses
#[derive(Parser, Debug)]
#[command(name = "courseplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Extra config file, layered over global and local config
    #[arg(short, long, global = true, env = "COURSEPLAN_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (default)
    Shell {
        /// Catalog file offered at the load prompt
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print all courses in identifier order
    List {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print one course with its prerequisites
    Show {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Course identifier (case-insensitive)
        course: String,
    },

    /// Print the shape of the course index
    Tree {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
