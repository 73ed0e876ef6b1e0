//! courseplan: an in-memory course catalog.
//!
//! Courses are read from a comma-separated file into an ordered index (an
//! unbalanced binary search tree keyed by course identifier) and served through
//! an interactive menu or one-shot CLI commands.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
