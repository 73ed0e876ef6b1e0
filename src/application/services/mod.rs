//! Application services

pub mod catalog;
pub mod shell;

pub use catalog::{CatalogService, LoadReport};
pub use shell::{course_details, CatalogState, Shell};
