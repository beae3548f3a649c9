//! Project manifest parsing and validation

pub mod project;

pub use project::{
    CURRENT_SCHEMA_VERSION, MANIFEST_FILE_NAME, ManifestError, Platform, Product, Project,
    Target,
};
