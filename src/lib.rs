pub mod artifact;
pub mod catalog;
pub mod config;
pub mod error;
pub mod paths;
pub mod source;
pub mod writer;

// Re-export commonly used types
pub use artifact::Artifact;
pub use catalog::{Catalog, DuplicatePolicy, TemplateVars};
pub use error::{ScaffoldError, ScaffoldResult, WriteFailure};
pub use writer::{write_artifact, write_catalog, WriteOptions, WriteReport};
