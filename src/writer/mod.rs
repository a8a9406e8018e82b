//! Scaffold writer - turns a catalog into files under a project root
//!
//! Public interface only; all logic lives in `internal.rs`.
//!
//! Every artifact is written as `trim(template) + "\n"`, creating missing
//! parent directories and truncating whatever was there before. Catalog
//! runs are fail-fast: the first error stops the run and later artifacts
//! are never attempted.
//!
//! # Example
//!
//! ```no_run
//! use scaffold::catalog::TemplateVars;
//! use scaffold::source::{self, CatalogSource};
//! use scaffold::writer::{self, WriteOptions};
//! use std::path::Path;
//!
//! let preset = source::get_preset("vite-react").unwrap();
//! let catalog = preset.catalog(&TemplateVars::default())?;
//! let report = writer::write_catalog(Path::new("out"), &catalog, &WriteOptions::default())?;
//! println!("wrote {} files", report.count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod internal;

use std::path::Path;

use crate::artifact::Artifact;
use crate::catalog::Catalog;
use crate::error::{ScaffoldResult, WriteFailure};

pub use internal::{
    ArtifactState, ArtifactStatus, Outcome, WriteOptions, WriteReport, WrittenArtifact,
};

/// Write one artifact under `root`.
///
/// Creates missing ancestor directories unless the artifact sits directly
/// in `root`. Overwrites existing content.
pub fn write_artifact(root: &Path, artifact: &Artifact) -> ScaffoldResult<WrittenArtifact> {
    internal::write_artifact(root, artifact)
}

/// Describe what `write_artifact` would do without touching the disk
pub fn plan_artifact(root: &Path, artifact: &Artifact) -> ScaffoldResult<WrittenArtifact> {
    internal::plan_artifact(root, artifact)
}

/// Write a whole catalog in order, stopping at the first error.
///
/// Paths and duplicates are checked before the first write, so a catalog
/// rejected by policy leaves the disk untouched.
pub fn write_catalog(
    root: &Path,
    catalog: &Catalog,
    options: &WriteOptions,
) -> Result<WriteReport, WriteFailure> {
    internal::write_catalog(root, catalog, options)
}

/// Compare each artifact with what is currently on disk
pub fn status(root: &Path, catalog: &Catalog) -> ScaffoldResult<Vec<ArtifactStatus>> {
    internal::status(root, catalog)
}
