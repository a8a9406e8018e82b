//! Catalog module - the ordered set of artifacts for one scaffold run
//!
//! A catalog is plain data handed to the writer. It can be assembled in
//! code, loaded from a TOML manifest, or exported back to one.
//!
//! # Manifest format
//!
//! ```toml
//! [[artifact]]
//! path = "index.html"
//! template = """
//! <title>{{.name}}</title>
//! """
//!
//! [[artifact]]
//! path = "src/index.css"
//! file = "templates/index.css"   # relative to the manifest
//! ```
//!
//! # Example
//!
//! ```
//! use scaffold::catalog::{Catalog, DuplicatePolicy, TemplateVars};
//! use scaffold::Artifact;
//!
//! let mut catalog = Catalog::new();
//! catalog.push(Artifact::new("index.html", "<title>{{.name}}</title>"));
//! catalog.check(DuplicatePolicy::Reject)?;
//!
//! let rendered = catalog.rendered(&TemplateVars::new("Demo App"));
//! assert_eq!(rendered.iter().next().unwrap().template(), "<title>Demo App</title>");
//! # Ok::<(), scaffold::ScaffoldError>(())
//! ```

mod internal;

use std::path::Path;

use crate::error::ScaffoldResult;

pub use internal::{Catalog, DuplicatePolicy, TemplateVars};

/// Load a catalog from a TOML manifest on disk.
///
/// `file = ...` entries are read relative to the manifest's directory.
pub fn load_manifest(path: &Path) -> ScaffoldResult<Catalog> {
    internal::load_manifest(path)
}

/// Parse manifest text.
///
/// `base_dir` anchors `file = ...` entries; `origin` names the manifest
/// in error messages.
pub fn parse_manifest(text: &str, base_dir: &Path, origin: &Path) -> ScaffoldResult<Catalog> {
    internal::parse_manifest(text, base_dir, origin)
}

/// Turn a display name into a package-safe slug (`Fit Fusion AI` -> `fit-fusion-ai`)
pub fn slugify(name: &str) -> String {
    internal::slugify(name)
}
