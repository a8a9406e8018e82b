//! Where catalogs come from.
//!
//! Built-in presets embed their templates at compile time; a manifest
//! source reads a TOML catalog from disk. Both render placeholders with
//! the same `TemplateVars` before handing the catalog to the writer.

pub mod vite_react;

use std::path::{Path, PathBuf};

use crate::catalog::{self, Catalog, TemplateVars};
use crate::error::{ScaffoldError, ScaffoldResult};

/// Trait for anything that can produce a catalog
pub trait CatalogSource {
    /// Short identifier shown in listings and reports
    fn name(&self) -> &str;

    /// One-line human description
    fn describe(&self) -> String;

    /// Assemble the catalog with placeholders rendered
    fn catalog(&self, vars: &TemplateVars) -> ScaffoldResult<Catalog>;
}

/// Names accepted by `get_preset`
pub const PRESETS: &[&str] = &[vite_react::NAME];

/// Default preset when nothing else is configured
pub const DEFAULT_PRESET: &str = vite_react::NAME;

/// Get a built-in preset by name
pub fn get_preset(name: &str) -> Option<Box<dyn CatalogSource>> {
    match name.to_lowercase().as_str() {
        vite_react::NAME | "vite" | "react" => Some(Box::new(vite_react::ViteReactPreset)),
        _ => None,
    }
}

/// Catalog declared in a TOML manifest file
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for ManifestSource {
    fn name(&self) -> &str {
        "manifest"
    }

    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }

    fn catalog(&self, vars: &TemplateVars) -> ScaffoldResult<Catalog> {
        Ok(catalog::load_manifest(&self.path)?.rendered(vars))
    }
}

/// Pick a source: a manifest path wins over a preset name.
pub fn resolve(manifest: Option<&Path>, preset: Option<&str>) -> ScaffoldResult<Box<dyn CatalogSource>> {
    if let Some(path) = manifest {
        return Ok(Box::new(ManifestSource::new(path)));
    }

    let name = preset.unwrap_or(DEFAULT_PRESET);
    get_preset(name).ok_or_else(|| ScaffoldError::Manifest {
        path: PathBuf::from(name),
        message: format!("unknown preset (known: {})", PRESETS.join(", ")),
    })
}
