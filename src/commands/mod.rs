pub mod export;
pub mod generate;
pub mod list;
pub mod status;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use scaffold::catalog::{slugify, TemplateVars};
use scaffold::config::ScaffoldConfig;
use scaffold::source::{self, CatalogSource};

/// Flags shared by every command that needs a catalog
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Project display name, substituted for {{.name}}
    #[arg(long)]
    pub name: Option<String>,

    /// Package name, substituted for {{.package}} (default: slug of the name)
    #[arg(long)]
    pub package: Option<String>,

    /// Built-in preset (vite-react)
    #[arg(long, conflicts_with = "manifest")]
    pub preset: Option<String>,

    /// TOML manifest declaring the catalog
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl SourceArgs {
    /// Merge flags over config: flags win, then `scaffold.toml`, then defaults.
    pub fn resolve(&self, config: &ScaffoldConfig) -> Result<(Box<dyn CatalogSource>, TemplateVars)> {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| config.project.name.clone());
        let package = self
            .package
            .clone()
            .or_else(|| config.project.package.clone())
            .unwrap_or_else(|| slugify(&name));
        let vars = TemplateVars::new(name).with_package(package);
        vars.validate()?;

        // An explicit --preset overrides a manifest configured in the file
        let manifest = match (&self.manifest, &self.preset) {
            (Some(path), _) => Some(path.as_path()),
            (None, Some(_)) => None,
            (None, None) => config.catalog.manifest.as_deref(),
        };
        let preset = self.preset.as_deref().unwrap_or(&config.catalog.preset);

        let source = source::resolve(manifest, Some(preset))?;
        Ok((source, vars))
    }
}
