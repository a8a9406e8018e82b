//! Tool configuration stored in `scaffold.toml`
//!
//! All sections are optional with defaults, so an empty or missing file
//! behaves like the built-in settings. Command-line flags override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::{DuplicatePolicy, TemplateVars};
use crate::paths;
use crate::source::DEFAULT_PRESET;

// =============================================================================
// Config Types
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub policy: PolicySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Display name, substituted for `{{.name}}`
    #[serde(default = "default_name")]
    pub name: String,
    /// Package name, substituted for `{{.package}}`; slug of `name` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

fn default_name() -> String {
    TemplateVars::default().name
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            package: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Project root the catalog is written under
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Built-in preset name
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Manifest path; wins over `preset` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            manifest: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicySection {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl ScaffoldConfig {
    pub fn template_vars(&self) -> TemplateVars {
        let vars = TemplateVars::new(&self.project.name);
        match &self.project.package {
            Some(package) => vars.with_package(package),
            None => vars,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// `scaffold.toml` in `dir`, if present
pub fn discover(dir: &Path) -> Option<PathBuf> {
    let path = paths::config_path(dir);
    if path.exists() {
        debug!("found config file at {}", path.display());
        Some(path)
    } else {
        debug!("no config file found at {}", path.display());
        None
    }
}

/// Load and parse a config file.
///
/// A relative `output.root` or `catalog.manifest` is anchored at the
/// config file's directory.
pub fn load(path: &Path) -> Result<ScaffoldConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config = parse(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    if config.output.root.is_relative() {
        config.output.root = base.join(&config.output.root);
    }
    if let Some(manifest) = config.catalog.manifest.as_mut() {
        if manifest.is_relative() {
            *manifest = base.join(&*manifest);
        }
    }
    Ok(config)
}

pub fn parse(contents: &str) -> Result<ScaffoldConfig> {
    toml::from_str(contents).context("invalid TOML")
}

/// Explicit path if given, else discovery in `dir`, else defaults
pub fn load_or_default(explicit: Option<&Path>, dir: &Path) -> Result<ScaffoldConfig> {
    match explicit {
        Some(path) => load(path),
        None => match discover(dir) {
            Some(path) => load(&path),
            None => Ok(ScaffoldConfig::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ScaffoldConfig::default();
        assert_eq!(config.project.name, "Fit Fusion AI");
        assert_eq!(config.output.root, PathBuf::from("."));
        assert_eq!(config.catalog.preset, "vite-react");
        assert_eq!(config.policy.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.template_vars().package, "fit-fusion-ai");
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse("[policy]\nduplicates = \"last-wins\"\n").unwrap();
        assert_eq!(config.policy.duplicates, DuplicatePolicy::LastWins);
        assert_eq!(config.project.name, "Fit Fusion AI");
    }

    #[test]
    fn test_package_override() {
        let config = parse("[project]\nname = \"Demo\"\npackage = \"@acme/demo\"\n").unwrap();
        let vars = config.template_vars();
        assert_eq!(vars.name, "Demo");
        assert_eq!(vars.package, "@acme/demo");
    }

    #[test]
    fn test_invalid_duplicate_policy_is_rejected() {
        assert!(parse("[policy]\nduplicates = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_load_anchors_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let path = paths::config_path(tmp.path());
        fs::write(
            &path,
            "[output]\nroot = \"out\"\n\n[catalog]\nmanifest = \"catalog.toml\"\n",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.output.root, tmp.path().join("out"));
        assert_eq!(config.catalog.manifest, Some(tmp.path().join("catalog.toml")));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let tmp = TempDir::new().unwrap();
        assert!(discover(tmp.path()).is_none());
        let config = load_or_default(None, tmp.path()).unwrap();
        assert_eq!(config, ScaffoldConfig::default());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = load_or_default(Some(missing.as_path()), tmp.path()).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
