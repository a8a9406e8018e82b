//! Internal implementation for catalog module

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifact::Artifact;
use crate::error::{ScaffoldError, ScaffoldResult};

const DEFAULT_NAME: &str = "Fit Fusion AI";

// =============================================================================
// Template Variables
// =============================================================================

/// Values substituted into `{{.name}}` and `{{.package}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    pub name: String,
    pub package: String,
}

impl TemplateVars {
    /// Vars for a display name; the package name is its slug.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let package = slugify(&name);
        Self { name, package }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Reject values that would break out of the JSON strings and HTML text
    /// the presets place them in.
    pub fn validate(&self) -> ScaffoldResult<()> {
        check_var("name", &self.name, |ch| {
            matches!(ch, '"' | '\\' | '<' | '>' | '&') || ch.is_control()
        })?;
        check_var("package", &self.package, |ch| {
            !(ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '@' | '/' | '~'))
        })
    }

    /// Values are inserted verbatim, without JSON or HTML escaping; call
    /// `validate` first when they come from user input.
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{{.name}}", &self.name)
            .replace("{{.package}}", &self.package)
    }
}

fn check_var(var: &'static str, value: &str, forbidden: impl Fn(char) -> bool) -> ScaffoldResult<()> {
    if value.trim().is_empty() {
        return Err(ScaffoldError::InvalidTemplateVar {
            var,
            value: value.to_string(),
            reason: "must not be empty",
        });
    }
    match value.chars().find(|&ch| forbidden(ch)) {
        Some(_) => Err(ScaffoldError::InvalidTemplateVar {
            var,
            value: value.to_string(),
            reason: if var == "package" {
                "only ASCII letters, digits and - _ . @ / ~ are allowed"
            } else {
                "quotes, backslashes, angle brackets, ampersands and control characters are not allowed"
            },
        }),
        None => Ok(()),
    }
}

impl Default for TemplateVars {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "app".to_string()
    } else {
        slug
    }
}

// =============================================================================
// Duplicate Policy
// =============================================================================

/// What to do when two artifacts resolve to the same target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Refuse the whole catalog before anything is written
    #[default]
    Reject,
    /// Write every entry in order; the last one wins
    LastWins,
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered sequence of artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    artifacts: Vec<Artifact>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Copy of this catalog with placeholders substituted.
    pub fn rendered(&self, vars: &TemplateVars) -> Catalog {
        self.iter()
            .map(|a| Artifact::new(a.relative_path(), vars.render(a.template())))
            .collect()
    }

    /// Normalized paths declared more than once, in first-seen order.
    ///
    /// Entries with invalid paths are skipped; `check` reports those.
    pub fn find_duplicates(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for artifact in &self.artifacts {
            let Ok(path) = artifact.normalized_path() else {
                continue;
            };
            if !seen.insert(path.clone()) && reported.insert(path.clone()) {
                duplicates.push(path_to_slash(&path));
            }
        }
        duplicates
    }

    /// Validate every path and apply the duplicate policy.
    ///
    /// Runs before any write so a rejected catalog leaves the disk untouched.
    pub fn check(&self, policy: DuplicatePolicy) -> ScaffoldResult<()> {
        for artifact in &self.artifacts {
            artifact.normalized_path()?;
        }

        let duplicates = self.find_duplicates();
        match (policy, duplicates.first()) {
            (DuplicatePolicy::Reject, Some(path)) => Err(ScaffoldError::DuplicatePath {
                path: path.clone(),
            }),
            (DuplicatePolicy::LastWins, Some(_)) => {
                debug!("last-wins for duplicate paths: {:?}", duplicates);
                Ok(())
            }
            (_, None) => Ok(()),
        }
    }

    /// Serialize as a manifest with inline templates.
    pub fn to_manifest(&self) -> ScaffoldResult<String> {
        let manifest = ManifestFile {
            artifact: self
                .iter()
                .map(|a| ManifestEntry {
                    path: a.relative_path().to_string(),
                    template: Some(a.template().to_string()),
                    file: None,
                })
                .collect(),
        };
        toml::to_string_pretty(&manifest).map_err(|e| ScaffoldError::Manifest {
            path: PathBuf::from("<export>"),
            message: e.to_string(),
        })
    }
}

impl FromIterator<Artifact> for Catalog {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        Self {
            artifacts: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Artifact>> for Catalog {
    fn from(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

fn path_to_slash(path: &Path) -> String {
    path.iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// =============================================================================
// Manifest
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    artifact: Vec<ManifestEntry>,
}

/// One `[[artifact]]` table in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    path: String,
    /// Inline template text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template: Option<String>,
    /// Template file, relative to the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

pub fn load_manifest(path: &Path) -> ScaffoldResult<Catalog> {
    let text = fs::read_to_string(path).map_err(|e| ScaffoldError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_manifest(&text, base_dir, path)
}

pub fn parse_manifest(text: &str, base_dir: &Path, origin: &Path) -> ScaffoldResult<Catalog> {
    let manifest_error = |message: String| ScaffoldError::Manifest {
        path: origin.to_path_buf(),
        message,
    };

    let manifest: ManifestFile = toml::from_str(text).map_err(|e| manifest_error(e.to_string()))?;

    // Template files are cached so repeated references read once
    let mut files: HashMap<PathBuf, String> = HashMap::new();
    let mut catalog = Catalog::new();

    for (index, entry) in manifest.artifact.into_iter().enumerate() {
        let template = match (entry.template, entry.file) {
            (Some(template), None) => template,
            (None, Some(file)) => {
                let source = base_dir.join(&file);
                if let Some(cached) = files.get(&source) {
                    cached.clone()
                } else {
                    let text = fs::read_to_string(&source).map_err(|e| {
                        manifest_error(format!(
                            "artifact {} ({}): cannot read {}: {}",
                            index + 1,
                            entry.path,
                            source.display(),
                            e
                        ))
                    })?;
                    files.insert(source, text.clone());
                    text
                }
            }
            (Some(_), Some(_)) => {
                return Err(manifest_error(format!(
                    "artifact {} ({}): set either `template` or `file`, not both",
                    index + 1,
                    entry.path
                )))
            }
            (None, None) => {
                return Err(manifest_error(format!(
                    "artifact {} ({}): missing `template` or `file`",
                    index + 1,
                    entry.path
                )))
            }
        };
        catalog.push(Artifact::new(entry.path, template));
    }

    debug!(
        "parsed manifest {} with {} artifact(s)",
        origin.display(),
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog_of(paths: &[&str]) -> Catalog {
        paths.iter().map(|p| Artifact::new(*p, "x")).collect()
    }

    #[test]
    fn test_default_vars() {
        let vars = TemplateVars::default();
        assert_eq!(vars.name, "Fit Fusion AI");
        assert_eq!(vars.package, "fit-fusion-ai");
    }

    #[test]
    fn test_render_replaces_all_placeholders() {
        let vars = TemplateVars::new("Demo").with_package("demo-pkg");
        assert_eq!(
            vars.render("{{.name}} / {{.package}} / {{.name}}"),
            "Demo / demo-pkg / Demo"
        );
        assert_eq!(vars.render("{{name}}"), "{{name}}");
    }

    #[test]
    fn test_find_duplicates_uses_normalized_paths() {
        let catalog = catalog_of(&["src/App.jsx", "index.html", "./src/App.jsx", "src/x/../App.jsx"]);
        assert_eq!(catalog.find_duplicates(), vec!["src/App.jsx".to_string()]);
    }

    #[test]
    fn test_check_rejects_duplicates_by_default() {
        let catalog = catalog_of(&["a.txt", "b.txt", "a.txt"]);
        let err = catalog.check(DuplicatePolicy::default()).unwrap_err();
        assert!(matches!(err, ScaffoldError::DuplicatePath { ref path } if path == "a.txt"));
        assert!(catalog.check(DuplicatePolicy::LastWins).is_ok());
    }

    #[test]
    fn test_check_rejects_escaping_path_even_with_last_wins() {
        let catalog = catalog_of(&["ok.txt", "../escape.txt"]);
        let err = catalog.check(DuplicatePolicy::LastWins).unwrap_err();
        assert!(matches!(err, ScaffoldError::PathEscape { .. }));
    }

    #[test]
    fn test_rendered_keeps_order_and_paths() {
        let mut catalog = Catalog::new();
        catalog.push(Artifact::new("b.txt", "{{.name}}"));
        catalog.push(Artifact::new("a.txt", "{{.package}}"));

        let rendered = catalog.rendered(&TemplateVars::new("Hello World"));
        let paths: Vec<_> = rendered.iter().map(|a| a.relative_path()).collect();
        assert_eq!(paths, vec!["b.txt", "a.txt"]);
        assert_eq!(rendered.artifacts()[0].template(), "Hello World");
        assert_eq!(rendered.artifacts()[1].template(), "hello-world");
    }

    #[test]
    fn test_parse_manifest_inline_and_file() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("templates")).unwrap();
        fs::write(tmp.path().join("templates/style.css"), "body {}\n").unwrap();

        let text = r#"
[[artifact]]
path = "index.html"
template = "<html></html>"

[[artifact]]
path = "src/index.css"
file = "templates/style.css"
"#;
        let catalog = parse_manifest(text, tmp.path(), Path::new("catalog.toml")).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.artifacts()[0].template(), "<html></html>");
        assert_eq!(catalog.artifacts()[1].template(), "body {}\n");
    }

    #[test]
    fn test_parse_manifest_requires_exactly_one_source() {
        let both = "[[artifact]]\npath = \"a\"\ntemplate = \"x\"\nfile = \"y\"\n";
        let err = parse_manifest(both, Path::new("."), Path::new("m.toml")).unwrap_err();
        assert!(err.to_string().contains("not both"));

        let neither = "[[artifact]]\npath = \"a\"\n";
        let err = parse_manifest(neither, Path::new("."), Path::new("m.toml")).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_parse_manifest_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let text = "[[artifact]]\npath = \"a\"\nfile = \"nope.txt\"\n";
        let err = parse_manifest(text, tmp.path(), Path::new("m.toml")).unwrap_err();
        assert!(matches!(err, ScaffoldError::Manifest { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_template_vars_validate() {
        assert!(TemplateVars::default().validate().is_ok());
        assert!(TemplateVars::new("Demo Shop").with_package("@acme/demo-shop").validate().is_ok());

        for name in ["Bad \"Name\"", "<script>", "Tab\there", "C:\\app", "Fish & Chips", "  "] {
            let err = TemplateVars::new(name).validate().unwrap_err();
            assert!(
                matches!(err, ScaffoldError::InvalidTemplateVar { var: "name", .. }),
                "{name:?} accepted"
            );
            assert_eq!(err.exit_code(), 2);
        }

        for package in ["demo shop", "demo\"", "dé-mo", ""] {
            let err = TemplateVars::default().with_package(package).validate().unwrap_err();
            assert!(
                matches!(err, ScaffoldError::InvalidTemplateVar { var: "package", .. }),
                "{package:?} accepted"
            );
        }
    }

    #[test]
    fn test_parse_manifest_rejects_unknown_keys() {
        let text = "[[artifact]]\npath = \"a\"\ntemplate = \"x\"\nmode = \"0755\"\n";
        assert!(parse_manifest(text, Path::new("."), Path::new("m.toml")).is_err());
    }

    #[test]
    fn test_manifest_export_parses_back() {
        let mut catalog = Catalog::new();
        catalog.push(Artifact::new("index.html", "<html>\n  <body></body>\n</html>\n"));
        catalog.push(Artifact::new("empty.txt", ""));

        let text = catalog.to_manifest().unwrap();
        assert!(text.contains("[[artifact]]"));

        let parsed = parse_manifest(&text, Path::new("."), Path::new("export.toml")).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_load_manifest_from_disk() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("catalog.toml");
        fs::write(&manifest, "[[artifact]]\npath = \"README.md\"\ntemplate = \"# hi\"\n").unwrap();

        let catalog = load_manifest(&manifest).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.artifacts()[0].relative_path(), "README.md");
    }
}
