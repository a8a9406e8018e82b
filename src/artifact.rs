//! A single declared file: relative path plus template text.
//!
//! Artifacts never touch the filesystem themselves. They know how to
//! validate their path against a project root and how their template
//! is normalized before it is written.

use std::path::{Component, Path, PathBuf};

use crate::error::{ScaffoldError, ScaffoldResult};

/// Immutable (relative path, template) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    relative_path: String,
    template: String,
}

impl Artifact {
    pub fn new(relative_path: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            template: template.into(),
        }
    }

    /// Path as declared, forward slashes, relative to the project root
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Raw template text as declared
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The exact text that lands on disk.
    pub fn content(&self) -> String {
        normalize(&self.template)
    }

    /// Lexically normalized relative path.
    ///
    /// `.` segments are dropped and `..` segments pop the previous segment.
    /// Popping above the root is a `PathEscape`; empty, absolute and
    /// directory-like paths are `InvalidPath`. Symlinks are not resolved.
    pub fn normalized_path(&self) -> ScaffoldResult<PathBuf> {
        let raw = self.relative_path.as_str();
        let invalid = |reason| ScaffoldError::InvalidPath {
            path: raw.to_string(),
            reason,
        };

        if raw.trim().is_empty() {
            return Err(invalid("path is empty"));
        }
        if raw.ends_with('/') {
            return Err(invalid("path ends with a separator"));
        }

        let mut parts = Vec::new();
        for component in Path::new(raw).components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(ScaffoldError::PathEscape {
                            path: raw.to_string(),
                        });
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("path must be relative"));
                }
            }
        }

        if parts.is_empty() {
            return Err(invalid("path does not name a file"));
        }

        Ok(parts.into_iter().collect())
    }

    /// Absolute target under `root`.
    pub fn resolve(&self, root: &Path) -> ScaffoldResult<PathBuf> {
        Ok(root.join(self.normalized_path()?))
    }
}

/// Trim surrounding whitespace and end with exactly one newline.
pub fn normalize(template: &str) -> String {
    let mut content = template.trim().to_string();
    content.push('\n');
    content
}
