//! Single source of truth for scaffold filesystem layout.
//!
//! This module defines WHERE things live. It has no I/O and no validation.
//!
//! # Tool files (working directory)
//!
//! ```text
//! ./
//! ├── scaffold.toml      # Optional tool config
//! └── catalog.toml       # Default export target for manifests
//! ```
//!
//! # Generated project (vite-react preset)
//!
//! ```text
//! {root}/
//! ├── package.json       # npm manifest
//! ├── vite.config.js     # Bundler config
//! ├── index.html         # HTML shell
//! └── src/
//!     ├── main.jsx       # Entry point
//!     ├── App.jsx        # Root composition
//!     └── index.css      # Stylesheet
//! ```

use std::path::{Path, PathBuf};

/// Tool config file name: `scaffold.toml`
pub const CONFIG_FILE_NAME: &str = "scaffold.toml";

/// Default manifest file name for `scaffold export`: `catalog.toml`
pub const MANIFEST_FILE_NAME: &str = "catalog.toml";

/// Tool config in a directory: `{dir}/scaffold.toml`
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Default export target in a directory: `{dir}/catalog.toml`
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE_NAME)
}

/// Relative layout of the vite-react preset, in write order
pub mod vite_react {
    pub const PACKAGE_JSON: &str = "package.json";
    pub const VITE_CONFIG: &str = "vite.config.js";
    pub const INDEX_HTML: &str = "index.html";
    pub const MAIN_JSX: &str = "src/main.jsx";
    pub const APP_JSX: &str = "src/App.jsx";
    pub const INDEX_CSS: &str = "src/index.css";

    pub const ALL: [&str; 6] = [
        PACKAGE_JSON,
        VITE_CONFIG,
        INDEX_HTML,
        MAIN_JSX,
        APP_JSX,
        INDEX_CSS,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_paths() {
        let dir = Path::new("/tmp/work");
        assert_eq!(config_path(dir), PathBuf::from("/tmp/work/scaffold.toml"));
        assert_eq!(manifest_path(dir), PathBuf::from("/tmp/work/catalog.toml"));
    }

    #[test]
    fn test_vite_react_layout_is_relative() {
        for path in vite_react::ALL {
            assert!(!path.starts_with('/'));
            assert!(!path.contains(".."));
        }
    }
}
