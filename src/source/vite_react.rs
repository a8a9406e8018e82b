//! Vite + React single-page app preset.

use super::CatalogSource;
use crate::artifact::Artifact;
use crate::catalog::{Catalog, TemplateVars};
use crate::error::ScaffoldResult;
use crate::paths::vite_react as layout;

pub const NAME: &str = "vite-react";

mod templates {
    pub const PACKAGE_JSON: &str =
        include_str!("../../resources/templates/vite-react/package.json.tmpl");
    pub const VITE_CONFIG: &str =
        include_str!("../../resources/templates/vite-react/vite.config.js.tmpl");
    pub const INDEX_HTML: &str = include_str!("../../resources/templates/vite-react/index.html.tmpl");
    pub const MAIN_JSX: &str = include_str!("../../resources/templates/vite-react/main.jsx.tmpl");
    pub const APP_JSX: &str = include_str!("../../resources/templates/vite-react/App.jsx.tmpl");
    pub const INDEX_CSS: &str = include_str!("../../resources/templates/vite-react/index.css.tmpl");
}

pub struct ViteReactPreset;

impl CatalogSource for ViteReactPreset {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self) -> String {
        "Vite + React single-page app (manifest, bundler config, HTML shell, entry, root component, stylesheet)"
            .to_string()
    }

    fn catalog(&self, vars: &TemplateVars) -> ScaffoldResult<Catalog> {
        let catalog: Catalog = [
            (layout::PACKAGE_JSON, templates::PACKAGE_JSON),
            (layout::VITE_CONFIG, templates::VITE_CONFIG),
            (layout::INDEX_HTML, templates::INDEX_HTML),
            (layout::MAIN_JSX, templates::MAIN_JSX),
            (layout::APP_JSX, templates::APP_JSX),
            (layout::INDEX_CSS, templates::INDEX_CSS),
        ]
        .into_iter()
        .map(|(path, template)| Artifact::new(path, template))
        .collect();

        Ok(catalog.rendered(vars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DuplicatePolicy;

    #[test]
    fn test_catalog_order_matches_layout() {
        let catalog = ViteReactPreset.catalog(&TemplateVars::default()).unwrap();
        let paths: Vec<_> = catalog.iter().map(|a| a.relative_path()).collect();
        assert_eq!(paths, layout::ALL);
        assert!(catalog.check(DuplicatePolicy::Reject).is_ok());
    }

    #[test]
    fn test_placeholders_are_rendered() {
        let vars = TemplateVars::new("Demo Shop");
        let catalog = ViteReactPreset.catalog(&vars).unwrap();

        let package = &catalog.artifacts()[0];
        assert!(package.template().contains("\"name\": \"demo-shop\""));

        let html = &catalog.artifacts()[2];
        assert!(html.template().contains("<title>Demo Shop</title>"));

        assert!(catalog.iter().all(|a| !a.template().contains("{{.")));
    }

    /// Files exactly as the Fit Fusion AI generator writes them with default vars.
    const FIT_FUSION_FILES: [(&str, &str); 6] = [
        (
            "package.json",
            r##"{
  "name": "fit-fusion-ai",
  "version": "1.0.0",
  "private": true,
  "scripts": {
    "dev": "vite",
    "build": "vite build",
    "preview": "vite preview"
  },
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0",
    "react-router-dom": "^6.15.0",
    "lucide-react": "^0.286.0"
  },
  "devDependencies": {
    "@vitejs/plugin-react": "^4.0.0",
    "vite": "^4.4.9"
  }
}
"##,
        ),
        (
            "vite.config.js",
            r##"import { defineConfig } from 'vite'
import react from '@vitejs/plugin-react'

export default defineConfig({
  plugins: [react()]
})
"##,
        ),
        (
            "index.html",
            r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Fit Fusion AI</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.jsx"></script>
  </body>
</html>
"##,
        ),
        (
            "src/main.jsx",
            r##"import React from 'react'
import ReactDOM from 'react-dom/client'
import { BrowserRouter, Routes, Route, Navigate } from 'react-router-dom'
import App from './App'
import './index.css'

ReactDOM.createRoot(document.getElementById('root')).render(
  <React.StrictMode>
    <BrowserRouter>
      <App />
    </BrowserRouter>
  </React.StrictMode>
)
"##,
        ),
        (
            "src/App.jsx",
            r##"import { Routes, Route, Navigate } from "react-router-dom";
import Layout from "./components/Layout";

// Pages
import Dashboard from "./pages/Dashboard";
import AIPlans from "./pages/AIPlans";
import FoodTracker from "./pages/FoodTracker";
import Recipes from "./pages/Recipes";
import WorkoutTracker from "./pages/WorkoutTracker";
import Analytics from "./pages/Analytics";
import Profile from "./pages/Profile";

export default function App() {
  return (
    <Layout>
      <Routes>
        <Route path="/" element={<Navigate to="/dashboard" replace />} />
        <Route path="/dashboard" element={<Dashboard />} />
        <Route path="/ai-plans" element={<AIPlans />} />
        <Route path="/food" element={<FoodTracker />} />
        <Route path="/recipes" element={<Recipes />} />
        <Route path="/workouts" element={<WorkoutTracker />} />
        <Route path="/analytics" element={<Analytics />} />
        <Route path="/profile" element={<Profile />} />
      </Routes>
    </Layout>
  );
}
"##,
        ),
        (
            "src/index.css",
            r##"body {
  margin: 0;
  font-family: system-ui, sans-serif;
  background: #fafafa;
  color: #111;
}
"##,
        ),
    ];

    #[test]
    fn test_default_vars_reproduce_fit_fusion_scaffold() {
        let catalog = ViteReactPreset.catalog(&TemplateVars::default()).unwrap();
        assert_eq!(catalog.len(), FIT_FUSION_FILES.len());

        for (artifact, (path, expected)) in catalog.iter().zip(FIT_FUSION_FILES) {
            assert_eq!(artifact.relative_path(), path);
            assert_eq!(artifact.content(), expected, "{path} differs");
        }
    }
}
