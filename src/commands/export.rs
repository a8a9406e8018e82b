use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use scaffold::config::ScaffoldConfig;
use scaffold::paths;

use super::SourceArgs;

/// Write the rendered catalog as a manifest users can edit and feed back
/// through `--manifest`.
pub fn execute(
    config: &ScaffoldConfig,
    source_args: &SourceArgs,
    output: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let (source, vars) = source_args.resolve(config)?;
    let catalog = source.catalog(&vars)?;
    let output = match output {
        Some(path) => path,
        None => paths::manifest_path(&std::env::current_dir()?),
    };

    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let manifest = catalog.to_manifest()?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output, manifest)
        .with_context(|| format!("Failed to write manifest: {}", output.display()))?;

    println!(
        "✓ Exported {} artifact(s) from {} to {}",
        catalog.len(),
        source.describe(),
        output.display()
    );
    Ok(())
}
