use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use scaffold::config::ScaffoldConfig;
use scaffold::writer::{self, ArtifactState};

use super::SourceArgs;

/// Returns true when every artifact on disk is current.
pub fn execute(
    config: &ScaffoldConfig,
    source_args: &SourceArgs,
    root: Option<PathBuf>,
    json_output: bool,
) -> Result<bool> {
    let (source, vars) = source_args.resolve(config)?;
    let catalog = source.catalog(&vars)?;
    let root = root.unwrap_or_else(|| config.output.root.clone());

    let statuses = writer::status(&root, &catalog)?;
    let all_current = statuses.iter().all(|s| s.state == ArtifactState::Current);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(all_current);
    }

    println!("🔍 Checking {} against {}", root.display(), source.describe());
    for status in &statuses {
        let (mark, label) = match status.state {
            ArtifactState::Current => ("✓".green(), "current".green()),
            ArtifactState::Stale => ("~".yellow(), "stale".yellow()),
            ArtifactState::Missing => ("+".cyan(), "missing".cyan()),
            ArtifactState::Blocked => ("✗".red(), "blocked by directory".red()),
        };
        println!("  {} {} ({})", mark, status.relative_path, label);
    }

    if all_current {
        println!("\nAll {} artifact(s) up to date.", statuses.len());
    } else {
        println!("\nRun 'scaffold generate' to bring the project up to date.");
    }
    Ok(all_current)
}
