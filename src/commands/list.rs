use anyhow::Result;
use serde::Serialize;

use scaffold::config::ScaffoldConfig;

use super::SourceArgs;

#[derive(Serialize)]
struct Entry<'a> {
    path: &'a str,
    bytes: usize,
    lines: usize,
}

pub fn execute(config: &ScaffoldConfig, source_args: &SourceArgs, json_output: bool) -> Result<()> {
    let (source, vars) = source_args.resolve(config)?;
    let catalog = source.catalog(&vars)?;

    let contents: Vec<String> = catalog.iter().map(|a| a.content()).collect();
    let entries: Vec<Entry> = catalog
        .iter()
        .zip(&contents)
        .map(|(artifact, content)| Entry {
            path: artifact.relative_path(),
            bytes: content.len(),
            lines: content.lines().count(),
        })
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("📦 {} ({} artifacts)", source.describe(), entries.len());
    let width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0);
    for entry in &entries {
        println!(
            "  {:<width$}  {:>6} bytes  {:>4} lines",
            entry.path,
            entry.bytes,
            entry.lines,
            width = width
        );
    }

    let duplicates = catalog.find_duplicates();
    if !duplicates.is_empty() {
        eprintln!("⚠️  Duplicate paths: {}", duplicates.join(", "));
    }
    Ok(())
}
