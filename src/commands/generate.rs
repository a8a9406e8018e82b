//! `scaffold generate` - write the catalog under the project root

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

use scaffold::catalog::DuplicatePolicy;
use scaffold::config::ScaffoldConfig;
use scaffold::writer::{self, Outcome, WriteOptions, WriteReport};

use super::SourceArgs;

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Project root to write into (default: output.root from config, else ".")
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Let later artifacts overwrite earlier ones with the same path
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Validate and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output the write report as JSON
    #[arg(short, long)]
    pub json: bool,
}

pub fn execute(config: &ScaffoldConfig, args: GenerateArgs) -> Result<()> {
    let (source, vars) = args.source.resolve(config)?;
    let catalog = source.catalog(&vars)?;
    let root = args.root.unwrap_or_else(|| config.output.root.clone());

    let options = WriteOptions {
        duplicates: if args.allow_duplicates {
            DuplicatePolicy::LastWins
        } else {
            config.policy.duplicates
        },
        dry_run: args.dry_run,
    };

    if !args.json {
        println!(
            "🏗️  Scaffolding {} from {} into {}",
            vars.name,
            source.describe(),
            root.display()
        );
    }

    match writer::write_catalog(&root, &catalog, &options) {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, &vars.name);
            }
            Ok(())
        }
        Err(failure) => {
            if args.json {
                let mut message = failure.source.to_string();
                if let Some(cause) = std::error::Error::source(&failure.source) {
                    message = format!("{}: {}", message, cause);
                }
                let output = json!({
                    "error": message,
                    "path": failure.path,
                    "written": failure.written,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if failure.written > 0 {
                eprintln!(
                    "  {} artifact(s) were written before the failure",
                    failure.written
                );
            }
            Err(failure.into())
        }
    }
}

fn print_report(report: &WriteReport, name: &str) {
    for artifact in &report.artifacts {
        let label = match artifact.outcome {
            Outcome::Created => artifact.outcome.label().green(),
            Outcome::Overwritten => artifact.outcome.label().yellow(),
            Outcome::Unchanged => artifact.outcome.label().dimmed(),
        };
        println!("  {} {} ({})", "✓".green(), artifact.relative_path, label);
    }

    if report.dry_run {
        println!(
            "\nDry run - {} artifact(s) would be written to {}",
            report.count(),
            report.root.display()
        );
    } else {
        println!("\n✅ Project scaffold for {} generated successfully.", name);
    }
}
