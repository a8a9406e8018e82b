use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use scaffold::{ScaffoldError, WriteFailure};

mod commands;

use commands::SourceArgs;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Write a project scaffold from a template catalog", long_about = None)]
struct Cli {
    /// Config file (defaults to ./scaffold.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print per-artifact diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `generate` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every artifact of the catalog under the project root
    Generate(commands::generate::GenerateArgs),

    /// Show the artifacts a catalog declares
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Compare the catalog with files already on disk
    Status {
        #[command(flatten)]
        source: SourceArgs,

        /// Project root to inspect
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Save the catalog as an editable TOML manifest
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Manifest to write (default: ./catalog.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = scaffold::config::load_or_default(cli.config.as_deref(), &std::env::current_dir()?)?;

    match cli.command {
        None => {
            commands::generate::execute(&config, commands::generate::GenerateArgs::default())?;
        }
        Some(Commands::Generate(args)) => {
            commands::generate::execute(&config, args)?;
        }
        Some(Commands::List { source, json }) => {
            commands::list::execute(&config, &source, json)?;
        }
        Some(Commands::Status { source, root, json }) => {
            if !commands::status::execute(&config, &source, root, json)? {
                return Ok(ExitCode::from(1));
            }
        }
        Some(Commands::Export {
            source,
            output,
            force,
        }) => {
            commands::export::execute(&config, &source, output, force)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("scaffold=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Policy rejections exit 2, everything else 1
fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(failure) = err.downcast_ref::<WriteFailure>() {
        failure.exit_code()
    } else if let Some(scaffold_err) = err.downcast_ref::<ScaffoldError>() {
        scaffold_err.exit_code()
    } else {
        1
    }
}
