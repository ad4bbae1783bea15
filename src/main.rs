use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use yamlmerge::files::{self, Options, WriteMode};

const USAGE: &str = "Usage: yamlmerge [--atomic] <source_yaml_file> <destination_yaml_file>";

/// Merge the keys of a source YAML file into a destination YAML file, keeping
/// the comments and formatting of the destination.
#[derive(Debug, Parser)]
#[command(name = "yamlmerge", version, about)]
struct Args {
    /// Replace the destination atomically through a temporary file instead of
    /// truncating it.
    #[arg(long)]
    atomic: bool,
    /// YAML file whose keys are merged into the destination.
    source: PathBuf,
    /// YAML file which is updated in place.
    destination: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "yamlmerge=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            tracing::debug!(%error, "bad arguments");
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => {
            println!("YAML files merged successfully!");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error processing files: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let write_mode = if args.atomic {
        WriteMode::Atomic
    } else {
        WriteMode::Truncate
    };

    let options = Options { write_mode };
    let report = files::merge_files(&args.source, &args.destination, &options)?;
    tracing::debug!(?report, "merge finished");
    Ok(())
}
