use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use udon::core::{graph_requirements, parse_requirements_file, Composer, DepGraph, FsModuleLocator};
use udon::formatters::{DotFormatter, JsonFormatter};

#[derive(Debug, Parser)]
#[command(
    name = "udon",
    version = "0.1.0",
    author = "udon developers",
    about = "Graph Python import dependencies for inspection"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Graph the import structure of Python sources
    Graph(GraphArgs),
}

#[derive(Debug, Args)]
struct GraphArgs {
    /// Python files or directories to analyze
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Requirements manifest to graph alongside the sources
    #[arg(long, value_name = "FILE")]
    requirements: Option<PathBuf>,

    /// Root name for the requirements graph (defaults to the manifest file stem)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Output format
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Dot,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Graph(args) => graph(args),
    }
}

fn graph(args: GraphArgs) -> Result<()> {
    let mut composer = Composer::new(FsModuleLocator::from_env())?;
    let outcome = composer.compose(&args.paths)?;

    for (path, err) in &outcome.failures {
        eprintln!("Warning: skipped {}: {}", path.display(), err);
    }

    let mut combined = outcome.graph;
    if let Some(manifest) = &args.requirements {
        let requirements = parse_requirements_file(manifest)?;
        let package = args.name.clone().unwrap_or_else(|| {
            manifest
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "requirements".to_string())
        });
        combined = DepGraph::merge(&combined, &graph_requirements(&package, &requirements));
    }

    let rendered = match args.format {
        OutputFormat::Dot => DotFormatter::new().format_to_string(&combined),
        OutputFormat::Json => JsonFormatter::new().format_to_string(&combined)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            println!("Graph written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    if !outcome.failures.is_empty() {
        anyhow::bail!("{} file(s) failed to parse", outcome.failures.len());
    }
    Ok(())
}
