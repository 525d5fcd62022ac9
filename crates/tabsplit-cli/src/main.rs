//! tabsplit CLI
//!
//! Splits the Excel/CSV files of a folder into smaller files with a fixed
//! number of rows each. Runs interactively unless the settings are given
//! as flags.

mod prompt;
mod report;

use clap::Parser;
use prompt::Prompter;
use report::render_event;
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tabsplit_core::{
    default_chunk_size, parse_chunk_size, split_folder, Error, OutputFormat, RunSummary,
    SplitMode, SplitOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabsplit")]
#[command(about = "Split Excel/CSV files into row-capped chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Folder containing the Excel/CSV files (asked for when omitted)
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Output format: xlsx or csv (asked for when omitted)
    #[arg(long, value_parser = parse_format_arg)]
    format: Option<OutputFormat>,

    /// Rows per output file (asked for when omitted)
    #[arg(short, long, value_parser = parse_chunk_size_arg)]
    chunk_size: Option<NonZeroUsize>,

    /// Write chunk files here instead of next to the source files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Never prompt; missing settings use xlsx and 10000 rows
    #[arg(short, long, requires = "folder")]
    yes: bool,

    /// Print the run summary as JSON when done
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Settings for one run, after flags and prompts are combined
#[derive(Debug)]
struct Settings {
    folder: PathBuf,
    options: SplitOptions,
}

fn parse_format_arg(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

fn parse_chunk_size_arg(s: &str) -> Result<NonZeroUsize, String> {
    parse_chunk_size(s).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        match &e {
            Error::DirectoryNotFound { path } => {
                println!("Error: Folder '{}' does not exist!", path.display())
            }
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> tabsplit_core::Result<()> {
    let settings = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        resolve_settings(cli, &mut prompter)?
    };
    debug!(?settings, "resolved settings");

    let summary = run_split(&settings.folder, &settings.options)?;
    if cli.json {
        print_summary_json(&summary)?;
    }

    println!("\nProcess completed!");
    Ok(())
}

/// Combine flags with prompts for whatever is missing, then echo the result
fn resolve_settings<R: BufRead, W: Write>(
    cli: &Cli,
    prompter: &mut Prompter<R, W>,
) -> tabsplit_core::Result<Settings> {
    prompter.say("Excel/CSV File Splitter")?;
    prompter.say(&"=".repeat(50))?;

    let folder = match &cli.folder {
        Some(folder) => folder.clone(),
        None => prompter.folder()?,
    };

    let format = match cli.format {
        Some(format) => format,
        None if cli.yes => OutputFormat::default(),
        None => prompter.output_format()?,
    };

    let chunk_size = match cli.chunk_size {
        Some(size) => size,
        None if cli.yes => default_chunk_size(),
        None => prompter.chunk_size()?,
    };

    let mut options = SplitOptions::new(SplitMode::from_chunk_size(chunk_size), format);
    if let Some(dir) = &cli.output_dir {
        options = options.with_output_dir(dir);
    }

    prompter.say("\nSettings:")?;
    prompter.say(&format!("- Folder: {}", folder.display()))?;
    prompter.say(&format!("- Output format: {}", format.label()))?;
    prompter.say(&format!("- Chunk size: {} rows", chunk_size))?;
    if let Some(dir) = &options.output_dir {
        prompter.say(&format!("- Output folder: {}", dir.display()))?;
    }
    prompter.say(&"-".repeat(50))?;

    Ok(Settings { folder, options })
}

fn run_split(folder: &Path, options: &SplitOptions) -> tabsplit_core::Result<RunSummary> {
    split_folder(folder, options, |event| println!("{}", render_event(event, options)))
}

fn print_summary_json(summary: &RunSummary) -> tabsplit_core::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::from)?;
    println!("{}", json);
    Ok(())
}
