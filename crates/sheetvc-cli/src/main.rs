//! sheetvc CLI - chunked storage and diffs for spreadsheet workbooks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetvc::prelude::*;
use sheetvc::{
    compute_diff_with, config_for, strategy_from_config, CellChange, SheetDiff, SourceInfo,
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetvc")]
#[command(
    author,
    version,
    about = "Store spreadsheet workbooks as diffable JSON chunks"
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a workbook document as a chunk set for a source file
    Chunk {
        /// Workbook document (JSON) produced by a document builder
        document: PathBuf,

        /// Spreadsheet file the document was built from
        #[arg(short, long)]
        source: PathBuf,

        /// Write chunk files without indentation
        #[arg(long)]
        compact: bool,
    },

    /// Reassemble a chunk set into a single workbook document
    Unchunk {
        /// Source file (or its chunk directory)
        source: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the sheets recorded in a chunk set's index
    Toc {
        /// Source file (or its chunk directory)
        source: PathBuf,
    },

    /// Print the files of a chunk set, one absolute path per line
    Paths {
        /// Source file (or its chunk directory)
        source: PathBuf,
    },

    /// Compare two workbooks
    Diff {
        /// Older workbook
        old: PathBuf,

        /// Newer workbook
        new: PathBuf,

        /// Treat both arguments as workbook documents instead of chunked sources
        #[arg(long)]
        documents: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only print the summary
        #[arg(long)]
        summary: bool,

        /// Compare only these sheets
        #[arg(long, value_delimiter = ',')]
        sheets: Vec<String>,

        /// Skip changes between blank cells
        #[arg(long)]
        ignore_empty: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Chunk {
            document,
            source,
            compact,
        } => chunk(&document, &source, compact),
        Commands::Unchunk { source, output } => unchunk(&source, output.as_deref()),
        Commands::Toc { source } => show_toc(&source),
        Commands::Paths { source } => list_paths(&source),
        Commands::Diff {
            old,
            new,
            documents,
            format,
            summary,
            sheets,
            ignore_empty,
        } => {
            let options = DiffOptions::new().sheets(sheets).ignore_empty(ignore_empty);
            diff(&old, &new, documents, format, summary, &options)
        }
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

fn strategy_for(source: &Path) -> Result<(Config, Box<dyn ChunkingStrategy>)> {
    let config = config_for(source).with_context(|| {
        format!("Failed to load configuration for '{}'", source.display())
    })?;
    let strategy = strategy_from_config(&config)?;
    debug!(strategy = strategy.name(), "selected chunking strategy");
    Ok((config, strategy))
}

fn read_document(path: &Path) -> Result<Workbook> {
    let file =
        File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse workbook document '{}'", path.display()))
}

fn read_chunk_set(source: &Path) -> Result<Workbook> {
    let (_, strategy) = strategy_for(source)?;
    let read = strategy
        .read_chunks(source)
        .with_context(|| format!("Failed to read chunks for '{}'", source.display()))?;
    if !read.is_clean() {
        eprintln!(
            "Warning: {} chunk file(s) skipped or inconsistent for '{}'",
            read.warnings.len(),
            source.display()
        );
    }
    Ok(read.workbook)
}

fn chunk(document: &Path, source: &Path, compact: bool) -> Result<()> {
    let mut workbook = read_document(document)?;

    if source.is_file() {
        let info = SourceInfo::from_path(source)
            .with_context(|| format!("Failed to checksum '{}'", source.display()))?;
        info.apply_to(&mut workbook.metadata);
    }

    let (config, strategy) = strategy_for(source)?;
    let mut options = config.chunk_options();
    options.compact_json |= compact;

    let written = strategy
        .write_chunks(&workbook, source, &options)
        .with_context(|| format!("Failed to write chunks for '{}'", source.display()))?;

    for path in &written {
        println!("{}", path.display());
    }
    eprintln!(
        "Wrote {} sheet(s) in {} file(s)",
        workbook.sheet_count(),
        written.len()
    );
    Ok(())
}

fn unchunk(source: &Path, output: Option<&Path>) -> Result<()> {
    let workbook = read_chunk_set(source)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &workbook)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            writer.flush()?;
            eprintln!(
                "Wrote {} sheet(s) to '{}'",
                workbook.sheet_count(),
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &workbook)
                .context("Failed to write to stdout")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn show_toc(source: &Path) -> Result<()> {
    let index = SheetBasedChunking::new()
        .read_index(source)
        .with_context(|| format!("Failed to read index for '{}'", source.display()))?;

    println!("Version: {}", index.version);
    if !index.metadata.original_file.is_empty() {
        println!("Source: {}", index.metadata.original_file);
    }
    println!("Sheets: {}", index.sheet_count());
    for sheet in &index.sheets {
        if sheet.hidden {
            println!("{}\t{}\t(hidden)", sheet.index, sheet.name());
        } else {
            println!("{}\t{}", sheet.index, sheet.name());
        }
    }
    Ok(())
}

fn list_paths(source: &Path) -> Result<()> {
    let (_, strategy) = strategy_for(source)?;
    let paths = strategy
        .chunk_paths(source)
        .with_context(|| format!("Failed to list chunk files for '{}'", source.display()))?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn diff(
    old: &Path,
    new: &Path,
    documents: bool,
    format: OutputFormat,
    summary_only: bool,
    options: &DiffOptions,
) -> Result<()> {
    let load = if documents { read_document } else { read_chunk_set };
    let old_workbook = load(old)?;
    let new_workbook = load(new)?;

    let diff = compute_diff_with(&old_workbook, &new_workbook, options);

    let mut stdout = io::stdout().lock();
    match (format, summary_only) {
        (OutputFormat::Json, true) => {
            serde_json::to_writer_pretty(&mut stdout, &diff.summary)?;
            writeln!(stdout)?;
        }
        (OutputFormat::Json, false) => {
            serde_json::to_writer_pretty(&mut stdout, &diff)?;
            writeln!(stdout)?;
        }
        (OutputFormat::Text, true) => writeln!(stdout, "{}", diff)?,
        (OutputFormat::Text, false) => {
            writeln!(stdout, "{}", diff)?;
            for sheet in &diff.sheet_diffs {
                writeln!(stdout)?;
                writeln!(stdout, "{}", sheet_heading(sheet))?;
                for change in &sheet.changes {
                    writeln!(stdout, "{}", change_line(change))?;
                }
            }
        }
    }
    Ok(())
}

fn sheet_heading(sheet: &SheetDiff) -> String {
    let status = match sheet.action {
        Some(ChangeType::Add) => "added",
        Some(ChangeType::Delete) => "deleted",
        Some(ChangeType::Modify) | None => "modified",
    };
    format!("Sheet \"{}\" ({})", sheet.sheet_name, status)
}

fn change_line(change: &CellChange) -> String {
    let marker = match change.change_type {
        ChangeType::Add => '+',
        ChangeType::Modify => '~',
        ChangeType::Delete => '-',
    };
    format!("  {} {:<8} {}", marker, change.cell, change.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_diff_arguments() {
        let cli = Cli::parse_from([
            "sheetvc", "diff", "a.json", "b.json", "--documents", "--sheets", "S1,S2",
            "--format", "json",
        ]);
        match cli.command {
            Commands::Diff {
                documents,
                sheets,
                format,
                ..
            } => {
                assert!(documents);
                assert_eq!(sheets, vec!["S1", "S2"]);
                assert!(format == OutputFormat::Json);
            }
            _ => panic!("expected diff command"),
        }
    }

    #[test]
    fn test_change_line() {
        let change = CellChange {
            cell: "B2".into(),
            change_type: ChangeType::Delete,
            old_value: Some(CellValue::from("x")),
            new_value: None,
            old_formula: None,
            new_formula: None,
            description: "Removed value: x".into(),
        };
        assert_eq!(change_line(&change), "  - B2       Removed value: x");
    }
}
