//! Ember Inspect CLI
//!
//! Prints chunk snapshots and the write-ahead log of an Ember data
//! directory in human-readable form.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ember_inspect::report::ReportSummary;
use ember_inspect::{Config, Reporter, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Ember Inspect
#[derive(Parser, Debug)]
#[command(name = "ember-inspect")]
#[command(about = "Inspect Ember chunk snapshots and write-ahead logs")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Render timestamps in UTC instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Print per-metric count/min/max/avg
    #[arg(short, long, global = true)]
    summary: bool,

    /// Warn about records outside the chunk range and record count mismatches
    #[arg(short, long, global = true)]
    check: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Every chunk, then the WAL (default)
    All,

    /// Every chunk in the chunk directory
    Chunks,

    /// The WAL in the data directory
    Wal,

    /// A single chunk file
    Chunk {
        /// Path to the chunk file
        file: PathBuf,
    },

    /// A single WAL file
    WalFile {
        /// Path to the WAL file
        file: PathBuf,
    },
}

fn main() {
    // Logs go to stderr so they never interleave with the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ember_inspect=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Ember Inspect v{}", ember_inspect::VERSION);
    tracing::info!("Data directory: {}", args.data_dir.display());

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .utc(args.utc)
        .show_summary(args.summary)
        .check_consistency(args.check)
        .build();

    let stdout = io::stdout();
    let mut reporter = Reporter::new(config, stdout.lock());

    let summary = match run(&mut reporter, args.command.unwrap_or(Commands::All)) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Inspection failed: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = reporter.into_inner().flush() {
        tracing::error!("Failed to flush output: {}", e);
        std::process::exit(2);
    }

    tracing::info!(
        chunks_read = summary.chunks_read,
        chunks_failed = summary.chunks_failed,
        wal_records = summary.wal_records,
        "Inspection complete"
    );

    if summary.has_failures() {
        std::process::exit(1);
    }
}

fn run<W: Write>(reporter: &mut Reporter<W>, command: Commands) -> Result<ReportSummary> {
    match command {
        Commands::All => {
            reporter.run()?;
        }
        Commands::Chunks => reporter.report_chunks()?,
        Commands::Wal => reporter.report_wal()?,
        Commands::Chunk { file } => reporter.report_chunk_file(&file)?,
        Commands::WalFile { file } => reporter.report_wal_file(&file)?,
    }
    Ok(reporter.summary().clone())
}
