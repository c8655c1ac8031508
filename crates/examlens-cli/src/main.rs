//! examlens CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "examlens",
    version,
    about = "Exam results aggregation and filtering engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the records come from and whose view to build.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// db.json snapshot (or a bare array of submissions)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Separate exam-window file
    #[arg(long)]
    pub exams: Option<PathBuf>,

    /// Student scope: only this user's missed exams are synthesized
    #[arg(long)]
    pub viewer: Option<String>,

    /// Reference time for missed-exam detection (RFC 3339 or YYYY-MM-DD, default: now)
    #[arg(long)]
    pub now: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Filter and sort flags for the results table.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive match on student name
    #[arg(long)]
    pub search: Option<String>,

    /// Exact exam id
    #[arg(long)]
    pub exam: Option<String>,

    /// passed or failed
    #[arg(long)]
    pub status: Option<String>,

    /// Inclusive score range, e.g. "60-100"
    #[arg(long)]
    pub score_range: Option<String>,

    /// Earliest submission date (inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest submission date (inclusive; a bare date covers the whole day)
    #[arg(long)]
    pub to: Option<String>,

    /// Sort key: none, score (or marks), exam
    #[arg(long, default_value = "none")]
    pub sort: String,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics and chart series
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Also save the dashboard as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List results with filters and sorting
    List {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Export the filtered results as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Output CSV file (default: <output_dir>/exam_results.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Columns, comma-separated (e.g. "student_name,score,status")
        #[arg(long)]
        columns: Option<String>,
    },

    /// Report malformed records and invariant violations
    Validate {
        #[command(flatten)]
        source: SourceArgs,

        /// Exit code 1 if any warning is found
        #[arg(long)]
        strict: bool,
    },

    /// Create starter config and a sample db.json
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("examlens=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary {
            source,
            format,
            output,
        } => commands::summary::execute(source, format, output),
        Commands::List { source, view } => commands::list::execute(source, view),
        Commands::Export {
            source,
            view,
            output,
            columns,
        } => commands::export::execute(source, view, output, columns),
        Commands::Validate { source, strict } => commands::validate::execute(source, strict),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
