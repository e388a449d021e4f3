//! CLI entry point for the gradebook analyzer.
//!
//! Runs the interactive menu by default, or analyzes a CSV roster in one
//! shot with the `analyze` subcommand.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gradebook::analyzers::aggregate::analyze_roster;
use gradebook::analyzers::classify::DEFAULT_PASS_MARK;
use gradebook::{
    loader::load_roster,
    output::{export_csv, render_json, render_summary, render_table},
    parser::NormalizeOptions,
    session::{Session, SessionOptions},
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Analyze student marks: statistics, grades and pass/fail", long_about = None)]
struct Cli {
    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "LOG_FILE_PATH", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (the default when no subcommand is given)
    Interactive {
        #[command(flatten)]
        analysis: AnalysisArgs,
    },
    /// Load a CSV roster and print its report
    Analyze {
        /// Comma-separated file of name,marks rows
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Write Name,Marks,Grade rows to this CSV file
        #[arg(short, long, value_name = "PATH")]
        export: Option<PathBuf>,

        /// Print the full analysis as JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args, Clone, Copy)]
struct AnalysisArgs {
    /// Lowest score that counts as a pass
    #[arg(short, long, default_value_t = DEFAULT_PASS_MARK)]
    pass_mark: f64,

    /// Reject CSV rows whose marks fall outside 0-100
    #[arg(long, default_value_t = false)]
    enforce_range: bool,
}

impl AnalysisArgs {
    fn session_options(self) -> SessionOptions {
        SessionOptions {
            pass_mark: self.pass_mark,
            normalize: NormalizeOptions {
                enforce_range: self.enforce_range,
            },
        }
    }
}

impl Default for AnalysisArgs {
    fn default() -> Self {
        Self {
            pass_mark: DEFAULT_PASS_MARK,
            enforce_range: false,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_file.as_deref())?;

    match cli.command {
        None => run_interactive(AnalysisArgs::default()),
        Some(Commands::Interactive { analysis }) => run_interactive(analysis),
        Some(Commands::Analyze {
            file,
            analysis,
            export,
            json,
        }) => run_analyze(&file, analysis, export.as_deref(), json),
    }
}

/// Logging setup: stderr for errors, plus an optional JSON rolling log file.
///
/// The returned guard flushes the file writer when dropped and must live
/// until the end of `main`.
fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // stderr is shared with the interactive prompts, so keep it quiet by default
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::ERROR.into())
                .with_env_var("RUST_LOG")
                .from_env()?,
        );

    let (json_layer, guard) = match log_file {
        Some(path) => {
            let log_dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = path
                .file_name()
                .context("log file path has no file name")?;

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::DEBUG.into())
                        .with_env_var("RUST_LOG_JSON")
                        .from_env()?,
                );
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

fn run_interactive(analysis: AnalysisArgs) -> Result<()> {
    let stdin = io::stdin();
    Session::new(stdin.lock(), io::stdout(), analysis.session_options()).run()
}

/// Loads one roster file, prints its report and optionally exports it.
#[tracing::instrument(skip_all, fields(file = %file.display()))]
fn run_analyze(
    file: &Path,
    analysis: AnalysisArgs,
    export: Option<&Path>,
    json: bool,
) -> Result<()> {
    let options = analysis.session_options();
    let load = load_roster(file, options.normalize)
        .with_context(|| format!("cannot analyze {}", file.display()))?;

    for rejected in &load.rejected {
        eprintln!("{rejected}");
    }

    let report = analyze_roster(&load.roster, options.pass_mark);
    if json {
        println!("{}", render_json(&report)?);
    } else if load.roster.is_empty() {
        println!("no student data available");
    } else {
        print!("{}", render_summary(&report));
        println!();
        print!("{}", render_table(&report.grades));
    }

    if let Some(path) = export {
        export_csv(path, &load.roster)?;
        info!(path = %path.display(), "Export complete");
    }

    Ok(())
}
