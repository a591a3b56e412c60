use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use seismo_screen::analysis::SeriesReport;
use seismo_screen::config::AnalysisConfig;
use seismo_screen::error::ErrorCode;
use seismo_screen::ingest::{discover_csv_files, load_signal, series_name};
use seismo_screen::SeriesAnalyzer;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "seismo_cli",
    about = "Batch screening of seismic/vibration CSV recordings"
)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a CSV file or every CSV file in a directory
    Analyze {
        path: PathBuf,
        /// JSON configuration file (defaults apply to missing fields)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the sampling rate in Hz
        #[arg(long)]
        sample_rate: Option<f64>,
        /// Override the window length in samples
        #[arg(long)]
        window_size: Option<usize>,
        /// Write all reports as one JSON array instead of printing them
        #[arg(long)]
        output: Option<PathBuf>,
        /// Omit smoothed sequences from window reports
        #[arg(long)]
        summary: bool,
    },
    /// Print the default configuration as JSON
    DumpConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    seismo_screen::init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            path,
            config,
            sample_rate,
            window_size,
            output,
            summary,
        } => {
            let mut config = match config {
                Some(path) => AnalysisConfig::try_load_from_file(&path)?,
                None => AnalysisConfig::default(),
            };
            if let Some(rate) = sample_rate {
                config.ingest.sample_rate = rate;
            }
            if let Some(size) = window_size {
                config.scan.window_size = size;
            }
            run_analyze(&path, config, output, summary)
        }
        Commands::DumpConfig => run_dump_config(),
    }
}

fn run_analyze(
    path: &Path,
    config: AnalysisConfig,
    output_path: Option<PathBuf>,
    summary: bool,
) -> Result<ExitCode> {
    let files = collect_inputs(path)?;
    let analyzer = SeriesAnalyzer::new(config).context("invalid analysis configuration")?;

    let mut entries = Vec::with_capacity(files.len());
    for file in &files {
        let entry = analyze_file(&analyzer, file, summary);
        if output_path.is_none() {
            println!("{}", serde_json::to_string(&entry)?);
        }
        entries.push(entry);
    }

    if let Some(path) = output_path {
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    tracing::info!(
        "Analyzed {} series ({} failed)",
        entries.len(),
        failed
    );

    if failed > 0 {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::from(0))
    }
}

fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let files = discover_csv_files(path)?;
        if files.is_empty() {
            bail!("no CSV files found under {}", path.display());
        }
        Ok(files)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        bail!("{} does not exist", path.display())
    }
}

fn analyze_file(analyzer: &SeriesAnalyzer, path: &Path, summary: bool) -> SeriesEntry {
    let series = series_name(path);

    let signal = match load_signal(path, &analyzer.config().ingest) {
        Ok(signal) => signal,
        Err(err) => {
            tracing::error!("Failed to load {}: {:#}", path.display(), err);
            return SeriesEntry::failed(series, path, None, format!("{err:#}"));
        }
    };

    match analyzer.analyze(&signal) {
        Ok(report) => {
            let report = if summary {
                report.without_smoothed()
            } else {
                report
            };
            SeriesEntry {
                series,
                path: path.display().to_string(),
                report: Some(report),
                error: None,
            }
        }
        Err(err) => {
            tracing::error!(
                "Failed to analyze {}: code={} {}",
                path.display(),
                err.code(),
                err.message()
            );
            SeriesEntry::failed(series, path, Some(err.code()), err.message())
        }
    }
}

fn run_dump_config() -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(&AnalysisConfig::default())?;
    println!("{json}");
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
struct SeriesEntry {
    series: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<SeriesReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<SeriesFailure>,
}

#[derive(Serialize)]
struct SeriesFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<i32>,
    message: String,
}

impl SeriesEntry {
    fn failed(series: String, path: &Path, code: Option<i32>, message: String) -> Self {
        Self {
            series,
            path: path.display().to_string(),
            report: None,
            error: Some(SeriesFailure { code, message }),
        }
    }
}
