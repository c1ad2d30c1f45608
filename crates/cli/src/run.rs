//! `twinmap run`: the batch: load, link, write.
//!
//! All filesystem access lives here. Both inputs are read and parsed before
//! anything is written, and both outputs are rendered in memory before the
//! first file is opened.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use twinmap_linkage::load::{parse_paper_csv, parse_users_csv};
use twinmap_linkage::write::{write_long_csv, write_wide_csv};
use twinmap_linkage::{LinkageConfig, LinkageInput, LinkageSummary};

use crate::exit_codes::{EXIT_CONFIG_INVALID, EXIT_ERROR, EXIT_INPUT_MALFORMED, EXIT_INPUT_MISSING, EXIT_OUTPUT_WRITE};
use crate::CliError;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// TOML file overriding input/output locations
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the roster and registry CSVs (default: data/raw)
    #[arg(long)]
    pub raw_dir: Option<PathBuf>,

    /// Directory receiving the ID mappings (default: data/processed)
    #[arg(long)]
    pub processed_dir: Option<PathBuf>,

    /// Print a JSON run report to stdout
    #[arg(long)]
    pub json: bool,

    /// Only log warnings and errors; no human summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

// ── Report ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    meta: RunMeta,
    inputs: InputPaths,
    outputs: OutputPaths,
    summary: &'a LinkageSummary,
}

#[derive(Debug, Serialize)]
struct RunMeta {
    engine_version: String,
    run_at: String,
}

#[derive(Debug, Serialize)]
struct InputPaths {
    paper: String,
    users: String,
}

#[derive(Debug, Serialize)]
struct OutputPaths {
    wide: String,
    long: String,
}

// ── Implementation ──────────────────────────────────────────────────

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = resolve_config(&args)?;

    let paper_path = config.paper_path();
    let users_path = config.users_path();
    let wide_path = config.wide_path();
    let long_path = config.long_path();

    let paper_csv = read_input(&paper_path)?;
    let users_csv = read_input(&users_path)?;

    let paper = parse_paper_csv(&paper_csv).map_err(|e| {
        CliError::linkage(e).with_hint(format!("while reading {}", paper_path.display()))
    })?;
    let users = parse_users_csv(&users_csv).map_err(|e| {
        CliError::linkage(e).with_hint(format!("while reading {}", users_path.display()))
    })?;
    log::info!("loaded {} roster row(s) from {}", paper.len(), paper_path.display());
    log::info!("loaded {} registry row(s) from {}", users.len(), users_path.display());

    let output = twinmap_linkage::run(&LinkageInput { paper, users });

    let mut wide_buf = Vec::new();
    write_wide_csv(&output.wide, &mut wide_buf).map_err(CliError::linkage)?;
    let mut long_buf = Vec::new();
    write_long_csv(&output.long, &mut long_buf).map_err(CliError::linkage)?;

    let processed_dir = config.processed_dir();
    std::fs::create_dir_all(processed_dir).map_err(|e| {
        CliError::new(EXIT_OUTPUT_WRITE, format!("cannot create {}: {e}", processed_dir.display()))
    })?;
    write_output(&wide_path, &wide_buf)?;
    write_output(&long_path, &long_buf)?;

    let summary = &output.summary;
    if !args.quiet {
        eprintln!("wrote {} ({} rows)", wide_path.display(), summary.wide_rows);
        eprintln!("wrote {} ({} rows)", long_path.display(), summary.long_rows);
        eprintln!("{}", summary.describe());
    }

    if args.json {
        let report = RunReport {
            meta: RunMeta {
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            inputs: InputPaths {
                paper: paper_path.display().to_string(),
                users: users_path.display().to_string(),
            },
            outputs: OutputPaths {
                wide: wide_path.display().to_string(),
                long: long_path.display().to_string(),
            },
            summary,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    Ok(())
}

/// Config file (if any) with `--raw-dir` / `--processed-dir` applied on top.
fn resolve_config(args: &RunArgs) -> Result<LinkageConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::new(EXIT_CONFIG_INVALID, format!("cannot read config {}: {e}", path.display()))
            })?;
            LinkageConfig::from_toml(&text).map_err(CliError::linkage)?
        }
        None => LinkageConfig::default(),
    };

    if let Some(dir) = &args.raw_dir {
        config.paths.raw_dir = dir.clone();
    }
    if let Some(dir) = &args.processed_dir {
        config.paths.processed_dir = dir.clone();
    }
    config.validate().map_err(CliError::linkage)?;

    log::debug!(
        "inputs from {}, outputs to {}",
        config.paths.raw_dir.display(),
        config.paths.processed_dir.display()
    );
    Ok(config)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path).map_err(|e| {
        CliError::new(EXIT_INPUT_MISSING, format!("cannot read {}: {e}", path.display()))
            .with_hint("run from the project root, or pass --raw-dir")
    })?;
    String::from_utf8(bytes).map_err(|e| {
        CliError::new(
            EXIT_INPUT_MALFORMED,
            format!("{} is not valid UTF-8 (byte {})", path.display(), e.utf8_error().valid_up_to()),
        )
    })
}

fn write_output(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|e| {
        CliError::new(EXIT_OUTPUT_WRITE, format!("cannot write {}: {e}", path.display()))
    })?;
    log::debug!("wrote {} byte(s) to {}", contents.len(), path.display());
    Ok(())
}
