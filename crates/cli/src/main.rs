// twinmap CLI - links the twin paper roster to the user registry
// With no arguments: reads data/raw/, writes data/processed/

mod exit_codes;
mod run;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{linkage_exit_code, EXIT_ERROR, EXIT_SUCCESS};
use run::RunArgs;
use twinmap_linkage::hash::colorado_hash;
use twinmap_linkage::LinkageError;

#[derive(Parser)]
#[command(name = "twinmap")]
#[command(about = "Map twin roster SVIDs to user registry alternate IDs (batch)")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Arguments for the implied `run` when no subcommand is given
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Join roster to registry and write the wide + long ID mappings (default)
    #[command(after_help = "\
Reads:
  data/raw/Robin_paper-entry_12-6-16.csv      (T1, T2, bestzygos)
  data/raw/Michigan_DB_users_02_01_17.csv     (colorado_id, alternate_id)
Writes:
  data/processed/id_mapping.csv               (one row per twin pair)
  data/processed/id_mapping_long.csv          (one row per twin)

Examples:
  twinmap
  twinmap run --json
  twinmap run --raw-dir /srv/twins/raw --processed-dir /tmp/out
  twinmap run --config twinmap.toml")]
    Run(RunArgs),

    /// Print the colorado_id digest for each SVID (registry cross-check)
    #[command(after_help = "\
Prints one `SVID,digest` line per argument. The digest is SHA-256 over the
UTF-8 bytes of the SVID, lowercase hex, exactly as stored in colorado_id.

Examples:
  twinmap hash abc123
  twinmap hash abc123 def456")]
    Hash {
        /// Raw SVIDs to hash
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run(cli.run));

    let quiet = match &command {
        Commands::Run(args) => args.quiet,
        Commands::Hash { .. } => true,
    };
    init_logging(quiet);

    let result = match command {
        Commands::Run(args) => run::cmd_run(args),
        Commands::Hash { ids } => cmd_hash(&ids),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Engine error with its registry exit code.
    pub fn linkage(err: LinkageError) -> Self {
        Self { code: linkage_exit_code(&err), message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// hash
// ============================================================================

fn cmd_hash(ids: &[String]) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for id in ids {
        writeln!(handle, "{},{}", id, colorado_hash(id))
            .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
    }
    Ok(())
}
