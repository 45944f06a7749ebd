//! Entry point for the locale maintenance tools.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{
    Context as _,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use openclaw_i18n::config::ConfigManager;
use openclaw_i18n::i18n::Locale;
use openclaw_i18n::indexer::WorkspaceScanner;
use openclaw_i18n::table::{
    KeyReferenceScanner,
    deduplicate_file,
    find_missing_in_workspace,
    repair_file,
};
use tracing_subscriber::EnvFilter;

/// Locale table maintenance for the OpenClaw CLI
#[derive(Debug, Parser)]
#[command(name = "openclaw-i18n")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Workspace root directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Wrap user-facing literals in translation calls and regenerate the locale tables
    Scan {
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Exit with an error when any file could not be processed
        #[arg(long)]
        strict: bool,
    },

    /// Remove duplicate keys from a locale table
    Dedup {
        /// Table file (default: the zh_CN table)
        file: Option<PathBuf>,
    },

    /// Print entries for keys used in source code but missing from a table
    FindMissing {
        /// Locale whose table is checked
        #[arg(short, long, default_value = "zh_CN")]
        locale: Locale,

        /// Table file (overrides --locale)
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// Rebuild a corrupted locale table against a reference table
    Repair {
        /// Table to repair (default: the zh_CN table)
        #[arg(long)]
        table: Option<PathBuf>,

        /// Table whose keys are valid (default: the en_US table)
        #[arg(long)]
        reference: Option<PathBuf>,
    },
}

/// Installs the `tracing` subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Runs the selected command; `Ok(false)` means a soft failure (`scan --strict`).
async fn run(cli: Cli) -> Result<bool> {
    let mut config = ConfigManager::new(cli.root);
    config.load_settings().context("Failed to load settings")?;

    match cli.command {
        Commands::Scan { dry_run, strict } => {
            let scanner = WorkspaceScanner::new(config)?.with_dry_run(dry_run);
            let report = scanner.run().await?;
            Ok(!(strict && report.has_failures()))
        }
        Commands::Dedup { file } => {
            let path = file.unwrap_or_else(|| config.locale_table_path(Locale::ZhCn));
            let outcome = deduplicate_file(&path).await?;
            tracing::info!("Removed {} duplicate entries", outcome.removed.len());
            Ok(true)
        }
        Commands::FindMissing { locale, table } => {
            let path = table.unwrap_or_else(|| config.locale_table_path(locale));
            let matcher = config.file_matcher()?;
            let scanner = KeyReferenceScanner::new(&config.get_settings().translation_fn)?;
            let report = find_missing_in_workspace(&path, &matcher, &scanner).await?;

            let mut stdout = std::io::stdout().lock();
            for line in report.entry_lines() {
                writeln!(stdout, "{line}")?;
            }
            Ok(true)
        }
        Commands::Repair { table, reference } => {
            let table = table.unwrap_or_else(|| config.locale_table_path(Locale::ZhCn));
            let reference = reference.unwrap_or_else(|| config.locale_table_path(Locale::EnUs));
            // テーブル名からロケールを推定（既定は zh_CN）
            let locale = table
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<Locale>().ok())
                .unwrap_or(Locale::ZhCn);
            repair_file(&table, &reference, locale).await?;
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::error!("Some files could not be processed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
