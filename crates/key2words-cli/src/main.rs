//! key2words: back up an SSH Ed25519 private key as 24 words, and
//! restore the key pair from them.

mod commands;
mod output;
mod prompt;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use key2words_types::config::{AppConfig, KeyFormat};
use key2words_types::Result;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Back up an SSH Ed25519 key as BIP39 words, and restore it.
#[derive(Parser)]
#[command(name = "key2words", version, about)]
struct Cli {
    /// Output in JSON format (no colors, machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// JSON config file with restore defaults.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory restored keys are written into.
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// File name of the restored private key (public key gets `.pub`).
    #[arg(long, global = true, value_name = "NAME")]
    output_file: Option<String>,

    /// Format of the restored private key: `pem` or `openssh`.
    #[arg(long, global = true, value_name = "FORMAT")]
    format: Option<KeyFormat>,

    /// Overwrite existing key files.
    #[arg(long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the mnemonic for an Ed25519 private key file.
    Backup(commands::backup::BackupArgs),
    /// Rebuild a key pair from its mnemonic and write it to disk.
    Restore(commands::restore::RestoreArgs),
}

// ---------------------------------------------------------------------------
// Global options passed to every command handler
// ---------------------------------------------------------------------------

/// Shared options threaded into command handlers.
pub struct GlobalOpts {
    pub json: bool,
    pub config: AppConfig,
}

impl Cli {
    /// Layers defaults, then the config file, then flags.
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(file) = &self.output_file {
            config.output_file = file.clone();
        }
        if let Some(format) = self.format {
            config.private_key_format = format;
        }
        if self.force {
            config.overwrite = true;
        }

        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if cli.json || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let result = cli
        .app_config()
        .and_then(|config| {
            let opts = GlobalOpts {
                json: cli.json,
                config,
            };
            dispatch(&opts, cli.command)
        });

    if let Err(e) = result {
        output::print_error(&e, cli.json);
        std::process::exit(1);
    }
}

fn dispatch(opts: &GlobalOpts, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Backup(args) => commands::backup::run(args, opts),
        Commands::Restore(args) => commands::restore::run(args, opts),
    }
}
