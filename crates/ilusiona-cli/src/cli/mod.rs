//! CLI for the Ilusiona barcode batch generator.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ilusiona_core::config::{self, IlusionaConfig};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_check, run_fetch, run_generate};

/// Top-level CLI for Ilusiona.
#[derive(Debug, Parser)]
#[command(name = "ilusiona")]
#[command(
    about = "Ilusiona: generate 14-digit GS1 check-digit codes and download their barcode PNGs",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate a batch of codes, write them to a timestamped file, then download a PNG per code.
    Generate {
        /// Fixed part (exactly 6 digits).
        #[arg(long, value_name = "DIGITS")]
        fixed: String,
        /// First serial number (0..=999).
        #[arg(long, value_name = "N")]
        start: u32,
        /// How many codes to generate.
        #[arg(long, value_name = "N")]
        count: u32,
        /// Only write the codes file; skip downloads.
        #[arg(long)]
        no_fetch: bool,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Download PNGs for every code listed in an existing codes file (resumes interrupted batches).
    Fetch {
        /// Path to a file with one 14-digit code per line.
        path: PathBuf,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Verify a 14-digit code, or complete a 13-digit base with its check digit.
    Check {
        /// 13 or 14 digits.
        code: String,
    },
}

/// Options shared by commands that download PNGs. Unset values come from config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    /// Directory for the codes file and `<code>.png` files (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// Per-attempt timeout in seconds (at least 1).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
    /// Maximum attempts per code (including the first).
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,
    /// Pause between attempts in seconds (e.g. 0.5).
    #[arg(long, value_name = "SECS")]
    pub backoff: Option<f64>,
}

impl FetchArgs {
    /// Config with command-line overrides applied.
    pub fn apply(&self, cfg: &IlusionaConfig) -> IlusionaConfig {
        let mut cfg = cfg.clone();
        if let Some(t) = self.timeout {
            cfg.timeout_secs = t;
        }
        if self.max_attempts.is_some() || self.backoff.is_some() {
            let mut retry = cfg.retry.take().unwrap_or_default();
            if let Some(n) = self.max_attempts {
                retry.max_attempts = n;
            }
            if let Some(b) = self.backoff {
                retry.backoff_secs = b;
            }
            cfg.retry = Some(retry);
        }
        cfg
    }

    pub fn out_dir(&self) -> Result<PathBuf> {
        match &self.out_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("create output dir: {}", dir.display()))?;
                Ok(dir.clone())
            }
            None => Ok(std::env::current_dir()?),
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Generate {
                fixed,
                start,
                count,
                no_fetch,
                fetch,
            } => {
                let cfg = load_config()?;
                run_generate(&cfg, &fixed, start, count, no_fetch, &fetch)
            }
            CliCommand::Fetch { path, fetch } => {
                let cfg = load_config()?;
                run_fetch(&cfg, &path, &fetch)
            }
            CliCommand::Check { code } => run_check(&code),
        }
    }
}

fn load_config() -> Result<IlusionaConfig> {
    let cfg = config::load_or_init().context("load config")?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
