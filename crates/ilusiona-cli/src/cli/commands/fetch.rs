//! `ilusiona fetch` – download PNGs for an existing codes file.

use anyhow::Result;
use ilusiona_core::codes_file;
use ilusiona_core::config::IlusionaConfig;
use std::path::Path;
use std::process::ExitCode;

use super::download::{download_all, exit_code};
use crate::cli::FetchArgs;

pub fn run_fetch(cfg: &IlusionaConfig, path: &Path, args: &FetchArgs) -> Result<ExitCode> {
    let entries = codes_file::read_codes_file(path)?;
    let out_dir = args.out_dir()?;
    println!("Downloading PNGs for {} code(s) from {}...", entries.len(), path.display());
    let summary = download_all(&args.apply(cfg), &out_dir, &entries)?;
    Ok(exit_code(&summary))
}
