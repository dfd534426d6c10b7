//! `ilusiona generate` – generate codes, write the codes file, download PNGs.

use anyhow::Result;
use chrono::Local;
use ilusiona_core::code::{generate_all, OsTicketSource};
use ilusiona_core::codes_file;
use ilusiona_core::config::{BatchConfig, IlusionaConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::download::{download_all, exit_code};
use crate::cli::FetchArgs;

/// `ilusiona_<YYYYmmddHHMMSS>.txt` under `dir`.
pub fn codes_file_name(dir: &Path, stamp: &chrono::DateTime<Local>) -> PathBuf {
    dir.join(format!("ilusiona_{}.txt", stamp.format("%Y%m%d%H%M%S")))
}

pub fn run_generate(
    cfg: &IlusionaConfig,
    fixed: &str,
    start: u32,
    count: u32,
    no_fetch: bool,
    args: &FetchArgs,
) -> Result<ExitCode> {
    let batch = BatchConfig::new(fixed, start, count)?;
    let codes = generate_all(&batch, OsTicketSource)?;

    let out_dir = args.out_dir()?;
    let list = codes_file_name(&out_dir, &Local::now());
    codes_file::write_codes_file(&list, &codes)?;
    println!("OK. Generated {} codes in: {}", codes.len(), list.display());

    if no_fetch {
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!("Downloading PNGs (Interleaved 2 of 5)...");
    let summary = download_all(&args.apply(cfg), &out_dir, &codes)?;
    Ok(exit_code(&summary))
}
