//! Shared download loop: per-code messages and the final summary.

use anyhow::Result;
use ilusiona_core::batch::{BatchEvent, BatchOrchestrator, BatchSummary};
use ilusiona_core::config::IlusionaConfig;
use ilusiona_core::fetcher::ArtifactFetcher;
use ilusiona_core::transport::CurlTransport;
use std::path::Path;
use std::process::ExitCode;

/// Download a PNG for every entry into `out_dir`, printing progress as it goes.
pub fn download_all<S: AsRef<str>>(
    cfg: &IlusionaConfig,
    out_dir: &Path,
    entries: &[S],
) -> Result<BatchSummary> {
    let fetcher = ArtifactFetcher::from_config(CurlTransport, cfg)?;
    let orchestrator = BatchOrchestrator::new(fetcher, out_dir);

    let summary = orchestrator.run_with(entries, |event| match event {
        BatchEvent::Skipped { entry } => println!("WARN: ignored (not a 14-digit code): {}", entry),
        BatchEvent::Started { code, destination } => {
            println!("Downloading: {} -> {}", code, destination.display())
        }
        BatchEvent::Finished(outcome) => println!("{}", outcome.message()),
    });

    print_summary(&summary);
    Ok(summary)
}

pub fn print_summary(summary: &BatchSummary) {
    println!();
    println!("Download summary:");
    println!("  Processed: {}", summary.processed);
    println!("  OK:        {}", summary.ok);
    println!("  Skipped:   {}", summary.skipped);
    println!("  Failed:    {}", summary.failed);
    println!();
}

/// Non-zero exit when any code failed.
pub fn exit_code(summary: &BatchSummary) -> ExitCode {
    if summary.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
