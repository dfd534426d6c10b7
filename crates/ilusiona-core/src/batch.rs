//! Batch orchestration: one fetch per code, in order, with aggregate counters.
//!
//! A failing code never stops the batch; every code is visited and the
//! summary is reported at the end.

use std::path::{Path, PathBuf};

use crate::code;
use crate::fetcher::{ArtifactFetcher, FetchOutcome};
use crate::transport::Transport;

/// Aggregate counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: u32,
    pub ok: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Per-code progress reported to the caller.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// The entry did not look like a 14-digit code; no fetch was attempted.
    Skipped { entry: &'a str },
    /// About to fetch `code` into `destination`.
    Started { code: &'a str, destination: &'a Path },
    Finished(&'a FetchOutcome),
}

/// Path of the artifact for `code` under `out_dir`: `<out_dir>/<code>.png`.
pub fn artifact_path(out_dir: &Path, code: &str) -> PathBuf {
    out_dir.join(format!("{}.png", code))
}

pub struct BatchOrchestrator<T> {
    fetcher: ArtifactFetcher<T>,
    out_dir: PathBuf,
}

impl<T: Transport> BatchOrchestrator<T> {
    pub fn new(fetcher: ArtifactFetcher<T>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            out_dir: out_dir.into(),
        }
    }

    pub fn run<I, S>(&self, codes: I) -> BatchSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with(codes, |_| {})
    }

    /// Like `run`, calling `observer` for every entry as it is handled.
    pub fn run_with<I, S, F>(&self, codes: I, mut observer: F) -> BatchSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(BatchEvent<'_>),
    {
        let mut summary = BatchSummary::default();
        for entry in codes {
            let entry = entry.as_ref();
            summary.processed += 1;

            if !code::is_well_formed(entry) {
                tracing::warn!(entry, "ignored: not a 14-digit code");
                summary.skipped += 1;
                observer(BatchEvent::Skipped { entry });
                continue;
            }

            let destination = artifact_path(&self.out_dir, entry);
            observer(BatchEvent::Started {
                code: entry,
                destination: &destination,
            });
            let outcome = self.fetcher.fetch(entry, &destination);
            if outcome.is_ok() {
                summary.ok += 1;
            } else {
                summary.failed += 1;
            }
            observer(BatchEvent::Finished(&outcome));
        }

        tracing::info!(
            processed = summary.processed,
            ok = summary.ok,
            skipped = summary.skipped,
            failed = summary.failed,
            "batch finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{generate_all, OsTicketSource};
    use crate::config::BatchConfig;
    use crate::fetcher::{FetchStatus, PNG_SIGNATURE};
    use crate::request::{BarcodeRequest, BarcodeRequestBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
    use crate::retry::RetryPolicy;
    use crate::transport::TransportError;
    use std::cell::Cell;
    use std::time::Duration;

    /// Returns a PNG for every request except codes listed in `failing`.
    struct PngStub {
        failing: Vec<&'static str>,
        requests: Cell<u32>,
    }

    impl PngStub {
        fn new(failing: Vec<&'static str>) -> Self {
            Self {
                failing,
                requests: Cell::new(0),
            }
        }
    }

    impl Transport for PngStub {
        fn get(&self, request: &BarcodeRequest, _timeout: Duration) -> Result<Vec<u8>, TransportError> {
            self.requests.set(self.requests.get() + 1);
            if self.failing.iter().any(|c| request.url.contains(c)) {
                return Err(TransportError::Http(500));
            }
            let mut body = PNG_SIGNATURE.to_vec();
            body.extend_from_slice(request.url.as_bytes());
            Ok(body)
        }
    }

    fn orchestrator<'a>(stub: &'a PngStub, out_dir: &Path) -> BatchOrchestrator<&'a PngStub> {
        let fetcher = ArtifactFetcher::new(
            stub,
            BarcodeRequestBuilder::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT).unwrap(),
            Duration::from_secs(1),
            RetryPolicy::new(2, Duration::ZERO),
        );
        BatchOrchestrator::new(fetcher, out_dir)
    }

    #[test]
    fn end_to_end_two_codes() {
        let dir = tempfile::tempdir().unwrap();
        let batch = BatchConfig::new("100000", 0, 2).unwrap();
        let codes = generate_all(&batch, OsTicketSource).unwrap();
        let stub = PngStub::new(vec![]);

        let summary = orchestrator(&stub, dir.path()).run(&codes);

        assert_eq!(
            summary,
            BatchSummary {
                processed: 2,
                ok: 2,
                skipped: 0,
                failed: 0
            }
        );
        for code in &codes {
            let path = dir.path().join(format!("{}.png", code));
            assert!(path.exists(), "missing {}", path.display());
            assert!(std::fs::read(&path).unwrap().starts_with(&PNG_SIGNATURE));
        }
    }

    #[test]
    fn rerun_reports_cached_without_requests() {
        let dir = tempfile::tempdir().unwrap();
        let codes = ["10000000001165", "10000000101162"];
        let stub = PngStub::new(vec![]);
        orchestrator(&stub, dir.path()).run(codes);
        assert_eq!(stub.requests.get(), 2);

        let mut statuses = Vec::new();
        let summary = orchestrator(&stub, dir.path()).run_with(codes, |event| {
            if let BatchEvent::Finished(outcome) = event {
                statuses.push(outcome.status);
            }
        });
        assert_eq!(summary.ok, 2);
        assert_eq!(stub.requests.get(), 2);
        assert_eq!(statuses, vec![FetchStatus::Cached, FetchStatus::Cached]);
    }

    #[test]
    fn failure_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let codes = ["10000000001165", "10000000101162", "10000000201169"];
        let stub = PngStub::new(vec!["10000000101162"]);

        let summary = orchestrator(&stub, dir.path()).run(codes);

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.failed, 1);
        // Two attempts for the failing code, one each for the others.
        assert_eq!(stub.requests.get(), 4);
        assert!(dir.path().join("10000000201169.png").exists());
        assert!(!dir.path().join("10000000101162.png").exists());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let stub = PngStub::new(vec![]);
        let mut skipped = Vec::new();

        let summary = orchestrator(&stub, dir.path()).run_with(
            ["1000000000116", "abc", "10000000001165"],
            |event| {
                if let BatchEvent::Skipped { entry } = event {
                    skipped.push(entry.to_string());
                }
            },
        );

        assert_eq!(
            summary,
            BatchSummary {
                processed: 3,
                ok: 1,
                skipped: 2,
                failed: 0
            }
        );
        assert_eq!(skipped, vec!["1000000000116", "abc"]);
        assert_eq!(stub.requests.get(), 1);
    }

    #[test]
    fn artifact_path_uses_code_name() {
        assert_eq!(
            artifact_path(Path::new("/out"), "12345610105000"),
            PathBuf::from("/out/12345610105000.png")
        );
    }
}
