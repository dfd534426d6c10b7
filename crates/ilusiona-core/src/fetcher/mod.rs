//! Fetch, validate and cache one barcode PNG per code.
//!
//! Per code: skip if a non-empty file already sits at the destination;
//! otherwise GET with fixed-backoff retries on transport failure, stage the
//! body in a temp file, check the PNG signature and rename into place. A body
//! that is not a PNG fails the code immediately without retrying.

mod outcome;
mod signature;


pub use outcome::{FetchOutcome, FetchStatus};
pub use signature::{is_png, PNG_SIGNATURE};

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::config::IlusionaConfig;
use crate::error::FetchError;
use crate::request::BarcodeRequestBuilder;
use crate::retry::{RetryPolicy, RetryState};
use crate::storage::{self, StagedFile};
use crate::transport::Transport;

pub struct ArtifactFetcher<T> {
    transport: T,
    requests: BarcodeRequestBuilder,
    timeout: Duration,
    policy: RetryPolicy,
}

impl<T: Transport> ArtifactFetcher<T> {
    pub fn new(
        transport: T,
        requests: BarcodeRequestBuilder,
        timeout: Duration,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            requests,
            timeout,
            policy,
        }
    }

    pub fn from_config(transport: T, cfg: &IlusionaConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::new(
            transport,
            BarcodeRequestBuilder::from_config(cfg)?,
            cfg.timeout(),
            cfg.retry_policy(),
        ))
    }

    /// Make sure a PNG for `code` exists at `destination`.
    pub fn fetch(&self, code: &str, destination: &Path) -> FetchOutcome {
        if storage::is_cached(destination) {
            tracing::debug!(code, path = %destination.display(), "already cached");
            return self.outcome(code, destination, FetchStatus::Cached, 0, None);
        }

        let temp = storage::temp_path(destination);
        let mut state = RetryState::start();
        let mut last_error: Option<FetchError> = None;

        loop {
            match state {
                RetryState::Attempting(attempt) => {
                    let request = self.requests.build(code);
                    tracing::debug!(code, attempt, url = %request.url, "requesting barcode");
                    match self.transport.get(&request, self.timeout) {
                        Ok(body) => match commit(&temp, destination, &body) {
                            Ok(()) => state = state.on_success(),
                            Err(e) => {
                                tracing::warn!(code, attempt, "fetch failed: {}", e);
                                return self.outcome(
                                    code,
                                    destination,
                                    FetchStatus::Failed,
                                    attempt,
                                    Some(e),
                                );
                            }
                        },
                        Err(e) => {
                            tracing::warn!(
                                code,
                                attempt,
                                timeout = e.is_timeout(),
                                "transport error: {}",
                                e
                            );
                            if let Err(cleanup) = storage::remove_if_exists(&temp) {
                                tracing::warn!(path = %temp.display(), "could not remove temp file: {}", cleanup);
                            }
                            last_error = Some(FetchError::Transport(e));
                            state = state.on_transport_error(&self.policy);
                        }
                    }
                }
                RetryState::Backoff { attempt, delay } => {
                    tracing::debug!(code, attempt, ?delay, "backing off");
                    std::thread::sleep(delay);
                    state = state.after_backoff();
                }
                RetryState::Succeeded(attempts) => {
                    tracing::info!(code, attempts, path = %destination.display(), "fetched");
                    return self.outcome(code, destination, FetchStatus::Fetched, attempts, None);
                }
                RetryState::Exhausted(attempts) => {
                    tracing::warn!(code, attempts, "attempts exhausted");
                    return self.outcome(
                        code,
                        destination,
                        FetchStatus::Failed,
                        attempts,
                        last_error,
                    );
                }
            }
        }
    }

    fn outcome(
        &self,
        code: &str,
        destination: &Path,
        status: FetchStatus,
        attempts_used: u32,
        last_error: Option<FetchError>,
    ) -> FetchOutcome {
        FetchOutcome {
            code: code.to_string(),
            destination: destination.to_path_buf(),
            status,
            attempts_used,
            last_error,
        }
    }
}

/// Stage `body` at `temp`, check the PNG signature, then rename to `destination`.
/// Nothing is left at `temp` when this returns.
fn commit(temp: &Path, destination: &Path, body: &[u8]) -> Result<(), FetchError> {
    let mut staged = StagedFile::create(temp).map_err(|e| FetchError::filesystem(temp, e))?;
    if let Err(e) = staged.write_all(body).and_then(|()| staged.sync()) {
        staged.discard();
        return Err(FetchError::filesystem(temp, e));
    }
    if !is_png(body) {
        staged.discard();
        return Err(FetchError::ContentValidation { len: body.len() });
    }
    staged
        .finalize(destination)
        .map_err(|e| FetchError::filesystem(destination, e))
}
