//! Blocking HTTP transport seam.
//!
//! The fetcher only needs "GET this request, give me the whole body". The
//! production implementation uses libcurl; tests substitute scripted stubs.

mod curl_get;

pub use curl_get::CurlTransport;

use crate::request::BarcodeRequest;
use std::time::Duration;
use thiserror::Error;

/// Performs one blocking GET and returns the full response body.
pub trait Transport {
    fn get(&self, request: &BarcodeRequest, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &BarcodeRequest, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        (**self).get(request, timeout)
    }
}

/// Network-level failure for a single attempt. Always retryable.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Curl(e) if e.is_operation_timedout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_detection() {
        // 28 = CURLE_OPERATION_TIMEDOUT
        assert!(TransportError::Curl(curl::Error::new(28)).is_timeout());
        // 7 = CURLE_COULDNT_CONNECT
        assert!(!TransportError::Curl(curl::Error::new(7)).is_timeout());
        assert!(!TransportError::Http(504).is_timeout());
    }

    #[test]
    fn http_display() {
        assert_eq!(TransportError::Http(503).to_string(), "HTTP 503");
    }

    #[test]
    fn curl_error_converts_and_keeps_source() {
        use std::error::Error as _;
        let e: TransportError = curl::Error::new(7).into();
        assert!(matches!(e, TransportError::Curl(_)));
        assert!(e.source().is_some());
        assert!(TransportError::Http(404).source().is_none());
    }
}
