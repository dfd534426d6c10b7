//! Single blocking GET via a libcurl easy handle.

use super::{Transport, TransportError};
use crate::request::BarcodeRequest;
use std::time::Duration;

/// Follows redirects; `timeout` bounds connect and the whole transfer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport;

impl Transport for CurlTransport {
    fn get(&self, request: &BarcodeRequest, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(timeout)?;
        easy.timeout(timeout)?;

        let mut list = curl::easy::List::new();
        for (k, v) in &request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        tracing::trace!(url = %request.url, bytes = body.len(), "GET complete");
        Ok(body)
    }
}
