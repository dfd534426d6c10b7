//! Rendering-service request descriptor.
//!
//! The barcode is an Interleaved 2 of 5 symbol with fixed display options
//! (`bc2`..`bc9`); only `bc1`, the code itself, varies per request.

use anyhow::{Context, Result};
use url::Url;

use crate::config::IlusionaConfig;

pub const DEFAULT_BASE_URL: &str = "https://free-barcode.com/barcode.asp";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) ilusiona_gen_download/1.0";
pub const ACCEPT_IMAGE: &str = "image/png,image/*;q=0.9,*/*;q=0.8";

/// Symbology (17 = Interleaved 2 of 5), module width, ratio, font and height.
const RENDER_OPTIONS: [(&str, &str); 8] = [
    ("bc2", "17"),
    ("bc3", "3"),
    ("bc4", "1.05"),
    ("bc5", "1"),
    ("bc6", "1"),
    ("bc7", "Arial"),
    ("bc8", "15"),
    ("bc9", "1"),
];

/// A fully parameterized GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Maps a code to its request. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct BarcodeRequestBuilder {
    base_url: Url,
    user_agent: String,
}

impl BarcodeRequestBuilder {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid base URL: {}", base_url))?;
        Ok(Self {
            base_url,
            user_agent: user_agent.to_string(),
        })
    }

    pub fn from_config(cfg: &IlusionaConfig) -> Result<Self> {
        Self::new(&cfg.base_url, &cfg.user_agent)
    }

    pub fn build(&self, code: &str) -> BarcodeRequest {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear().append_pair("bc1", code);
            for (name, value) in RENDER_OPTIONS {
                pairs.append_pair(name, value);
            }
        }
        BarcodeRequest {
            url: url.into(),
            headers: vec![
                ("User-Agent".to_string(), self.user_agent.clone()),
                ("Accept".to_string(), ACCEPT_IMAGE.to_string()),
            ],
        }
    }
}
