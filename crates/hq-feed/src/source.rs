//! Raw feed fetcher.
//!
//! [`QuoteSource`] is the seam between the fallback controller and the
//! network. [`SinaHttpSource`] is the production implementation: one HTTP GET
//! per call with the comma-joined code list appended to the endpoint.
//!
//! | Step      | Detail                                                  |
//! |-----------|---------------------------------------------------------|
//! | URL       | `<endpoint><code>,<code>,...` (codes percent-encoded)   |
//! | Headers   | `Referer` from config, random `User-Agent` per request  |
//! | Timeout   | `feed.timeout_ms`, surfaces as [`HqError::Network`]     |
//! | Status    | non-2xx is [`HqError::Network`] unless the body is `FAILED` |
//! | Decoding  | body bytes → UTF-8 via `encoding_rs` (GB18030 default)  |

use async_trait::async_trait;
use encoding_rs::Encoding;
use hq_core::config::FeedConfig;
use hq_core::error::HqError;
use rand::seq::IndexedRandom;
use reqwest::header::{REFERER, USER_AGENT};
use tracing::{debug, warn};

use crate::splitter::BATCH_FAILED_MARKER;

/// Source of raw quote feed text.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Human-readable request target for `codes`, used in notifications.
    fn describe(&self, codes: &[String]) -> String;

    /// Issue one request for all `codes` and return the decoded body.
    ///
    /// `codes` is never empty.
    async fn fetch(&self, codes: &[String]) -> Result<String, HqError>;
}

/// Browser user agents rotated across requests.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

fn random_user_agent() -> &'static str {
    USER_AGENTS.choose(&mut rand::rng()).copied().unwrap_or(USER_AGENTS[0])
}

/// Build the request URL for `codes`.
pub fn request_url(endpoint: &str, codes: &[String]) -> String {
    let list: Vec<_> = codes.iter().map(|c| urlencoding::encode(c)).collect();
    format!("{endpoint}{}", list.join(","))
}

/// HTTP quote source for the Sina-style `hq_str` feed.
pub struct SinaHttpSource {
    /// Shared HTTP client (carries the request timeout).
    http: reqwest::Client,
    endpoint: String,
    referer: String,
    encoding: &'static Encoding,
}

impl SinaHttpSource {
    pub fn new(config: &FeedConfig) -> Result<Self, HqError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HqError::Network(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            referer: config.referer.clone(),
            encoding: config.encoding()?,
        })
    }
}

#[async_trait]
impl QuoteSource for SinaHttpSource {
    fn describe(&self, codes: &[String]) -> String {
        request_url(&self.endpoint, codes)
    }

    async fn fetch(&self, codes: &[String]) -> Result<String, HqError> {
        let url = request_url(&self.endpoint, codes);
        debug!(%url, "requesting quotes");

        let resp = self
            .http
            .get(&url)
            .header(REFERER, &self.referer)
            .header(USER_AGENT, random_user_agent())
            .send()
            .await
            .map_err(|e| HqError::Network(format!("request failed: {e}")))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HqError::Network(format!("reading body failed: {e}")))?;

        let (text, _, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            warn!(%url, encoding = self.encoding.name(), "body contained undecodable bytes");
        }

        // The feed may reject a batch with an error status; that still goes
        // to the parser so the per-code fallback can run.
        if !status.is_success() && !text.contains(BATCH_FAILED_MARKER) {
            return Err(HqError::Network(format!("HTTP {status}")));
        }
        Ok(text.into_owned())
    }
}
