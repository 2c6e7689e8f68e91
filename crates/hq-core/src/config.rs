//! Configuration parsing for the quote feed system.
//!
//! All settings come from a single JSON config file. The top-level structure
//! contains logging metadata, the feed endpoint settings, the codes to request
//! and the codes pinned to the status display.
//!
//! # Example config
//!
//! ```json
//! {
//!   "logging": { "module_name": "hq", "log_level": "info", "log_path": "/tmp/log" },
//!   "feed": { "endpoint": "https://hq.sinajs.cn/list=", "timeout_ms": 5000 },
//!   "codes": ["sh000001", "sz000002", "hk00700", "gb_baba", "usr_aapl"],
//!   "status_bar_codes": ["sh000001"],
//!   "sort_order": "descending"
//! }
//! ```

use std::time::Duration;

use anyhow::Context;
use encoding_rs::Encoding;
use serde::Deserialize;

use crate::error::HqError;
use crate::sort::SortOrder;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging metadata (module name, level, log path).
    #[serde(default)]
    pub logging: Option<LoggingConfig>,

    /// Quote endpoint settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Codes to request, each with its exchange prefix.
    pub codes: Vec<String>,

    /// Codes pinned to the status display. Empty means "show the default
    /// benchmark".
    #[serde(default)]
    pub status_bar_codes: Vec<String>,

    /// Display order of the result lists.
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl AppConfig {
    /// Returns the module name used as log file prefix.
    pub fn module_name(&self) -> String {
        self.logging.as_ref().and_then(|m| m.module_name.clone()).unwrap_or_else(|| "hq".to_string())
    }

    /// Returns the configured log level, defaulting to `info`.
    pub fn log_level(&self) -> String {
        self.logging.as_ref().and_then(|m| m.log_level.clone()).unwrap_or_else(|| "info".to_string())
    }

    /// Returns the log path.
    pub fn log_path(&self) -> Option<String> {
        self.logging.as_ref().and_then(|m| m.log_path.clone())
    }

    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<(), HqError> {
        self.feed.validate()
    }
}

/// Logging metadata block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub module_name: Option<String>,
    pub log_level: Option<String>,
    pub log_path: Option<String>,
}

/// Quote endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// URL prefix; the comma-joined code list is appended verbatim.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// `Referer` header sent with every request. The feed rejects requests
    /// without one.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Charset label of the response body (WHATWG label, e.g. `"GB18030"`).
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Issue per-code fallback requests concurrently.
    #[serde(default = "default_parallel_fallback")]
    pub parallel_fallback: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            referer: default_referer(),
            charset: default_charset(),
            timeout_ms: default_timeout_ms(),
            parallel_fallback: default_parallel_fallback(),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Resolve the configured charset label.
    pub fn encoding(&self) -> Result<&'static Encoding, HqError> {
        Encoding::for_label(self.charset.trim().as_bytes())
            .ok_or_else(|| HqError::Config(format!("unknown charset '{}'", self.charset)))
    }

    pub fn validate(&self) -> Result<(), HqError> {
        if self.endpoint.trim().is_empty() {
            return Err(HqError::Config("feed.endpoint is empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(HqError::Config("feed.timeout_ms must be positive".into()));
        }
        self.encoding().map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Defaults (used by serde)
// ---------------------------------------------------------------------------

fn default_endpoint() -> String {
    "https://hq.sinajs.cn/list=".into()
}

fn default_referer() -> String {
    "https://finance.sina.com.cn/".into()
}

fn default_charset() -> String {
    "GB18030".into()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_parallel_fallback() -> bool {
    true
}

/// Parse a JSON config string and validate it.
pub fn parse_config(content: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = serde_json::from_str(content).context("invalid config JSON")?;
    config.validate()?;
    Ok(config)
}

/// Load, parse and validate a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("cannot read config {}", path.display()))?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "codes": ["sh000001"] }"#).unwrap();
        assert_eq!(cfg.codes, ["sh000001"]);
        assert!(cfg.status_bar_codes.is_empty());
        assert_eq!(cfg.sort_order, SortOrder::Unsorted);
        assert_eq!(cfg.feed.endpoint, "https://hq.sinajs.cn/list=");
        assert_eq!(cfg.feed.timeout(), Duration::from_secs(5));
        assert!(cfg.feed.parallel_fallback);
        assert_eq!(cfg.module_name(), "hq");
        assert_eq!(cfg.log_level(), "info");
        assert_eq!(cfg.log_path(), None);
    }

    #[test]
    fn full_config() {
        let cfg = parse_config(
            r#"{
                "logging": { "module_name": "quotes", "log_level": "debug", "log_path": "/tmp/hq" },
                "feed": { "endpoint": "http://localhost:8080/list=", "timeout_ms": 250, "parallel_fallback": false },
                "codes": ["sh000001", "hk00700"],
                "status_bar_codes": ["hk00700"],
                "sort_order": "desc"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.module_name(), "quotes");
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.log_path().as_deref(), Some("/tmp/hq"));
        assert_eq!(cfg.feed.timeout_ms, 250);
        assert!(!cfg.feed.parallel_fallback);
        assert_eq!(cfg.feed.charset, "GB18030");
        assert_eq!(cfg.sort_order, SortOrder::Descending);
    }

    #[test]
    fn rejects_bad_feed_settings() {
        assert!(parse_config(r#"{ "codes": [], "feed": { "timeout_ms": 0 } }"#).is_err());
        assert!(parse_config(r#"{ "codes": [], "feed": { "endpoint": " " } }"#).is_err());
        assert!(parse_config(r#"{ "codes": [], "feed": { "charset": "klingon" } }"#).is_err());
    }

    #[test]
    fn charset_label_resolves() {
        let feed = FeedConfig::default();
        assert_eq!(feed.encoding().unwrap(), encoding_rs::GB18030);
    }
}
