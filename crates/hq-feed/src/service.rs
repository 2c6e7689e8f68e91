//! Quote acquisition with batch-failure fallback.
//!
//! [`QuoteService::get_quotes`] runs the whole pipeline for one call:
//!
//! ```text
//! codes ──► Batch:   one request for all codes
//!             ├─ quotes         ──► partition
//!             ├─ network error  ──► notify, empty result
//!             └─ FAILED         ──► PerCode: one request per code
//!                                     ├─ quotes         ──► kept
//!                                     ├─ network error  ──► notify, nothing
//!                                     └─ FAILED         ──► notify, invalid-code quote
//! ```
//!
//! The per-code step takes a single code and has no fan-out path of its own,
//! so a call issues at most `1 + codes.len()` requests. Per-code requests run
//! concurrently when `parallel_fallback` is set; results are always combined
//! in the requested code order.

use std::sync::{Mutex, PoisonError};

use futures_util::future::join_all;
use hq_core::config::FeedConfig;
use hq_core::error::HqError;
use hq_core::sort::SortOrder;
use hq_core::types::{NormalizedQuote, QuoteBatchResult};
use tracing::{debug, info, warn};

use crate::event::{FeedEvent, FeedEventSender};
use crate::layout::layout_for;
use crate::partition::partition;
use crate::source::{QuoteSource, SinaHttpSource};
use crate::text_parser::parse_response;

/// Which stage of the fallback state machine a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First attempt, all requested codes in one request.
    Batch,
    /// Fallback after a rejected batch, one code per request. Terminal.
    PerCode,
}

/// Quote acquisition service.
///
/// Holds the quote source, the notification channel, and the default
/// benchmark remembered from the last batch that had one. Safe to share
/// behind an `Arc`; the benchmark lock is never held across an `.await`.
pub struct QuoteService<S> {
    source: S,
    events: FeedEventSender,
    parallel_fallback: bool,
    default_benchmark: Mutex<Option<NormalizedQuote>>,
}

impl QuoteService<SinaHttpSource> {
    /// Build a service backed by the HTTP feed described in `config`.
    pub fn from_config(config: &FeedConfig, events: FeedEventSender) -> Result<Self, HqError> {
        let source = SinaHttpSource::new(config)?;
        Ok(Self::new(source, events, config.parallel_fallback))
    }
}

impl<S: QuoteSource> QuoteService<S> {
    pub fn new(source: S, events: FeedEventSender, parallel_fallback: bool) -> Self {
        Self { source, events, parallel_fallback, default_benchmark: Mutex::new(None) }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Benchmark remembered from the most recent batch that had one.
    pub fn default_benchmark(&self) -> Option<NormalizedQuote> {
        self.default_benchmark.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Fetch and normalize `codes`, then partition them for display.
    ///
    /// Never fails: unrecovered problems are reported on the event channel
    /// and yield a degraded (empty or synthetic) result. An empty `codes`
    /// returns an empty result without any request.
    pub async fn get_quotes(&self, codes: &[String], pinned: &[String], order: SortOrder) -> QuoteBatchResult {
        if codes.is_empty() {
            return QuoteBatchResult::default();
        }
        info!("fetching quotes for {} code(s)", codes.len());

        let quotes = self.fetch_batch(codes).await;

        let remembered = self.default_benchmark();
        let parts = partition(quotes, pinned, order, remembered.as_ref());
        if let Some(benchmark) = &parts.default_benchmark {
            *self.default_benchmark.lock().unwrap_or_else(PoisonError::into_inner) = Some(benchmark.clone());
        }

        info!("fetched {} quote(s), {} in status subset", parts.all.len(), parts.status_subset.len());
        QuoteBatchResult { all: parts.all, status_subset: parts.status_subset }
    }

    /// Batch state: one request for every code.
    async fn fetch_batch(&self, codes: &[String]) -> Vec<NormalizedQuote> {
        if let [code] = codes {
            return self.fetch_one(code, FetchMode::Batch).await;
        }

        match self.request(codes).await {
            Ok(quotes) => quotes,
            Err(e) if e.is_batch_failure() => {
                warn!("batch of {} codes rejected, retrying one by one", codes.len());
                self.fan_out(codes).await
            }
            Err(e) => {
                self.notify_network_failure(codes, &e);
                Vec::new()
            }
        }
    }

    /// PerCode state: one request per code, combined in `codes` order.
    async fn fan_out(&self, codes: &[String]) -> Vec<NormalizedQuote> {
        if self.parallel_fallback {
            join_all(codes.iter().map(|code| self.fetch_one(code, FetchMode::PerCode)))
                .await
                .into_iter()
                .flatten()
                .collect()
        } else {
            let mut quotes = Vec::with_capacity(codes.len());
            for code in codes {
                quotes.extend(self.fetch_one(code, FetchMode::PerCode).await);
            }
            quotes
        }
    }

    /// Request a single code. A rejection here is final.
    async fn fetch_one(&self, code: &str, mode: FetchMode) -> Vec<NormalizedQuote> {
        let codes = [code.to_string()];
        match self.request(&codes).await {
            Ok(quotes) => quotes,
            Err(e) if e.is_batch_failure() => {
                warn!(code, ?mode, "feed rejected code");
                let _ = self.events.send(FeedEvent::InvalidCode { code: code.to_string() });
                vec![NormalizedQuote::invalid(code, layout_for(code).map(|l| l.exchange_type))]
            }
            Err(e) => {
                self.notify_network_failure(&codes, &e);
                Vec::new()
            }
        }
    }

    async fn request(&self, codes: &[String]) -> Result<Vec<NormalizedQuote>, HqError> {
        let body = self.source.fetch(codes).await?;
        let quotes = parse_response(&body)?;
        debug!("{} code(s) requested, {} quote(s) parsed", codes.len(), quotes.len());
        Ok(quotes)
    }

    fn notify_network_failure(&self, codes: &[String], err: &HqError) {
        let url = self.source.describe(codes);
        warn!(%url, "quote request failed: {err}");
        let _ = self.events.send(FeedEvent::NetworkFailure { url, message: err.to_string() });
    }
}
