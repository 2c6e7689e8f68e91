//! # hq-feed
//!
//! Quote acquisition for the Sina-style `hq_str` text feed.
//!
//! ## Architecture
//!
//! [`service::QuoteService`] fetches a batch of codes through a
//! [`source::QuoteSource`], parses the body into normalized quotes and
//! partitions them for display. A batch the feed rejects is retried one code
//! at a time so a single bad code cannot blank out the rest.
//!
//! ## Modules
//!
//! - [`splitter`]: response body into per-code raw records
//! - [`layout`]: per-exchange field positions and dispatch
//! - [`text_parser`]: raw records into [`hq_core::NormalizedQuote`]
//! - [`partition`]: sorted full list, status subset, default benchmark
//! - [`source`]: HTTP fetcher and the source trait
//! - [`event`]: user-facing notifications
//! - [`service`]: batch fallback controller

pub mod event;
pub mod layout;
pub mod partition;
pub mod service;
pub mod source;
pub mod splitter;
pub mod text_parser;

pub use event::{FeedEvent, FeedEventReceiver, FeedEventSender};
pub use service::QuoteService;
pub use source::{QuoteSource, SinaHttpSource};
