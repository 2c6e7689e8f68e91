//! # hq-core
//!
//! Core crate for the quote feed system, providing:
//!
//! - **Types** (`types`): exchange enums, raw records, normalized quotes
//! - **Pricing** (`pricing`): shared precision, change and percent change
//! - **Number formatting** (`numfmt`): decimal parsing and display helpers
//! - **Sorting** (`sort`): display order of quote lists
//! - **Configuration** (`config`): JSON config deserialization
//! - **Error types** (`error`): domain-specific `HqError` via thiserror
//! - **Logging** (`logging`): tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod numfmt;
pub mod pricing;
pub mod sort;
pub mod types;

// Re-export types at crate root for convenience.
pub use types::*;
