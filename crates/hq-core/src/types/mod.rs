//! Core data types: exchange enums, raw feed records, and normalized quotes.

pub mod exchange;
pub mod quote;
pub mod record;

pub use exchange::*;
pub use quote::*;
pub use record::*;
