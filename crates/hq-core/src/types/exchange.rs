//! Enumerations shared by the feed parser and the display layer.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Exchange type
// ---------------------------------------------------------------------------

/// Exchange family a quote code belongs to, derived from its prefix.
///
/// | Variant            | Prefix         | Prefix length |
/// |--------------------|----------------|---------------|
/// | `ShenzhenShanghai` | `sh`, `sz`     | 2             |
/// | `HongKong`         | `hk`           | 2             |
/// | `UsAdrGb`          | `gb_`          | 3             |
/// | `UsAdrUsr`         | `usr_`         | 4             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeType {
    ShenzhenShanghai,
    HongKong,
    UsAdrGb,
    UsAdrUsr,
}

impl ExchangeType {
    /// Number of leading characters of a code that name the exchange. The
    /// remainder is the bare symbol.
    pub const fn prefix_len(self) -> usize {
        match self {
            Self::ShenzhenShanghai | Self::HongKong => 2,
            Self::UsAdrGb => 3,
            Self::UsAdrUsr => 4,
        }
    }

    /// `true` when the feed does not report traded amount for this exchange.
    pub const fn lacks_amount(self) -> bool {
        matches!(self, Self::UsAdrGb | Self::UsAdrUsr)
    }
}

impl std::fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShenzhenShanghai => write!(f, "sh/sz"),
            Self::HongKong => write!(f, "hk"),
            Self::UsAdrGb => write!(f, "gb_"),
            Self::UsAdrUsr => write!(f, "usr_"),
        }
    }
}

// ---------------------------------------------------------------------------
// Drop reasons
// ---------------------------------------------------------------------------

/// Why a raw record was skipped instead of becoming a quote.
///
/// Feeds are noisy, so these are expected outcomes rather than errors. They
/// are logged at `debug` and never surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// Fewer than two fields, too few fields for the detected layout, or a
    /// price field that is not a number.
    MalformedRecord,
    /// The code prefix matches none of the known exchange layouts.
    UnknownExchangePrefix,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord => write!(f, "malformed record"),
            Self::UnknownExchangePrefix => write!(f, "unknown exchange prefix"),
        }
    }
}
