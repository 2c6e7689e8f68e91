//! Normalized quote structures: the uniform shape handed to the display layer.
//!
//! Every exchange layout is reduced to [`NormalizedQuote`]. Price-derived
//! values live in [`Pricing`], which can only be produced by
//! [`crate::pricing::derive`] so that the shared precision and the change
//! figures always agree with each other.

use serde::Serialize;

use super::exchange::ExchangeType;

/// Canonical code of the Shanghai Composite Index, the preferred default
/// benchmark.
pub const SHANGHAI_COMPOSITE: &str = "sh000001";

/// Display name of the synthetic quote produced for a rejected code.
pub const INVALID_CODE_NAME: &str = "invalid code";

/// Text shown when the feed does not carry a figure for an exchange.
pub const UNAVAILABLE_TEXT: &str = "接口无数据";

// ---------------------------------------------------------------------------
// FeedFigure
// ---------------------------------------------------------------------------

/// A formatted quantity the feed may not provide (volume, amount).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeedFigure {
    Value(String),
    Unavailable,
}

impl FeedFigure {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl std::fmt::Display for FeedFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.write_str(v),
            Self::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Price fields of one quote, all rendered at one shared precision, plus the
/// change and percent change derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pricing {
    pub(crate) open: String,
    pub(crate) yesterday_close: String,
    pub(crate) price: String,
    pub(crate) high: String,
    pub(crate) low: String,
    pub(crate) change: String,
    pub(crate) change_percent: String,
    pub(crate) precision: u32,
}

impl Pricing {
    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn yesterday_close(&self) -> &str {
        &self.yesterday_close
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn high(&self) -> &str {
        &self.high
    }

    pub fn low(&self) -> &str {
        &self.low
    }

    /// `price - yesterday_close` at [`precision`](Self::precision).
    pub fn change(&self) -> &str {
        &self.change
    }

    /// Signed percent change with an explicit `+`/`-` and two decimals.
    pub fn change_percent(&self) -> &str {
        &self.change_percent
    }

    /// Decimal places shared by every price field of this quote.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Placeholder pricing for a code the feed rejected.
    pub(crate) fn rejected() -> Self {
        Self {
            open: String::new(),
            yesterday_close: String::new(),
            price: String::new(),
            high: String::new(),
            low: String::new(),
            change: String::new(),
            change_percent: "0".into(),
            precision: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedQuote
// ---------------------------------------------------------------------------

/// Whether a quote carries live feed data or stands in for a rejected code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Live,
    InvalidCode,
}

/// One instrument quote in exchange-independent form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedQuote {
    /// Feed code including the exchange prefix (e.g. `"hk00700"`).
    pub code: String,
    pub exchange_type: ExchangeType,
    /// Code with the exchange prefix stripped.
    pub symbol: String,
    pub name: String,
    #[serde(flatten)]
    pub pricing: Pricing,
    pub volume: FeedFigure,
    pub amount: FeedFigure,
    pub status: QuoteStatus,
}

impl NormalizedQuote {
    /// Synthetic quote standing in for a code the feed rejected.
    ///
    /// Codes without a recognizable prefix are tagged as Shanghai/Shenzhen
    /// and keep the whole code as their symbol.
    pub fn invalid(code: &str, exchange_type: Option<ExchangeType>) -> Self {
        let symbol = match exchange_type {
            Some(t) => code.get(t.prefix_len()..).unwrap_or_default(),
            None => code,
        };
        Self {
            code: code.to_string(),
            exchange_type: exchange_type.unwrap_or(ExchangeType::ShenzhenShanghai),
            symbol: symbol.to_string(),
            name: INVALID_CODE_NAME.to_string(),
            pricing: Pricing::rejected(),
            volume: FeedFigure::Unavailable,
            amount: FeedFigure::Unavailable,
            status: QuoteStatus::InvalidCode,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == QuoteStatus::Live
    }

    /// Exchange prefix of the code: `"sh"`, `"sz"`, `"hk"`, `"gb_"` or
    /// `"usr_"`, i.e. whatever precedes the symbol. Empty for a rejected code
    /// without a known prefix.
    pub fn market_tag(&self) -> &str {
        self.code.strip_suffix(self.symbol.as_str()).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// QuoteBatchResult
// ---------------------------------------------------------------------------

/// Return value of one acquisition call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteBatchResult {
    /// Every quote, in the caller's sort order.
    pub all: Vec<NormalizedQuote>,
    /// Pinned quotes in the same order, or the default benchmark alone.
    pub status_subset: Vec<NormalizedQuote>,
}

impl QuoteBatchResult {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_quote_shape() {
        let q = NormalizedQuote::invalid("bad1", None);
        assert_eq!(q.name, INVALID_CODE_NAME);
        assert_eq!(q.pricing.change_percent(), "0");
        assert_eq!(q.status, QuoteStatus::InvalidCode);
        assert_eq!(q.exchange_type, ExchangeType::ShenzhenShanghai);
        assert!(!q.is_live());
    }

    #[test]
    fn unprefixed_invalid_code_keeps_whole_symbol() {
        let q = NormalizedQuote::invalid("bad1", None);
        assert_eq!(q.symbol, "bad1");
        assert_eq!(q.market_tag(), "");

        let q = NormalizedQuote::invalid("sh99999x", Some(ExchangeType::ShenzhenShanghai));
        assert_eq!(q.symbol, "99999x");
        assert_eq!(q.market_tag(), "sh");
    }

    #[test]
    fn market_tag_matches_strip_length() {
        let q = NormalizedQuote::invalid("usr_aapl", Some(ExchangeType::UsAdrUsr));
        assert_eq!(q.market_tag(), "usr_");
        assert_eq!(q.symbol, "aapl");

        let q = NormalizedQuote::invalid("gb_baba", Some(ExchangeType::UsAdrGb));
        assert_eq!(q.market_tag(), "gb_");
        assert_eq!(q.symbol, "baba");
    }

    #[test]
    fn short_code_does_not_panic() {
        let q = NormalizedQuote::invalid("x", Some(ExchangeType::UsAdrUsr));
        assert_eq!(q.symbol, "");
        assert_eq!(q.market_tag(), "x");
    }

    #[test]
    fn unavailable_figure_display() {
        assert_eq!(FeedFigure::Unavailable.to_string(), UNAVAILABLE_TEXT);
        assert_eq!(FeedFigure::Value("1.00万".into()).to_string(), "1.00万");
        assert!(!FeedFigure::Unavailable.is_available());
    }
}
