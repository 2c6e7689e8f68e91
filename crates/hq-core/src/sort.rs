//! Ordering of quote lists for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numfmt::parse_decimal;
use crate::types::NormalizedQuote;

/// Sort order applied to the result lists, keyed on percent change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep fetch order.
    #[default]
    #[serde(alias = "none")]
    #[value(name = "none")]
    Unsorted,
    #[serde(alias = "asc")]
    #[value(name = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    #[value(name = "desc")]
    Descending,
}

/// Stable sort by percent change. Quotes with an unreadable percent sort as
/// zero.
pub fn sort_quotes(mut quotes: Vec<NormalizedQuote>, order: SortOrder) -> Vec<NormalizedQuote> {
    let key = |q: &NormalizedQuote| parse_decimal(q.pricing.change_percent()).unwrap_or(Decimal::ZERO);
    match order {
        SortOrder::Unsorted => {}
        SortOrder::Ascending => quotes.sort_by_key(key),
        SortOrder::Descending => quotes.sort_by_key(|q| std::cmp::Reverse(key(q))),
    }
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PriceInputs, derive};
    use crate::types::{ExchangeType, FeedFigure, QuoteStatus};

    fn quote(code: &str, yc: &str, price: &str) -> NormalizedQuote {
        let pricing = derive(PriceInputs { open: yc, yesterday_close: yc, price, high: price, low: yc }).unwrap();
        NormalizedQuote {
            code: code.into(),
            exchange_type: ExchangeType::ShenzhenShanghai,
            symbol: code[2..].into(),
            name: code.into(),
            pricing,
            volume: FeedFigure::Value("0.00".into()),
            amount: FeedFigure::Value("0.00".into()),
            status: QuoteStatus::Live,
        }
    }

    fn codes(quotes: &[NormalizedQuote]) -> Vec<&str> {
        quotes.iter().map(|q| q.code.as_str()).collect()
    }

    #[test]
    fn unsorted_keeps_fetch_order() {
        let qs = vec![quote("sh1", "10.00", "9.00"), quote("sh2", "10.00", "11.00")];
        assert_eq!(codes(&sort_quotes(qs, SortOrder::Unsorted)), ["sh1", "sh2"]);
    }

    #[test]
    fn ascending_and_descending() {
        let qs = vec![
            quote("sh1", "10.00", "10.50"),
            quote("sh2", "10.00", "9.00"),
            quote("sh3", "10.00", "11.00"),
        ];
        assert_eq!(codes(&sort_quotes(qs.clone(), SortOrder::Ascending)), ["sh2", "sh1", "sh3"]);
        assert_eq!(codes(&sort_quotes(qs, SortOrder::Descending)), ["sh3", "sh1", "sh2"]);
    }

    #[test]
    fn ties_are_stable() {
        let qs = vec![
            quote("sh1", "10.00", "10.00"),
            quote("sh2", "20.00", "20.00"),
            NormalizedQuote::invalid("sh3", None),
        ];
        assert_eq!(codes(&sort_quotes(qs.clone(), SortOrder::Ascending)), ["sh1", "sh2", "sh3"]);
        assert_eq!(codes(&sort_quotes(qs, SortOrder::Descending)), ["sh1", "sh2", "sh3"]);
    }
}
