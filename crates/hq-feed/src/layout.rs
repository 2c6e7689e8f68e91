//! Exchange field layouts and the record dispatcher.
//!
//! All exchanges share one text protocol but place their values at different
//! positions. The positions are declared once, in [`LAYOUTS`]:
//!
//! | Prefix    | Exchange         | name | open | yclose | price | high | low | volume | amount |
//! |-----------|------------------|------|------|--------|-------|------|-----|--------|--------|
//! | `sh`/`sz` | ShenzhenShanghai | 0    | 1    | 2      | 3     | 4    | 5   | 8      | 9      |
//! | `hk`      | HongKong         | 1    | 2    | 3      | 6     | 4    | 5   | 12     | 11     |
//! | `gb_`     | UsAdrGb          | 0    | 5    | 26     | 1     | 6    | 7   | 10     | n/a    |
//! | `usr_`    | UsAdrUsr         | 0    | 5    | 26     | 1     | 6    | 7   | 10     | n/a    |

use hq_core::pricing::PriceInputs;
use hq_core::types::{DropReason, ExchangeType, RawQuoteRecord};

/// Positional field indices for one exchange prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Code prefix selecting this layout. Its length is the symbol strip length.
    pub prefix: &'static str,
    pub exchange_type: ExchangeType,
    pub name: usize,
    pub open: usize,
    pub yesterday_close: usize,
    pub price: usize,
    pub high: usize,
    pub low: usize,
    pub volume: usize,
    /// `None` when the feed does not report amount for this exchange.
    pub amount: Option<usize>,
}

impl FieldLayout {
    /// Smallest field count that covers every index of this layout.
    pub fn min_fields(&self) -> usize {
        let indices = [self.name, self.open, self.yesterday_close, self.price, self.high, self.low, self.volume];
        indices.into_iter().chain(self.amount).max().unwrap_or(0) + 1
    }
}

const A_SHARE: FieldLayout = FieldLayout {
    prefix: "sh",
    exchange_type: ExchangeType::ShenzhenShanghai,
    name: 0,
    open: 1,
    yesterday_close: 2,
    price: 3,
    high: 4,
    low: 5,
    volume: 8,
    amount: Some(9),
};

const US_ADR: FieldLayout = FieldLayout {
    prefix: "gb_",
    exchange_type: ExchangeType::UsAdrGb,
    name: 0,
    open: 5,
    yesterday_close: 26,
    price: 1,
    high: 6,
    low: 7,
    volume: 10,
    amount: None,
};

/// Every known layout, matched by code prefix.
pub const LAYOUTS: [FieldLayout; 5] = [
    A_SHARE,
    FieldLayout { prefix: "sz", ..A_SHARE },
    FieldLayout {
        prefix: "hk",
        exchange_type: ExchangeType::HongKong,
        name: 1,
        open: 2,
        yesterday_close: 3,
        price: 6,
        high: 4,
        low: 5,
        volume: 12,
        amount: Some(11),
    },
    US_ADR,
    FieldLayout { prefix: "usr_", exchange_type: ExchangeType::UsAdrUsr, ..US_ADR },
];

/// Find the layout for a code by prefix.
pub fn layout_for(code: &str) -> Option<&'static FieldLayout> {
    LAYOUTS.iter().find(|l| code.starts_with(l.prefix))
}

/// Values of one record picked out by its layout, still as feed strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFields<'a> {
    pub code: &'a str,
    pub exchange_type: ExchangeType,
    pub symbol: &'a str,
    pub name: &'a str,
    pub prices: PriceInputs<'a>,
    pub volume: &'a str,
    pub amount: Option<&'a str>,
}

/// Outcome of dispatching one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<'a> {
    Fields(QuoteFields<'a>),
    /// The record is skipped. Not an error.
    Dropped(DropReason),
}

/// Select the layout for `record` and extract its fields.
///
/// Records with fewer than two fields, an unknown prefix, or fewer fields
/// than their layout needs are dropped.
pub fn dispatch<'a>(record: &RawQuoteRecord<'a>) -> Dispatch<'a> {
    if record.fields.len() < 2 {
        return Dispatch::Dropped(DropReason::MalformedRecord);
    }
    let Some(layout) = layout_for(record.code) else {
        return Dispatch::Dropped(DropReason::UnknownExchangePrefix);
    };
    match extract(layout, record) {
        Some(fields) => Dispatch::Fields(fields),
        None => Dispatch::Dropped(DropReason::MalformedRecord),
    }
}

fn extract<'a>(layout: &FieldLayout, record: &RawQuoteRecord<'a>) -> Option<QuoteFields<'a>> {
    let code = record.code;
    Some(QuoteFields {
        code,
        exchange_type: layout.exchange_type,
        symbol: code.get(layout.prefix.len()..)?,
        name: record.field(layout.name)?,
        prices: PriceInputs {
            open: record.field(layout.open)?,
            yesterday_close: record.field(layout.yesterday_close)?,
            price: record.field(layout.price)?,
            high: record.field(layout.high)?,
            low: record.field(layout.low)?,
        },
        volume: record.field(layout.volume)?,
        amount: match layout.amount {
            Some(idx) => Some(record.field(idx)?),
            None => None,
        },
    })
}
