//! Derived price metrics: shared precision, change, and percent change.
//!
//! ```text
//! open, yestclose, price, high, low (strings)
//!   ──► choose_precision()           one precision for all five
//!   ──► round each to precision      displayed prices
//!   ──► change  = price - yestclose  (on the rounded values)
//!   ──► percent = sign + |change| / yestclose * 100, two decimals
//! ```
//!
//! Change is computed from the rounded prices so the displayed figures always
//! add up. A zero `yesterday_close` yields a percent of `±0.00` with the sign
//! of the change.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::numfmt::{choose_precision, format_decimal, parse_decimal};
use crate::types::{DropReason, Pricing};

/// Decimals used for the percent change.
const PERCENT_PRECISION: u32 = 2;

/// Raw price strings of one record, as extracted by the layout dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceInputs<'a> {
    pub open: &'a str,
    pub yesterday_close: &'a str,
    pub price: &'a str,
    pub high: &'a str,
    pub low: &'a str,
}

/// Compute the [`Pricing`] block for one quote.
///
/// Fails with [`DropReason::MalformedRecord`] if any price field is not a
/// number.
pub fn derive(inputs: PriceInputs<'_>) -> Result<Pricing, DropReason> {
    let PriceInputs { open, yesterday_close, price, high, low } = inputs;
    let precision = choose_precision(open, yesterday_close, price, high, low);

    let round = |s: &str| -> Result<Decimal, DropReason> {
        parse_decimal(s)
            .map(|d| d.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero))
            .ok_or(DropReason::MalformedRecord)
    };

    let open = round(open)?;
    let yesterday_close = round(yesterday_close)?;
    let price = round(price)?;
    let high = round(high)?;
    let low = round(low)?;

    let change = price.checked_sub(yesterday_close).ok_or(DropReason::MalformedRecord)?;
    let change_percent = percent_change(change, yesterday_close)?;

    Ok(Pricing {
        open: format_decimal(open, precision),
        yesterday_close: format_decimal(yesterday_close, precision),
        price: format_decimal(price, precision),
        high: format_decimal(high, precision),
        low: format_decimal(low, precision),
        change: format_decimal(change, precision),
        change_percent,
        precision,
    })
}

fn percent_change(change: Decimal, yesterday_close: Decimal) -> Result<String, DropReason> {
    let sign = if change.is_sign_negative() && !change.is_zero() { '-' } else { '+' };

    let magnitude = if yesterday_close.is_zero() {
        Decimal::ZERO
    } else {
        change
            .abs()
            .checked_div(yesterday_close)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(DropReason::MalformedRecord)?
            .abs()
    };

    Ok(format!("{sign}{}", format_decimal(magnitude, PERCENT_PRECISION)))
}
