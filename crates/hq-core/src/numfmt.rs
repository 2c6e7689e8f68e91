//! Numeric parsing and formatting helpers for feed values.
//!
//! Feed fields are decimal strings. Prices go through [`rust_decimal`] so that
//! rounding to the display precision is exact; volume and amount only need to
//! be displayed and are parsed as `f64`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Precision used when the feed reports more decimals than are useful.
/// Index feeds report four decimals but are read with two.
pub const DEFAULT_PRECISION: u32 = 2;

/// Highest precision kept as reported (fund/ETF prices use three).
pub const MAX_PRECISION: u32 = 3;

/// Choose one display precision for a quote from its five price strings.
///
/// Counts the significant decimals of each value (trailing zeros trimmed) and
/// takes the maximum. More than [`MAX_PRECISION`] falls back to
/// [`DEFAULT_PRECISION`]; the result is never below [`DEFAULT_PRECISION`].
pub fn choose_precision(open: &str, yesterday_close: &str, price: &str, high: &str, low: &str) -> u32 {
    let max = [open, yesterday_close, price, high, low]
        .into_iter()
        .map(significant_decimals)
        .max()
        .unwrap_or(0);

    if max > MAX_PRECISION { DEFAULT_PRECISION } else { max.max(DEFAULT_PRECISION) }
}

fn significant_decimals(s: &str) -> u32 {
    let s = s.trim();
    match s.split_once('.') {
        Some((_, frac)) => frac.trim_end_matches('0').len() as u32,
        None => 0,
    }
}

/// Parse a price-like field. An empty field reads as zero.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(s.strip_prefix('+').unwrap_or(s)).ok()
}

/// Parse a display-only quantity (volume, amount). Anything unparseable
/// reads as zero.
pub fn parse_figure(s: &str) -> f64 {
    fast_float2::parse(s.trim()).unwrap_or(0.0)
}

/// Render `value` with exactly `precision` decimals, rounding half away from
/// zero. A value that rounds to zero is rendered without a sign.
pub fn format_decimal(value: Decimal, precision: u32) -> String {
    let mut v = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    if v.is_zero() {
        v.set_sign_positive(true);
    }
    v.rescale(precision);
    v.to_string()
}

/// Render a quantity with `precision` decimals.
///
/// With `with_grouping`, values above ten million are shown in 亿 (1e8) and
/// values above one thousand in 万 (1e4).
pub fn format_number(value: f64, precision: u32, with_grouping: bool) -> String {
    let p = precision as usize;
    if with_grouping {
        if value > 10_000_000.0 {
            return format!("{:.p$}亿", value / 100_000_000.0);
        }
        if value > 1_000.0 {
            return format!("{:.p$}万", value / 10_000.0);
        }
    }
    format!("{value:.p$}")
}
