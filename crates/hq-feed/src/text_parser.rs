//! Quote feed text parser.
//!
//! Turns one decoded response body into [`NormalizedQuote`]s:
//!
//! ```text
//! body ──► splitter::split()  ──► RawQuoteRecord per code
//!      ──► layout::dispatch() ──► QuoteFields (or dropped)
//!      ──► pricing::derive()  ──► NormalizedQuote (or dropped)
//! ```
//!
//! Dropped records are logged at `debug` and otherwise ignored.

use hq_core::error::HqError;
use hq_core::numfmt::{format_number, parse_figure};
use hq_core::pricing;
use hq_core::types::{DropReason, FeedFigure, NormalizedQuote, QuoteStatus, RawQuoteRecord};
use tracing::debug;

use crate::layout::{self, Dispatch, QuoteFields};
use crate::splitter;

/// Decimals used for volume and amount.
const FIGURE_PRECISION: u32 = 2;

/// Parse a whole response body.
///
/// Returns [`HqError::BatchFailed`] if the feed rejected the batch. Records
/// that cannot be normalized are skipped.
pub fn parse_response(body: &str) -> Result<Vec<NormalizedQuote>, HqError> {
    let quotes = splitter::split(body)?
        .filter_map(|record| match normalize_record(&record) {
            Ok(quote) => Some(quote),
            Err(reason) => {
                debug!(code = record.code, %reason, "record dropped");
                None
            }
        })
        .collect();
    Ok(quotes)
}

/// Normalize one raw record.
pub fn normalize_record(record: &RawQuoteRecord<'_>) -> Result<NormalizedQuote, DropReason> {
    match layout::dispatch(record) {
        Dispatch::Fields(fields) => normalize(fields),
        Dispatch::Dropped(reason) => Err(reason),
    }
}

fn normalize(fields: QuoteFields<'_>) -> Result<NormalizedQuote, DropReason> {
    let pricing = pricing::derive(fields.prices)?;
    let figure = |s: &str| FeedFigure::Value(format_number(parse_figure(s), FIGURE_PRECISION, true));

    Ok(NormalizedQuote {
        code: fields.code.to_string(),
        exchange_type: fields.exchange_type,
        symbol: fields.symbol.to_string(),
        name: fields.name.to_string(),
        pricing,
        volume: figure(fields.volume),
        amount: fields.amount.map_or(FeedFigure::Unavailable, figure),
        status: QuoteStatus::Live,
    })
}

#[cfg(test)]
mod tests {
    use hq_core::types::ExchangeType;

    use super::*;

    const SH600000: &str =
        "var hq_str_sh600000=\"浦发银行,10.00,10.00,10.50,10.60,9.90,10.49,10.50,1000,10000\";\n";

    #[test]
    fn a_share_example() {
        let quotes = parse_response(SH600000).unwrap();
        assert_eq!(quotes.len(), 1);
        let q = &quotes[0];
        assert_eq!(q.code, "sh600000");
        assert_eq!(q.symbol, "600000");
        assert_eq!(q.exchange_type, ExchangeType::ShenzhenShanghai);
        assert_eq!(q.market_tag(), "sh");
        assert_eq!(q.name, "浦发银行");
        assert_eq!(q.pricing.open(), "10.00");
        assert_eq!(q.pricing.price(), "10.50");
        assert_eq!(q.pricing.change(), "0.50");
        assert_eq!(q.pricing.change_percent(), "+5.00");
        assert_eq!(q.volume, FeedFigure::Value("1000.00".into()));
        assert_eq!(q.amount, FeedFigure::Value("1.00万".into()));
        assert!(q.is_live());
    }

    #[test]
    fn hong_kong_record() {
        let body = "var hq_str_hk00700=\"TENCENT,腾讯控股,300.000,298.000,305.000,296.000,302.000,4.000,1.342,301.800,302.000,5000000000,9500000,0.000,0.000,420.000,250.000,2024/01/02,16:08\";\n";
        let q = &parse_response(body).unwrap()[0];
        assert_eq!(q.exchange_type, ExchangeType::HongKong);
        assert_eq!(q.name, "腾讯控股");
        assert_eq!(q.pricing.open(), "300.00");
        assert_eq!(q.pricing.yesterday_close(), "298.00");
        assert_eq!(q.pricing.price(), "302.00");
        assert_eq!(q.pricing.high(), "305.00");
        assert_eq!(q.pricing.low(), "296.00");
        assert_eq!(q.pricing.change(), "4.00");
        assert_eq!(q.pricing.change_percent(), "+1.34");
        assert_eq!(q.volume, FeedFigure::Value("950.00万".into()));
        assert_eq!(q.amount, FeedFigure::Value("50.00亿".into()));
    }

    #[test]
    fn us_gb_record_has_no_amount() {
        let mut fields = vec!["0"; 27];
        fields[0] = "阿里巴巴";
        fields[1] = "76.50";
        fields[5] = "78.00";
        fields[6] = "78.20";
        fields[7] = "76.10";
        fields[10] = "12000000";
        fields[26] = "78.00";
        let body = format!("var hq_str_gb_baba=\"{}\";\n", fields.join(","));
        let q = &parse_response(&body).unwrap()[0];
        assert_eq!(q.exchange_type, ExchangeType::UsAdrGb);
        assert_eq!(q.symbol, "baba");
        assert_eq!(q.market_tag(), "gb_");
        assert_eq!(q.pricing.change(), "-1.50");
        assert_eq!(q.pricing.change_percent(), "-1.92");
        assert_eq!(q.volume, FeedFigure::Value("0.12亿".into()));
        assert_eq!(q.amount, FeedFigure::Unavailable);
    }

    #[test]
    fn drops_noise_and_keeps_the_rest() {
        let body = format!(
            "{SH600000}var hq_str_sh999999=\"\";\nvar hq_str_fx_susdcny=\"a,b,c\";\nvar hq_str_sz000002=\"万科A,7.0,x,7.1,7.2,6.9,0,0,1,2\";\n"
        );
        let quotes = parse_response(&body).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].code, "sh600000");
    }

    #[test]
    fn failed_body_is_batch_failure() {
        assert_eq!(parse_response("FAILED\n"), Err(HqError::BatchFailed));
    }

    #[test]
    fn normalize_reports_reason() {
        let record = RawQuoteRecord { code: "xx1", fields: vec!["a", "b"] };
        assert_eq!(normalize_record(&record), Err(DropReason::UnknownExchangePrefix));
    }
}
