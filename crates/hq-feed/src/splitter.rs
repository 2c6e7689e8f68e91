//! Splits a decoded feed body into one [`RawQuoteRecord`] per code.
//!
//! Wire shape (one line per requested code):
//!
//! ```text
//! var hq_str_sh600000="浦发银行,10.00,10.00,10.50,...";\n
//! var hq_str_hk00700="TENCENT,腾讯控股,...";\n
//! ```
//!
//! A body containing the literal `FAILED` anywhere means the feed rejected
//! the whole batch; no record is produced in that case.

use hq_core::error::HqError;
use hq_core::types::RawQuoteRecord;
use tracing::trace;

/// Token the feed emits when it rejects the requested batch.
pub const BATCH_FAILED_MARKER: &str = "FAILED";

/// Records end in `;` and are newline-delimited (`;\n`). Splitting on the
/// newline alone also accepts `;\r\n` and a missing final newline.
const RECORD_DELIMITER: char = '\n';
const CODE_MARKER: &str = "hq_str_";
const ASSIGN: &str = "=\"";

/// Split `body` into records, or report [`HqError::BatchFailed`].
///
/// The returned iterator is lazy and borrows from `body`.
pub fn split(body: &str) -> Result<Records<'_>, HqError> {
    if body.contains(BATCH_FAILED_MARKER) {
        return Err(HqError::BatchFailed);
    }
    Ok(Records { segments: body.split(RECORD_DELIMITER) })
}

/// Lazy iterator over the records of one feed body.
pub struct Records<'a> {
    segments: std::str::Split<'a, char>,
}

impl<'a> Iterator for Records<'a> {
    type Item = RawQuoteRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let segment = self.segments.next()?;
            if let Some(record) = parse_segment(segment) {
                return Some(record);
            }
        }
    }
}

/// Parse one `var hq_str_<code>="<fields>"` segment. Blank segments (the
/// trailing one after the last delimiter) and segments without an assignment
/// are skipped.
fn parse_segment(segment: &str) -> Option<RawQuoteRecord<'_>> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    let Some((lhs, rhs)) = segment.split_once(ASSIGN) else {
        trace!(segment, "skipping segment without assignment");
        return None;
    };
    let Some((_, code)) = lhs.trim().split_once(CODE_MARKER) else {
        trace!(segment, "skipping segment without code marker");
        return None;
    };

    let payload = rhs.trim_end_matches(';');
    let payload = payload.strip_suffix('"').unwrap_or(payload);

    Some(RawQuoteRecord { code, fields: payload.split(',').collect() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = concat!(
        "var hq_str_sh600000=\"浦发银行,10.00,10.00,10.50\";\n",
        "var hq_str_hk00700=\"TENCENT,腾讯控股,300.0\";\n",
    );

    #[test]
    fn splits_records_in_order() {
        let records: Vec<_> = split(BODY).unwrap().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "sh600000");
        assert_eq!(records[0].fields, ["浦发银行", "10.00", "10.00", "10.50"]);
        assert_eq!(records[1].code, "hk00700");
        assert_eq!(records[1].fields, ["TENCENT", "腾讯控股", "300.0"]);
    }

    #[test]
    fn splitting_twice_is_identical() {
        let a: Vec<_> = split(BODY).unwrap().collect();
        let b: Vec<_> = split(BODY).unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn failed_marker_anywhere_fails_batch() {
        assert_eq!(split("FAILED").err(), Some(HqError::BatchFailed));
        let body = format!("{BODY}var hq_str_bad=\"FAILED\";\n");
        assert!(split(&body).is_err());
    }

    #[test]
    fn empty_payload_yields_single_empty_field() {
        let records: Vec<_> = split("var hq_str_sh999999=\"\";\n").unwrap().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields, [""]);
    }

    #[test]
    fn tolerates_missing_trailing_newline_and_crlf() {
        let body = "var hq_str_sz000002=\"万科A,1,2\";\r\nvar hq_str_sz000001=\"平安银行,3,4\";";
        let records: Vec<_> = split(body).unwrap().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "sz000002");
        assert_eq!(records[1].fields, ["平安银行", "3", "4"]);
    }

    #[test]
    fn skips_garbage_segments() {
        let body = "<html>oops</html>;\nvar hq_str_sh600000=\"a,b\";\n";
        let records: Vec<_> = split(body).unwrap().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "sh600000");
    }

    #[test]
    fn empty_body_has_no_records() {
        assert_eq!(split("").unwrap().count(), 0);
        assert_eq!(split("\n").unwrap().count(), 0);
    }
}
