//! Result partitioning: the full list, the status-display subset, and the
//! default benchmark.

use std::collections::HashSet;

use hq_core::sort::{SortOrder, sort_quotes};
use hq_core::types::{NormalizedQuote, SHANGHAI_COMPOSITE};

/// Output of [`partition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub all: Vec<NormalizedQuote>,
    pub status_subset: Vec<NormalizedQuote>,
    /// Benchmark picked from this batch, if any.
    pub default_benchmark: Option<NormalizedQuote>,
}

/// Pick the default benchmark: the Shanghai Composite if present, else the
/// first live quote in fetch order. Rejected codes are never picked.
pub fn select_benchmark(quotes: &[NormalizedQuote]) -> Option<NormalizedQuote> {
    let live = || quotes.iter().filter(|q| q.is_live());
    live().find(|q| q.code == SHANGHAI_COMPOSITE).or_else(|| live().next()).cloned()
}

/// Split `quotes` (in fetch order) into the sorted full list and the sorted
/// pinned subset.
///
/// When no quote is pinned, the subset holds the benchmark of this batch, or
/// `remembered` from an earlier batch when this one has none.
pub fn partition(
    quotes: Vec<NormalizedQuote>,
    pinned: &[String],
    order: SortOrder,
    remembered: Option<&NormalizedQuote>,
) -> Partition {
    let default_benchmark = select_benchmark(&quotes);

    let pinned: HashSet<&str> = pinned.iter().map(String::as_str).collect();
    let pinned_quotes: Vec<_> = quotes.iter().filter(|q| pinned.contains(q.code.as_str())).cloned().collect();

    let mut status_subset = sort_quotes(pinned_quotes, order);
    if status_subset.is_empty() {
        status_subset.extend(default_benchmark.clone().or_else(|| remembered.cloned()));
    }

    Partition { all: sort_quotes(quotes, order), status_subset, default_benchmark }
}

#[cfg(test)]
mod tests {
    use hq_core::types::{ExchangeType, FeedFigure};

    use super::*;
    use crate::text_parser::parse_response;

    fn quotes(lines: &[(&str, &str)]) -> Vec<NormalizedQuote> {
        let body: String = lines
            .iter()
            .map(|(code, price)| format!("var hq_str_{code}=\"{code},10.00,10.00,{price},11.00,9.00,0,0,100,200\";\n"))
            .collect();
        parse_response(&body).unwrap()
    }

    fn codes(qs: &[NormalizedQuote]) -> Vec<&str> {
        qs.iter().map(|q| q.code.as_str()).collect()
    }

    #[test]
    fn benchmark_prefers_shanghai_composite() {
        let qs = quotes(&[("sz000002", "10.10"), ("sh000001", "10.20")]);
        assert_eq!(select_benchmark(&qs).unwrap().code, "sh000001");
    }

    #[test]
    fn benchmark_falls_back_to_first_fetched() {
        let qs = quotes(&[("sz000002", "10.10"), ("hk00700", "10.20")]);
        assert_eq!(select_benchmark(&qs).unwrap().code, "sz000002");
        assert!(select_benchmark(&[]).is_none());
    }

    #[test]
    fn benchmark_skips_rejected_codes() {
        let mut qs = vec![NormalizedQuote::invalid("bad1", None)];
        qs.extend(quotes(&[("sz000002", "10.10")]));
        assert_eq!(select_benchmark(&qs).unwrap().code, "sz000002");
    }

    #[test]
    fn empty_pinned_set_shows_benchmark() {
        let qs = quotes(&[("sh000001", "10.10"), ("sz000002", "10.20")]);
        let p = partition(qs, &[], SortOrder::Unsorted, None);
        assert_eq!(codes(&p.all), ["sh000001", "sz000002"]);
        assert_eq!(codes(&p.status_subset), ["sh000001"]);
        assert_eq!(p.default_benchmark.unwrap().code, "sh000001");
    }

    #[test]
    fn pinned_subset_is_sorted() {
        let qs = quotes(&[("sh000001", "10.10"), ("sz000002", "10.50"), ("sz000001", "9.50")]);
        let pinned = vec!["sz000001".to_string(), "sz000002".to_string()];
        let p = partition(qs, &pinned, SortOrder::Descending, None);
        assert_eq!(codes(&p.all), ["sz000002", "sh000001", "sz000001"]);
        assert_eq!(codes(&p.status_subset), ["sz000002", "sz000001"]);
    }

    #[test]
    fn pinned_codes_not_fetched_fall_back_to_benchmark() {
        let qs = quotes(&[("sz000002", "10.10")]);
        let pinned = vec!["hk00700".to_string()];
        let p = partition(qs, &pinned, SortOrder::Unsorted, None);
        assert_eq!(codes(&p.status_subset), ["sz000002"]);
    }

    #[test]
    fn remembered_benchmark_used_when_batch_has_none() {
        let remembered = quotes(&[("sh000001", "10.10")]).remove(0);
        let qs = vec![NormalizedQuote::invalid("bad1", Some(ExchangeType::ShenzhenShanghai))];
        let p = partition(qs, &[], SortOrder::Unsorted, Some(&remembered));
        assert!(p.default_benchmark.is_none());
        assert_eq!(codes(&p.status_subset), ["sh000001"]);
        assert_eq!(p.status_subset[0].amount, FeedFigure::Value("200.00".into()));
    }

    #[test]
    fn empty_input_yields_empty_partition() {
        let p = partition(Vec::new(), &[], SortOrder::Ascending, None);
        assert_eq!(p, Partition::default());
    }
}
