//! Raw feed record: one undecoded quote line.

/// One record from the quote feed: the code and its comma-separated fields,
/// verbatim. Borrows from the response body it was split from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuoteRecord<'a> {
    /// Feed code including the exchange prefix (e.g. `"sh600000"`).
    pub code: &'a str,
    /// Positional fields in feed order.
    pub fields: Vec<&'a str>,
}

impl<'a> RawQuoteRecord<'a> {
    /// Field at `idx`, or `None` past the end.
    #[inline]
    pub fn field(&self, idx: usize) -> Option<&'a str> {
        self.fields.get(idx).copied()
    }
}
