//! User-facing notifications emitted by the quote service.
//!
//! The display layer subscribes to a [`FeedEventReceiver`] and shows each
//! event to the user. Only two conditions are reported; everything else the
//! feed gets wrong is absorbed silently.

/// A condition the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A single-code request was rejected by the feed. The code is most
    /// likely missing its exchange prefix or does not exist.
    InvalidCode {
        code: String,
    },

    /// A request failed at the transport level and was not recovered.
    NetworkFailure {
        /// Request target.
        url: String,
        /// Error description.
        message: String,
    },
}

impl std::fmt::Display for FeedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCode { code } => {
                write!(f, "invalid stock code '{code}', check the exchange prefix or remove it")
            }
            Self::NetworkFailure { url, message } => write!(f, "quote request failed ({url}): {message}"),
        }
    }
}

/// Sender half of the notification channel.
pub type FeedEventSender = tokio::sync::mpsc::UnboundedSender<FeedEvent>;

/// Receiver half of the notification channel.
pub type FeedEventReceiver = tokio::sync::mpsc::UnboundedReceiver<FeedEvent>;
