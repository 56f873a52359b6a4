/// Inline message when a fetch fails.
pub const QUERY_FAILED_MESSAGE: &str = "Error loading news. Please try again.";

/// Inline message when a country has no news table or no rows.
pub const NO_NEWS_MESSAGE: &str = "No news available for this country.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsError {
    /// No table is configured for the selected country.
    NoSource { country: String },
    /// The store rejected or failed the query.
    Query(String),
    /// The store answered with something that is not a list of records.
    Decode(String),
}

impl std::fmt::Display for NewsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsError::NoSource { country } => write!(f, "no news table found for {country}"),
            NewsError::Query(msg) => write!(f, "news query failed: {msg}"),
            NewsError::Decode(msg) => write!(f, "news response malformed: {msg}"),
        }
    }
}

impl std::error::Error for NewsError {}

impl NewsError {
    /// Text shown inline in the side panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            NewsError::NoSource { .. } => NO_NEWS_MESSAGE,
            NewsError::Query(_) | NewsError::Decode(_) => QUERY_FAILED_MESSAGE,
        }
    }
}

impl From<serde_json::Error> for NewsError {
    fn from(err: serde_json::Error) -> Self {
        NewsError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{NO_NEWS_MESSAGE, NewsError, QUERY_FAILED_MESSAGE};

    #[test]
    fn user_messages_are_inline_friendly() {
        let missing = NewsError::NoSource {
            country: "Atlantis".to_string(),
        };
        assert_eq!(missing.user_message(), NO_NEWS_MESSAGE);
        assert_eq!(missing.to_string(), "no news table found for Atlantis");
        assert_eq!(
            NewsError::Query("timeout".into()).user_message(),
            QUERY_FAILED_MESSAGE
        );
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: NewsError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, NewsError::Decode(_)));
    }
}
