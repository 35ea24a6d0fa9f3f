//! Catalog Source Errors
//!
//! Error types for fetching catalog collections.

/// Errors that can occur while obtaining the course or user collections
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport failure (connect, timeout, body read)
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Body was valid JSON but not a collection
    #[error("Upstream {collection} response is not a collection")]
    NotACollection { collection: &'static str },

    /// Body was not JSON at all
    #[error("Upstream {collection} response is not valid JSON: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Client could not be configured
    #[error("Catalog source misconfigured: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Status {
            status: 503,
            url: "http://lms.local/courses".to_string(),
        };
        assert!(err.to_string().contains("503"));

        let err = SourceError::NotACollection { collection: "users" };
        assert_eq!(err.to_string(), "Upstream users response is not a collection");
    }
}
