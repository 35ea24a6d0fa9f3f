//! Request Context
//!
//! Metadata about the current request, used for log correlation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for one API request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Correlation ID for request tracing
    pub correlation_id: Uuid,

    /// When the request reached the service
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context with a fresh correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }

    /// Create context with a caller-supplied correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let id = Uuid::new_v4();
        let ctx = RequestContext::new().with_correlation_id(id);

        assert_eq!(ctx.correlation_id, id);
    }

    #[test]
    fn test_fresh_contexts_differ() {
        assert_ne!(
            RequestContext::new().correlation_id,
            RequestContext::new().correlation_id
        );
    }
}
