//! Error handling integration tests
//!
//! Tests for error display, classification and conversions as seen by users
//! of the public API.

#[cfg(test)]
mod tests {
    use graph_batch::{BatchError, GraphApiError, TransportError};
    use std::sync::Arc;

    #[test]
    fn test_graph_api_error_display() {
        let err = GraphApiError {
            message: "Invalid OAuth access token.".to_string(),
            error_type: "OAuthException".to_string(),
            code: 190,
        };
        assert_eq!(
            err.to_string(),
            "graph api error: code 190 type OAuthException message Invalid OAuth access token."
        );
        assert!(BatchError::Api(err).to_string().starts_with("graph api error"));
    }

    #[test]
    fn test_not_started_display() {
        assert_eq!(BatchError::NotStarted.to_string(), "batch client not started");
        assert!(BatchError::NotStarted.is_not_started());
        assert!(!BatchError::NotStarted.is_retryable());
    }

    #[test]
    fn test_transport_error_conversion_shares_one_allocation() {
        let err: BatchError = TransportError::Http("timed out".to_string()).into();
        let clone = err.clone();
        match (err, clone) {
            (BatchError::Transport(a), BatchError::Transport(b)) => assert!(Arc::ptr_eq(&a, &b)),
            other => panic!("expected transport errors, got {:?}", other),
        }
    }

    #[test]
    fn test_retryable_classification() {
        let retryable = [
            TransportError::Http("reset".to_string()),
            TransportError::Status {
                code: 503,
                body: String::new(),
            },
            TransportError::Status {
                code: 429,
                body: String::new(),
            },
        ];
        for err in retryable {
            assert!(BatchError::from(err).is_retryable());
        }

        let permanent = [
            TransportError::Status {
                code: 400,
                body: String::new(),
            },
            TransportError::LengthMismatch {
                expected: 2,
                actual: 1,
            },
            TransportError::Api(GraphApiError::default()),
        ];
        for err in permanent {
            assert!(!BatchError::from(err).is_retryable());
        }
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = TransportError::LengthMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "expected 3 sub-responses, got 2");
    }
}
