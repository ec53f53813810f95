//! Configuration loading integration tests
//!
//! Loading from YAML files on disk and validation of the result.

#[cfg(test)]
mod tests {
    use graph_batch::config::{Config, OverflowPolicy};
    use graph_batch::{BatchError, GraphBatchClient};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_full_config_file() {
        let file = write_config(
            r#"
batch:
  max_batch_size: 20
  batch_window_ms: 5
  intake_queue_capacity: 64
  overflow: reject
graph:
  base_url: "http://localhost:8080/"
  access_token: "token"
  app_id: 99
  timeout_secs: 3
  redact_errors: false
logging:
  level: "graph_batch=debug"
  json: true
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.batch.max_batch_size, 20);
        assert_eq!(config.batch.batch_window_ms, 5);
        assert_eq!(config.batch.intake_queue_capacity, 64);
        assert_eq!(config.batch.overflow, OverflowPolicy::Reject);
        assert_eq!(config.graph.base_url, "http://localhost:8080/");
        assert_eq!(config.graph.access_token.as_deref(), Some("token"));
        assert_eq!(config.graph.app_id, Some(99));
        assert!(!config.graph.redact_errors);
        assert!(config.logging.json);

        let client = GraphBatchClient::new(config).unwrap();
        client.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_file_uses_defaults() {
        let file = write_config("{}\n");
        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.batch.max_batch_size, 50);
        assert_eq!(config.batch.batch_window_ms, 10);
        assert_eq!(config.graph.base_url, "https://graph.facebook.com/");
    }

    #[tokio::test]
    async fn test_invalid_file_is_config_error() {
        let file = write_config("batch:\n  max_batch_size: 0\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, BatchError::Config(_)));

        let file = write_config("graph:\n  base_url: \"not a url\"\n");
        assert!(matches!(
            Config::from_file(file.path()).await,
            Err(BatchError::Config(_))
        ));
    }
}
