//! Client integration tests
//!
//! Concurrent single calls through [`GraphBatchClient`] coalesce into
//! composite requests while every caller sees only its own result.

#[cfg(test)]
mod tests {
    use crate::common::GraphServer;
    use crate::common::fixtures::config;
    use crate::{assert_err, assert_ok};
    use graph_batch::{ApiRequest, BatchError, GraphBatchClient, LifecyclePhase, Param};
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Deserialize)]
    struct Echo {
        method: String,
        relative_url: String,
        body: Option<String>,
    }

    async fn started_client(server: &GraphServer, max_batch_size: usize) -> Arc<GraphBatchClient> {
        let client = GraphBatchClient::new(config(&server.uri(), max_batch_size)).unwrap();
        assert_ok!(client.start().await);
        Arc::new(client)
    }

    #[tokio::test]
    async fn test_concurrent_calls_coalesce() {
        let server = GraphServer::start().await;
        let client = started_client(&server, 50).await;

        let calls = (0..10).map(|i| {
            let client = Arc::clone(&client);
            async move {
                let echo: Echo = client
                    .get(&format!("objects/{}", i), &[Param::fields(["id"])])
                    .await
                    .unwrap();
                assert_eq!(echo.relative_url, format!("/objects/{}?fields=id", i));
                assert_eq!(echo.method, "GET");
            }
        });
        futures::future::join_all(calls).await;

        let sizes = server.batch_sizes().await;
        assert_eq!(sizes.iter().sum::<usize>(), 10);
        assert!(sizes.len() < 10, "calls were not coalesced: {:?}", sizes);
        assert_ok!(client.stop().await);
    }

    #[tokio::test]
    async fn test_batches_respect_max_size() {
        let server = GraphServer::start().await;
        let client = started_client(&server, 3).await;

        let calls = (0..7).map(|i| {
            let client = Arc::clone(&client);
            async move { client.call_raw(ApiRequest::get(format!("/{}", i))).await }
        });
        for response in futures::future::join_all(calls).await {
            assert!(assert_ok!(response).is_success());
        }

        let sizes = server.batch_sizes().await;
        assert!(sizes.iter().all(|&size| size <= 3), "sizes {:?}", sizes);
        assert_eq!(sizes.iter().sum::<usize>(), 7);
        assert_ok!(client.stop().await);
    }

    #[tokio::test]
    async fn test_per_call_errors_do_not_affect_siblings() {
        let server = GraphServer::start().await;
        let client = started_client(&server, 50).await;

        let (ok, api_error, missing, posted) = tokio::join!(
            client.call::<Echo>(ApiRequest::get("/ok")),
            client.call::<Echo>(ApiRequest::get("/error")),
            client.call::<Echo>(ApiRequest::get("/null")),
            client.call::<Echo>(ApiRequest::post("/me/feed").with_form([("message", "hi")])),
        );

        assert_eq!(assert_ok!(ok).relative_url, "/ok");
        match api_error {
            Err(BatchError::Api(e)) => assert_eq!(e.code, 190),
            other => panic!("expected api error, got {:?}", other),
        }
        assert!(matches!(missing, Err(BatchError::MissingResponse)));
        let posted = assert_ok!(posted);
        assert_eq!(posted.method, "POST");
        assert_eq!(posted.body.as_deref(), Some("message=hi"));
        assert_ok!(client.stop().await);
    }

    #[tokio::test]
    async fn test_composite_failure_reaches_every_caller() {
        let server = GraphServer::failing(
            500,
            r#"{"error":{"message":"An unknown error has occurred.","type":"OAuthException","code":1}}"#,
        )
        .await;
        let client = started_client(&server, 50).await;

        let calls = (0..5).map(|i| {
            let client = Arc::clone(&client);
            async move { client.call_raw(ApiRequest::get(format!("/{}", i))).await }
        });
        for result in futures::future::join_all(calls).await {
            let err = assert_err!(result);
            assert!(err.is_transport(), "unexpected error {:?}", err);
        }

        let stats = client.stats();
        assert!(stats.transport_failures >= 1);
        assert_ok!(client.stop().await);
    }

    #[tokio::test]
    async fn test_stop_delivers_accepted_calls() {
        let server = GraphServer::start().await;
        let client = started_client(&server, 50).await;

        let pending: Vec<_> = (0..20)
            .map(|i| {
                let client = Arc::clone(&client);
                tokio::spawn(async move {
                    client.call_raw(ApiRequest::get(format!("/{}", i))).await
                })
            })
            .collect();
        tokio::task::yield_now().await;
        assert_ok!(client.stop().await);
        assert_eq!(client.phase(), LifecyclePhase::Stopped);

        for task in pending {
            match task.await.unwrap() {
                Ok(response) => assert!(response.is_success()),
                Err(e) => assert!(e.is_not_started(), "unexpected error {:?}", e),
            }
        }
        let stats = client.stats();
        assert_eq!(stats.accepted, stats.resolved);
    }

    #[tokio::test]
    async fn test_calls_after_stop_are_rejected() {
        let server = GraphServer::start().await;
        let client = started_client(&server, 50).await;
        assert_ok!(client.stop().await);

        let err = assert_err!(client.call_raw(ApiRequest::get("/late")).await);
        assert!(err.is_not_started());
        assert!(server.composite_requests().await.is_empty());
    }
}
