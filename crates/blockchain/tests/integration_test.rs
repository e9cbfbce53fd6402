use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use blockchain::{ExplorerClient, RetryConfig, TokenDataService, TokenDataSource};
use serde_json::json;
use shared::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Spawn an in-process explorer stand-in and return its base URL
async fn spawn_explorer(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn client_for(base_url: String, timeout: Duration, max_attempts: u32) -> ExplorerClient {
    ExplorerClient::with_settings(
        base_url,
        "test-api-key".to_string(),
        timeout,
        RetryConfig {
            max_attempts,
            delay: Duration::from_millis(10),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_resource_sends_bearer_token() {
    let app = Router::new().route(
        "/v1/fts/wrap.near",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Json(json!({"auth": auth}))
        }),
    );
    let base_url = spawn_explorer(app).await;
    let client = client_for(base_url, Duration::from_secs(5), 3);

    let body = client.fetch_resource("/fts/wrap.near").await.unwrap();
    assert_eq!(body["auth"], "Bearer test-api-key");
}

#[tokio::test]
async fn test_http_error_is_not_retried() {
    let hits = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .route(
            "/v1/fts/missing.near",
            get(|State(hits): State<Arc<AtomicU32>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (StatusCode::NOT_FOUND, "not found")
            }),
        )
        .with_state(hits.clone());
    let base_url = spawn_explorer(app).await;
    let client = client_for(base_url, Duration::from_secs(5), 3);

    let result = client.fetch_resource("/fts/missing.near").await;

    assert_eq!(result, Err(Error::UpstreamHttp { status: 404 }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_timeout_is_retried_up_to_max_attempts() {
    let hits = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .route(
            "/v1/fts/slow.near",
            get(|State(hits): State<Arc<AtomicU32>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        )
        .with_state(hits.clone());
    let base_url = spawn_explorer(app).await;
    let client = client_for(base_url, Duration::from_millis(50), 3);

    let result = client.fetch_resource("/fts/slow.near").await;

    assert!(matches!(result, Err(Error::UpstreamTimeout(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_token_data_service_normalizes_all_three_resources() {
    let app = Router::new()
        .route(
            "/v1/fts/token.near",
            get(|| async {
                Json(json!({"contracts": [{
                    "name": "Test Token",
                    "symbol": "TST",
                    "decimals": 18,
                    "description": "A token for tests",
                    "website": "https://example.org"
                }]}))
            }),
        )
        .route(
            "/v1/fts/token.near/holders",
            get(|| async {
                Json(json!({"holders": [
                    {"account": "small.near", "amount": "400"},
                    {"account": "big.near", "amount": "600"}
                ]}))
            }),
        )
        .route(
            "/v1/fts/token.near/txns",
            get(|| async {
                Json(json!({"txns": [
                    {"affected_account_id": "big.near", "outcomes": {"status": "SUCCESS"}},
                    {"affected_account_id": "small.near"}
                ]}))
            }),
        );
    let base_url = spawn_explorer(app).await;
    let service = TokenDataService::new(client_for(base_url, Duration::from_secs(5), 3));

    let data = service.get_token_info("token.near").await;

    assert!(data.error.is_none());
    assert_eq!(data.token_info.symbol(), Some("TST"));
    assert_eq!(data.holders[0].account, "big.near");
    assert!((data.holders[0].percentage - 60.0).abs() < 1e-9);
    assert_eq!(data.transactions.len(), 2);
    assert!(data.transactions[0].is_success());
    assert_eq!(data.transactions[1].status, "UNKNOWN");
}

#[tokio::test]
async fn test_token_data_service_tolerates_empty_payloads() {
    let empty = || async { Json(json!({})) };
    let app = Router::new()
        .route("/v1/fts/bare.near", get(empty))
        .route("/v1/fts/bare.near/holders", get(empty))
        .route("/v1/fts/bare.near/txns", get(empty));
    let base_url = spawn_explorer(app).await;
    let service = TokenDataService::new(client_for(base_url, Duration::from_secs(5), 3));

    let data = service.get_token_info("bare.near").await;

    assert!(data.error.is_none());
    assert!(data.token_info.is_empty());
    assert!(data.holders.is_empty());
    assert!(data.transactions.is_empty());
}

#[tokio::test]
async fn test_token_data_service_degrades_on_upstream_failure() {
    let app = Router::new()
        .route("/v1/fts/half.near", get(|| async { Json(json!({"contracts": []})) }))
        .route(
            "/v1/fts/half.near/holders",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/v1/fts/half.near/txns", get(|| async { Json(json!({"txns": []})) }));
    let base_url = spawn_explorer(app).await;
    let service = TokenDataService::new(client_for(base_url, Duration::from_secs(5), 3));

    let data = service.get_token_info("half.near").await;

    assert_eq!(data.error.as_deref(), Some("Upstream API request failed: 500"));
    assert!(data.token_info.is_empty());
    assert!(data.holders.is_empty());
    assert!(data.transactions.is_empty());
}

#[tokio::test]
async fn test_token_data_service_degrades_when_unreachable() {
    // Reserve a port, then close it so connections are refused
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = TokenDataService::new(client_for(
        format!("http://{}/v1", addr),
        Duration::from_secs(2),
        2,
    ));

    let data = service.get_token_info("nobody.near").await;

    let message = data.error.unwrap_or_default();
    assert!(message.starts_with("Upstream"), "unexpected error: {}", message);
    assert!(data.holders.is_empty());
}


#[tokio::test]
async fn test_token_data_service_fetches_resources_concurrently() {
    async fn slow() -> Json<serde_json::Value> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        Json(json!({}))
    }

    let app = Router::new()
        .route("/v1/fts/slow.near", get(slow))
        .route("/v1/fts/slow.near/holders", get(slow))
        .route("/v1/fts/slow.near/txns", get(slow));
    let base_url = spawn_explorer(app).await;
    let service = TokenDataService::new(client_for(base_url, Duration::from_secs(5), 1));

    let started = Instant::now();
    let data = service.get_token_info("slow.near").await;
    let elapsed = started.elapsed();

    assert!(data.error.is_none());
    // Three sequential fetches would take at least 900ms
    assert!(elapsed < Duration::from_millis(750), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_contract_id_stays_a_single_path_segment() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = |State(seen): State<Arc<Mutex<Vec<String>>>>, Path(id): Path<String>| async move {
        seen.lock().unwrap().push(id);
        Json(json!({}))
    };
    let app = Router::new()
        .route("/v1/fts/:id", get(record))
        .route("/v1/fts/:id/holders", get(record))
        .route("/v1/fts/:id/txns", get(record))
        .with_state(seen.clone());
    let base_url = spawn_explorer(app).await;
    let service = TokenDataService::new(client_for(base_url, Duration::from_secs(5), 1));

    let contract_id = "evil.near/holders?limit=1#frag";
    let data = service.get_token_info(contract_id).await;

    assert!(data.error.is_none());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|id| id == contract_id), "saw {:?}", seen);
}

#[tokio::test]
async fn test_dot_segment_contract_id_is_rejected_without_request() {
    let hits = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .fallback(|State(hits): State<Arc<AtomicU32>>| async move {
            hits.fetch_add(1, Ordering::SeqCst);
            Json(json!({}))
        })
        .with_state(hits.clone());
    let base_url = spawn_explorer(app).await;
    let service = TokenDataService::new(client_for(base_url, Duration::from_secs(5), 1));

    let data = service.get_token_info("..").await;

    assert!(data
        .error
        .as_deref()
        .is_some_and(|msg| msg.starts_with("Validation error")));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
