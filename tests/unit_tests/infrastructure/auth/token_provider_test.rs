use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use docrelay::infrastructure::auth::{GoogleTokenProvider, TokenError, TokenProvider};

#[derive(Clone)]
struct TokenEndpoint {
    calls: Arc<AtomicUsize>,
    expires_in: u64,
    failures_before_success: usize,
}

async fn issue_token(State(endpoint): State<TokenEndpoint>) -> impl IntoResponse {
    let n = endpoint.calls.fetch_add(1, Ordering::SeqCst) + 1;
    if n <= endpoint.failures_before_success {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "backend_error" })),
        )
            .into_response();
    }
    Json(json!({
        "access_token": format!("token-{n}"),
        "expires_in": endpoint.expires_in,
        "token_type": "Bearer",
    }))
    .into_response()
}

async fn provider(
    expires_in: u64,
    failures_before_success: usize,
) -> (GoogleTokenProvider, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let endpoint = TokenEndpoint {
        calls: Arc::clone(&calls),
        expires_in,
        failures_before_success,
    };
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/token", listener.local_addr().unwrap());
    let router = Router::new()
        .route("/token", post(issue_token))
        .with_state(endpoint);
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let provider = GoogleTokenProvider::new(
        reqwest::Client::new(),
        Some(url),
        "client".to_string(),
        "secret".to_string(),
        "refresh".to_string(),
    );
    (provider, calls)
}

#[tokio::test]
async fn given_fresh_token_when_requested_again_then_served_from_cache() {
    let (provider, calls) = provider(3599, 0).await;

    let first = provider.access_token().await.unwrap();
    let second = provider.access_token().await.unwrap();

    assert_eq!(first, "token-1");
    assert_eq!(second, "token-1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_token_within_expiry_margin_when_requested_then_refetched() {
    let (provider, calls) = provider(60, 0).await;

    provider.access_token().await.unwrap();
    let token = provider.access_token().await.unwrap();

    assert_eq!(token, "token-2");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn given_failed_fetch_when_requested_again_then_retries() {
    let (provider, calls) = provider(3599, 1).await;

    let failed = provider.access_token().await;
    let recovered = provider.access_token().await;

    assert!(matches!(failed, Err(TokenError::Rejected { status: 503, .. })));
    assert_eq!(recovered.unwrap(), "token-2");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
