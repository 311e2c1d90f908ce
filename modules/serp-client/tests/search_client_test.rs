//! SerpApi / Serper client tests against a local stub server.
//!
//! Run with: cargo test -p serp-client --test search_client_test

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use serp_client::{SerpApiClient, SerpError, SerperClient};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn serpapi_search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("api_key").map(String::as_str) != Some("serp-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid API key"})));
    }
    let q = params.get("q").cloned().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "related_searches": [{"query": format!("best {q}")}],
            "related_questions": [{"question": format!("is {q} worth it?")}]
        })),
    )
}

async fn serper_search(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("serper-key") {
        return (StatusCode::FORBIDDEN, Json(json!({"message": "Unauthorized"})));
    }
    assert_eq!(body["gl"], "us");
    let q = body["q"].as_str().unwrap_or_default().to_string();
    (
        StatusCode::OK,
        Json(json!({
            "relatedSearches": [{"query": format!("{q} review")}],
            "peopleAlsoAsk": [{"question": format!("what is {q}?")}]
        })),
    )
}

#[tokio::test]
async fn serpapi_search_returns_phrases() {
    let base = spawn(Router::new().route("/search.json", get(serpapi_search))).await;
    let client = SerpApiClient::new("serp-key", TIMEOUT).unwrap().with_base_url(&base);

    let phrases = client.search("earbuds").await.unwrap().keyword_phrases();

    assert_eq!(phrases, vec!["best earbuds", "is earbuds worth it?"]);
}

#[tokio::test]
async fn serpapi_rejected_key_is_api_error() {
    let base = spawn(Router::new().route("/search.json", get(serpapi_search))).await;
    let client = SerpApiClient::new("wrong", TIMEOUT).unwrap().with_base_url(&base);

    let err = client.search("earbuds").await.unwrap_err();

    assert!(matches!(err, SerpError::Api { status: 401, .. }));
}

#[tokio::test]
async fn serper_search_returns_phrases() {
    let base = spawn(Router::new().route("/search", post(serper_search))).await;
    let client = SerperClient::new("serper-key", TIMEOUT).unwrap().with_base_url(&base);

    let phrases = client.search("earbuds").await.unwrap().keyword_phrases();

    assert_eq!(phrases, vec!["earbuds review", "what is earbuds?"]);
}

#[tokio::test]
async fn serper_non_json_body_is_parse_error() {
    let app = Router::new().route("/search", post(|| async { "<html>oops</html>" }));
    let base = spawn(app).await;
    let client = SerperClient::new("serper-key", TIMEOUT).unwrap().with_base_url(&base);

    let err = client.search("earbuds").await.unwrap_err();

    assert!(matches!(err, SerpError::Parse(_)));
}

#[tokio::test]
async fn slow_upstream_hits_timeout() {
    let app = Router::new().route(
        "/search",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let base = spawn(app).await;
    let client = SerperClient::new("serper-key", Duration::from_millis(200))
        .unwrap()
        .with_base_url(&base);

    let err = client.search("earbuds").await.unwrap_err();

    assert!(matches!(err, SerpError::Network(_)));
}
