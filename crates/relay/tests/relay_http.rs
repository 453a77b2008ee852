//! HTTP-level tests for the relay.
//!
//! The relay router is driven with `oneshot`; the downstream engine is a real
//! axum server on an ephemeral localhost port.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use ragchat_relay::mock_engine::mock_engine_router;
use ragchat_relay::types::{ENGINE_FAILURE, ENGINE_UNEXPECTED_FAILURE, INVALID_REQUEST};
use ragchat_relay::{build_router, ChatService, HttpQueryEngine};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

// ── Helpers ────────────────────────────────────────────────────

/// Serve `router` on 127.0.0.1 with an OS-assigned port.
async fn spawn_engine(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn relay_for(engine_url: String) -> Router {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let engine = HttpQueryEngine::with_client(engine_url, client);
    build_router(ChatService::new(Arc::new(engine)), "/api")
}

fn chat_request(message: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": message }).to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

// ── Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_forwards_query_and_returns_engine_body() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let engine = Router::new().route(
        "/process_query",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(body);
                Json(json!({ "answer": "A contractual clause...", "sources": [] }))
            }
        }),
    );
    let addr = spawn_engine(engine).await;
    let app = relay_for(format!("http://{}/process_query", addr));

    let resp = app.oneshot(chat_request("What is force majeure?")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "answer": "A contractual clause...", "sources": [] })
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], json!({ "query": "What is force majeure?" }));
}

#[tokio::test]
async fn test_engine_error_status_is_reported_with_200() {
    let engine = Router::new().route(
        "/process_query",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "boom" })),
            )
        }),
    );
    let addr = spawn_engine(engine).await;
    let app = relay_for(format!("http://{}/process_query", addr));

    let resp = app.oneshot(chat_request("anything")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "error": ENGINE_FAILURE, "details": { "detail": "boom" } })
    );
}

#[tokio::test]
async fn test_engine_plain_text_error_body() {
    let engine = Router::new().route(
        "/process_query",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let addr = spawn_engine(engine).await;
    let app = relay_for(format!("http://{}/process_query", addr));

    let resp = app.oneshot(chat_request("anything")).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["error"], ENGINE_FAILURE);
    assert_eq!(body["details"], "upstream down");
}

#[tokio::test]
async fn test_unreachable_engine() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let app = relay_for(format!("http://{}/process_query", addr));

    let resp = app.oneshot(chat_request("anything")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["error"], ENGINE_UNEXPECTED_FAILURE);
    let details = body["details"].as_str().expect("details should be a message");
    assert!(!details.is_empty());
}

#[tokio::test]
async fn test_end_to_end_with_mock_engine() {
    let addr = spawn_engine(mock_engine_router()).await;
    let app = relay_for(format!("http://{}/process_query", addr));

    let resp = app.oneshot(chat_request("hello")).await.unwrap();
    let body = body_json(resp).await;

    assert!(body["answer"].as_str().unwrap().contains("'hello'"));
    assert_eq!(body["sources"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_health() {
    let app = relay_for("http://127.0.0.1:1/process_query".to_string());

    let req = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = relay_for("http://127.0.0.1:1/process_query".to_string());

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization,accept")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET,HEAD,PUT,PATCH,POST,DELETE"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "content-type,accept,authorization"
    );
}

#[tokio::test]
async fn test_malformed_chat_body_is_reported_with_200() {
    // Nothing listens on the engine URL; a forwarded call would report a transport failure
    let app = relay_for("http://127.0.0.1:1/process_query".to_string());

    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["error"], INVALID_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("message"));

    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .body(Body::from("message=hi"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["error"], INVALID_REQUEST);
}

#[tokio::test]
async fn test_routes_outside_prefix_are_not_found() {
    let app = relay_for("http://127.0.0.1:1/process_query".to_string());

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"message":"hi"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
