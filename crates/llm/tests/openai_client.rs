use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use grocer_llm::{ChatModelConfig, DisabledModel, LanguageModel, ModelError, OpenAiChatModel};
use serde_json::{Value, json};

/// Serves `router` on an ephemeral port and returns its base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn model(base_url: String) -> OpenAiChatModel {
    OpenAiChatModel::new(ChatModelConfig {
        api_key: "sk-test".to_owned(),
        base_url,
        model: "gpt-test".to_owned(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_complete_returns_first_choice() {
    let router = Router::new().route(
        "/chat/completions",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["model"], "gpt-test");
            assert_eq!(body["messages"][0]["role"], "user");
            assert_eq!(body["max_tokens"], 20);
            Json(json!({
                "choices": [{"message": {"role": "assistant", "content": " update_pantry \n"}}]
            }))
        }),
    );
    let base_url = spawn_stub(router).await;

    let text = model(base_url)
        .complete("classify this", 0.1, 20)
        .await
        .unwrap();

    assert_eq!(text, "update_pantry");
}

#[tokio::test]
async fn test_complete_reports_error_status() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base_url = spawn_stub(router).await;

    let err = model(base_url).complete("hi", 0.1, 20).await.unwrap_err();

    match err {
        ModelError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_complete_rejects_empty_choices() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base_url = spawn_stub(router).await;

    let err = model(base_url).complete("hi", 0.1, 20).await.unwrap_err();

    assert!(matches!(err, ModelError::EmptyResponse));
}

#[tokio::test]
async fn test_disabled_model_always_fails() {
    let err = DisabledModel.complete("hi", 0.1, 20).await.unwrap_err();

    assert!(matches!(err, ModelError::NotConfigured));
}
