use super::*;
use llm_keyword_filter::{
    DeepSeekBackend, DeepSeekConfig, DriverState, FilterConfig, KeywordFilter, LlmApiConfigTrait,
};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn reply(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "model": "deepseek-reasoner",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content,
                "reasoning_content": "Looking at each keyword in turn."
            },
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 16, "total_tokens": 136}
    })
    .to_string()
}

fn backend(server: &mockito::Server) -> DeepSeekBackend {
    DeepSeekBackend::new(
        DeepSeekConfig::new()
            .with_api_base(server.url())
            .with_api_key("sk-test"),
    )
    .unwrap()
}

#[tokio::test]
async fn classify_sends_rubric_and_returns_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"model": "deepseek-reasoner", "temperature": 0.0})),
            Matcher::Regex("NLP, BERT, xyz".to_string()),
            Matcher::Regex(r#""role":"user""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply("  相关关键词：NLP, BERT\n不相关关键词：xyz\n"))
        .create_async()
        .await;

    let batch = vec!["NLP".to_string(), "BERT".to_string(), "xyz".to_string()];
    let text = backend(&server).classify(&batch).await.unwrap();

    assert_eq!(text, "相关关键词：NLP, BERT\n不相关关键词：xyz");
    assert_eq!(llm_keyword_filter::parse_related_keywords(&text), vec!["NLP", "BERT"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn api_error_body_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(
            json!({"error": {
                "message": "Authentication Fails (no such user)",
                "type": "authentication_error",
                "param": null,
                "code": "invalid_request_error"
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let err = backend(&server)
        .classify(&["NLP".to_string()])
        .await
        .unwrap_err();
    match err {
        ClassifyError::ClientError(ClientError::Api { status, error: api_error }) => {
            assert_eq!(status, 401);
            assert_eq!(api_error.message, "Authentication Fails (no such user)");
            assert_eq!(api_error.r#type.as_deref(), Some("authentication_error"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_failure_keeps_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("upstream overloaded")
        .create_async()
        .await;

    let err = backend(&server)
        .classify(&["NLP".to_string()])
        .await
        .unwrap_err();
    match err {
        ClassifyError::ClientError(err @ ClientError::Status { .. }) => {
            assert_eq!(err.status(), Some(503));
            assert!(err.to_string().contains("upstream overloaded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"object": "not a completion"}"#)
        .create_async()
        .await;

    let err = backend(&server)
        .classify(&["NLP".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::ClientError(ClientError::DecodeResponse { .. })
    ));
}

#[tokio::test]
async fn filter_run_against_endpoint_stops_on_server_error() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("kw0, kw1, ".to_string()))
        .with_status(200)
        .with_body(reply("相关关键词：kw0, kw5\n不相关关键词：kw1"))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("kw20, kw21, ".to_string()))
        .with_status(500)
        .with_body(json!({"error": {"message": "internal error", "type": "server_error"}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("keywords.txt");
    let output = dir.path().join("filtered.txt");
    let progress = dir.path().join("progress.txt");
    write_keywords(&input, &keywords(60));

    let config = FilterConfig::new(&input, &output)
        .progress_path(&progress)
        .pause(Duration::ZERO);
    let report = KeywordFilter::new(config)
        .run(&backend(&server))
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(report.state, DriverState::Aborted);
    assert_eq!(read_lines(&output), vec!["kw0", "kw5"]);
    assert_eq!(std::fs::read_to_string(&progress).unwrap(), "20");
}

#[test]
#[serial_test::serial]
fn missing_credential_refuses_to_start() {
    std::env::remove_var("KEYWORD_FILTER_IT_NO_KEY");
    let res = DeepSeekBackend::new(
        DeepSeekConfig::new().with_api_key_env_var("KEYWORD_FILTER_IT_NO_KEY"),
    );
    assert!(res.is_err());
}
