use stagelink_llm::{
    ChatMessage, CompletionClient, CompletionConfig, CompletionOptions, LlmError, OpenRouterClient,
};
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn client_for(base_url: &str) -> OpenRouterClient {
    let config = CompletionConfig::new("test-key")
        .with_model("test/model")
        .with_base_url(base_url);
    OpenRouterClient::new(config).unwrap()
}

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

/// Minimal HTTP server that answers one scripted (status, body) per
/// connection, in order. Closes each connection so every attempt reconnects.
async fn scripted_server(responses: Vec<(u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });

    format!("http://{addr}")
}

/// Drain one request (headers plus content-length body) from the socket
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    loop {
        let n = socket.read(&mut tmp).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_string();
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                return;
            }
        }
    }
}

#[tokio::test]
async fn test_complete_returns_content_on_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Hello there"))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(result, "Hello there");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_retries_on_server_error_then_succeeds() {
    let base_url = scripted_server(vec![
        (500, "upstream exploded".to_string()),
        (500, "upstream exploded".to_string()),
        (200, completion_body("recovered")),
    ])
    .await;

    let client = client_for(&base_url);
    let start = Instant::now();
    let result = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(result, "recovered");
    // Two failed attempts cost 1s + 2s of backoff before the third succeeds
    assert!(start.elapsed().as_secs_f64() >= 3.0);
}

#[tokio::test]
async fn test_client_error_fails_without_retry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(400)
        .with_body("bad request")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let start = Instant::now();
    let err = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap_err();

    match err {
        LlmError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "bad request");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    // No backoff should have happened
    assert!(start.elapsed().as_secs_f64() < 1.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_content_is_fatal_even_on_200() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(completion_body("   "))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap_err();

    match err {
        LlmError::EmptyCompletion { body } => assert!(body.contains("choices")),
        other => panic!("expected EmptyCompletion, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_choices_is_empty_completion() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::EmptyCompletion { .. }));
}

#[tokio::test]
async fn test_unparseable_200_body_is_fatal() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("<html>gateway page</html>")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap_err();

    match err {
        LlmError::InvalidResponse { body, .. } => assert!(body.contains("gateway")),
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_exhausted_retries_report_last_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("still down")
        .expect(4)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap_err();

    match err {
        LlmError::RetriesExhausted { attempts, last_error } => {
            assert_eq!(attempts, 4);
            assert!(last_error.contains("503"));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_error_is_retried_until_exhaustion() {
    // Nothing listens on this port; every attempt is a connection failure
    let client = client_for("http://127.0.0.1:9");

    let err = client
        .complete(vec![ChatMessage::user("Hi")], CompletionOptions::default())
        .await
        .unwrap_err();

    match err {
        LlmError::RetriesExhausted { attempts, last_error } => {
            assert_eq!(attempts, 4);
            assert!(last_error.contains("Transport error"));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}
