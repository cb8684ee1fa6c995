// the chat task against a stub service: warnings precede replies, and
// failures never kill the loop

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use recap::{Ai, Chat, Console};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Clone)]
struct Stub {
    verdict: Arc<Mutex<String>>,
    fail_next_chat: Arc<AtomicBool>,
}

async fn completions(
    State(stub): State<Stub>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let is_classifier = body.get("max_tokens").and_then(|v| v.as_u64()) == Some(1);

    if !is_classifier && stub.fail_next_chat.swap(false, Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "stub outage" })),
        );
    }

    let content = if is_classifier {
        stub.verdict.lock().unwrap().clone()
    } else {
        "stub reply".to_string()
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })),
    )
}

async fn start_stub(verdict: &str) -> (String, Stub) {
    let stub = Stub {
        verdict: Arc::new(Mutex::new(verdict.to_string())),
        fail_next_chat: Arc::new(AtomicBool::new(false)),
    };

    let app = Router::new()
        .route("/chat/completions", post(completions))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), stub)
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn make_chat(base_url: &str, gated: bool) -> (Chat, Capture) {
    let ai = Ai::new(
        Some("test-key".to_string()),
        Some(base_url.to_string()),
        "stub-model".to_string(),
    )
    .unwrap();

    let cap = Capture::default();
    let console = Console::new(Box::new(cap.clone()), false, true);
    (Chat::new(ai, console, gated), cap)
}

async fn run_chat(chat: &mut Chat, messages: &[&str]) {
    let (tx, rx) = mpsc::channel(messages.len().max(1));
    for m in messages {
        tx.send(m.to_string()).await.unwrap();
    }
    drop(tx);
    chat.run(rx).await;
}

#[tokio::test]
async fn test_clean_messages_get_replies_and_no_warning() {
    let (url, _stub) = start_stub("0").await;
    let (mut chat, cap) = make_chat(&url, true);
    run_chat(&mut chat, &["hello", "how are you"]).await;

    let text = cap.text();
    assert!(text.contains("Assistant: Ready for chat!"));
    assert_eq!(text.matches("stub reply").count(), 2);
    assert!(!text.contains("⚠️"));
}

#[tokio::test]
async fn test_warning_comes_before_the_reply() {
    let (url, _stub) = start_stub("3").await;
    let (mut chat, cap) = make_chat(&url, true);
    run_chat(&mut chat, &["what should I take for a headache?"]).await;

    let text = cap.text();
    let warning_at = text.find("⚠️ Medical/Psychiatric Advice").unwrap();
    let reply_at = text.rfind("stub reply").unwrap();
    assert!(warning_at < reply_at);
}

#[tokio::test]
async fn test_gate_anomaly_still_gets_a_reply() {
    let (url, _stub) = start_stub("9").await;
    let (mut chat, cap) = make_chat(&url, true);
    run_chat(&mut chat, &["hello"]).await;

    let text = cap.text();
    assert!(text.contains("gate anomaly"));
    assert!(text.contains("stub reply"));
}

#[tokio::test]
async fn test_failed_reply_keeps_the_loop_alive() {
    let (url, stub) = start_stub("0").await;
    let (mut chat, cap) = make_chat(&url, true);

    stub.fail_next_chat.store(true, Ordering::SeqCst);
    run_chat(&mut chat, &["first", "second"]).await;

    let text = cap.text();
    assert!(text.contains("chat failed"));
    assert_eq!(text.matches("stub reply").count(), 1);
}

#[tokio::test]
async fn test_no_gate_skips_classification_entirely() {
    let (url, _stub) = start_stub("5").await;
    let (mut chat, cap) = make_chat(&url, false);
    run_chat(&mut chat, &["anything goes"]).await;

    let text = cap.text();
    assert!(!text.contains("⚠️"));
    assert!(text.contains("stub reply"));
}
