//! HttpBackend against a local tiny_http fixture server.

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use lazarus_core::backend::{Backend, HttpBackend};
use lazarus_core::error::RequestError;
use tiny_http::{Header, Response, Server};

/// What the fixture server saw.
#[derive(Debug)]
struct Captured {
    method: String,
    url: String,
    body: String,
}

/// Serves one canned `(status, body)` per incoming request, then stops.
fn serve(replies: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Captured>) {
    let server = Server::http("127.0.0.1:0").expect("bind fixture server");
    let port = server.server_addr().to_ip().expect("tcp listener").port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (status, body) in replies {
            let Ok(mut request) = server.recv() else { return };
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let _ = tx.send(Captured {
                method: request.method().to_string(),
                url: request.url().to_owned(),
                body: received,
            });
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let _ = request.respond(
                Response::from_string(body).with_status_code(status).with_header(header),
            );
        }
    });
    (format!("http://127.0.0.1:{port}/"), rx)
}

const ANALYSIS: &str = r#"{
    "status": "Complete",
    "legacy_code": "legacy",
    "modern_code": "modern",
    "logs": ["--- Attempt 1/3 ---", "SUCCESS: Parity Achieved."],
    "metrics": {"legacy_complexity": 12, "modern_complexity": 4, "improvement": "67%"}
}"#;

#[tokio::test]
async fn analyze_posts_legacy_file_and_decodes_reply() {
    let (url, seen) = serve(vec![(200, ANALYSIS)]);
    let backend = HttpBackend::new(&url);
    assert!(!backend.base_url().ends_with('/'));

    let resp = backend.analyze("old_payroll.py").await.unwrap();
    assert_eq!(resp.legacy_code, "legacy");
    assert_eq!(resp.logs.len(), 2);
    assert_eq!(resp.metrics.unwrap().improvement, "67%");

    let req = seen.recv().unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.url, "/analyze-and-refactor");
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, serde_json::json!({"legacy_file": "old_payroll.py"}));
}

#[tokio::test]
async fn mirror_test_is_a_plain_get() {
    let (url, seen) = serve(vec![(
        200,
        r#"{"results": [{"input_data": [50, 20], "legacy_output": "1150", "modern_output": "1150", "match": true}]}"#,
    )]);
    let resp = HttpBackend::new(&url).mirror_test().await.unwrap();
    assert_eq!(resp.results.len(), 1);
    assert!(resp.results[0].matched);

    let req = seen.recv().unwrap();
    assert_eq!(req.method, "GET");
    assert_eq!(req.url, "/mirror-test");
}

#[tokio::test]
async fn non_ok_status_is_an_error_even_with_json_body() {
    let (url, _seen) = serve(vec![(500, r#"{"detail": "agent crashed"}"#)]);
    let err = HttpBackend::new(&url).analyze("old_payroll.py").await.unwrap_err();
    assert!(matches!(err, RequestError::Status(500)), "got {err:?}");
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let (url, _seen) = serve(vec![(200, "<html>gateway</html>")]);
    let err = HttpBackend::new(&url).mirror_test().await.unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_object_decodes_to_defaults() {
    let (url, _seen) = serve(vec![(200, "{}")]);
    let resp = HttpBackend::new(&url).analyze("old_payroll.py").await.unwrap();
    assert!(resp.logs.is_empty());
    assert!(resp.metrics.is_none());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = HttpBackend::new(&format!("http://127.0.0.1:{port}"))
        .analyze("old_payroll.py")
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)), "got {err:?}");
}
