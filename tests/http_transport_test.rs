//! The reqwest transport against a loopback HTTP server
use ga_store::{CalendarStore, GaPath, Node, RemoteBlob, RemoteError, SettingsSource, TreeStore};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const API_KEY: &str = "secret-key";

/// Serve one connection with `status_line` and `body`, returning the raw request
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/v3/b", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8(raw).unwrap()
    });

    (endpoint, handle)
}

/// Headers have ended and the whole `Content-Length` body has arrived
fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(end) = text.find("\r\n\r\n") else {
        return false;
    };
    let length = text[..end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    raw.len() >= end + 4 + length
}

fn tree_store(endpoint: &str) -> TreeStore {
    TreeStore::with_remote(RemoteBlob::http(SettingsSource::fixed(
        endpoint,
        Some("tree-bin"),
        Some(API_KEY),
    )))
}

// Saving sends PUT to the bin with the master key and a JSON content type
#[tokio::test]
async fn test_put_sends_key_and_content_type() {
    let (endpoint, server) = serve_once("200 OK", r#"{"record": {}}"#).await;

    let mut store = tree_store(&endpoint);
    store.insert_at("Health", &GaPath::root(), None).unwrap();
    assert!(store.save_to_remote().await.is_ok());

    let raw = server.await.unwrap();
    let request_line = raw.lines().next().unwrap();
    assert_eq!(request_line, "PUT /v3/b/tree-bin HTTP/1.1");

    let lowered = raw.to_ascii_lowercase();
    assert!(lowered.contains("\r\nx-master-key: secret-key\r\n"));
    assert!(lowered.contains("\r\ncontent-type: application/json\r\n"));

    let (_, body) = raw.split_once("\r\n\r\n").unwrap();
    let sent: Node = serde_json::from_str(body).unwrap();
    assert_eq!(sent.child_names(), vec!["Health"]);
}

// Loading sends GET to the latest record with the master key
#[tokio::test]
async fn test_get_requests_latest_with_key() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"record": {"name": "Root_Ga", "subGa": [{"name": "Work", "subGa": []}]}}"#,
    )
    .await;

    let mut store = tree_store(&endpoint);
    assert!(store.load_from_remote().await.is_ok());
    assert_eq!(store.root().child_names(), vec!["Work"]);

    let raw = server.await.unwrap();
    assert_eq!(raw.lines().next().unwrap(), "GET /v3/b/tree-bin/latest HTTP/1.1");
    assert!(raw.to_ascii_lowercase().contains("\r\nx-master-key: secret-key\r\n"));
}

// A failing status surfaces its code and canonical reason
#[tokio::test]
async fn test_status_and_reason_are_reported() {
    let (endpoint, server) = serve_once("404 Not Found", r#"{"message": "Bin not found"}"#).await;

    let mut store = tree_store(&endpoint);
    let err = store.load_from_remote().await.unwrap_err();
    assert_eq!(
        err,
        RemoteError::Status {
            status: 404,
            reason: "Not Found".to_string()
        }
    );
    assert_eq!(err.to_string(), "JSON Bin request failed: 404 Not Found");
    server.await.unwrap();
}

// The week store reaches its own bin over the same transport
#[tokio::test]
async fn test_week_save_targets_week_bin() {
    let (endpoint, server) = serve_once("200 OK", "{}").await;

    let mut store = CalendarStore::with_remote(RemoteBlob::http(SettingsSource::fixed(
        &endpoint,
        Some("week-bin"),
        Some(API_KEY),
    )));
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
    store.set_day_text(chrono::Weekday::Thu, "call mum", Some(date));
    assert!(store.save_to_remote().await.is_ok());

    let raw = server.await.unwrap();
    assert_eq!(raw.lines().next().unwrap(), "PUT /v3/b/week-bin HTTP/1.1");
    let lowered = raw.to_ascii_lowercase();
    assert!(lowered.contains("\r\nx-master-key: secret-key\r\n"));
    assert!(lowered.contains("\r\ncontent-type: application/json\r\n"));
    assert!(raw.contains(r#""Thursday":"call mum""#));
}

// Nothing listening is a transport error
#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/v3/b", listener.local_addr().unwrap());
    drop(listener);

    let store = TreeStore::with_remote(RemoteBlob::http(SettingsSource::fixed(
        &endpoint,
        Some("tree-bin"),
        Some(API_KEY),
    )));
    let err = store.save_to_remote().await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}
