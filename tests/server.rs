use fingerpaint::Config;
use fingerpaint::backend::Engine;
use fingerpaint::server::{AppState, router};
use fingerpaint::tracking::{PointerSource, SharedPointer};
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

struct TestServer {
    addr: SocketAddr,
    closing: watch::Sender<bool>,
    _engine: Engine,
    _dir: TempDir,
}

async fn start(simulate: bool) -> TestServer {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.capture.save_directory = dir.path().display().to_string();
    config.capture.download_name = "art.jpg".to_string();
    config.performance.frame_interval_ms = 5;

    let (source, pointer) = if simulate {
        let pointer = SharedPointer::new();
        let source = PointerSource::new(
            pointer.clone(),
            config.canvas.width,
            config.canvas.height,
            config.performance.frame_interval(),
        );
        (
            Some(Box::new(source) as Box<dyn fingerpaint::tracking::HandSource>),
            Some(pointer),
        )
    } else {
        (None, None)
    };

    let engine = Engine::start(config.clone(), source, pointer).unwrap();
    let (closing, closing_rx) = watch::channel(false);
    let app = router(AppState::new(engine.handle(), &config, simulate, closing_rx));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        addr,
        closing,
        _engine: engine,
        _dir: dir,
    }
}

/// Sends one request and returns the status code and the raw response.
async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let body = body.unwrap_or("");
    let head = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n",
        body.len()
    );
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.write_all(body.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    let response = String::from_utf8_lossy(&response).into_owned();
    let status = response
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    (status, response)
}

#[tokio::test(flavor = "multi_thread")]
async fn index_serves_the_page() {
    let server = start(false).await;
    let (status, response) = request(server.addr, "GET", "/", None).await;
    assert_eq!(status, 200);
    assert!(response.contains("text/html"));
    assert!(response.contains("/canvas_feed"));
    assert!(response.contains("/video_feed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn brush_endpoints_echo_the_request() {
    let server = start(false).await;

    let (status, response) =
        request(server.addr, "POST", "/set_color", Some(r#"{"color":"blue"}"#)).await;
    assert_eq!(status, 200);
    assert!(response.contains(r#""status":"success""#));
    assert!(response.contains(r#""color":"blue""#));

    let (status, response) =
        request(server.addr, "POST", "/set_size", Some(r#"{"size":"medium"}"#)).await;
    assert_eq!(status, 200);
    assert!(response.contains(r#""size":"medium""#));

    let (status, _) = request(server.addr, "POST", "/clear", None).await;
    assert_eq!(status, 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn download_requires_a_save_first() {
    let server = start(false).await;

    let (status, response) = request(server.addr, "GET", "/download", None).await;
    assert_eq!(status, 404);
    assert!(response.contains(r#""status":"error""#));

    let (status, response) = request(server.addr, "POST", "/save", None).await;
    assert_eq!(status, 200);
    assert!(response.contains("painting.jpg"));

    let (status, response) = request(server.addr, "GET", "/download", None).await;
    assert_eq!(status, 200);
    assert!(response.contains("image/jpeg"));
    assert!(response.contains(r#"attachment; filename="art.jpg""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn pointer_is_rejected_outside_simulate_mode() {
    let server = start(false).await;
    let (status, _) =
        request(server.addr, "POST", "/pointer", Some(r#"{"x":0.5,"y":0.5}"#)).await;
    assert_eq!(status, 409);
}

#[tokio::test(flavor = "multi_thread")]
async fn pointer_is_accepted_in_simulate_mode() {
    let server = start(true).await;
    let (status, _) =
        request(server.addr, "POST", "/pointer", Some(r#"{"x":0.5,"y":0.5}"#)).await;
    assert_eq!(status, 200);
    let (status, _) = request(server.addr, "POST", "/pointer", Some("{}")).await;
    assert_eq!(status, 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn canvas_feed_streams_multipart_frames() {
    let server = start(false).await;
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(b"GET /canvas_feed HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let mut received = Vec::new();
    let mut buf = [0u8; 4096];
    while !String::from_utf8_lossy(&received).contains("Content-Type: image/jpeg") {
        let n = tokio::time::timeout(std::time::Duration::from_secs(5), stream.read(&mut buf))
            .await
            .expect("feed produced a frame")
            .unwrap();
        assert!(n > 0, "feed closed early");
        received.extend_from_slice(&buf[..n]);
    }

    let text = String::from_utf8_lossy(&received);
    assert!(text.contains("multipart/x-mixed-replace; boundary=frame"));
    assert!(text.contains("--frame\r\n"));

    server.closing.send_replace(true);
}
