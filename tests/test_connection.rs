use staticd::config::SiteConfig;
use staticd::http::connection::Connection;
use std::net::SocketAddr;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn site_at(root: &Path) -> SiteConfig {
    SiteConfig {
        document_root: root.to_path_buf(),
        ..SiteConfig::default()
    }
}

/// Binds an ephemeral port and serves connections until the task is dropped,
/// one spawned handler per accept, the way the real listener does.
async fn spawn_server(site: SiteConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (socket, _) = listener.accept().await.unwrap();
            let site = site.clone();
            tokio::spawn(async move {
                let _ = Connection::new(socket, site).run().await;
            });
        }
    });

    addr
}

/// One full client exchange: send the request, read to EOF.
async fn fetch(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serves_existing_file_with_success_header() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hello</h1>\n").unwrap();
    let addr = spawn_server(site_at(dir.path())).await;

    let response = fetch(addr, "GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Connection: close\r\n"));
    assert!(response.contains("Content-Type: text/html\r\n"));
    assert!(response.ends_with("<h1>hello</h1>\n"));
}

#[tokio::test]
async fn test_served_file_gets_marker_insertions() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("page.html"),
        "<!--date-->\n<!--server-->\n",
    )
    .unwrap();
    let site = site_at(dir.path());
    let server_id = site.server_id.clone();
    let addr = spawn_server(site).await;

    let response = fetch(addr, "GET /page.html HTTP/1.1\r\n\r\n").await;
    let body = response.splitn(2, "\r\n\r\n").nth(1).unwrap();

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "<!--date-->");
    assert!(lines[1].ends_with(" GMT"), "inserted line: {}", lines[1]);
    assert_eq!(lines[2], "<!--server-->");
    assert_eq!(lines[3], server_id);
}

#[tokio::test]
async fn test_missing_resource_gets_single_404_response() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(site_at(dir.path())).await;

    let response = fetch(addr, "GET /no-such-file.html HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404 ERROR\r\n"));
    assert!(response.contains("404 Not Found"));
    // Exactly one header block: the success header was deferred, not sent
    assert_eq!(response.matches("HTTP/1.1").count(), 1);
    assert_eq!(response.matches("Date: ").count(), 1);
}

#[tokio::test]
async fn test_directory_target_gets_404_not_truncated_200() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("subdir")).unwrap();
    let addr = spawn_server(site_at(dir.path())).await;

    let response = fetch(addr, "GET /subdir HTTP/1.1\r\n\r\n").await;

    // Opening a directory succeeds on Linux but reading it fails; the
    // existence check must catch it before the success header goes out
    assert!(response.starts_with("HTTP/1.1 404 ERROR\r\n"));
    assert!(response.contains("404 Not Found"));
    assert_eq!(response.matches("HTTP/1.1").count(), 1);
}

#[tokio::test]
async fn test_request_without_get_line_gets_default_page() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(site_at(dir.path())).await;

    let response = fetch(addr, "POST /api HTTP/1.1\r\nHost: x\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("up and running"));
    assert!(!response.contains("404"));
}

#[tokio::test]
async fn test_traversal_request_is_answered_with_404() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
    let addr = spawn_server(site_at(&root)).await;

    let response = fetch(addr, "GET /../secret.txt HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404 ERROR\r\n"));
    assert!(!response.contains("top secret"));
}

#[tokio::test]
async fn test_connection_closes_after_one_request() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.html"), "first\n").unwrap();
    let addr = spawn_server(site_at(dir.path())).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /a.html HTTP/1.1\r\n\r\nGET /a.html HTTP/1.1\r\n\r\n")
        .await
        .unwrap();

    // read_to_string returning means the server sent FIN: one response, done
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert_eq!(response.matches("HTTP/1.1 200 OK").count(), 1);
}

#[tokio::test]
async fn test_concurrent_connections_get_complete_uninterleaved_responses() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..8 {
        std::fs::write(
            dir.path().join(format!("file{i}.html")),
            format!("<p>content-{i}</p>\n"),
        )
        .unwrap();
    }
    let addr = spawn_server(site_at(dir.path())).await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        tasks.push(tokio::spawn(async move {
            let request = format!("GET /file{i}.html HTTP/1.1\r\n\r\n");
            (i, fetch(addr, &request).await)
        }));
    }

    for task in tasks {
        let (i, response) = task.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.ends_with(&format!("<p>content-{i}</p>\n")));
        // No bytes from any other connection's response
        assert_eq!(response.matches("content-").count(), 1);
    }
}
