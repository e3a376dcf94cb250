//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use craftsoft_edge::config::EdgeConfig;

/// Files of a miniature CraftSoft site tree, as (path, contents).
pub const SITE_FILES: &[(&str, &str)] = &[
    ("index.html", "main home"),
    ("about/index.html", "main about"),
    ("acs_subdomains/acs_admin/index.html", "admin login"),
    ("acs_subdomains/acs_admin/assets/logo.png", "admin logo"),
    ("acs_subdomains/acs_admin/assets/css/site.css", "h1 {}"),
    (
        "acs_subdomains/acs_admin/students-clients/students/index.html",
        "admin students",
    ),
    (
        "acs_subdomains/acs_admin/payments/receipts/index.html",
        "admin receipts",
    ),
    ("acs_subdomains/acs_students/index.html", "student login"),
    ("acs_subdomains/acs_students/assets/app.css", "body {}"),
    ("acs_subdomains/acs_students/assets/app.js", "console.log(1)"),
    ("acs_subdomains/acs_students/assets/img/badge.png", "badge"),
    (
        "acs_subdomains/acs_students/dashboard/index.html",
        "student dashboard",
    ),
    (
        "acs_subdomains/acs_students/release-1.2/index.html",
        "student release notes",
    ),
    ("acs_subdomains/acs_signup/index.html", "signup form"),
];

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Create a temporary site tree with every file in `SITE_FILES`.
pub fn site_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (relative, contents) in SITE_FILES {
        write_file(dir.path(), relative, contents);
    }
    dir
}

/// Create a temporary tree holding a single file.
#[allow(dead_code)]
pub fn single_file_tree(relative: &str, contents: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), relative, contents);
    dir
}

/// Config serving from a local directory.
pub fn directory_config(root: &Path) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.assets.root = root.to_string_lossy().into_owned();
    config
}

/// GET request with a Host header.
pub fn get(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Host", host)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start an origin that answers every request with its request line and
/// Host header, one per line.
#[allow(dead_code)]
pub async fn start_echo_origin() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&head).into_owned();
                let request_line = head.lines().next().unwrap_or_default();
                let host = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("host").then(|| value.trim())
                    })
                    .unwrap_or_default();

                let body = format!("{}\n{}", request_line, host);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}
