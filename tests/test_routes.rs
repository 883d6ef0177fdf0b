use std::io::Read;
use std::path::PathBuf;

use courier::http::request::{Method, Request, RequestBuilder};
use courier::http::response::StatusCode;
use courier::routes::Router;
use flate2::read::GzDecoder;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("courier-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn get(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

fn gunzip(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out).unwrap();
    out
}

#[tokio::test]
async fn test_root_returns_empty_ok() {
    let router = Router::new(temp_dir());
    let response = router.handle(&get("/")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_empty());
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("Content-Length"), None);
}

#[tokio::test]
async fn test_root_ignores_method() {
    let router = Router::new(temp_dir());
    let req = RequestBuilder::new()
        .method(Method::Other("DELETE".to_string()))
        .path("/")
        .build()
        .unwrap();

    assert_eq!(router.handle(&req).await.status, StatusCode::Ok);
}

#[tokio::test]
async fn test_echo_plain() {
    let router = Router::new(temp_dir());
    let response = router.handle(&get("/echo/abc")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"abc".to_vec());
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("Content-Length"), Some("3"));
    assert_eq!(response.header("Content-Encoding"), None);
}

#[tokio::test]
async fn test_echo_is_not_decoded() {
    let router = Router::new(temp_dir());
    let response = router.handle(&get("/echo/a%20b/c")).await;

    assert_eq!(response.body, b"a%20b/c".to_vec());
}

#[tokio::test]
async fn test_echo_gzip() {
    let router = Router::new(temp_dir());
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/echo/abc")
        .header("Accept-Encoding", "invalid-encoding-1, gzip, invalid-encoding-2")
        .build()
        .unwrap();

    let response = router.handle(&req).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Encoding"), Some("gzip"));
    assert_eq!(
        response.header("Content-Length"),
        Some(response.body.len().to_string().as_str())
    );
    assert_eq!(gunzip(&response.body), b"abc".to_vec());
}

#[tokio::test]
async fn test_echo_unsupported_encodings_pass_through() {
    let router = Router::new(temp_dir());
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/echo/abc")
        .header("Accept-Encoding", "invalid-encoding-1, invalid-encoding-2")
        .build()
        .unwrap();

    let response = router.handle(&req).await;

    assert_eq!(response.header("Content-Encoding"), None);
    assert_eq!(response.body, b"abc".to_vec());
}

#[tokio::test]
async fn test_user_agent() {
    let router = Router::new(temp_dir());
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/user-agent")
        .header("User-Agent", "foobar/1.2.3")
        .build()
        .unwrap();

    let response = router.handle(&req).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"foobar/1.2.3".to_vec());
    assert_eq!(response.header("Content-Length"), Some("12"));
}

#[tokio::test]
async fn test_user_agent_missing_header() {
    let router = Router::new(temp_dir());
    let response = router.handle(&get("/user-agent")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_empty());
    assert_eq!(response.header("Content-Length"), Some("0"));
}

#[tokio::test]
async fn test_unmapped_path() {
    let router = Router::new(temp_dir());
    let response = router.handle(&get("/unmapped-path")).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"Path not found".to_vec());
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
}

#[tokio::test]
async fn test_prefix_without_trailing_slash_is_unmapped() {
    let router = Router::new(temp_dir());

    for path in ["/echo", "/files", "/user-agent/x"] {
        let response = router.handle(&get(path)).await;
        assert_eq!(response.status, StatusCode::NotFound, "{path}");
    }
}

#[tokio::test]
async fn test_get_missing_file() {
    let router = Router::new(temp_dir());
    let response = router.handle(&get("/files/nonexistent.txt")).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"File not found".to_vec());
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
}

#[tokio::test]
async fn test_get_existing_file() {
    let dir = temp_dir();
    std::fs::write(dir.join("hello.txt"), b"Hello, World!").unwrap();
    let router = Router::new(&dir);

    let response = router.handle(&get("/files/hello.txt")).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!".to_vec());
    assert_eq!(
        response.header("Content-Type"),
        Some("application/octet-stream")
    );
    assert_eq!(response.header("Content-Length"), Some("13"));
}

#[tokio::test]
async fn test_get_directory_is_read_error() {
    let dir = temp_dir();
    std::fs::create_dir(dir.join("sub")).unwrap();
    let router = Router::new(&dir);

    let response = router.handle(&get("/files/sub")).await;

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(response.body, b"Error reading file".to_vec());
}

#[tokio::test]
async fn test_post_then_get_file() {
    let dir = temp_dir();
    let router = Router::new(&dir);
    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/file_123")
        .header("Content-Length", "5")
        .body(b"12345".to_vec())
        .build()
        .unwrap();

    let response = router.handle(&post).await;
    assert_eq!(response.status, StatusCode::Created);
    assert!(response.body.is_empty());
    assert!(response.headers.is_empty());
    assert_eq!(std::fs::read(dir.join("file_123")).unwrap(), b"12345");

    let response = router.handle(&get("/files/file_123")).await;
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"12345".to_vec());
}

#[tokio::test]
async fn test_post_truncates_existing_file() {
    let dir = temp_dir();
    std::fs::write(dir.join("f"), b"a much longer original").unwrap();
    let router = Router::new(&dir);
    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/f")
        .body(b"short".to_vec())
        .build()
        .unwrap();

    assert_eq!(router.handle(&post).await.status, StatusCode::Created);
    assert_eq!(std::fs::read(dir.join("f")).unwrap(), b"short");
}

#[tokio::test]
async fn test_post_into_missing_directory_fails() {
    let router = Router::new(temp_dir());
    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/no/such/dir/f")
        .body(b"x".to_vec())
        .build()
        .unwrap();

    let response = router.handle(&post).await;

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(response.body, b"Error writing file".to_vec());
}

#[tokio::test]
async fn test_files_other_method_is_unmapped() {
    let dir = temp_dir();
    std::fs::write(dir.join("f"), b"data").unwrap();
    let router = Router::new(&dir);
    let req = RequestBuilder::new()
        .method(Method::Other("PUT".to_string()))
        .path("/files/f")
        .build()
        .unwrap();

    let response = router.handle(&req).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"Path not found".to_vec());
}
