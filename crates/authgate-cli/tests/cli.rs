//! CLI tests against a mock authentication service.

mod common;

use std::time::Duration;

use common::{HELLO, mount_authenticate, mount_demo, run_cli, stderr, stdout};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_opens_demo_page() {
    let server = MockServer::start().await;
    mount_authenticate(&server, "T1").await;
    mount_demo(&server, "T1", 200).await;

    let output = run_cli(
        &["login", "--email", "a@b.com", "--password", "x"],
        &server.uri(),
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Logged in successfully"));
    assert!(out.contains(HELLO));
}

#[tokio::test]
async fn test_login_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let output = run_cli(
        &["login", "--email", "a@b.com", "--password", "wrong"],
        &server.uri(),
    )
    .await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Login failed"));
}

#[tokio::test]
async fn test_demo_recovers_from_expired_token() {
    let server = MockServer::start().await;
    mount_demo(&server, "T1", 401).await;
    mount_demo(&server, "T2", 200).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "T2" })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["demo", "--token", "T1"], &server.uri()).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(HELLO));
}

#[tokio::test]
async fn test_demo_without_session_asks_for_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/demo-controller"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let output = run_cli(&["demo"], &server.uri()).await;

    assert!(!output.status.success());
    assert!(stdout(&output).contains("Not Authorized"));
    assert!(stderr(&output).contains("Please log in again"));
}

#[tokio::test]
async fn test_register_then_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "R1" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_authenticate(&server, "T1").await;
    mount_demo(&server, "T1", 200).await;

    let output = run_cli(
        &[
            "register",
            "--firstname",
            "Ada",
            "--lastname",
            "Lovelace",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
            "--login",
        ],
        &server.uri(),
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Registered successfully"));
    assert!(out.contains(HELLO));
}

#[tokio::test]
async fn test_logout_ignores_service_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["logout", "--token", "T1"], &server.uri()).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Logged out"));
}

#[tokio::test]
async fn test_malformed_token_is_rejected_before_sending() {
    let server = MockServer::start().await;

    let output = run_cli(&["demo", "--token", "bad\ntoken"], &server.uri()).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid access token"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_proxy_forwards_login_under_api_base() {
    let frontend = MockServer::start().await;
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/authenticate"))
        .and(header("origin", upstream.uri().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "T1" })))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/demo-controller"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HELLO))
        .expect(1)
        .mount(&upstream)
        .await;

    let base = format!("{}/api/v1", frontend.uri());
    let output = run_cli(
        &[
            "login",
            "--email",
            "a@b.com",
            "--password",
            "x",
            "--api-proxy",
            &upstream.uri(),
        ],
        &base,
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(HELLO));
    assert!(frontend.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_timeout_flag_bounds_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/demo-controller"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(HELLO)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let output = run_cli(&["demo", "--token", "T1", "--timeout", "1"], &server.uri()).await;

    assert!(!output.status.success());
    assert!(!stdout(&output).contains(HELLO));
}
