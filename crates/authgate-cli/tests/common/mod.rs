use std::process::Output;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HELLO: &str = "Hello from secured endpoint";

/// Run the CLI binary against `api_url`.
pub async fn run_cli(args: &[&str], api_url: &str) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_authgate"))
        .args(args)
        .env("AUTHGATE_API_URL", api_url)
        .env_remove("AUTHGATE_API_PROXY")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute CLI")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// `POST /auth/authenticate` answering with `token`.
pub async fn mount_authenticate(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": token })))
        .mount(server)
        .await;
}

/// `GET /demo-controller` answering `status` for `token`.
pub async fn mount_demo(server: &MockServer, token: &str, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_string(HELLO)
    } else {
        ResponseTemplate::new(status)
    };

    Mock::given(method("GET"))
        .and(path("/demo-controller"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}
