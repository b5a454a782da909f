//! Configuration specs
//!
//! Settings come from the environment or a `.env` file in the working
//! directory; any problem stops the run before the server is contacted.

use crate::prelude::*;

#[test]
fn missing_base_url_is_reported_with_suggestions() {
    let temp = Project::empty();

    temp.dsr()
        .args(&["list"])
        .fails()
        .stderr_has("error: Failed to load configuration")
        .stderr_has("FLOWISE_BASE_URL is not set")
        .stderr_has(".env");
}

#[test]
fn missing_api_key_is_reported() {
    let temp = Project::empty();

    temp.dsr()
        .env("FLOWISE_BASE_URL", "http://localhost:3000")
        .args(&["list"])
        .fails()
        .stderr_has("FLOWISE_API_KEY is not set");
}

#[test]
fn base_url_must_be_http() {
    let temp = Project::empty();

    temp.dsr()
        .env("FLOWISE_BASE_URL", "localhost:3000")
        .env("FLOWISE_API_KEY", "key")
        .args(&["list"])
        .fails()
        .stderr_has("not a valid http(s) URL");
}

#[test]
fn zero_interval_is_rejected() {
    let temp = Project::empty();

    temp.dsr()
        .env("FLOWISE_BASE_URL", "http://localhost:3000")
        .env("FLOWISE_API_KEY", "key")
        .args(&["refresh", "--all", "--interval", "0"])
        .fails()
        .stderr_has("status check interval must be greater than zero");
}

#[test]
fn dotenv_file_is_read_from_working_directory() {
    let server = FlowiseStub::start(|_, _| (200, "[]".to_string()));
    let temp = Project::empty();
    temp.file(
        ".env",
        &format!("FLOWISE_BASE_URL={}\nFLOWISE_API_KEY=from-dotenv\n", server.base_url),
    );

    temp.dsr()
        .args(&["list"])
        .passes()
        .stdout_has("Document Stores (0 total)");

    assert_eq!(
        server.seen()[0].authorization.as_deref(),
        Some("Bearer from-dotenv")
    );
}

#[test]
fn unreachable_server_is_a_fetch_error() {
    // Bind then drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let temp = Project::empty();

    temp.dsr()
        .env("FLOWISE_BASE_URL", &format!("http://127.0.0.1:{}", port))
        .env("FLOWISE_API_KEY", "key")
        .args(&["list"])
        .fails()
        .stderr_has("error: Failed to fetch document stores")
        .stderr_has("network error");
}
