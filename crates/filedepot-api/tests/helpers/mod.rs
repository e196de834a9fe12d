//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p filedepot-api --test uploads_test`
//! or `cargo test -p filedepot-api`.

use axum_test::TestServer;
use filedepot_api::constants;
use filedepot_api::setup;
use filedepot_core::{Config, FileServiceConfig};
use tempfile::TempDir;

/// Base URL baked into test configuration. Upload and download URLs issued by
/// the local backend are absolute; tests strip this host to get a routable path.
pub const TEST_HOST: &str = "http://localhost:8005";

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Strip the test host from an absolute URL so it can be sent to TestServer.
pub fn url_path(url: &str) -> &str {
    url.strip_prefix(TEST_HOST).unwrap_or(url)
}

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with isolated local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("create temp dir");

    let config = Config(Box::new(FileServiceConfig {
        server_port: 8005,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        storage_backend: None,
        local_storage_path: temp_dir.path().to_string_lossy().into_owned(),
        file_base_url: format!("{}/files", TEST_HOST),
        upload_url_ttl_secs: 900,
        max_file_size_bytes: 10 * 1024 * 1024,
    }));

    let (_state, router) = setup::initialize_app(config)
        .await
        .expect("initialize app");

    let server = TestServer::new(router).expect("start test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}
