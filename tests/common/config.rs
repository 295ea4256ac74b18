//! Test configuration helpers: a backup engine pointed at a mock server

use sc_backup::{Backup, Category, Config, Filter};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration talking to `server`, restricted to the given categories and filters
fn test_config(
    server: &MockServer,
    categories: &[Category],
    filters: &[Filter],
    concurrency: usize,
) -> Config {
    Config {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        concurrency,
        categories: categories.to_vec(),
        filters: filters.to_vec(),
        ..Default::default()
    }
}

/// Backup engine using real HTTP against `server`
pub fn test_backup(
    server: &MockServer,
    categories: &[Category],
    filters: &[Filter],
    concurrency: usize,
) -> Backup {
    Backup::new(test_config(server, categories, filters, concurrency))
        .unwrap_or_else(|e| panic!("invalid test config: {e}"))
}

/// Serve `body` at `url_path`
pub async fn mount_page(server: &MockServer, url_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Answer `url_path` with `status` and an empty body
pub async fn mount_status(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
