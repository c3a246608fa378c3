pub mod archive_client;
pub mod index_client;

pub use archive_client::ArchiveClient;
pub use index_client::{IndexClient, IndexEntry};

use std::time::Duration;

/// Build the HTTP client shared by index and archive fetches.
///
/// Every request carries the configured timeout so an unresponsive remote
/// endpoint cannot stall the run indefinitely.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("chaosgrab/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
