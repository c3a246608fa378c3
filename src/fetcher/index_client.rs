use crate::error::{ChaosGrabError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// One (name, location) pair from the remote index.
///
/// The index is a JSON array of objects. Unknown fields are ignored and
/// missing fields default to empty strings; entries are never filtered or
/// reordered here, so downstream processing sees the index exactly as
/// published.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct IndexEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "URL")]
    pub url: String,
}

pub struct IndexClient {
    client: Client,
}

impl IndexClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and decode the index.
    ///
    /// Any failure here is fatal to the run: without an index there is no
    /// work to do.
    pub async fn fetch(&self, index_url: &str) -> Result<Vec<IndexEntry>> {
        let response = self
            .client
            .get(index_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ChaosGrabError::Http {
                url: index_url.to_string(),
                source: e,
            })?;

        let entries: Vec<IndexEntry> =
            response
                .json()
                .await
                .map_err(|e| ChaosGrabError::IndexDecode {
                    url: index_url.to_string(),
                    source: e,
                })?;

        Ok(entries)
    }
}
