use crate::error::{ChaosGrabError, Result};
use reqwest::Client;
use std::io::Write;
use tempfile::NamedTempFile;

pub struct ArchiveClient {
    client: Client,
}

impl ArchiveClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download one archive into a uniquely named temporary file.
    ///
    /// The returned handle owns the file on disk; dropping it removes the
    /// file, so the download cannot outlive its entry regardless of how
    /// extraction goes. Failures here are per-entry, never fatal to the run.
    pub async fn download_to_temp(&self, url: &str) -> Result<NamedTempFile> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ChaosGrabError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let body = response.bytes().await.map_err(|e| ChaosGrabError::Http {
            url: url.to_string(),
            source: e,
        })?;

        let mut temp_file = tempfile::Builder::new()
            .prefix("chaosgrab-")
            .suffix(".zip")
            .tempfile()
            .map_err(ChaosGrabError::Io)?;

        temp_file.write_all(&body).map_err(ChaosGrabError::Io)?;
        temp_file.flush().map_err(ChaosGrabError::Io)?;

        Ok(temp_file)
    }
}
