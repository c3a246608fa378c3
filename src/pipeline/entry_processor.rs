use crate::archive::ZipExtractor;
use crate::error::{ChaosGrabError, Result};
use crate::fetcher::{ArchiveClient, IndexEntry};
use crate::pipeline::Workspace;
use crate::ui::GracefulShutdown;
use serde::Serialize;
use std::fs;

/// Outcome of processing a single index entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Extracted { files: usize },
    Failed { cause: String },
}

impl EntryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, EntryOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub name: String,
    pub url: String,
    pub outcome: EntryOutcome,
}

/// Lifecycle notifications emitted while entries are processed, used by the
/// caller to drive progress output.
pub enum EntryEvent<'a> {
    Started {
        index: usize,
        total: usize,
        entry: &'a IndexEntry,
    },
    Finished {
        entry: &'a IndexEntry,
        outcome: &'a EntryOutcome,
    },
}

/// Composes download and extraction for each index entry in order.
///
/// A failed entry is recorded and skipped; it never stops processing of the
/// remaining entries, and partial results on disk are left as they are. Only
/// a cancellation request aborts the loop.
pub struct EntryProcessor<'a> {
    archive_client: &'a ArchiveClient,
    workspace: &'a Workspace,
    shutdown: &'a GracefulShutdown,
}

impl<'a> EntryProcessor<'a> {
    pub fn new(
        archive_client: &'a ArchiveClient,
        workspace: &'a Workspace,
        shutdown: &'a GracefulShutdown,
    ) -> Self {
        Self {
            archive_client,
            workspace,
            shutdown,
        }
    }

    pub async fn process_all(
        &self,
        entries: &[IndexEntry],
        on_event: Option<&dyn Fn(EntryEvent)>,
    ) -> Result<Vec<EntryReport>> {
        let mut reports = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            self.shutdown.check_shutdown()?;

            if let Some(callback) = on_event {
                callback(EntryEvent::Started {
                    index,
                    total: entries.len(),
                    entry,
                });
            }

            let outcome = match self.process_entry(entry).await {
                Ok(files) => EntryOutcome::Extracted { files },
                Err(ChaosGrabError::Cancelled) => return Err(ChaosGrabError::Cancelled),
                Err(e) => EntryOutcome::Failed {
                    cause: e.to_string(),
                },
            };

            if let Some(callback) = on_event {
                callback(EntryEvent::Finished {
                    entry,
                    outcome: &outcome,
                });
            }

            reports.push(EntryReport {
                name: entry.name.clone(),
                url: entry.url.clone(),
                outcome,
            });
        }

        Ok(reports)
    }

    async fn process_entry(&self, entry: &IndexEntry) -> Result<usize> {
        // The temp file is removed when this binding drops, on every path.
        let temp_file = self.archive_client.download_to_temp(&entry.url).await?;

        let dest = self.workspace.entry_dir(&entry.name);
        fs::create_dir_all(&dest).map_err(ChaosGrabError::Io)?;

        let extracted = ZipExtractor::extract(temp_file.path(), &dest)?;
        Ok(extracted.len())
    }
}
