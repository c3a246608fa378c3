use crate::error::{ChaosGrabError, Result};
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Result of one aggregation pass.
///
/// The output file's size is the sum of every included file's size plus one
/// newline byte per included file.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateSummary {
    pub output_path: PathBuf,
    pub files_included: usize,
    pub bytes_written: u64,
    pub skipped: Vec<String>,
}

/// Writes the consolidated output file.
pub struct Concatenator {
    output_path: PathBuf,
}

impl Concatenator {
    pub fn new<P: Into<PathBuf>>(output_path: P) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Copy every file's bytes into the output, each followed by exactly one
    /// newline, in the given order.
    ///
    /// Failure to create the output file is fatal. A source file that cannot
    /// be opened or read is recorded in `skipped` and contributes neither
    /// content nor a separator; aggregation continues with the rest.
    pub fn concatenate(&self, files: &[&Path]) -> Result<AggregateSummary> {
        let output = fs::File::create(&self.output_path).map_err(|e| {
            ChaosGrabError::AggregateOutput {
                path: self.output_path.clone(),
                source: e,
            }
        })?;
        let mut writer = BufWriter::new(output);

        let mut files_included = 0;
        let mut bytes_written = 0u64;
        let mut skipped = Vec::new();

        for file in files {
            let source = match fs::File::open(file) {
                Ok(source) => source,
                Err(e) => {
                    skipped.push(format!("{}: {}", file.display(), e));
                    continue;
                }
            };

            let mut reader = BufReader::new(source);
            match std::io::copy(&mut reader, &mut writer) {
                Ok(bytes) => {
                    writer.write_all(b"\n").map_err(ChaosGrabError::Io)?;
                    files_included += 1;
                    bytes_written += bytes + 1;
                }
                Err(e) => {
                    skipped.push(format!("{}: {}", file.display(), e));
                }
            }
        }

        writer.flush().map_err(ChaosGrabError::Io)?;

        Ok(AggregateSummary {
            output_path: self.output_path.clone(),
            files_included,
            bytes_written,
            skipped,
        })
    }
}
