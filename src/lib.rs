pub mod aggregate;
pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod ui;

pub use cli::{Cli, OutputFormat};
pub use config::Config;
pub use error::{ChaosGrabError, Result};
pub use pipeline::RunReport;

use crate::aggregate::{Concatenator, TextScanner};
use crate::fetcher::{build_http_client, ArchiveClient, IndexClient};
use crate::pipeline::{EntryEvent, EntryOutcome, EntryProcessor, Workspace};
use crate::ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;

pub struct ChaosGrab {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl ChaosGrab {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Ok(Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            shutdown,
        ))
    }

    /// Construct without registering a signal handler. Used by tests and
    /// embedders that manage cancellation themselves.
    pub fn detached(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::detached(),
        )
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_progress = matches!(output_mode, OutputMode::Human) && !quiet;
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = cli.load_config()?;
        let output_mode = match cli.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli.verbosity_level(), cli.quiet)
    }

    /// Run the whole pipeline: fetch the index, download and extract every
    /// entry, then consolidate the text files.
    ///
    /// Workspace creation, index retrieval and output-file creation are
    /// fatal; everything that goes wrong for an individual entry or text
    /// file is recorded in the returned report instead.
    pub async fn run(&self) -> Result<RunReport> {
        let start = Instant::now();

        self.output_formatter.start_operation(&format!(
            "Fetching index from {}",
            self.config.index.url
        ));

        let workspace = Workspace::init(&self.config.workspace.root)?;
        self.output_formatter.debug(&format!(
            "Workspace ready at {}",
            workspace.root().display()
        ));

        let http_client = build_http_client(self.config.request_timeout());
        let index_client = IndexClient::new(http_client.clone());

        let spinner = self.progress_manager.create_spinner("Fetching index...");
        let fetch_result = index_client.fetch(&self.config.index.url).await;
        spinner.finish_and_clear();
        let entries = fetch_result?;

        self.output_formatter
            .info(&format!("Index lists {} datasets", entries.len()));

        let archive_client = ArchiveClient::new(http_client);
        let processor = EntryProcessor::new(&archive_client, &workspace, &self.shutdown);

        let progress = self
            .progress_manager
            .create_entry_progress(entries.len() as u64);
        let entry_reports = processor
            .process_all(
                &entries,
                Some(&|event| match event {
                    EntryEvent::Started { entry, .. } => {
                        progress.set_message(entry.name.clone());
                    }
                    EntryEvent::Finished { entry, outcome } => {
                        if let EntryOutcome::Failed { cause } = outcome {
                            self.progress_manager.suspend(|| {
                                self.output_formatter
                                    .warning(&format!("{}: {}", entry.name, cause));
                            });
                        }
                        progress.inc(1);
                    }
                }),
            )
            .await;
        progress.finish_and_clear();
        let entry_reports = entry_reports?;

        self.output_formatter.start_operation("Consolidating text files");

        let scanner = TextScanner::new(&self.config.aggregate.text_suffix);
        let text_files = scanner.scan(workspace.root());
        self.output_formatter.debug(&format!(
            "Found {} text files under {}",
            text_files.len(),
            workspace.root().display()
        ));

        let file_refs: Vec<&Path> = text_files.iter().map(|p| p.as_path()).collect();
        let concatenator = Concatenator::new(self.config.aggregate_output_path());
        let summary = concatenator.concatenate(&file_refs)?;

        for skipped in &summary.skipped {
            self.output_formatter
                .warning(&format!("Skipped unreadable file {}", skipped));
        }

        Ok(RunReport {
            generated_at: Utc::now(),
            duration: start.elapsed(),
            entries: entry_reports,
            aggregate: summary,
        })
    }

    pub fn generate_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        std::fs::write(path.as_ref(), Config::create_sample_config()).map_err(ChaosGrabError::Io)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &ChaosGrabError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}
