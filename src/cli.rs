use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "chaosgrab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download and consolidate Chaos dataset archives")]
#[command(
    long_about = "ChaosGrab fetches a remote JSON index of named ZIP archives, downloads and \
                  extracts each one into a per-entry directory, and concatenates every \
                  discovered text file into a single consolidated output file."
)]
#[command(after_help = "EXAMPLES:\n  \
    chaosgrab\n  \
    chaosgrab --workspace ./data --output-dir ./out --verbose\n  \
    chaosgrab --index-url https://example.com/index.json --timeout 60\n  \
    chaosgrab --config my-config.toml --output-format json")]
pub struct Cli {
    /// URL of the JSON index to fetch
    #[arg(long, value_parser = validate_index_url)]
    pub index_url: Option<String>,

    /// Workspace directory receiving one subdirectory per entry
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Directory the consolidated output file is written into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Per-request timeout in seconds
    #[arg(long, help = "Timeout for index and archive fetches (seconds)")]
    pub timeout: Option<u64>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show the run plan without fetching anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_index_url(self.index_url.clone())
            .with_timeout(self.timeout)
            .with_workspace(self.workspace.clone())
            .with_output_dir(self.output_dir.clone())
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_index_url(s: &str) -> std::result::Result<String, String> {
    let url =
        Url::parse(s).map_err(|_| "Invalid URL format. Please provide a valid URL.".to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err("Only http and https URLs are supported".to_string()),
    }

    if url.host_str().is_none() {
        return Err("URL must include a valid hostname".to_string());
    }

    Ok(s.to_string())
}
