use crate::error::{ChaosGrabError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Index URL used when no configuration file or CLI override is present.
pub const DEFAULT_INDEX_URL: &str = "https://chaos-data.projectdiscovery.io/index.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub index: IndexConfig,
    pub workspace: WorkspaceConfig,
    pub aggregate: AggregateConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// URL of the JSON index listing named archives.
    pub url: String,
    /// Per-request timeout in seconds for index and archive fetches.
    pub timeout: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    /// Root directory that receives one subdirectory per index entry.
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregateConfig {
    /// Directory the consolidated output file is written into.
    pub output_dir: PathBuf,
    /// Name of the consolidated output file.
    pub file_name: String,
    /// Filename suffix selecting which files are aggregated.
    pub text_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            workspace: WorkspaceConfig::default(),
            aggregate: AggregateConfig::default(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_string(),
            timeout: 300,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./AllChaosData"),
        }
    }
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: "everything.txt".to_string(),
            text_suffix: ".txt".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ChaosGrabError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ChaosGrabError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ChaosGrabError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["chaosgrab.toml", ".chaosgrab.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref index_url) = cli_args.index_url {
            self.index.url = index_url.clone();
        }

        if let Some(timeout) = cli_args.timeout {
            self.index.timeout = timeout;
        }

        if let Some(ref workspace) = cli_args.workspace {
            self.workspace.root = workspace.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.aggregate.output_dir = output_dir.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ChaosGrabError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ChaosGrabError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.index.url).map_err(|_| ChaosGrabError::Config {
            message: format!("Index URL is not a valid URL: {}", self.index.url),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ChaosGrabError::Config {
                message: format!("Index URL must be http or https: {}", self.index.url),
            });
        }

        if self.index.timeout == 0 {
            return Err(ChaosGrabError::Config {
                message: "Request timeout must be greater than 0".to_string(),
            });
        }

        if self.aggregate.file_name.is_empty() {
            return Err(ChaosGrabError::Config {
                message: "Aggregate file name must not be empty".to_string(),
            });
        }

        if self.aggregate.file_name.contains('/') || self.aggregate.file_name.contains('\\') {
            return Err(ChaosGrabError::Config {
                message: format!(
                    "Aggregate file name must not contain path separators: {}",
                    self.aggregate.file_name
                ),
            });
        }

        if self.aggregate.text_suffix.is_empty() {
            return Err(ChaosGrabError::Config {
                message: "Text suffix must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.index.timeout)
    }

    /// Full path of the consolidated output file.
    pub fn aggregate_output_path(&self) -> PathBuf {
        self.aggregate.output_dir.join(&self.aggregate.file_name)
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub index_url: Option<String>,
    pub timeout: Option<u64>,
    pub workspace: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_url(mut self, index_url: Option<String>) -> Self {
        self.index_url = index_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workspace(mut self, workspace: Option<PathBuf>) -> Self {
        self.workspace = workspace;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}
