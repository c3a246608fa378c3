use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChaosGrabError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode index payload from {url}")]
    IndexDecode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to create workspace directory: {path}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Archive entry path escapes the destination: {path}")]
    UnsafeArchivePath { path: String },

    #[error("Failed to create aggregate output: {path}")]
    AggregateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ChaosGrabError {
    fn user_message(&self) -> String {
        match self {
            ChaosGrabError::Http { url, .. } => {
                format!("Network request to {} failed", url)
            }
            ChaosGrabError::IndexDecode { url, .. } => {
                format!("The index at {} is not a valid list of entries", url)
            }
            ChaosGrabError::InvalidUrl { url } => {
                format!("Invalid URL: {}", url)
            }
            ChaosGrabError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ChaosGrabError::Workspace { path, .. } => {
                format!("Cannot create workspace directory: {}", path.display())
            }
            ChaosGrabError::Archive { message } => {
                format!("Archive error: {}", message)
            }
            ChaosGrabError::UnsafeArchivePath { path } => {
                format!(
                    "Refusing to extract archive entry outside the destination: {}",
                    path
                )
            }
            ChaosGrabError::AggregateOutput { path, .. } => {
                format!("Cannot create aggregate output file: {}", path.display())
            }
            ChaosGrabError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ChaosGrabError::Http { .. } => Some(
                "Check your internet connection and try again. The remote server might be temporarily unavailable.".to_string(),
            ),
            ChaosGrabError::IndexDecode { .. } => Some(
                "Verify the index URL points at a JSON array of objects with name and URL fields.".to_string(),
            ),
            ChaosGrabError::InvalidUrl { .. } => Some(
                "Provide an absolute http:// or https:// URL (e.g., https://chaos-data.projectdiscovery.io/index.json).".to_string(),
            ),
            ChaosGrabError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string(),
            ),
            ChaosGrabError::Workspace { .. } => Some(
                "Ensure you have write permission for the workspace location, or point --workspace somewhere writable.".to_string(),
            ),
            ChaosGrabError::AggregateOutput { .. } => Some(
                "Ensure the output directory exists and is writable, or change it with --output-dir.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for ChaosGrabError {
    fn from(error: zip::result::ZipError) -> Self {
        ChaosGrabError::Archive {
            message: error.to_string(),
        }
    }
}

impl From<url::ParseError> for ChaosGrabError {
    fn from(_: url::ParseError) -> Self {
        ChaosGrabError::InvalidUrl {
            url: "invalid URL".to_string(),
        }
    }
}

impl From<toml::de::Error> for ChaosGrabError {
    fn from(error: toml::de::Error) -> Self {
        ChaosGrabError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChaosGrabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = ChaosGrabError::InvalidUrl {
            url: "not-a-url".to_string(),
        };
        assert!(error.user_message().contains("Invalid URL"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_unsafe_path_message_names_the_entry() {
        let error = ChaosGrabError::UnsafeArchivePath {
            path: "../../etc/passwd".to_string(),
        };
        assert!(error.user_message().contains("../../etc/passwd"));
    }

    #[test]
    fn test_zip_error_conversion() {
        let zip_error = zip::result::ZipError::FileNotFound;
        let error = ChaosGrabError::from(zip_error);
        assert!(matches!(error, ChaosGrabError::Archive { .. }));
    }

    #[test]
    fn test_cancelled_has_no_suggestion() {
        assert!(ChaosGrabError::Cancelled.suggestion().is_none());
    }
}
