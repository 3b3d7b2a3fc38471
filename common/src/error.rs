//! Error taxonomy.
//!
//! Only [`AnalysisError`] ever reaches the caller of an analysis.
//! [`RemoteError`] is always downgraded to a fallback, and [`ConfigError`]
//! only matters when an explicit configuration file is loaded.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems with what the user handed in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no palm image was provided")]
    EmptyImage,
    #[error("image is {size} bytes, the limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },
    #[error("file is not a supported image (jpeg, png, gif, webp, bmp)")]
    UnsupportedFormat,
    #[error("image could not be processed: {0}")]
    Unprocessable(String),
    #[error("a name is required")]
    MissingName,
    #[error("a birth date is required")]
    MissingBirthDate,
}

/// Failures of a remote provider call.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{provider}: no API key configured")]
    MissingKey { provider: &'static str },
    #[error("{provider}: request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },
    #[error("{provider}: service answered with HTTP {status}")]
    Status { provider: &'static str, status: u16 },
    #[error("{provider}: malformed response: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },
}

impl RemoteError {
    pub fn provider(&self) -> &'static str {
        match self {
            Self::MissingKey { provider }
            | Self::Transport { provider, .. }
            | Self::Status { provider, .. }
            | Self::Malformed { provider, .. } => provider,
        }
    }
}

/// The single user-facing failure of an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("palm analysis failed: {0}")]
    Input(#[from] InputError),
    #[error("a palm analysis is already running")]
    AlreadyRunning,
    #[error("palm analysis was cancelled")]
    Cancelled,
}
