//! Pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

use super::manifest::MANIFEST_FILE_NAME;
use super::toolchain::{KITS_DOWNLOAD_URL, Tool};

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving the toolchain or running the stages.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest could not be parsed as XML
    #[error("failed to parse {MANIFEST_FILE_NAME}: {0}")]
    ManifestParse(String),

    /// Manifest has no usable publisher identity
    #[error("{MANIFEST_FILE_NAME} has no Identity element with a non-empty Publisher attribute")]
    PublisherMissing,

    /// Source directory has no final path component to name the package after
    #[error("cannot derive a package name from source directory {}", .0.display())]
    InvalidSource(PathBuf),

    /// No versioned SDK directory found under the kits root
    #[error(
        "no Windows 10 SDK installation found under {}. Download it from {KITS_DOWNLOAD_URL}",
        .root.display()
    )]
    KitsNotFound {
        /// Kits root that was searched
        root: PathBuf,
    },

    /// A required SDK executable is missing from the selected toolchain
    #[error(
        "{tool} not found at {}. Install the Windows 10 SDK from {KITS_DOWNLOAD_URL}",
        .path.display()
    )]
    ToolMissing {
        /// Tool that was required
        tool: Tool,
        /// Path that was checked
        path: PathBuf,
    },

    /// A child process could not be started
    #[error("failed to start {command}: {source}")]
    Spawn {
        /// Command that failed to start
        command: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// An SDK tool ran but exited unsuccessfully
    #[error("{tool} failed with exit code {code:?}")]
    StageFailed {
        /// Tool that failed
        tool: Tool,
        /// Exit code, if the child was not killed by a signal
        code: Option<i32>,
    },
}
