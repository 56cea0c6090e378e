use std::path::PathBuf;
use thiserror::Error;

/// Failures the tool reports to the user. Anything else (plain filesystem
/// errors) travels as `anyhow` context from `fs-err`.
#[derive(Debug, Error)]
pub enum GovmError {
    #[error("unsupported os/arch: {os}/{arch} (supported: linux, darwin x amd64, arm64, 386, armv6l)")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("missing required system dependencies: {}", .0.join(", "))]
    MissingDependencies(Vec<String>),

    #[error("cannot determine home directory; set GOVM_ROOT")]
    NoHomeDir,

    #[error("unknown backend '{0}' (expected 'native' or 'system')")]
    UnknownBackend(String),

    #[error("go {version} needs to be downloaded first (run `govm download {version}`)")]
    NotDownloaded { version: String },

    #[error("{} not found; run `govm init` first", path.display())]
    NotInitialized { path: PathBuf },

    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("decompressing {} failed: {reason}", path.display())]
    Decompress { path: PathBuf, reason: String },

    #[error("extracting {} failed: {reason}", path.display())]
    Extract { path: PathBuf, reason: String },
}
