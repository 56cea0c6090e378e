//! Names and locations derived from a version string.
//!
//! Everything here is pure string/path composition. A malformed version just
//! yields a URL that will 404 later; nothing is validated.

use crate::platform::Platform;
use std::path::{Path, PathBuf};

/// One Go release for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    pub platform: Platform,
}

impl Release {
    pub fn new(version: &str, platform: Platform) -> Self {
        Self {
            version: version.to_string(),
            platform,
        }
    }

    /// `go<version>.<os>-<arch>`, also the cache directory name.
    pub fn filename(&self) -> String {
        format!(
            "go{}.{}-{}",
            self.version,
            self.platform.os.as_str(),
            self.platform.arch.as_str()
        )
    }

    pub fn tar_name(&self) -> String {
        format!("{}.tar", self.filename())
    }

    pub fn compressed_name(&self) -> String {
        format!("{}.gz", self.tar_name())
    }

    pub fn cache_path(&self, versions_dir: &Path) -> PathBuf {
        versions_dir.join(self.filename())
    }

    pub fn url(&self, host: &str) -> String {
        format!("{}/go/{}", host.trim_end_matches('/'), self.compressed_name())
    }
}
