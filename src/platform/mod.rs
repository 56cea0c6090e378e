use crate::error::GovmError;
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

/// Host specific filesystem hooks.
pub trait PlatformOps: Sync + Send {
    fn home_dir(&self) -> Option<PathBuf>;
    /// Create a directory link at `link` pointing at `target`.
    fn link_dir(&self, target: &Path, link: &Path) -> Result<()>;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;

/// Operating systems Go publishes tarballs for that we know how to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Darwin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
    I386,
    Armv6l,
}

impl Os {
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
        }
    }
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::I386 => "386",
            Arch::Armv6l => "armv6l",
        }
    }
}

/// Normalized (os, arch) pair used to name release archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Map Rust's `std::env::consts` spellings onto Go's release naming.
    pub fn from_parts(os: &str, arch: &str) -> Result<Self, GovmError> {
        let unsupported = || GovmError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        };
        let os_kind = match os {
            "linux" => Os::Linux,
            "macos" | "darwin" => Os::Darwin,
            _ => return Err(unsupported()),
        };
        let arch_kind = match arch {
            "x86_64" | "amd64" => Arch::Amd64,
            "aarch64" | "arm64" => Arch::Arm64,
            "x86" | "386" => Arch::I386,
            "arm" => Arch::Armv6l,
            _ => return Err(unsupported()),
        };
        Ok(Platform {
            os: os_kind,
            arch: arch_kind,
        })
    }

    pub fn detect() -> Result<Self, GovmError> {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}
