use crate::platform::PlatformOps;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

impl PlatformOps for Windows {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir().or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
    }

    fn link_dir(&self, target: &Path, link: &Path) -> Result<()> {
        std::os::windows::fs::symlink_dir(target, link)
            .with_context(|| format!("linking {} -> {}", link.display(), target.display()))
    }
}
