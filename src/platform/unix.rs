use crate::platform::PlatformOps;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub static UNIX_PLATFORM: Unix = Unix;

pub struct Unix;

impl PlatformOps for Unix {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir().or_else(|| std::env::var_os("HOME").map(PathBuf::from))
    }
    fn link_dir(&self, target: &Path, link: &Path) -> Result<()> {
        std::os::unix::fs::symlink(target, link)
            .with_context(|| format!("linking {} -> {}", link.display(), target.display()))
    }
}
