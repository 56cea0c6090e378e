//! The current pointer (symlink) and the current-version record.
//!
//! Both are replaced through a temporary sibling plus `rename`, symlink first,
//! so an interrupted switch leaves either the old state or a new symlink next
//! to a stale record. The record stays authoritative for what is current;
//! [`linked_version`] only lets callers notice that the two disagree.

use crate::config::Config;
use crate::error::GovmError;
use crate::installer;
use crate::platform::platform;
use crate::release::Release;
use anyhow::{Context, Result};
use fs_err as fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Point the current symlink at `release` and record its version.
///
/// Fails before touching anything when the release is not in the cache.
pub fn switch(cfg: &Config, release: &Release) -> Result<PathBuf> {
    if !installer::is_installed(cfg, release) {
        return Err(GovmError::NotDownloaded {
            version: release.version.clone(),
        }
        .into());
    }
    let target = release.cache_path(&cfg.versions_dir());
    replace_link(&target, &cfg.goroot)?;
    write_record(&cfg.record_path(), &release.version)?;
    info!(version = %release.version, link = %cfg.goroot.display(), "switched");
    Ok(target)
}

/// Contents of the record, trimmed; `None` when missing or empty.
pub fn read_record(cfg: &Config) -> Result<Option<String>> {
    let path = cfg.record_path();
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)?;
    let v = raw.trim();
    Ok(if v.is_empty() { None } else { Some(v.to_string()) })
}

/// Version named by the current symlink, when it points at a cache entry
/// under the versions directory. Anything else (no link, a foreign target,
/// an unrecognized name) yields `None`.
pub fn linked_version(cfg: &Config) -> Option<String> {
    let target = std::fs::read_link(&cfg.goroot).ok()?;
    if target.parent() != Some(cfg.versions_dir().as_path()) {
        debug!(target = %target.display(), "current link points outside the cache");
        return None;
    }
    let name = target.file_name()?.to_str()?;
    let (version, _platform) = name.strip_prefix("go")?.rsplit_once('.')?;
    Some(version.to_string())
}

fn replace_link(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = sibling(link, ".govm-new");
    if staging.symlink_metadata().is_ok() {
        fs::remove_file(&staging)?;
    }
    platform().link_dir(target, &staging)?;

    // rename() can swap a symlink atomically but cannot replace a real directory.
    if let Ok(meta) = link.symlink_metadata() {
        if meta.is_dir() {
            debug!(path = %link.display(), "removing directory in place of current link");
            fs::remove_dir_all(link)?;
        }
    }
    fs::rename(&staging, link).with_context(|| format!("activating {}", link.display()))?;
    Ok(())
}

fn write_record(path: &Path, version: &str) -> Result<()> {
    let staging = sibling(path, ".tmp");
    fs::write(&staging, format!("{version}\n"))?;
    fs::rename(&staging, path)?;
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
