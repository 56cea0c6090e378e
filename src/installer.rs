use crate::config::Config;
use crate::error::GovmError;
use crate::fetch::ArchiveBackend;
use crate::release::Release;
use anyhow::{Context, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level directory every official Go tarball unpacks into.
const ARCHIVE_ROOT: &str = "go";

#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyPresent(PathBuf),
    Installed(PathBuf),
}

impl InstallOutcome {
    pub fn path(&self) -> &Path {
        match self {
            InstallOutcome::AlreadyPresent(p) | InstallOutcome::Installed(p) => p,
        }
    }
}

/// Make sure the cache path for `release` holds an extracted distribution.
///
/// Does nothing (and touches no backend) when the cache path already holds a
/// directory. A plain file squatting on the cache path is replaced.
/// Otherwise runs fetch, decompress, extract, move and cleans the temporary
/// archive files. A failure part way through is not rolled back; each step
/// removes its own stale target before writing it again.
pub fn install(cfg: &Config, release: &Release, backend: &dyn ArchiveBackend) -> Result<InstallOutcome> {
    let versions_dir = cfg.versions_dir();
    let cache_path = release.cache_path(&versions_dir);
    if is_installed(cfg, release) {
        debug!(path = %cache_path.display(), "cache hit");
        return Ok(InstallOutcome::AlreadyPresent(cache_path));
    }
    ensure_dir(&versions_dir)?;
    remove_file_if_exists(&cache_path)?;

    let compressed = cfg.root.join(release.compressed_name());
    remove_file_if_exists(&compressed)?;
    let url = release.url(&cfg.download_host);
    info!(%url, "downloading");
    backend.fetch(&url, &compressed)?;

    let tar = cfg.root.join(release.tar_name());
    remove_file_if_exists(&tar)?;
    debug!(path = %tar.display(), "decompressing");
    backend.decompress(&compressed, &tar)?;
    remove_file_if_exists(&compressed)?;

    let work = cfg.extract_dir();
    remove_dir_if_exists(&work)?;
    ensure_dir(&work)?;
    debug!(path = %work.display(), "extracting");
    backend.extract(&tar, &work)?;

    let extracted = work.join(ARCHIVE_ROOT);
    if !extracted.is_dir() {
        return Err(GovmError::Extract {
            path: tar,
            reason: format!("archive has no top-level '{ARCHIVE_ROOT}' directory"),
        }
        .into());
    }
    fs::rename(&extracted, &cache_path)
        .with_context(|| format!("moving extracted toolchain into {}", cache_path.display()))?;

    remove_file_if_exists(&tar)?;
    remove_dir_if_exists(&work)?;
    info!(path = %cache_path.display(), "installed");
    Ok(InstallOutcome::Installed(cache_path))
}

/// A release counts as installed only when its cache path is a directory.
pub fn is_installed(cfg: &Config, release: &Release) -> bool {
    release.cache_path(&cfg.versions_dir()).is_dir()
}

pub fn ensure_dir(p: &Path) -> Result<()> {
    fs::create_dir_all(p).with_context(|| format!("creating dir {p:?}"))
}

fn remove_file_if_exists(p: &Path) -> Result<()> {
    if p.symlink_metadata().is_ok() {
        fs::remove_file(p)?;
    }
    Ok(())
}

fn remove_dir_if_exists(p: &Path) -> Result<()> {
    if p.is_dir() {
        fs::remove_dir_all(p)?;
    }
    Ok(())
}
