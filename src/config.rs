use crate::error::GovmError;
use crate::platform::platform;
use anyhow::{Context, Result};
use fs_err as fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ROOT_ENV: &str = "GOVM_ROOT";
pub const BIN_ENV: &str = "GOVM_BIN";
pub const GOROOT_ENV: &str = "GOVM_GOROOT";
pub const HOST_ENV: &str = "GOVM_DOWNLOAD_HOST";
pub const BACKEND_ENV: &str = "GOVM_BACKEND";

pub const DEFAULT_HOST: &str = "https://dl.google.com";
const CONFIG_FILE: &str = "config.toml";

/// Which implementation performs fetch / decompress / extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// reqwest + flate2 + tar, in process.
    #[default]
    Native,
    /// wget + gzip + tar from PATH.
    System,
}

impl FromStr for BackendKind {
    type Err = GovmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(BackendKind::Native),
            "system" => Ok(BackendKind::System),
            other => Err(GovmError::UnknownBackend(other.to_string())),
        }
    }
}

/// Everything derived from the environment, resolved once in `main` and
/// passed down by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub bin_dir: PathBuf,
    /// Location of the "current" symlink.
    pub goroot: PathBuf,
    pub download_host: String,
    pub backend: BackendKind,
}

/// Optional `<root>/config.toml`. Environment variables win over it.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    download_host: Option<String>,
    #[serde(default)]
    backend: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), platform().home_dir())
    }

    /// `lookup` stands in for `std::env::var`; empty values count as unset.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let root = match get(ROOT_ENV) {
            Some(r) => PathBuf::from(r),
            None => home.ok_or(GovmError::NoHomeDir)?.join(".govm"),
        };
        let file = load_file_config(&root.join(CONFIG_FILE))?;

        let bin_dir = get(BIN_ENV).map(PathBuf::from).unwrap_or_else(|| root.join("bin"));
        let goroot = get(GOROOT_ENV).map(PathBuf::from).unwrap_or_else(|| root.join("go"));
        let download_host = get(HOST_ENV)
            .or(file.download_host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let backend = match get(BACKEND_ENV).or(file.backend) {
            Some(name) => name.parse()?,
            None => BackendKind::default(),
        };

        Ok(Config {
            root,
            bin_dir,
            goroot,
            download_host,
            backend,
        })
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    /// The current-version record.
    pub fn record_path(&self) -> PathBuf {
        self.root.join("current")
    }

    pub fn known_versions_path(&self) -> PathBuf {
        self.root.join("known-versions")
    }

    /// Scratch directory archives are unpacked into before the move.
    pub fn extract_dir(&self) -> PathBuf {
        self.root.join(".extract")
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let data = fs::read_to_string(path)?;
    toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_live_under_home() {
        let cfg = Config::resolve(lookup(&[]), Some(PathBuf::from("/nonexistent-home"))).unwrap();
        assert_eq!(cfg.root, PathBuf::from("/nonexistent-home/.govm"));
        assert_eq!(cfg.bin_dir, cfg.root.join("bin"));
        assert_eq!(cfg.goroot, cfg.root.join("go"));
        assert_eq!(cfg.download_host, DEFAULT_HOST);
        assert_eq!(cfg.backend, BackendKind::Native);
        assert_eq!(cfg.versions_dir(), cfg.root.join("versions"));
        assert_eq!(cfg.record_path(), cfg.root.join("current"));
        assert_eq!(cfg.known_versions_path(), cfg.root.join("known-versions"));
    }

    #[test]
    fn env_overrides_each_path() {
        let cfg = Config::resolve(
            lookup(&[
                (ROOT_ENV, "/opt/govm"),
                (BIN_ENV, "/opt/bin"),
                (GOROOT_ENV, "/usr/local/go"),
                (BACKEND_ENV, "System"),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(cfg.root, PathBuf::from("/opt/govm"));
        assert_eq!(cfg.bin_dir, PathBuf::from("/opt/bin"));
        assert_eq!(cfg.goroot, PathBuf::from("/usr/local/go"));
        assert_eq!(cfg.backend, BackendKind::System);
    }

    #[test]
    fn empty_env_value_counts_as_unset() {
        let cfg = Config::resolve(lookup(&[(BIN_ENV, "")]), Some(PathBuf::from("/h"))).unwrap();
        assert_eq!(cfg.bin_dir, PathBuf::from("/h/.govm/bin"));
    }

    #[test]
    fn missing_home_without_root_is_an_error() {
        let err = Config::resolve(lookup(&[]), None).unwrap_err();
        assert!(matches!(err.downcast_ref::<GovmError>(), Some(GovmError::NoHomeDir)));
    }

    #[test]
    fn config_file_is_below_env() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "download_host = \"https://mirror.example\"\nbackend = \"system\"\n",
        )
        .unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let cfg = Config::resolve(lookup(&[(ROOT_ENV, root.as_str())]), None).unwrap();
        assert_eq!(cfg.download_host, "https://mirror.example");
        assert_eq!(cfg.backend, BackendKind::System);

        let cfg = Config::resolve(lookup(&[(ROOT_ENV, root.as_str()), (BACKEND_ENV, "native")]), None).unwrap();
        assert_eq!(cfg.backend, BackendKind::Native);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = Config::resolve(lookup(&[(BACKEND_ENV, "curl")]), Some(PathBuf::from("/h"))).unwrap_err();
        assert!(err.to_string().contains("unknown backend 'curl'"));
    }
}
