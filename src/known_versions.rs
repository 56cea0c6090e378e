use crate::config::Config;
use crate::error::GovmError;
use crate::installer;
use crate::platform::Platform;
use crate::release::Release;
use anyhow::Result;
use fs_err as fs;
use std::fmt;

/// Written to `known-versions` by `govm init`, newest first. Users may edit
/// the file freely afterwards; it is display-only.
pub const SEED: &[&str] = &[
    "1.23.2", "1.23.1", "1.23.0", "1.22.8", "1.22.7", "1.22.0", "1.21.13", "1.21.0", "1.20.14",
    "1.19.13", "1.18.10", "1.17.13", "1.16.15", "1.16", "1.15.15", "1.15",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Current,
    Installed,
    NotInstalled,
}

impl Status {
    fn marker(self) -> char {
        match self {
            Status::Current => '*',
            Status::Installed | Status::NotInstalled => ' ',
        }
    }

    fn label(self) -> &'static str {
        match self {
            Status::Current => "current",
            Status::Installed => "installed",
            Status::NotInstalled => "not installed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub version: String,
    pub status: Status,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<10} ({})",
            self.status.marker(),
            self.version,
            self.status.label()
        )
    }
}

/// Create the known-versions file with [`SEED`] unless it already exists.
/// Returns whether it was written.
pub fn seed_if_missing(cfg: &Config) -> Result<bool> {
    let path = cfg.known_versions_path();
    if path.exists() {
        return Ok(false);
    }
    let mut body = SEED.join("\n");
    body.push('\n');
    fs::write(&path, body)?;
    Ok(true)
}

/// Versions in file order. Any whitespace separates entries; duplicates are
/// kept.
pub fn load(cfg: &Config) -> Result<Vec<String>> {
    let path = cfg.known_versions_path();
    if !path.exists() {
        return Err(GovmError::NotInitialized { path }.into());
    }
    let data = fs::read_to_string(&path)?;
    Ok(data.split_whitespace().map(str::to_string).collect())
}

/// Annotate each known version for `platform`. `current` is the active
/// version, if any.
pub fn statuses(cfg: &Config, platform: Platform, known: &[String], current: Option<&str>) -> Vec<Entry> {
    known
        .iter()
        .map(|v| {
            let status = if current == Some(v.as_str()) {
                Status::Current
            } else if installer::is_installed(cfg, &Release::new(v, platform)) {
                Status::Installed
            } else {
                Status::NotInstalled
            };
            Entry {
                version: v.clone(),
                status,
            }
        })
        .collect()
}
