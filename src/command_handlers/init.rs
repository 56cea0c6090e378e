use crate::command_handlers::Session;
use crate::config::{BIN_ENV, GOROOT_ENV, ROOT_ENV};
use crate::installer::ensure_dir;
use crate::known_versions;
use anyhow::Result;
use fs_err as fs;
use std::io::Write;

/// Create the directory tree, an empty record and the seeded known-versions
/// list. Existing files are never overwritten, so running it again is safe.
pub fn run(session: &Session, out: &mut impl Write) -> Result<()> {
    let cfg = &session.cfg;
    ensure_dir(&cfg.versions_dir())?;
    ensure_dir(&cfg.bin_dir)?;

    let record = cfg.record_path();
    if !record.exists() {
        fs::write(&record, "")?;
    }
    if known_versions::seed_if_missing(cfg)? {
        tracing::info!(path = %cfg.known_versions_path().display(), "seeded known versions");
    }

    writeln!(out, "govm initialized in {}", cfg.root.display())?;
    writeln!(
        out,
        "Add the following to your shell profile (~/.bashrc, ~/.zshrc, or ~/.profile):\n"
    )?;
    writeln!(out, "{}", export_lines(session))?;
    Ok(())
}

fn export_lines(session: &Session) -> String {
    let cfg = &session.cfg;
    [
        format!("export {ROOT_ENV}=\"{}\"", cfg.root.display()),
        format!("export {BIN_ENV}=\"{}\"", cfg.bin_dir.display()),
        format!("export {GOROOT_ENV}=\"{}\"", cfg.goroot.display()),
        format!("export GOROOT=\"${GOROOT_ENV}\""),
        format!("export PATH=\"$GOROOT/bin:${BIN_ENV}:$PATH\""),
    ]
    .join("\n")
}
