use crate::command_handlers::Session;
use crate::installer::{self, InstallOutcome};
use crate::release::Release;
use anyhow::Result;
use std::io::Write;

pub fn run(session: &Session, version: &str, out: &mut impl Write) -> Result<InstallOutcome> {
    let release = Release::new(version, session.platform);
    let outcome = installer::install(&session.cfg, &release, session.backend.as_ref())?;
    let path = outcome.path().display();
    match &outcome {
        InstallOutcome::AlreadyPresent(_) => writeln!(out, "go {version} already present at {path}")?,
        InstallOutcome::Installed(_) => writeln!(out, "Downloaded go {version} to {path}")?,
    }
    Ok(outcome)
}
