use crate::command_handlers::Session;
use crate::{current, known_versions};
use anyhow::Result;
use std::io::Write;
use tracing::warn;

/// One line per known version, in file order. The record decides which
/// version is current.
pub fn run(session: &Session, out: &mut impl Write) -> Result<()> {
    let cfg = &session.cfg;
    let known = known_versions::load(cfg)?;
    let recorded = current::read_record(cfg)?;
    if let Some(linked) = current::linked_version(cfg) {
        if recorded.as_deref() != Some(linked.as_str()) {
            warn!(recorded = ?recorded, %linked, "current record and symlink disagree; run `govm use` to repair");
        }
    }
    for entry in known_versions::statuses(cfg, session.platform, &known, recorded.as_deref()) {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}
