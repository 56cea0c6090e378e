use crate::command_handlers::{download, Session};
use crate::current;
use crate::release::Release;
use anyhow::Result;
use std::io::Write;

/// `download` followed by a switch of the current link.
pub fn run(session: &Session, version: &str, out: &mut impl Write) -> Result<()> {
    download::run(session, version, out)?;
    let release = Release::new(version, session.platform);
    let target = current::switch(&session.cfg, &release)?;
    writeln!(
        out,
        "Now using go {version} ({} -> {})",
        session.cfg.goroot.display(),
        target.display()
    )?;
    Ok(())
}
