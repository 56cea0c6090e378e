use crate::cli::Commands;
use crate::command_handlers::{download, init, list, use_version, Session};
use crate::config::Config;
use crate::deps::{self, WhichProbe};
use crate::fetch::backend_for;
use crate::platform::Platform;
use anyhow::Result;

pub fn dispatch(cmd: Commands) -> Result<()> {
    let session = startup()?;
    let mut out = std::io::stdout().lock();
    match cmd {
        Commands::Init => init::run(&session, &mut out),
        Commands::List => list::run(&session, &mut out),
        Commands::Download { version } => download::run(&session, &version, &mut out).map(|_| ()),
        Commands::Use { version } => use_version::run(&session, &version, &mut out),
    }
}

/// Resolve config, refuse unsupported hosts, and make sure the backend's
/// external tools exist.
fn startup() -> Result<Session> {
    let cfg = Config::from_env()?;
    let platform = Platform::detect()?;
    let backend = backend_for(cfg.backend);
    deps::ensure_available(&WhichProbe, backend.required_tools())?;
    tracing::debug!(root = %cfg.root.display(), %platform, backend = ?cfg.backend, "startup checks passed");
    Ok(Session {
        cfg,
        platform,
        backend,
    })
}
