use crate::error::GovmError;

/// Answers "is this executable available?" for startup validation.
pub trait ToolProbe {
    fn is_available(&self, tool: &str) -> bool;
}

/// Looks tools up on `PATH`.
pub struct WhichProbe;

impl ToolProbe for WhichProbe {
    fn is_available(&self, tool: &str) -> bool {
        which::which(tool).is_ok()
    }
}

/// Presence of every `required` tool, in the order given.
pub fn check(probe: &dyn ToolProbe, required: &[&str]) -> Vec<(String, bool)> {
    required
        .iter()
        .map(|t| (t.to_string(), probe.is_available(t)))
        .collect()
}

/// Fails with one error naming all missing tools.
pub fn ensure_available(probe: &dyn ToolProbe, required: &[&str]) -> Result<(), GovmError> {
    let missing: Vec<String> = check(probe, required)
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        tracing::debug!(?missing, "dependency check failed");
        Err(GovmError::MissingDependencies(missing))
    }
}
