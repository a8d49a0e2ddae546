use std::path::PathBuf;
use std::process::Command;

use anyhow::Context;
use tracing::debug;

/// Run `<formatter> -w <files...>` over freshly written files.
///
/// # Errors
///
/// Fails when the formatter cannot be spawned or exits unsuccessfully.
pub fn format_files(paths: &[PathBuf], formatter: &str) -> anyhow::Result<()> {
    if paths.is_empty() {
        return Ok(());
    }
    debug!(formatter, files = paths.len(), "formatting generated files");
    let status = Command::new(formatter)
        .arg("-w")
        .args(paths)
        .status()
        .with_context(|| format!("Failed to run formatter `{formatter}`"))?;
    if !status.success() {
        anyhow::bail!("{formatter} failed with {status}");
    }
    Ok(())
}
