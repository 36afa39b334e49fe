// =============================================================================
// Output writer — atomic overwrite of report artefacts
// =============================================================================
//
// Contents are written to a `.tmp` sibling and renamed over the target, so a
// failed write leaves the previous file intact.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let tmp_path = tmp_sibling(path);

    std::fs::write(&tmp_path, contents)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("failed to rename {} into place", tmp_path.display()));
    }

    debug!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
