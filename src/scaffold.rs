// =============================================================================
// Scaffold — starter files for a fresh report directory
// =============================================================================
//
// Writes `config_sample.json`, `templates/report_template.html`, a README,
// the daily GitHub Actions workflow and an empty `output/` directory under
// `root`. Existing files are left alone unless `force` is set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::SAMPLE_CONFIG_PATH;
use crate::report::template::BUILTIN_TEMPLATE;
use crate::report::write_atomic;

pub const SAMPLE_CONFIG: &str = include_str!("../config_sample.json");
const README: &str = include_str!("../README.md");
const WORKFLOW: &str = include_str!("../.github/workflows/run.yml");

const TEMPLATE_PATH: &str = "templates/report_template.html";
const README_PATH: &str = "README.md";
const WORKFLOW_PATH: &str = ".github/workflows/run.yml";
const OUTPUT_DIR: &str = "output";

/// Returns the files actually written.
pub fn write_starter_files(root: &Path, force: bool) -> Result<Vec<PathBuf>> {
    let files = [
        (root.join(SAMPLE_CONFIG_PATH), SAMPLE_CONFIG),
        (root.join(TEMPLATE_PATH), BUILTIN_TEMPLATE),
        (root.join(README_PATH), README),
        (root.join(WORKFLOW_PATH), WORKFLOW),
    ];

    let mut written = Vec::new();
    for (path, contents) in files {
        if path.exists() && !force {
            info!(path = %path.display(), "exists, leaving untouched");
            continue;
        }
        write_atomic(&path, contents)?;
        info!(path = %path.display(), "starter file written");
        written.push(path);
    }

    let output = root.join(OUTPUT_DIR);
    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("scaffold-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn sample_config_parses() {
        let cfg: ReportConfig = serde_json::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(cfg.symbols, vec!["RELIANCE.NS", "TCS.NS", "HDFCBANK.NS"]);
        assert_eq!(cfg.affiliates.len(), 2);
        assert!(cfg.telegram_credentials().is_none());
    }

    #[test]
    fn writes_all_starter_files() {
        let root = temp_root();
        let written = write_starter_files(&root, false).unwrap();
        assert_eq!(written.len(), 4);
        assert!(root.join("config_sample.json").is_file());
        assert!(root.join("templates/report_template.html").is_file());
        assert!(root.join("README.md").is_file());
        assert!(root.join("output").is_dir());

        let workflow = std::fs::read_to_string(root.join(".github/workflows/run.yml")).unwrap();
        assert!(workflow.contains("cron: '30 2 * * *'"));
        assert!(workflow.contains("daily-signals run"));
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn existing_files_kept_unless_forced() {
        let root = temp_root();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("config_sample.json"), "{}").unwrap();

        let written = write_starter_files(&root, false).unwrap();
        assert_eq!(written.len(), 3);
        assert!(!written.contains(&root.join("config_sample.json")));
        assert_eq!(std::fs::read_to_string(root.join("config_sample.json")).unwrap(), "{}");

        let written = write_starter_files(&root, true).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(
            std::fs::read_to_string(root.join("config_sample.json")).unwrap(),
            SAMPLE_CONFIG
        );
        std::fs::remove_dir_all(&root).unwrap();
    }
}
