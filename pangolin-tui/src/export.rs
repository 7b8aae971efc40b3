use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use crate::section::rules::SecurityRule;

/// Writes the current rule set to `~/pangolin/rules-<timestamp>.json`.
pub fn export_rules(rules: &[SecurityRule]) -> Result<PathBuf> {
    let home = dirs::home_dir().context("resolving the home directory")?;
    let path = write_rules(rules, &home.join("pangolin"))?;
    info!("rules exported to {}", path.display());
    Ok(path)
}

fn write_rules(rules: &[SecurityRule], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("rules-{stamp}.json"));

    let json = serde_json::to_string_pretty(rules)?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::rules::Rules;

    #[test]
    fn written_file_parses_back_to_the_same_rules() {
        let dir = std::env::temp_dir().join("pangolin-export-test");
        let rules = Rules::default();

        let path = write_rules(rules.rules(), &dir).unwrap();
        let parsed: Vec<SecurityRule> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(parsed, rules.rules());

        fs::remove_dir_all(&dir).ok();
    }
}
