use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Settings file for a load run. All five paths are required; a blank
/// or missing value aborts the run before any database work starts.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    pub database_path: PathBuf,
    pub data_files: DataFilePaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataFilePaths {
    pub adjectives: PathBuf,
    pub verbs: PathBuf,
    pub nouns: PathBuf,
    pub adverbs: PathBuf,
}

impl LoaderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: LoaderConfig = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if path_is_blank(&self.database_path) {
            bail!("config value 'database_path' is missing or empty");
        }

        for (key, value) in [
            ("adjectives", &self.data_files.adjectives),
            ("verbs", &self.data_files.verbs),
            ("nouns", &self.data_files.nouns),
            ("adverbs", &self.data_files.adverbs),
        ] {
            if path_is_blank(value) {
                bail!("config value 'data_files.{key}' is missing or empty");
            }
        }

        Ok(())
    }
}

fn path_is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty()
}
