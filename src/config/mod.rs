use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::obj::ImportOptions;

fn default_strict() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}
fn default_seed() -> u64 {
    0
}
fn default_samples() -> usize {
    0
}

/// Settings read from `objnav.toml`; command-line flags take precedence
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default = "default_strict")]
    pub strict: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Seed for the deterministic sampler
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of surface points to sample after import
    #[serde(default = "default_samples")]
    pub samples: usize,
}

impl FileConfig {
    /// Search the default locations and return the first config that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        log::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Import options from the file, with `--strict` able to switch strict mode on
    pub fn import_options(&self, strict_flag: bool) -> ImportOptions {
        ImportOptions {
            strict: self.strict || strict_flag,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("objnav.toml"));
    paths.push(PathBuf::from(".objnav.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("objnav").join("config.toml"));
        paths.push(config_dir.join("objnav.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".objnav.toml"));
        paths.push(home.join(".config").join("objnav").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.import_options(false), ImportOptions::default());
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("objnav.toml");
        fs::write(&path, "strict = true\nseed = 1234\nsamples = 4\n").unwrap();

        let config = FileConfig::from_path(&path).unwrap();

        assert!(config.strict);
        assert!(!config.verbose);
        assert_eq!(config.seed, 1234);
        assert_eq!(config.samples, 4);
        assert_eq!(config.import_options(false), ImportOptions::strict());
    }

    #[test]
    fn test_strict_flag_overrides_file() {
        let config: FileConfig = toml::from_str("strict = false\n").unwrap();

        assert_eq!(config.import_options(true), ImportOptions::strict());
        assert_eq!(config.import_options(false), ImportOptions::default());
    }

    #[test]
    fn test_from_path_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("objnav.toml");
        fs::write(&path, "strict = \"yes please\"\n").unwrap();

        assert!(FileConfig::from_path(&path).is_err());
    }

    #[test]
    fn test_config_paths_start_local() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("objnav.toml"));
        assert_eq!(paths[1], PathBuf::from(".objnav.toml"));
    }
}
