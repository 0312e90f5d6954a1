use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, UNREACHABLE_CODE_ID};

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[reachfix]` section.
    pub reachfix: FixConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

/// Options of the unreachable-code fix.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixConfig {
    /// Diagnostic ids the fix accepts.
    #[serde(default = "default_fixable_ids")]
    pub fixable_ids: Vec<String>,
    /// Re-parse the rewritten code and decline fixes that break it.
    #[serde(default = "default_verify")]
    pub verify: bool,
    /// Write fixed files back instead of printing them.
    #[serde(default)]
    pub in_place: bool,
}

fn default_fixable_ids() -> Vec<String> {
    vec![UNREACHABLE_CODE_ID.to_owned()]
}

fn default_verify() -> bool {
    true
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            fixable_ids: default_fixable_ids(),
            verify: default_verify(),
            in_place: false,
        }
    }
}

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unexpected keys
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads configuration from the current directory or one of its parents.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Unreadable or malformed files are ignored; use
    /// [`Config::try_load_from_path`] to report them.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        Self::try_load_from_path(path).unwrap_or_default()
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// The first `.reachfix.toml` found wins; without one the defaults
    /// apply.
    ///
    /// # Errors
    ///
    /// Fails if the config file found cannot be read or parsed.
    pub fn try_load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                let content = fs::read_to_string(&candidate).map_err(|source| {
                    ConfigError::Read {
                        path: candidate.clone(),
                        source,
                    }
                })?;
                let mut config =
                    toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
                        path: candidate.clone(),
                        source,
                    })?;
                config.config_file_path = Some(candidate);
                return Ok(config);
            }

            if !current.pop() {
                break;
            }
        }

        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config.reachfix.fixable_ids, vec!["CS0162".to_owned()]);
        assert!(config.reachfix.verify);
        assert!(!config.reachfix.in_place);
    }

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert_eq!(config.reachfix, FixConfig::default());
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_load_from_path_reachfix_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".reachfix.toml")).unwrap();
        writeln!(
            file,
            r#"[reachfix]
fixable_ids = ["CS0162", "IDE0035"]
verify = false
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.reachfix.fixable_ids, vec!["CS0162", "IDE0035"]);
        assert!(!config.reachfix.verify);
        assert_eq!(
            config.config_file_path,
            Some(dir.path().join(".reachfix.toml"))
        );
    }

    #[test]
    fn test_load_from_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("inner");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".reachfix.toml"), "[reachfix]\nin_place = true\n")
            .unwrap();

        let config = Config::load_from_path(&nested);
        assert!(config.reachfix.in_place);
    }

    #[test]
    fn test_load_from_file_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".reachfix.toml"), "[reachfix]\nverify = false\n")
            .unwrap();
        let source = dir.path().join("Program.cs");
        std::fs::write(&source, "A();").unwrap();

        let config = Config::load_from_path(&source);
        assert!(!config.reachfix.verify);
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".reachfix.toml"), "[reachfix]\nverify = 3\n").unwrap();

        assert!(matches!(
            Config::try_load_from_path(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(Config::load_from_path(dir.path()), Config::default());
    }
}
