// Configuration module for witsml-autoquery
// This module handles loading and parsing configuration from ~/.config/witsml-autoquery/config.toml

mod types;

pub use types::{AutoQueryConfig, Config, LogLevel, LoggingConfig};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/witsml-autoquery/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path with the same fallback rules
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            log::debug!("Config parsed successfully: {:?}", config.auto_query);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/witsml-autoquery/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("witsml-autoquery")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    // Malformed TOML always falls back to defaults with a warning
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn prop_malformed_toml_fallback(
            malformed in prop::sample::select(vec![
                "[auto_query\nmax_round_trips = 1",       // Missing closing bracket
                "[logging]\nlevel = debug",               // Missing quotes
                "[auto_query]\n max_round_trips",         // Missing value
                "[logging]\nlevel = \"debug",             // Unterminated string
            ])
        ) {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(&path, malformed).unwrap();

            let result = load_config_from(&path);
            prop_assert!(result.warning.is_some());
            prop_assert!(result.config.auto_query.retrieve_partial_results);
            prop_assert_eq!(result.config.logging.level, LogLevel::Warn);
        }
    }

    #[test]
    fn test_config_path_location() {
        let path = get_config_path();
        let path_str = path.to_string_lossy();
        assert!(
            path_str.ends_with("witsml-autoquery/config.toml")
                || path_str.ends_with("witsml-autoquery\\config.toml"),
            "unexpected config path: {}",
            path_str
        );
        assert_eq!(path, get_config_path());
    }

    #[test]
    fn test_missing_file_returns_defaults_without_warning() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("absent.toml"));
        assert!(result.warning.is_none());
        assert_eq!(result.config.auto_query.max_round_trips, 0);
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[auto_query]\nmax_round_trips = 7\n").unwrap();

        let result = load_config_from(&path);
        assert!(result.warning.is_none());
        assert_eq!(result.config.auto_query.max_round_trips, 7);
    }

    #[test]
    fn test_unreadable_path_warns() {
        // A directory cannot be read as a file
        let dir = TempDir::new().unwrap();
        let result = load_config_from(dir.path());
        assert!(result.warning.unwrap().starts_with("Failed to read config"));
    }
}
