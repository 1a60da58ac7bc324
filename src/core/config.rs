//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// DET configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default path for the exported checklist
    pub export_path: Option<PathBuf>,

    /// Default output format for list commands
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/det/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(path) = std::env::var("DET_EXPORT_PATH") {
            config.export_path = Some(PathBuf::from(path));
        }
        if let Ok(format) = std::env::var("DET_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "det")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.export_path.is_some() {
            self.export_path = other.export_path;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            export_path: Some(PathBuf::from("a.txt")),
            default_format: None,
        };
        base.merge(Config {
            export_path: Some(PathBuf::from("b.txt")),
            default_format: Some("json".to_string()),
        });
        assert_eq!(base.export_path, Some(PathBuf::from("b.txt")));
        assert_eq!(base.default_format, Some("json".to_string()));
    }

    #[test]
    fn test_merge_keeps_existing_when_other_is_empty() {
        let mut base = Config {
            export_path: Some(PathBuf::from("a.txt")),
            default_format: Some("yaml".to_string()),
        };
        base.merge(Config::default());
        assert_eq!(base.export_path, Some(PathBuf::from("a.txt")));
        assert_eq!(base.default_format, Some("yaml".to_string()));
    }
}
