use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::theme::ThemeConfig;

const APP_DIR: &str = "family-calendar";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub theme: ThemeConfig,
}

impl Config {
    /// Read the user config. A missing or unparsable file gives defaults.
    pub fn load() -> Self {
        config_path()
            .and_then(|path| Self::from_file(&path))
            .unwrap_or_default()
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".family-calendar"))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.data_dir().join("exports")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.log_level(), "info");
        assert!(config.data_dir.is_none());
        assert!(config.theme.preset.is_none());
    }

    #[test]
    fn reads_paths_level_and_theme() {
        let config = Config::parse(
            r##"
            data_dir = "/tmp/cal"
            log_level = "debug"

            [theme]
            preset = "nord"
            marker_fg = "#ff0000"
            "##,
        )
        .unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/cal"));
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/cal/exports"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.theme.preset.as_deref(), Some("nord"));
        assert_eq!(config.theme.marker_fg.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [").unwrap();
        assert!(Config::from_file(&path).is_none());
    }
}
