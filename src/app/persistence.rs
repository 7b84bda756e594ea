use crate::theme::PaletteType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Overrides the settings file location, ahead of `settings_file`.
pub const SETTINGS_ENV: &str = "FAVCMD_SETTINGS";

/// `~/.config/favcmd/config.toml`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub theme: Option<PaletteType>,
    /// Program used to run commands, invoked as `<shell> -c <line>`.
    pub shell: Option<String>,
    pub settings_file: Option<PathBuf>,
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("favcmd");
        path
    })
}

pub fn get_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

impl AppConfig {
    /// Missing or unreadable files give the defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string(self)?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn palette(&self) -> PaletteType {
        self.theme.unwrap_or(PaletteType::CatppuccinMocha)
    }

    /// Configured shell, then `$SHELL`, then `sh`.
    pub fn shell(&self) -> String {
        self.shell
            .clone()
            .or_else(|| std::env::var("SHELL").ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "sh".to_string())
    }

    /// `$FAVCMD_SETTINGS`, then `settings_file`, then the default location.
    pub fn settings_path(&self, default: Option<PathBuf>) -> Option<PathBuf> {
        std::env::var_os(SETTINGS_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.settings_file.clone())
            .or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_and_invalid_config_fall_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());

        std::fs::write(&path, "theme = [").unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            theme: Some(PaletteType::Nord),
            shell: Some("bash".to_string()),
            settings_file: None,
        };
        config.save_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("theme = \"nord\""));
        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn test_palette_defaults_to_catppuccin() {
        assert_eq!(AppConfig::default().palette(), PaletteType::CatppuccinMocha);
        let parsed: AppConfig = toml::from_str("theme = \"catppuccin\"").unwrap();
        assert_eq!(parsed.palette(), PaletteType::CatppuccinMocha);
    }
}
