use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use menucraft_application::parsing::ParserSettings;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub menus_dir: String,
    pub anti_click_spam_delay_ms: i64,
    pub default_color_name: String,
    pub default_color_lore: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            menus_dir: "./menus".to_string(),
            anti_click_spam_delay_ms: 200,
            default_color_name: "&f".to_string(),
            default_color_lore: "&7".to_string(),
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("MENUCRAFT_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.menus_dir = self.menus_dir.trim().to_string();
        if self.default_color_name.trim().is_empty() {
            self.default_color_name = "&f".to_string();
        }
        if self.default_color_lore.trim().is_empty() {
            self.default_color_lore = "&7".to_string();
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.menus_dir = resolve_path(base, &self.menus_dir);
    }

    pub fn validate(&self) -> Result<()> {
        if self.menus_dir.is_empty() {
            return Err(anyhow!("menus_dir must not be empty"));
        }
        if self.anti_click_spam_delay_ms < 0 {
            return Err(anyhow!("anti_click_spam_delay_ms must not be negative"));
        }
        Ok(())
    }

    pub fn parser_settings(&self) -> ParserSettings {
        ParserSettings::new(&self.default_color_name, &self.default_color_lore)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("MENUCRAFT_MENUS_DIR") {
            self.menus_dir = value;
        }
        if let Ok(value) = env::var("MENUCRAFT_ANTI_CLICK_SPAM_DELAY_MS") {
            match value.parse() {
                Ok(delay) => self.anti_click_spam_delay_ms = delay,
                Err(_) => warn!("ignoring non-numeric MENUCRAFT_ANTI_CLICK_SPAM_DELAY_MS"),
            }
        }
        if let Ok(value) = env::var("MENUCRAFT_DEFAULT_COLOR_NAME") {
            self.default_color_name = value;
        }
        if let Ok(value) = env::var("MENUCRAFT_DEFAULT_COLOR_LORE") {
            self.default_color_lore = value;
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.anti_click_spam_delay_ms, 200);
    }

    #[test]
    fn parses_a_partial_config_file() {
        let config: AppConfig = toml::from_str("anti_click_spam_delay_ms = 50").expect("parse");
        assert_eq!(config.anti_click_spam_delay_ms, 50);
        assert_eq!(config.menus_dir, "./menus");
    }

    #[test]
    fn normalize_restores_empty_color_defaults() {
        let mut config = AppConfig {
            default_color_name: "  ".to_string(),
            default_color_lore: String::new(),
            ..AppConfig::default()
        };
        config.normalize();
        assert_eq!(config.default_color_name, "&f");
        assert_eq!(config.default_color_lore, "&7");
    }

    #[test]
    fn negative_spam_delay_is_rejected() {
        let config = AppConfig {
            anti_click_spam_delay_ms: -1,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn relative_menus_dir_resolves_against_the_config_dir() {
        let mut config = AppConfig {
            menus_dir: "menus".to_string(),
            ..AppConfig::default()
        };
        config.resolve_paths(Some(Path::new("/etc/menucraft")));
        assert_eq!(config.menus_dir, "/etc/menucraft/menus");
    }
}
