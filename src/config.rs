//! Configuration handling for the form palette and date display

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while loading or interpreting the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color for {field}: {value}")]
    InvalidColor { field: &'static str, value: String },

    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
}

/// User configuration for the form
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FormerConfig {
    /// Color applied to titles and values of disabled rows
    pub disabled_color: Option<String>,
    /// Title color of the row being edited
    pub editing_color: Option<String>,
    /// strftime pattern used by date rows
    pub date_format: Option<String>,
    /// Whether return moves to the next row
    pub return_to_next_row: Option<bool>,
}

/// Colors resolved from a [`FormerConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub disabled: Color,
    pub editing: Option<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            disabled: Color::DarkGray,
            editing: Some(Color::Cyan),
        }
    }
}

impl FormerConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "former", "former-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config dir, defaults if absent
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FormerConfig = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to the user config dir
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve configured colors, falling back to the defaults
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let defaults = Palette::default();
        let disabled = match &self.disabled_color {
            Some(value) => parse_color("disabled_color", value)?,
            None => defaults.disabled,
        };
        let editing = match self.editing_color.as_deref() {
            Some("none") => None,
            Some(value) => Some(parse_color("editing_color", value)?),
            None => defaults.editing,
        };
        Ok(Palette { disabled, editing })
    }

    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    pub fn return_to_next_row(&self) -> bool {
        self.return_to_next_row.unwrap_or(true)
    }

    /// Render `date` with the configured pattern
    pub fn format_date(&self, date: &DateTime<Utc>) -> Result<String, ConfigError> {
        let pattern = self.date_format();
        check_date_format(pattern)?;
        let mut out = String::new();
        write!(out, "{}", date.format(pattern))
            .map_err(|_| ConfigError::InvalidDateFormat(pattern.to_string()))?;
        Ok(out)
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.palette()?;
        check_date_format(self.date_format())
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value).map_err(|_| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn check_date_format(pattern: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidDateFormat(pattern.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("former-tui-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    mod serialization {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_config() {
            let config = FormerConfig::default();
            assert!(config.disabled_color.is_none());
            assert!(config.editing_color.is_none());
            assert!(config.date_format.is_none());
            assert!(config.return_to_next_row.is_none());
            assert_eq!(config.date_format(), DEFAULT_DATE_FORMAT);
            assert!(config.return_to_next_row());
        }

        #[test]
        fn test_deserialize_from_empty_json() {
            let parsed: FormerConfig = serde_json::from_str("{}").unwrap();
            assert_eq!(parsed, FormerConfig::default());
        }

        #[test]
        fn test_deserialize_with_extra_fields() {
            let json = r#"{"date_format": "%d/%m/%Y", "unknown_field": "value"}"#;
            let parsed: FormerConfig = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.date_format.as_deref(), Some("%d/%m/%Y"));
        }
    }

    mod palette {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_palette() {
            let palette = FormerConfig::default().palette().unwrap();
            assert_eq!(palette, Palette::default());
        }

        #[test]
        fn test_named_and_hex_colors() {
            let config = FormerConfig {
                disabled_color: Some("gray".to_string()),
                editing_color: Some("#ff8800".to_string()),
                ..Default::default()
            };
            let palette = config.palette().unwrap();
            assert_eq!(palette.disabled, Color::Gray);
            assert_eq!(palette.editing, Some(Color::Rgb(0xff, 0x88, 0x00)));
        }

        #[test]
        fn test_editing_color_can_be_turned_off() {
            let config = FormerConfig {
                editing_color: Some("none".to_string()),
                ..Default::default()
            };
            assert_eq!(config.palette().unwrap().editing, None);
        }

        #[test]
        fn test_invalid_color_names_the_field() {
            let config = FormerConfig {
                disabled_color: Some("not-a-color".to_string()),
                ..Default::default()
            };
            match config.palette() {
                Err(ConfigError::InvalidColor { field, value }) => {
                    assert_eq!(field, "disabled_color");
                    assert_eq!(value, "not-a-color");
                }
                other => panic!("expected invalid color, got {other:?}"),
            }
        }
    }

    mod dates {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_format_date_with_default_pattern() {
            let date = Utc.with_ymd_and_hms(2015, 8, 24, 9, 30, 0).unwrap();
            let text = FormerConfig::default().format_date(&date).unwrap();
            assert_eq!(text, "2015-08-24");
        }

        #[test]
        fn test_format_date_with_custom_pattern() {
            let config = FormerConfig {
                date_format: Some("%d/%m/%Y %H:%M".to_string()),
                ..Default::default()
            };
            let date = Utc.with_ymd_and_hms(2015, 8, 24, 9, 30, 0).unwrap();
            assert_eq!(config.format_date(&date).unwrap(), "24/08/2015 09:30");
        }

        #[test]
        fn test_invalid_pattern_is_an_error() {
            let config = FormerConfig {
                date_format: Some("%Q".to_string()),
                ..Default::default()
            };
            let date = Utc.with_ymd_and_hms(2015, 8, 24, 0, 0, 0).unwrap();
            assert!(matches!(
                config.format_date(&date),
                Err(ConfigError::InvalidDateFormat(_))
            ));
        }
    }

    mod files {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_config_path_returns_option() {
            let _path = FormerConfig::config_path();
        }

        #[test]
        fn test_load_missing_file_returns_default() {
            let config = FormerConfig::load_from(&scratch_path("config.json")).unwrap();
            assert_eq!(config, FormerConfig::default());
        }

        #[test]
        fn test_save_then_load() {
            let path = scratch_path("config.json");
            let config = FormerConfig {
                editing_color: Some("yellow".to_string()),
                return_to_next_row: Some(false),
                ..Default::default()
            };
            config.save_to(&path).unwrap();

            let loaded = FormerConfig::load_from(&path).unwrap();
            assert_eq!(loaded, config);
            assert!(!loaded.return_to_next_row());

            if let Some(dir) = path.parent() {
                let _ = fs::remove_dir_all(dir);
            }
        }

        #[test]
        fn test_load_rejects_malformed_json() {
            let path = scratch_path("config.json");
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "{ not json").unwrap();

            assert!(matches!(
                FormerConfig::load_from(&path),
                Err(ConfigError::Json(_))
            ));

            let _ = fs::remove_dir_all(path.parent().unwrap());
        }

        #[test]
        fn test_load_rejects_bad_color() {
            let path = scratch_path("config.json");
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, r#"{"disabled_color": "mauve-ish"}"#).unwrap();

            assert!(matches!(
                FormerConfig::load_from(&path),
                Err(ConfigError::InvalidColor { .. })
            ));

            let _ = fs::remove_dir_all(path.parent().unwrap());
        }
    }
}
