//! Picker configuration

use anyhow::Result;
use palette_picker_core::{Color, SearchMode, Size, DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Color shown when no initial color is passed on the command line
    #[serde(default)]
    pub default_color: Option<Color>,
    /// PNG used as palette instead of the generated spectrum
    #[serde(default)]
    pub palette_path: Option<PathBuf>,
    /// Size of the palette drawing area
    #[serde(default)]
    pub palette_display: DisplayConfig,
    /// How committed colors are located on the palette
    #[serde(default)]
    pub search: SearchMode,
    /// Dialog window dimensions
    #[serde(default)]
    pub window: WindowConfig,
}

fn default_version() -> u32 {
    1
}

impl PickerConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)?;
        Ok(config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "github.palette_picker", "palette-picker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_color: None,
            palette_path: None,
            palette_display: DisplayConfig::default(),
            search: SearchMode::default(),
            window: WindowConfig::default(),
        }
    }
}

/// Palette drawing area configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub width: i32,
    pub height: i32,
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DISPLAY_WIDTH,
            height: DEFAULT_DISPLAY_HEIGHT,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    /// Allow resizing, which also stretches the palette
    #[serde(default)]
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 370,
            height: 506,
            resizable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = PickerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: PickerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: PickerConfig = serde_json::from_str(r##"{"default_color": "#336699"}"##).unwrap();
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.default_color, Some(Color::new(0x33, 0x66, 0x99)));
        assert_eq!(parsed.palette_display.size(), Size::new(315, 202));
        assert_eq!(parsed.search, SearchMode::Exhaustive);
        assert_eq!(parsed.window, WindowConfig::default());
    }

    #[test]
    fn test_bounded_search_config() {
        let parsed: PickerConfig =
            serde_json::from_str(r#"{"search": {"mode": "bounded", "stride": 4}}"#).unwrap();
        assert_eq!(parsed.search, SearchMode::Bounded { stride: 4 });
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        assert!(serde_json::from_str::<PickerConfig>(r#"{"default_color": "#12"}"#).is_err());
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = std::env::temp_dir().join(format!("palette-picker-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.json");

        let config = PickerConfig {
            default_color: Some(Color::new(1, 2, 3)),
            palette_path: Some(PathBuf::from("/tmp/palette.png")),
            search: SearchMode::Bounded { stride: 2 },
            ..Default::default()
        };
        config.save_to_path(&path).unwrap();
        let loaded = PickerConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
