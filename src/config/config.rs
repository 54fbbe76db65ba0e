use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub table: TableConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for icons; set to false for ASCII-only terminals
    pub use_glyphs: bool,

    /// Icons for action controls (can be overridden)
    pub icons: IconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub view: String,
    pub edit: String,
    pub toggle_on: String,
    pub toggle_off: String,
    pub delete: String,
    pub overflow: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Accessor key reserved for the actions column
    pub actions_key: String,

    /// Number of skeleton rows shown while loading
    pub skeleton_rows: usize,

    /// Placeholder copy for empty result sets
    pub empty_title: String,
    pub empty_description: String,

    /// Page density choices offered to the user
    pub page_sizes: Vec<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            table: TableConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            icons: IconConfig::default(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            view: "👁".to_string(),
            edit: "✎".to_string(),
            toggle_on: "●".to_string(),
            toggle_off: "○".to_string(),
            delete: "✗".to_string(),
            overflow: "⋯".to_string(),
        }
    }
}

impl IconConfig {
    /// ASCII-only variant for terminals without glyph support.
    pub fn simple() -> Self {
        Self {
            view: "v".to_string(),
            edit: "e".to_string(),
            toggle_on: "*".to_string(),
            toggle_off: "o".to_string(),
            delete: "x".to_string(),
            overflow: "+".to_string(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            actions_key: "actions".to_string(),
            skeleton_rows: 3,
            empty_title: "No results".to_string(),
            empty_description: "There is nothing to display yet.".to_string(),
            page_sizes: vec![10, 25, 50],
        }
    }
}

impl Config {
    /// Load config from the default location, creating it on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if !config.display.use_glyphs {
            config.display.icons = IconConfig::simple();
        }

        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Default config file path.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("gridline").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.table.actions_key, "actions");
        assert_eq!(config.table.skeleton_rows, 3);
        assert_eq!(config.table.page_sizes, vec![10, 25, 50]);
        assert!(config.display.use_glyphs);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [table]
            skeleton_rows = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.table.skeleton_rows, 5);
        assert_eq!(config.table.actions_key, "actions");
    }

    #[test]
    fn test_ascii_mode_swaps_icon_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.display.use_glyphs = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.display.icons.view, "v");
        assert_eq!(loaded.display.icons.overflow, "+");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.table.empty_title = "No products".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.table.empty_title, "No products");
    }
}
