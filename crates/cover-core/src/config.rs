// ABOUTME: Site-wide cover settings.
// ABOUTME: Loads and saves the template registry and tile settings from TOML files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Keyed lookup of named master layouts used to initialize new pages.
///
/// Implementations hand out the persisted JSON text of the template; callers
/// parse their own private copy, so the master is never mutated.
pub trait TemplateRegistry {
    fn layout(&self, name: &str) -> Option<&str>;
}

impl TemplateRegistry for BTreeMap<String, String> {
    fn layout(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

const EMPTY_LAYOUT: &str = "[]";

const LAYOUT_A: &str = r#"[{"type": "row", "children": [{"type": "group", "column-size": 16, "roles": ["Manager"], "children": [{"type": "tile", "tile-type": "collective.cover.basic"}]}]}, {"type": "row", "children": [{"type": "group", "column-size": 8, "roles": ["Manager"], "children": [{"type": "tile", "tile-type": "collective.cover.richtext"}]}, {"type": "group", "column-size": 8, "roles": ["Manager"], "children": [{"type": "tile", "tile-type": "collective.cover.collection"}, {"type": "tile", "tile-type": "collective.cover.richtext"}]}]}]"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverSettings {
    /// Template name to layout JSON
    pub layouts: BTreeMap<String, String>,

    /// Tile types editors may add to a layout
    pub available_tiles: Vec<String>,

    /// Tile type whose text is included in the searchable text
    pub richtext_tile_type: String,
}

impl Default for CoverSettings {
    fn default() -> Self {
        let mut layouts = BTreeMap::new();
        layouts.insert("Empty layout".to_string(), EMPTY_LAYOUT.to_string());
        layouts.insert("Layout A".to_string(), LAYOUT_A.to_string());

        Self {
            layouts,
            available_tiles: vec![
                "collective.cover.basic".to_string(),
                "collective.cover.collection".to_string(),
                "collective.cover.richtext".to_string(),
            ],
            richtext_tile_type: "collective.cover.richtext".to_string(),
        }
    }
}

impl TemplateRegistry for CoverSettings {
    fn layout(&self, name: &str) -> Option<&str> {
        self.layouts.layout(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl CoverSettings {
    /// Get the default settings file path (~/.config/cover/settings.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cover").join("settings.toml"))
    }

    /// Load settings from a path
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from default path, or return default settings if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save settings to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save settings to default path
    pub fn save_to_default(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }

    /// Whether editors may add tiles of this type
    pub fn is_available(&self, tile_type: &str) -> bool {
        self.available_tiles.iter().any(|t| t == tile_type)
    }
}
