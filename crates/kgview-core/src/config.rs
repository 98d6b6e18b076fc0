//! Viewer configuration.
//!
//! Configuration is a TOML document. Every section is optional; missing
//! sections take the built-in defaults, which reproduce the deployment
//! tables the viewer ships with.
//!
//! ```toml
//! default_color = "#CCCCCC"
//!
//! [source]
//! data = "data.json"
//! base_url = "http://localhost:8000/"
//!
//! [categories."高校"]
//! color = "#AACCFF"
//! display_label = "高校"
//!
//! [relations."毕业于"]
//! display_label = "毕业于"
//! ```
//!
//! Resolution order: an explicit path (which must exist), then
//! `<config dir>/kgview/config.toml` if present, then defaults.

use crate::tables::{CategoryTable, DEFAULT_COLOR, RelationTable};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name used for the platform config directory.
pub const PROJECT_NAME: &str = "kgview";

/// Config file name inside the project config directory.
pub const CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Sections
// ============================================================================

/// Where the dataset comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path or URL of the exported triples. Relative locations are joined
    /// onto `base_url` when it is set.
    pub data: String,
    /// Base URL for relative `data` locations.
    pub base_url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data: "data.json".to_string(),
            base_url: None,
        }
    }
}

/// Force-directed layout hints.
///
/// These are passed through to the render adapter untouched; kgview itself
/// never interprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Physics solver name.
    pub solver: String,
    /// Repulsion between nodes (negative).
    pub gravitational_constant: f64,
    /// Rest length of edges.
    pub spring_length: f64,
    /// Pull toward the center.
    pub central_gravity: f64,
    /// Velocity damping.
    pub damping: f64,
    /// Overlap avoidance factor.
    pub avoid_overlap: f64,
    /// Maximum stabilization iterations before the layout freezes.
    pub stabilization_iterations: u32,
    /// Progress update interval during stabilization.
    pub update_interval: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            solver: "forceAtlas2Based".to_string(),
            gravitational_constant: -100.0,
            spring_length: 250.0,
            central_gravity: 0.005,
            damping: 0.4,
            avoid_overlap: 1.0,
            stabilization_iterations: 1500,
            update_interval: 25,
        }
    }
}

// ============================================================================
// ViewerConfig
// ============================================================================

/// Complete viewer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Color for categories missing from the category table.
    pub default_color: String,
    /// Dataset location.
    pub source: SourceConfig,
    /// Layout hints for the render adapter.
    pub layout: LayoutConfig,
    /// Raw category → display settings.
    pub categories: CategoryTable,
    /// Raw relation type → display settings.
    pub relations: RelationTable,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR.to_string(),
            source: SourceConfig::default(),
            layout: LayoutConfig::default(),
            categories: CategoryTable::default(),
            relations: RelationTable::default(),
        }
    }
}

impl ViewerConfig {
    /// The platform default config file path, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(CONFIG_FILE))
    }

    /// The path that [`load`](Self::load) would read for `explicit`.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit.map(PathBuf::from).or_else(Self::default_config_path)
    }

    /// Loads configuration using the standard resolution order.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(Path::new(path));
        }
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.default_color, "#CCCCCC");
        assert_eq!(config.source.data, "data.json");
        assert!(config.source.base_url.is_none());
        assert_eq!(config.layout.solver, "forceAtlas2Based");
        assert_eq!(config.layout.stabilization_iterations, 1500);
        assert_eq!(config.categories.len(), 6);
        assert_eq!(config.relations.len(), 6);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ViewerConfig::from_toml_str(
            r#"
            [source]
            data = "export/graph.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.data, "export/graph.json");
        assert_eq!(config.default_color, "#CCCCCC");
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.categories, CategoryTable::default());
    }

    #[test]
    fn test_categories_section_replaces_table() {
        let config = ViewerConfig::from_toml_str(
            r##"
            default_color = "gray"

            [categories."高校"]
            color = "#0000FF"
            display_label = "大学"

            [relations."毕业于"]
            display_label = "毕业"
            "##,
        )
        .unwrap();
        assert_eq!(config.categories.len(), 1);
        let resolved = config.categories.resolve("人才", &config.default_color);
        assert_eq!(resolved.color, "gray");
        assert_eq!(
            config.categories.resolve("高校", &config.default_color).display_label,
            "大学"
        );
        assert_eq!(config.relations.resolve("毕业于"), "毕业");
    }

    #[test]
    fn test_invalid_toml() {
        let result = ViewerConfig::from_toml_str("default_color = [");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = ViewerConfig::default();
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = ViewerConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let result = ViewerConfig::load(Some(path.to_str().unwrap()));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = ViewerConfig::resolve_config_path(Some("/etc/kgview.toml"));
        assert_eq!(path, Some(PathBuf::from("/etc/kgview.toml")));
    }
}
