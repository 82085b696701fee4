use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{
    fs::{read_to_string, write},
    path::PathBuf,
};

use parking_lot::RwLock;

use crate::{error::NoteGraphError, filter::FilterConfig};

pub const DEFAULT_NODE_FONT_SIZE: u32 = 20;
pub const DEFAULT_NODE_DISTANCE: u32 = 100;
pub const DEFAULT_MAX_NOTES: usize = 700;
/// Zero is the sentinel for an unbounded separation degree.
pub const DEFAULT_MAX_DEGREE: usize = 0;

/// All recognized graph options with their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Maximum number of link hops from the current note. Zero disables the
    /// bound.
    pub max_degree: usize,
    /// Maximum number of nodes shown in the graph.
    pub max_nodes: usize,
    pub filter: FilterConfig,
    /// Follow incoming links as well as outgoing ones during traversal.
    pub include_backlinks: bool,
    /// Font size for node labels.
    pub node_font_size: u32,
    /// Visual distance between nodes, stored as a percentage.
    pub node_distance: u32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        GraphSettings {
            max_degree: DEFAULT_MAX_DEGREE,
            max_nodes: DEFAULT_MAX_NOTES,
            filter: FilterConfig::default(),
            include_backlinks: false,
            node_font_size: DEFAULT_NODE_FONT_SIZE,
            node_distance: DEFAULT_NODE_DISTANCE,
        }
    }
}

impl GraphSettings {
    /// The stored percentage applied as a fraction.
    pub fn node_distance_ratio(&self) -> f64 {
        f64::from(self.node_distance) / 100.0
    }
}

pub trait SettingsProvider: Send + Sync {
    fn get_settings(&self) -> Result<GraphSettings, NoteGraphError>;
    fn set_settings(&self, settings: GraphSettings) -> Result<(), NoteGraphError>;
}

/// File-backed settings under a `[graph]` table.
#[derive(Debug, Serialize, Deserialize)]
pub struct TomlSettingsProvider {
    path: PathBuf,
}

impl TomlSettingsProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlSettingsProvider { path }
    }
}

impl SettingsProvider for TomlSettingsProvider {
    fn get_settings(&self) -> Result<GraphSettings, NoteGraphError> {
        tracing::debug!("Attempting to read graph settings from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Settings file not found, returning defaults.");
            return Ok(GraphSettings::default());
        }
        let content = read_to_string(&self.path)?;
        let config: BTreeMap<String, GraphSettings> = toml::from_str(&content)?;
        config
            .get("graph")
            .cloned()
            .ok_or_else(|| NoteGraphError::NotFound("graph table not found in config".to_string()))
    }

    fn set_settings(&self, settings: GraphSettings) -> Result<(), NoteGraphError> {
        tracing::debug!("Attempting to write graph settings to: {:?}", &self.path);
        let mut config = BTreeMap::new();
        config.insert("graph".to_string(), settings);
        let toml_string = toml::to_string(&config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}

/// In-memory settings, for embedders that manage persistence themselves and
/// for tests.
#[derive(Debug, Default)]
pub struct MemorySettingsProvider(RwLock<GraphSettings>);

impl MemorySettingsProvider {
    pub fn new(settings: GraphSettings) -> Self {
        MemorySettingsProvider(RwLock::new(settings))
    }
}

impl SettingsProvider for MemorySettingsProvider {
    fn get_settings(&self) -> Result<GraphSettings, NoteGraphError> {
        Ok(self.0.read().clone())
    }

    fn set_settings(&self, settings: GraphSettings) -> Result<(), NoteGraphError> {
        *self.0.write() = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_recognized_options() {
        let settings = GraphSettings::default();
        assert_eq!(settings.max_degree, 0);
        assert_eq!(settings.max_nodes, 700);
        assert_eq!(settings.node_font_size, 20);
        assert!((settings.node_distance_ratio() - 1.0).abs() < f64::EPSILON);
        assert!(settings.filter.cascade_children);
        assert!(!settings.include_backlinks);
    }

    #[test]
    fn toml_provider_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let provider = TomlSettingsProvider::new(dir.path().join("config.toml"));

        // Missing file yields defaults rather than an error.
        assert_eq!(provider.get_settings().unwrap(), GraphSettings::default());

        let mut settings = GraphSettings::default();
        settings.max_degree = 2;
        settings.node_distance = 150;
        settings.filter.names = "Private".to_string();
        provider.set_settings(settings.clone()).unwrap();

        let read_back = provider.get_settings().unwrap();
        assert_eq!(read_back, settings);
        assert!((read_back.node_distance_ratio() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[graph]\nmax_nodes = 50\n").unwrap();
        let provider = TomlSettingsProvider::new(path);
        let settings = provider.get_settings().unwrap();
        assert_eq!(settings.max_nodes, 50);
        assert_eq!(settings.max_degree, DEFAULT_MAX_DEGREE);
        assert_eq!(settings.node_font_size, DEFAULT_NODE_FONT_SIZE);
    }
}
