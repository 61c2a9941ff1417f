use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Settings read from `--config`. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftrecConfig {
    pub report: ReportConfig,
}

/// How many rows each wrapped table shows, and the report heading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub locations: usize,
    pub lifters: usize,
    pub glow_ups: usize,
    pub oldest: usize,
    pub kg_added: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Records Wrapped".into(),
            locations: 10,
            lifters: 10,
            glow_ups: 10,
            oldest: 10,
            kg_added: 20,
        }
    }
}

impl LiftrecConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
