//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::selection::SelectionWeights;

/// Relata configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selection: SelectionConfig,
    pub history: HistoryConfig,
    pub storage: StorageConfig,
}

/// Coefficients of the concept eligibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub base: f64,
    pub priority_weight: f64,
    pub confidence_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Steer selection away from recently defined concepts
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Snapshot file name, relative paths resolve against the config directory
    pub snapshot_file: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        let weights = SelectionWeights::default();
        Self {
            base: weights.base,
            priority_weight: weights.priority_weight,
            confidence_weight: weights.confidence_weight,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_file: "notes.json".to_string(),
        }
    }
}

impl SelectionConfig {
    pub fn weights(&self) -> SelectionWeights {
        SelectionWeights {
            base: self.base,
            priority_weight: self.priority_weight,
            confidence_weight: self.confidence_weight,
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("selection.base", self.base),
            ("selection.priority_weight", self.priority_weight),
            ("selection.confidence_weight", self.confidence_weight),
        ] {
            if !value.is_finite() {
                return Err(anyhow!("{} must be a finite number", name));
            }
        }
        // Negative weights would invert the ranking order
        if self.priority_weight < 0.0 {
            return Err(anyhow!("selection.priority_weight must be non-negative"));
        }
        if self.confidence_weight < 0.0 {
            return Err(anyhow!("selection.confidence_weight must be non-negative"));
        }
        Ok(())
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("RELATA_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("relata")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolved location of the snapshot file
    pub fn snapshot_path(&self) -> anyhow::Result<PathBuf> {
        let file = Path::new(&self.storage.snapshot_file);
        if file.is_absolute() {
            Ok(file.to_path_buf())
        } else {
            Ok(Self::config_dir()?.join(file))
        }
    }

    /// Load configuration from file, or use defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            // Return default config without creating file
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.selection.validate()?;
        if self.storage.snapshot_file.trim().is_empty() {
            return Err(anyhow!("storage.snapshot_file must not be empty"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "selection.base" => Ok(self.selection.base.to_string()),
            "selection.priority_weight" => Ok(self.selection.priority_weight.to_string()),
            "selection.confidence_weight" => Ok(self.selection.confidence_weight.to_string()),
            "history.enabled" => Ok(self.history.enabled.to_string()),
            "storage.snapshot_file" => Ok(self.storage.snapshot_file.clone()),
            _ => Err(anyhow!("Unknown configuration key: {}", key)),
        }
    }

    /// Set a configuration value by key
    ///
    /// The change is only kept if the resulting configuration is valid.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut updated = self.clone();
        match key {
            "selection.base" => {
                updated.selection.base = parse_number(key, value)?;
            }
            "selection.priority_weight" => {
                updated.selection.priority_weight = parse_number(key, value)?;
            }
            "selection.confidence_weight" => {
                updated.selection.confidence_weight = parse_number(key, value)?;
            }
            "history.enabled" => {
                updated.history.enabled = value
                    .parse()
                    .with_context(|| format!("Invalid history.enabled value: {}", value))?;
            }
            "storage.snapshot_file" => {
                updated.storage.snapshot_file = value.to_string();
            }
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        [
            "selection.base",
            "selection.priority_weight",
            "selection.confidence_weight",
            "history.enabled",
            "storage.snapshot_file",
        ]
        .into_iter()
        .map(|key| Ok((key.to_string(), self.get(key)?)))
        .collect()
    }
}

fn parse_number(key: &str, value: &str) -> anyhow::Result<f64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} value: {}", key, value))
}
