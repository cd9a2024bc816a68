#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use labor_core::{ExtractionSettings, NotionSettings, Registry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot find home directory")]
    NoHomeDir,

    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config file already exists at: {0}. Please edit it directly.")]
    AlreadyExists(PathBuf),

    #[error("Cannot write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Contents of `config.json`.
///
/// The registry keys (`firma`, `interne_personen`, `bekannte_trainer`,
/// `bekannte_auftraggeber`) sit at the top level so files written for the
/// old dashboard load unchanged.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(flatten)]
    pub registry: Registry,
    #[serde(rename = "extraktion", default)]
    pub extraction: ExtractionSettings,
    #[serde(default)]
    pub notion: NotionSettings,
}

const CONFIG_DIR: &str = "prozess-labor";
const CONFIG_FILE: &str = "config.json";

impl Config {
    /// `~/prozess-labor/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    fn config_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(CONFIG_DIR))
    }

    /// Load the config from `path`, or from the default location.
    ///
    /// A missing file is not an error: the registry comes back empty and the
    /// extractor simply recognizes no known entities.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            warn!(
                "Config file not found at {}, continuing without known entities. Run 'labor init' to create one.",
                path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load an existing config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Loaded config from {}: {} trainers, {} agencies, {} internal people",
            path.display(),
            config.registry.trainers.len(),
            config.registry.agencies.len(),
            config.registry.internal_people.len()
        );
        Ok(config)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Write the template config to `path` (or the default location).
    pub fn create_config(path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }

        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&path, CONFIG_TEMPLATE).map_err(write_err)?;

        Ok(path)
    }
}

/// Starter config. Edit the names, domains and trainers to match your office.
pub const CONFIG_TEMPLATE: &str = r#"{
  "firma": {
    "namen": ["Muster Akademie"],
    "domains": ["muster-akademie.de"],
    "adresse": "Musterstraße 1, 10115 Berlin"
  },
  "interne_personen": [
    {
      "name": "Erika Muster",
      "rolle": "Geschäftsführung",
      "emails": ["erika@muster-akademie.de"]
    }
  ],
  "bekannte_trainer": [
    {
      "name": "Max Mustermann",
      "kurznamen": ["Max"],
      "strasse": "Beispielweg 5",
      "plz": "80331",
      "ort": "München",
      "email": "max@example.com",
      "telefon": "+49 170 1234567"
    }
  ],
  "bekannte_auftraggeber": [
    {
      "name": "Beispiel Seminare AG",
      "kurznamen": ["Beispiel"],
      "domains": ["beispiel-seminare.de"]
    }
  ],
  "extraktion": {
    "rolling_window_days": 30,
    "max_past_years": 2,
    "briefing_lead_days": 3,
    "min_title_len": 5,
    "min_phone_len": 8
  },
  "notion": {
    "status": "Angefragt",
    "select_options": {
      "format": { "Vor Ort": "vor Ort", "Remote": "Remote" },
      "reisekosten": { "inkl. im Tagessatz": "Im Angebot inkludiert" }
    }
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_template_parses() {
        let config = Config::from_json(CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(config.registry.trainers.len(), 1);
        assert_eq!(config.registry.trainers[0].aliases, vec!["Max".to_string()]);
        assert_eq!(config.extraction, ExtractionSettings::default());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_registry_only_file_uses_default_settings() {
        let json = r#"{"firma": {"namen": ["AI-Z"], "domains": ["ai-z.de"]}}"#;
        let config = Config::from_json(json).expect("registry-only config should parse");

        assert_eq!(config.registry.company.domains, vec!["ai-z.de".to_string()]);
        assert_eq!(config.extraction.rolling_window_days, 30);
        assert_eq!(config.notion, NotionSettings::default());
    }
}
