use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform::{AreaId, DEFAULT_AREA_ID, HeadHunter};

/// Configuration for the vacancy manager.
///
/// This struct holds settings that control where vacancies are saved and how
/// the job platform is queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path of the JSON file vacancies are saved in.
    pub store_path: PathBuf,

    /// The area searched when a region name cannot be resolved.
    pub default_area_id: AreaId,

    /// Base URL of the job platform API.
    pub api_url: String,

    /// Number of vacancies requested per search.
    pub per_page: u32,

    /// Whether searches only return vacancies that state a salary.
    pub only_with_salary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_area_id: DEFAULT_AREA_ID,
            api_url: default_api_url(),
            per_page: default_per_page(),
            only_with_salary: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, falling back to the defaults if the file is
    /// missing or invalid.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Using default configuration: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data").join("vacancies.json")
}

fn default_api_url() -> String {
    HeadHunter::DEFAULT_URL.to_string()
}

const fn default_per_page() -> u32 {
    100
}

const fn default_area_id() -> AreaId {
    DEFAULT_AREA_ID
}

const fn default_only_with_salary() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_store_path")]
        store_path: PathBuf,

        #[serde(default = "default_area_id")]
        default_area_id: AreaId,

        #[serde(default = "default_api_url")]
        api_url: String,

        #[serde(default = "default_per_page")]
        per_page: u32,

        #[serde(default = "default_only_with_salary")]
        only_with_salary: bool,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                store_path,
                default_area_id,
                api_url,
                per_page,
                only_with_salary,
            } => Self {
                store_path,
                default_area_id,
                api_url,
                per_page,
                only_with_salary,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            store_path: config.store_path,
            default_area_id: config.default_area_id,
            api_url: config.api_url,
            per_page: config.per_page,
            only_with_salary: config.only_with_salary,
        }
    }
}
