use crate::error::ScoutError;
use crate::providers::{Location, SearchCategory};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Fully validated run configuration, loaded once per run and read-only
/// after that.
#[derive(Debug, Clone)]
pub struct Config {
    pub criteria: Criteria,
    pub webdriver: WebdriverConfig,
    pub inquiry: InquiryConfig,
    pub store: StoreConfig,
}

/// Search criteria with the location and category strings already mapped to
/// their closed enums.
#[derive(Debug, Clone)]
pub struct Criteria {
    pub locations: Vec<Location>,
    pub search_type: SearchCategory,
    pub max_budget: u32,
    pub min_beds: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebdriverConfig {
    /// Chrome binary to launch; the bundled default when absent.
    pub driver_location: Option<PathBuf>,
    pub session_token: String,
    pub session_signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InquiryConfig {
    pub template: String,
    pub phone: String,
    pub email: String,
    pub fullname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("seen_listings.json")
}

/// On-disk layout before the criteria strings are validated.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    criteria: RawCriteria,
    webdriver: WebdriverConfig,
    inquiry: InquiryConfig,
    #[serde(default)]
    store: StoreConfig,
}

#[derive(Debug, Deserialize)]
struct RawCriteria {
    locations: Vec<String>,
    search_type: String,
    max_budget: u32,
    min_beds: u32,
}

impl Config {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ScoutError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScoutError::Config(format!("failed to read {}: {e}", path.display())))?;
        let raw: RawConfig = toml::from_str(&content)
            .map_err(|e| ScoutError::Config(format!("failed to parse {}: {e}", path.display())))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ScoutError> {
        let locations = raw
            .criteria
            .locations
            .iter()
            .map(|code| Location::from_code(code))
            .collect::<Result<Vec<_>, _>>()?;
        if locations.is_empty() {
            return Err(ScoutError::Config(
                "criteria.locations must name at least one location".to_string(),
            ));
        }
        let search_type = SearchCategory::from_code(&raw.criteria.search_type)?;

        Ok(Self {
            criteria: Criteria {
                locations,
                search_type,
                max_budget: raw.criteria.max_budget,
                min_beds: raw.criteria.min_beds,
            },
            webdriver: raw.webdriver,
            inquiry: raw.inquiry,
            store: raw.store,
        })
    }
}
