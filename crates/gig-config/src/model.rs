use std::path::PathBuf;

use gig_domain::AnalyticsSettings;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Overrides the directory that holds configuration and the default data file.
pub const HOME_ENV_VAR: &str = "GIG_INSIGHTS_HOME";
const DEFAULT_DIR_NAME: &str = ".gig_insights";
const DEFAULT_DATA_FILE: &str = "records.json";

/// User preferences plus the thresholds handed to the analytics services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Records document used when the CLI is not given `--data`.
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_file: None,
            analytics: AnalyticsSettings::default(),
        }
    }
}

impl Config {
    /// `$GIG_INSIGHTS_HOME` when set, otherwise `~/.gig_insights`.
    pub fn default_base_dir() -> Result<PathBuf, ConfigError> {
        if let Some(dir) = std::env::var_os(HOME_ENV_VAR).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_DIR_NAME))
            .ok_or(ConfigError::NoHomeDir(HOME_ENV_VAR))
    }

    pub fn resolve_data_file(&self, base: &std::path::Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| base.join(DEFAULT_DATA_FILE))
    }
}
