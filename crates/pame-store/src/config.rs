use std::fs;
use std::path::Path;

use pame_core::errors::{ErrorInfo, StoreError};
use serde::{Deserialize, Serialize};

/// Category in `static` holding the spectral parameters.
pub const DEFAULT_SPECTRAL_CATEGORY: &str = "spectral_parameters";
/// Parameter inside the spectral category that carries the wavelength axis.
pub const DEFAULT_LAMBDAS_KEY: &str = "lambdas";

/// Lookup names used when deriving the panel's wavelength axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "StoreConfig::default_spectral_category")]
    pub spectral_category: String,
    #[serde(default = "StoreConfig::default_lambdas_key")]
    pub lambdas_key: String,
}

impl StoreConfig {
    fn default_spectral_category() -> String {
        DEFAULT_SPECTRAL_CATEGORY.to_string()
    }

    fn default_lambdas_key() -> String {
        DEFAULT_LAMBDAS_KEY.to_string()
    }

    /// Parses a YAML configuration; absent fields take their defaults.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, StoreError> {
        serde_yaml::from_slice(data)
            .map_err(|err| StoreError::Format(ErrorInfo::new("config-yaml", err.to_string())))
    }

    /// Loads a YAML configuration from disk.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes =
            fs::read(path).map_err(|err| StoreError::io("config-read", path.display(), err))?;
        Self::from_yaml_slice(&bytes)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            spectral_category: Self::default_spectral_category(),
            lambdas_key: Self::default_lambdas_key(),
        }
    }
}
