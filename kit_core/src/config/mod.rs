//! Generation configuration loading

mod constants;

pub use constants::{
    ConditionConstants, ConditionDelta, GenerationConstants, MapsConstants, SadisticConstants,
};
pub use tables_core::ConfigError;

use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and parse a TOML file, attaching the path to any error
pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        error: e,
        path: Some(path.to_path_buf()),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        error: e,
        path: path.to_path_buf(),
    })
}
