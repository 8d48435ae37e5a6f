mod archetype;
mod config;
mod registry;
pub mod sampler;

pub use archetype::{ArchetypeTable, EquipmentTables, GoldRange, LootTables, TraitTables};
pub use config::{ArchetypeFileConfig, CountConfig, OptionalConfig, QuantityEntryConfig};
pub use registry::ArchetypeRegistry;
pub use sampler::{
    pick_one_of, pick_one_of_compact, CountRange, Distribution, OptionalTable, QuantityTable,
    WeightedOption,
};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading archetype configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error drawing from a weighted distribution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// No options, or every weight is zero or below
    #[error("empty distribution")]
    EmptyDistribution,
}
