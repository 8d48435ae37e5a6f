//! resist_core - Per-species damage multipliers
//!
//! Combat resolution asks for one multiplier per hit:
//! - `ResistanceTable::physical` for edged, blunt and archery hits, with
//!   body-part overrides and the hardened armor/shield cap
//! - `ResistanceTable::elemental` for fire, frost, shock, poison and magic
//!
//! Species without a record take every damage type at 1.0.

pub mod species;
mod table;
pub mod types;

pub use species::{HardenedRule, PartOverride, SpeciesResistance};
pub use table::ResistanceTable;
pub use types::{ArmorProperties, ArmorProperty, BodyPart, ElementalDamage, PhysicalDamage};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading a resistance table
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read resistance table '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("malformed resistance table '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("species '{species}' in '{path}': {message}")]
    InvalidSpecies {
        species: String,
        message: String,
        path: PathBuf,
    },
}
