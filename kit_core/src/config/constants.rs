//! Generation constants configuration

use kit_types::{PoisonType, Quirk};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tables_core::{QuantityTable, WeightedOption};

use super::ConfigError;
use crate::location::LocationTaxonomy;

/// Tunable numbers shared by every archetype
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConstants {
    #[serde(default)]
    pub condition: ConditionConstants,
    #[serde(default)]
    pub sadistic: SadisticConstants,
    #[serde(default)]
    pub maps: MapsConstants,
    #[serde(default)]
    pub locations: LocationTaxonomy,
}

impl GenerationConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: GenerationConstants = super::load_toml(path)?;
        constants
            .validate()
            .map_err(|message| ConfigError::Validation {
                message,
                path: path.to_path_buf(),
            })?;
        Ok(constants)
    }

    /// Check the invariants generation relies on
    pub fn validate(&self) -> Result<(), String> {
        let c = &self.condition;
        if c.floor > c.ceiling {
            return Err(format!(
                "condition floor {} is above ceiling {}",
                c.floor, c.ceiling
            ));
        }
        if !self.sadistic.poisons.iter().any(|p| p.weight > 0) {
            return Err("sadistic.poisons needs at least one positive weight".to_string());
        }
        if !(0..=100).contains(&self.maps.chance_in_hundred) {
            return Err(format!(
                "maps.chance_in_hundred {} is outside 0..=100",
                self.maps.chance_in_hundred
            ));
        }
        self.locations.validate()
    }

    /// Condition shift for one quirk, `(0, 0)` when it has none
    pub fn condition_delta(&self, quirk: Quirk) -> (i32, i32) {
        self.condition
            .deltas
            .iter()
            .find(|d| d.quirk == quirk)
            .map(|d| (d.min, d.max))
            .unwrap_or((0, 0))
    }

    /// Table used for archetypes that configure no maps entry
    pub fn default_maps_table(&self) -> QuantityTable {
        QuantityTable::rare(self.maps.chance_in_hundred, self.maps.count)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionConstants {
    /// Lowest condition percent after trait modifiers
    #[serde(default = "default_condition_floor")]
    pub floor: i32,
    /// Highest condition percent after trait modifiers
    #[serde(default = "default_condition_ceiling")]
    pub ceiling: i32,
    #[serde(default = "default_condition_deltas")]
    pub deltas: Vec<ConditionDelta>,
}

impl Default for ConditionConstants {
    fn default() -> Self {
        ConditionConstants {
            floor: default_condition_floor(),
            ceiling: default_condition_ceiling(),
            deltas: default_condition_deltas(),
        }
    }
}

/// How one quirk moves the condition range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDelta {
    pub quirk: Quirk,
    pub min: i32,
    pub max: i32,
}

impl ConditionDelta {
    pub const fn new(quirk: Quirk, min: i32, max: i32) -> Self {
        ConditionDelta { quirk, min, max }
    }
}

fn default_condition_floor() -> i32 {
    1
}
fn default_condition_ceiling() -> i32 {
    95
}
fn default_condition_deltas() -> Vec<ConditionDelta> {
    vec![
        ConditionDelta::new(Quirk::Prepared, 10, 10),
        ConditionDelta::new(Quirk::Cautious, 5, 5),
        ConditionDelta::new(Quirk::Hoarder, 5, 5),
        ConditionDelta::new(Quirk::Collector, 10, 5),
        ConditionDelta::new(Quirk::Survivalist, 5, 10),
        ConditionDelta::new(Quirk::Handy, 15, 15),
        ConditionDelta::new(Quirk::Reckless, -10, -10),
        ConditionDelta::new(Quirk::Alcoholic, -15, -10),
    ]
}

/// Poisons a Sadistic entity picks up when its archetype carries none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SadisticConstants {
    #[serde(default = "default_sadistic_poisons")]
    pub poisons: Vec<WeightedOption<PoisonType>>,
}

impl Default for SadisticConstants {
    fn default() -> Self {
        SadisticConstants {
            poisons: default_sadistic_poisons(),
        }
    }
}

fn default_sadistic_poisons() -> Vec<WeightedOption<PoisonType>> {
    vec![
        WeightedOption::new(PoisonType::NuxVomica, 50),
        WeightedOption::new(PoisonType::Arsenic, 30),
        WeightedOption::new(PoisonType::Moonseed, 20),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConstants {
    #[serde(default = "default_maps_chance")]
    pub chance_in_hundred: i32,
    #[serde(default = "default_maps_count")]
    pub count: u32,
}

impl Default for MapsConstants {
    fn default() -> Self {
        MapsConstants {
            chance_in_hundred: default_maps_chance(),
            count: default_maps_count(),
        }
    }
}

fn default_maps_chance() -> i32 {
    1
}
fn default_maps_count() -> u32 {
    1
}
