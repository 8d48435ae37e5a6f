//! Species resistance table and per-hit resolution

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::species::SpeciesResistance;
use crate::types::{ArmorProperties, BodyPart, ElementalDamage, PhysicalDamage};
use crate::ConfigError;

/// TOML layout: one `[species.<id>]` table per species
#[derive(Debug, Deserialize)]
struct ResistanceFileConfig {
    #[serde(default)]
    species: HashMap<String, SpeciesResistance>,
}

/// Resistance records keyed by species id, read-only after load
#[derive(Debug, Clone, Default)]
pub struct ResistanceTable {
    species: HashMap<String, SpeciesResistance>,
}

impl ResistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a resistance table from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: path.to_path_buf(),
        })?;
        let table = Self::parse(&content, path.to_path_buf())?;
        tracing::info!(
            species = table.len(),
            path = %path.display(),
            "loaded resistance table"
        );
        Ok(table)
    }

    /// Parse a resistance table from TOML text
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, PathBuf::from("<inline>"))
    }

    fn parse(content: &str, origin: PathBuf) -> Result<Self, ConfigError> {
        let config: ResistanceFileConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse {
                error: e,
                path: origin.clone(),
            })?;

        let mut table = Self::new();
        for (id, record) in config.species {
            if let Err(message) = record.validate() {
                return Err(ConfigError::InvalidSpecies {
                    species: id,
                    message,
                    path: origin,
                });
            }
            table.insert(id, record);
        }
        Ok(table)
    }

    /// Add or replace a species record
    pub fn insert(&mut self, species: impl Into<String>, record: SpeciesResistance) {
        self.species.insert(species.into(), record);
    }

    pub fn get(&self, species: &str) -> Option<&SpeciesResistance> {
        self.species.get(species)
    }

    pub fn contains(&self, species: &str) -> bool {
        self.species.contains_key(species)
    }

    pub fn species_ids(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Multiplier for a physical hit on `species`.
    ///
    /// Part overrides replace the base value. For hardened species the result
    /// is capped at 1.0 when the hit was shield-blocked or the armor property
    /// matching `damage` reaches the threshold.
    pub fn physical(
        &self,
        species: &str,
        damage: PhysicalDamage,
        part: BodyPart,
        shield_blocked: bool,
        armor: Option<&ArmorProperties>,
    ) -> f64 {
        let Some(record) = self.get(species) else {
            tracing::trace!(species, "no resistance record, baseline multiplier");
            return 1.0;
        };

        let multiplier = record.base_physical(damage, part);
        match record.hardened {
            Some(rule) => {
                let armored = armor
                    .map(|a| a.get(rule.property_for(damage)) >= rule.threshold)
                    .unwrap_or(false);
                if shield_blocked || armored {
                    multiplier.min(1.0)
                } else {
                    multiplier
                }
            }
            None => multiplier,
        }
    }

    /// Multiplier for an elemental hit on `species`.
    ///
    /// Whether the hit struck a single body part is accepted for callers that
    /// know it; no record reads it yet.
    pub fn elemental(&self, species: &str, damage: ElementalDamage, _single_part_hit: bool) -> f64 {
        match self.get(species) {
            Some(record) => record.elemental.get(damage),
            None => {
                tracing::trace!(species, "no resistance record, baseline multiplier");
                1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{HardenedRule, PhysicalMultipliers};

    const TABLE: &str = r#"
[species.skeletal_warrior]
physical = { edged = 2.0, blunt = 1.5, archery = 0.65 }
elemental = { frost = 0.65, poison = 0.0 }
hardened = {}

[[species.skeletal_warrior.parts]]
part = "head"
damage = "archery"
multiplier = 1.5

[species.ghost]
physical = { edged = 0.32, blunt = 0.32, archery = 0.32 }
elemental = { magic = 2.0 }
"#;

    fn table() -> ResistanceTable {
        ResistanceTable::parse_str(TABLE).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < f64::EPSILON
    }

    fn skeleton(damage: PhysicalDamage, part: BodyPart, blocked: bool) -> f64 {
        table().physical("skeletal_warrior", damage, part, blocked, None)
    }

    #[test]
    fn test_skeletal_warrior_edged() {
        assert!(approx(skeleton(PhysicalDamage::Edged, BodyPart::Torso, false), 2.0));

        let table = table();
        let armor = ArmorProperties::new(300, 0, 0);
        let armored = table.physical(
            "skeletal_warrior",
            PhysicalDamage::Edged,
            BodyPart::Torso,
            false,
            Some(&armor),
        );
        assert!(approx(armored, 1.0));
    }

    #[test]
    fn test_shield_block_caps_weakness() {
        assert!(approx(skeleton(PhysicalDamage::Blunt, BodyPart::Torso, true), 1.0));
    }

    #[test]
    fn test_wrong_property_does_not_cap() {
        let table = table();
        // Edged hits check fracture; high shear does nothing
        let armor = ArmorProperties::new(0, 500, 500);
        let result = table.physical(
            "skeletal_warrior",
            PhysicalDamage::Edged,
            BodyPart::Torso,
            false,
            Some(&armor),
        );
        assert!(approx(result, 2.0));
    }

    #[test]
    fn test_below_threshold_does_not_cap() {
        let table = table();
        let armor = ArmorProperties::new(299, 0, 0);
        let result = table.physical(
            "skeletal_warrior",
            PhysicalDamage::Edged,
            BodyPart::Torso,
            false,
            Some(&armor),
        );
        assert!(approx(result, 2.0));
    }

    #[test]
    fn test_cap_never_raises_resistance() {
        let table = table();
        let armor = ArmorProperties::new(0, 0, 400);
        let result = table.physical(
            "skeletal_warrior",
            PhysicalDamage::Archery,
            BodyPart::Torso,
            true,
            Some(&armor),
        );
        assert!(approx(result, 0.65));
    }

    #[test]
    fn test_part_override_then_hardened() {
        assert!(approx(skeleton(PhysicalDamage::Archery, BodyPart::Head, false), 1.5));
        assert!(approx(skeleton(PhysicalDamage::Archery, BodyPart::Head, true), 1.0));
    }

    #[test]
    fn test_non_hardened_species_ignores_armor() {
        let table = table();
        let armor = ArmorProperties::new(1000, 1000, 1000);
        let result = table.physical(
            "ghost",
            PhysicalDamage::Edged,
            BodyPart::Torso,
            true,
            Some(&armor),
        );
        assert!(approx(result, 0.32));
    }

    #[test]
    fn test_elemental() {
        let table = table();
        let elemental = |damage| table.elemental("skeletal_warrior", damage, false);
        assert!(approx(elemental(ElementalDamage::Poison), 0.0));
        assert!(approx(elemental(ElementalDamage::Frost), 0.65));
        assert!(approx(elemental(ElementalDamage::Fire), 1.0));
        assert!(approx(table.elemental("ghost", ElementalDamage::Magic, false), 2.0));
    }

    #[test]
    fn test_single_part_hit_is_ignored() {
        let table = table();
        for &damage in ElementalDamage::all() {
            assert!(approx(
                table.elemental("ghost", damage, true),
                table.elemental("ghost", damage, false)
            ));
        }
    }

    #[test]
    fn test_unknown_species_is_baseline() {
        let table = table();
        for &damage in PhysicalDamage::all() {
            let result = table.physical("mudcrab", damage, BodyPart::Legs, false, None);
            assert!(approx(result, 1.0));
        }
        for &damage in ElementalDamage::all() {
            assert!(approx(table.elemental("mudcrab", damage, false), 1.0));
        }
    }

    #[test]
    fn test_insert_record() {
        let mut table = ResistanceTable::new();
        table.insert(
            "iron_golem",
            SpeciesResistance {
                physical: PhysicalMultipliers {
                    edged: 0.65,
                    blunt: 1.5,
                    archery: 0.32,
                },
                hardened: Some(HardenedRule::default()),
                ..SpeciesResistance::default()
            },
        );
        assert!(table.contains("iron_golem"));
        assert_eq!(table.species_ids().collect::<Vec<_>>(), vec!["iron_golem"]);
        assert!(approx(
            table.physical("iron_golem", PhysicalDamage::Blunt, BodyPart::Torso, true, None),
            1.0
        ));
    }

    #[test]
    fn test_validation_names_species() {
        let err = ResistanceTable::parse_str(
            r#"
[species.broken]
physical = { edged = -1.0 }
"#,
        )
        .unwrap_err();
        match &err {
            ConfigError::InvalidSpecies { species, path, .. } => {
                assert_eq!(species, "broken");
                assert_eq!(path, &PathBuf::from("<inline>"));
            }
            other => panic!("Expected invalid species, got {:?}", other),
        }
        assert!(err.to_string().contains("species 'broken'"));
    }

    #[test]
    fn test_parse_error() {
        let err = ResistanceTable::parse_str("[species.x]\nphysical = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
