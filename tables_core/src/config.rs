use crate::sampler::WeightedOption;
use kit_types::{ArmorTier, CoverageClass, EntityType, Interest, PoisonType, Quirk, Tag};
use serde::Deserialize;
use std::collections::HashMap;

/// TOML configuration for one archetype file
#[derive(Debug, Deserialize)]
pub struct ArchetypeFileConfig {
    pub archetype: ArchetypeConfig,
    #[serde(default)]
    pub traits: TraitsConfig,
    #[serde(default)]
    pub equipment: Option<EquipmentConfig>,
    #[serde(default)]
    pub loot: LootConfig,
}

/// Identity of the archetype
#[derive(Debug, Deserialize)]
pub struct ArchetypeConfig {
    pub name: String,
    pub entity_type: EntityType,
    pub career_index: i32,
    #[serde(default)]
    pub uses_equipment: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct TraitsConfig {
    #[serde(default)]
    pub quirks: Vec<WeightedOption<Quirk>>,
    #[serde(default)]
    pub interest: Option<OptionalConfig<Interest>>,
}

/// Weighted options plus the weight of drawing nothing
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct OptionalConfig<T> {
    #[serde(default)]
    pub none_weight: i32,
    #[serde(default)]
    pub options: Vec<WeightedOption<T>>,
}

#[derive(Debug, Deserialize)]
pub struct EquipmentConfig {
    #[serde(default)]
    pub primary_weapons: Vec<WeightedOption<Tag>>,
    #[serde(default)]
    pub secondary_weapon: Option<OptionalConfig<Tag>>,
    #[serde(default)]
    pub shield: Option<OptionalConfig<Tag>>,
    #[serde(default)]
    pub coverage: Option<OptionalConfig<CoverageClass>>,
    #[serde(default)]
    pub poison: Option<OptionalConfig<PoisonType>>,
    #[serde(default)]
    pub armor_tiers: Vec<WeightedOption<ArmorTier>>,
    pub condition: ConditionConfig,
}

/// Condition bounds in percent
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ConditionConfig {
    pub min: i32,
    pub max: i32,
}

/// Material and extra tables are keyed by loot field name (`herbs`, `arrows`, ...)
#[derive(Debug, Default, Deserialize)]
pub struct LootConfig {
    #[serde(default)]
    pub gold: Option<GoldConfig>,
    #[serde(default)]
    pub materials: HashMap<String, Vec<QuantityEntryConfig>>,
    #[serde(default)]
    pub flags: FlagsConfig,
    #[serde(default)]
    pub extra: HashMap<String, Vec<QuantityEntryConfig>>,
}

/// Per-level gold multipliers
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GoldConfig {
    pub base_low: u32,
    pub base_high: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlagsConfig {
    #[serde(default)]
    pub books: Vec<WeightedOption<bool>>,
    #[serde(default)]
    pub clothing: Vec<WeightedOption<bool>>,
    #[serde(default)]
    pub extras: Vec<WeightedOption<bool>>,
}

/// One weighted count entry
#[derive(Debug, Clone, Deserialize)]
pub struct QuantityEntryConfig {
    pub count: CountConfig,
    pub weight: i32,
}

/// Count can be a single value or a range [min, max]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CountConfig {
    Single(u32),
    Range([u32; 2]),
}

impl CountConfig {
    pub fn min(&self) -> u32 {
        match self {
            CountConfig::Single(v) => *v,
            CountConfig::Range([min, _]) => *min,
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            CountConfig::Single(v) => *v,
            CountConfig::Range([_, max]) => *max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_archetype() {
        let config: ArchetypeFileConfig = toml::from_str(
            r#"
[archetype]
name = "rat"
entity_type = "monster"
career_index = 0
"#,
        )
        .unwrap();
        assert_eq!(config.archetype.name, "rat");
        assert!(!config.archetype.uses_equipment);
        assert!(config.equipment.is_none());
        assert!(config.loot.gold.is_none());
        assert!(config.traits.quirks.is_empty());
    }

    #[test]
    fn test_parse_optional_sections() {
        let config: ArchetypeFileConfig = toml::from_str(
            r#"
[archetype]
name = "assassin"
entity_type = "class_based"
career_index = 3
uses_equipment = true

[traits.interest]
none_weight = 2
options = [{ value = "alchemist", weight = 1 }]

[equipment]
primary_weapons = [{ value = "dagger", weight = 1 }]
condition = { min = 30, max = 60 }

[equipment.coverage]
options = [{ value = 5, weight = 1 }]

[equipment.poison]
none_weight = 1
"#,
        )
        .unwrap();

        let interest = config.traits.interest.unwrap();
        assert_eq!(interest.none_weight, 2);
        assert_eq!(interest.options[0].value, Interest::Alchemist);

        let equipment = config.equipment.unwrap();
        let coverage = equipment.coverage.unwrap();
        assert_eq!(coverage.none_weight, 0);
        assert_eq!(coverage.options[0].value, CoverageClass(5));
        let poison = equipment.poison.unwrap();
        assert_eq!(poison.none_weight, 1);
        assert!(poison.options.is_empty());
        assert!(equipment.secondary_weapon.is_none());
    }

    #[test]
    fn test_parse_count_forms() {
        let config: LootConfig = toml::from_str(
            r#"
[extra]
arrows = [{ count = 0, weight = 50 }, { count = [5, 12], weight = 50 }]
"#,
        )
        .unwrap();
        let arrows = &config.extra["arrows"];
        assert_eq!(arrows[0].count.max(), 0);
        assert_eq!(arrows[1].count.min(), 5);
        assert_eq!(arrows[1].count.max(), 12);
    }
}
