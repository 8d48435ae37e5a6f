//! Spawn kit generation - traits, equipment and loot for one entity

use kit_types::{
    ArchetypeKey, EnemyInstance, EquipmentDescriptor, LocationDescriptor, LootBundle,
    PersonalityTraits,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tables_core::{ArchetypeRegistry, QuantityTable};

use crate::config::{ConfigError, GenerationConstants};
use crate::equipment::generate_equipment;
use crate::location::LocationContext;
use crate::loot::{apply_resident_gate, generate_extra, generate_predefined};
use crate::modifiers::{apply_equipment_modifiers, LootModifierTable};
use crate::personality::generate_traits;

/// Everything generated for one spawned entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnKit {
    pub archetype: ArchetypeKey,
    pub level: u32,
    pub traits: PersonalityTraits,
    pub equipment: EquipmentDescriptor,
    pub loot: LootBundle,
    pub context: LocationContext,
}

impl SpawnKit {
    /// JSON handed to the item materializer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export kit to markdown format
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("## {} (level {})\n\n", self.archetype, self.level));
        md.push_str(&format!("*Traits: {}*\n", self.traits));
        md.push_str(&format!("*Location: {}*\n\n", self.context));
        md.push_str(&self.equipment.to_markdown());
        md.push('\n');
        md.push_str(&self.loot.to_markdown());
        md
    }
}

impl fmt::Display for SpawnKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (level {}) - {}", self.archetype, self.level, self.context)?;
        writeln!(f, "Traits: {}", self.traits)?;
        writeln!(f, "{}", self.equipment)?;
        write!(f, "{}", self.loot)
    }
}

/// Generates spawn kits from loaded archetype tables
#[derive(Debug)]
pub struct SpawnGenerator {
    registry: ArchetypeRegistry,
    constants: GenerationConstants,
    loot_rules: LootModifierTable,
    maps_default: QuantityTable,
}

impl SpawnGenerator {
    pub fn new(
        registry: ArchetypeRegistry,
        constants: GenerationConstants,
        loot_rules: LootModifierTable,
    ) -> Self {
        let maps_default = constants.default_maps_table();
        SpawnGenerator {
            registry,
            constants,
            loot_rules,
            maps_default,
        }
    }

    /// Load from a config directory.
    ///
    /// Expects `archetypes/` with one TOML file per archetype. `constants.toml`
    /// and `loot_modifiers.toml` are optional and default when absent.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let registry = ArchetypeRegistry::load(&config_dir.join("archetypes"))?;

        let constants_path = config_dir.join("constants.toml");
        let constants = if constants_path.exists() {
            GenerationConstants::load_from_path(&constants_path)?
        } else {
            GenerationConstants::default()
        };

        let rules_path = config_dir.join("loot_modifiers.toml");
        let loot_rules = if rules_path.exists() {
            LootModifierTable::load_from_path(&rules_path)?
        } else {
            LootModifierTable::default()
        };

        tracing::info!(
            archetypes = registry.len(),
            loot_rules = loot_rules.rules.len(),
            "spawn generator ready"
        );
        Ok(Self::new(registry, constants, loot_rules))
    }

    pub fn registry(&self) -> &ArchetypeRegistry {
        &self.registry
    }

    pub fn constants(&self) -> &GenerationConstants {
        &self.constants
    }

    pub fn loot_rules(&self) -> &LootModifierTable {
        &self.loot_rules
    }

    /// Classify `enemy`'s team at `location`
    pub fn classify(
        &self,
        enemy: &EnemyInstance,
        location: &LocationDescriptor,
    ) -> LocationContext {
        self.constants.locations.classify(enemy.team, location)
    }

    /// Generate a kit from a per-entity seed; the same seed gives the same kit
    pub fn generate(
        &self,
        enemy: &EnemyInstance,
        location: &LocationDescriptor,
        seed: u64,
    ) -> SpawnKit {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate_with_rng(enemy, location, &mut rng)
    }

    /// Generate a kit drawing from a caller-supplied RNG
    pub fn generate_with_rng<R: Rng>(
        &self,
        enemy: &EnemyInstance,
        location: &LocationDescriptor,
        rng: &mut R,
    ) -> SpawnKit {
        let context = self.classify(enemy, location);
        let mut kit = SpawnKit {
            archetype: enemy.archetype,
            level: enemy.level,
            traits: PersonalityTraits::none(),
            equipment: EquipmentDescriptor::none(),
            loot: LootBundle::empty(),
            context,
        };

        let Some(table) = self.registry.get(&enemy.archetype) else {
            tracing::warn!(archetype = %enemy.archetype, "unknown archetype, empty kit");
            return kit;
        };

        kit.traits = generate_traits(&table.traits, rng);

        kit.equipment = generate_equipment(table.equipment.as_ref(), rng);
        apply_equipment_modifiers(&mut kit.equipment, &kit.traits, &self.constants, rng);

        kit.loot.predefined = generate_predefined(&table.loot, enemy.level, rng);
        kit.loot.extra = generate_extra(&table.loot, &self.maps_default, rng);
        self.loot_rules.apply(&mut kit.loot, &kit.traits, context);
        apply_resident_gate(&mut kit.loot.extra, context);

        tracing::debug!(
            archetype = %table.name,
            level = enemy.level,
            traits = %kit.traits,
            %context,
            "generated spawn kit"
        );
        kit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_types::{ArmorSlot, DungeonType, Quirk, Team};
    use tempfile::TempDir;

    const GHOUL: &str = r#"
[archetype]
name = "ghoul"
entity_type = "monster"
career_index = 12
uses_equipment = true

[traits]
quirks = [{ value = "glutton", weight = 1 }]

[equipment]
primary_weapons = [{ value = "claws", weight = 1 }]
armor_tiers = [{ value = "light", weight = 1 }]
condition = { min = 20, max = 50 }

[equipment.coverage]
options = [{ value = 0, weight = 1 }]

[loot.gold]
base_low = 1
base_high = 3

[loot.extra]
food = [{ count = [2, 4], weight = 1 }]
light_sources = [{ count = 1, weight = 1 }]
"#;

    const RAT: &str = r#"
[archetype]
name = "giant_rat"
entity_type = "monster"
career_index = 0

[loot.materials]
animal_parts = [{ count = 1, weight = 1 }]
"#;

    fn generator() -> SpawnGenerator {
        let mut registry = ArchetypeRegistry::new();
        registry.insert_str(GHOUL, "ghoul.toml").unwrap();
        registry.insert_str(RAT, "rat.toml").unwrap();
        SpawnGenerator::new(
            registry,
            GenerationConstants::default(),
            LootModifierTable::default(),
        )
    }

    fn ghoul(team: Team) -> EnemyInstance {
        EnemyInstance::new(ArchetypeKey::monster(12), 4, team)
    }

    #[test]
    fn test_unknown_archetype_gets_empty_kit() {
        let generator = generator();
        let enemy = EnemyInstance::new(ArchetypeKey::class_based(40), 9, Team::Criminals);
        let kit = generator.generate(&enemy, &LocationDescriptor::outdoors(), 1);
        assert_eq!(kit.traits, PersonalityTraits::none());
        assert!(kit.equipment.is_empty());
        assert!(kit.loot.is_empty());
    }

    #[test]
    fn test_non_equipment_user() {
        let generator = generator();
        let rat = EnemyInstance::new(ArchetypeKey::monster(0), 2, Team::Vermin);
        let kit = generator.generate(&rat, &LocationDescriptor::outdoors(), 2);
        assert!(kit.equipment.is_empty());
        assert_eq!(kit.equipment.condition, None);
        assert_eq!(kit.loot.predefined.materials.animal_parts, 1);
    }

    #[test]
    fn test_full_kit() {
        let generator = generator();
        let location = LocationDescriptor::dungeon(DungeonType::OrcStronghold);
        let kit = generator.generate(&ghoul(Team::Undead), &location, 3);

        assert_eq!(kit.context, LocationContext::Raider);
        assert_eq!(kit.traits.quirk_a, Some(Quirk::Glutton));
        assert_eq!(kit.traits.quirk_b, None);
        assert_eq!(kit.equipment.primary_weapon.as_deref(), Some("claws"));
        assert_eq!(kit.equipment.populated_slots().count(), ArmorSlot::COUNT);
        // Glutton doubles food: [2, 4] becomes [4, 8]
        assert!((4..=8).contains(&kit.loot.extra.food));
        assert_eq!(kit.loot.extra.light_sources, 1);
        // level 4: [4, 3 * 2 + 1)
        assert!((4..7).contains(&kit.loot.predefined.gold));
    }

    #[test]
    fn test_resident_gate_after_modifiers() {
        let generator = generator();
        let crypt = LocationDescriptor::dungeon(DungeonType::Crypt);
        for seed in 0..50 {
            let kit = generator.generate(&ghoul(Team::Undead), &crypt, seed);
            assert_eq!(kit.context, LocationContext::Resident);
            assert_eq!(kit.loot.extra.food, 0);
            assert_eq!(kit.loot.extra.light_sources, 0);
        }
    }

    #[test]
    fn test_inverted_condition_bounds_do_not_panic() {
        let mut registry = ArchetypeRegistry::new();
        registry.insert_str(GHOUL, "ghoul.toml").unwrap();
        let mut constants = GenerationConstants::default();
        constants.condition.floor = 96;
        let generator = SpawnGenerator::new(registry, constants, LootModifierTable::default());

        let outdoors = LocationDescriptor::outdoors();
        for seed in 0..20 {
            let kit = generator.generate(&ghoul(Team::Undead), &outdoors, seed);
            let condition = kit.equipment.condition.unwrap();
            assert_eq!((condition.min, condition.max), (95, 95));
        }
    }

    #[test]
    fn test_load_rejects_invalid_loot_rules() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("loot_modifiers.toml"),
            r#"
[[rules]]
trait = "hoarder"
field = "gold"
factor = -2.0
"#,
        )
        .unwrap();

        let err = SpawnGenerator::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("loot_modifiers.toml"));
    }

    #[test]
    fn test_load_reads_both_optional_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("constants.toml"), "[maps]\nchance_in_hundred = 5\n")
            .unwrap();
        std::fs::write(
            dir.path().join("loot_modifiers.toml"),
            "[[rules]]\ntrait = \"hoarder\"\nfield = \"gold\"\nfactor = 3.0\n",
        )
        .unwrap();

        let generator = SpawnGenerator::load(dir.path()).unwrap();
        assert_eq!(generator.constants().maps.chance_in_hundred, 5);
        assert_eq!(generator.loot_rules().rules.len(), 1);
        assert!(generator.registry().is_empty());
    }

    #[test]
    fn test_same_seed_same_kit() {
        let generator = generator();
        let location = LocationDescriptor::dungeon(DungeonType::Mine);
        let a = generator.generate(&ghoul(Team::Orcs), &location, 77);
        let b = generator.generate(&ghoul(Team::Orcs), &location, 77);
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_export() {
        let generator = generator();
        let kit = generator.generate(&ghoul(Team::Undead), &LocationDescriptor::outdoors(), 4);
        let json = kit.to_json().unwrap();
        assert!(json.contains("\"context\": \"unclassified\""));
        let back: SpawnKit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kit);
    }

    #[test]
    fn test_markdown_summary() {
        let generator = generator();
        let kit = generator.generate(&ghoul(Team::Undead), &LocationDescriptor::outdoors(), 5);
        let md = kit.to_markdown();
        assert!(md.starts_with("## monster:12 (level 4)"));
        assert!(md.contains("### Equipment"));
        assert!(md.contains("### Loot"));
    }
}
