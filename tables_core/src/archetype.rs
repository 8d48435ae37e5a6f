use crate::config::{
    ArchetypeFileConfig, EquipmentConfig, LootConfig, OptionalConfig, QuantityEntryConfig,
    TraitsConfig,
};
use crate::sampler::{CountRange, Distribution, OptionalTable, QuantityTable, WeightedOption};
use kit_types::{
    ArchetypeKey, ArmorTier, ConditionRange, CoverageClass, Interest, LootField, PoisonType,
    Quirk, Tag,
};
use std::collections::HashMap;

/// Every per-archetype distribution, checked and ready to sample
#[derive(Debug, Clone)]
pub struct ArchetypeTable {
    pub key: ArchetypeKey,
    pub name: String,
    pub traits: TraitTables,
    /// `None` for archetypes that never carry equipment
    pub equipment: Option<EquipmentTables>,
    pub loot: LootTables,
}

#[derive(Debug, Clone, Default)]
pub struct TraitTables {
    pub quirks: Option<Distribution<Quirk>>,
    pub interest: Option<OptionalTable<Interest>>,
}

#[derive(Debug, Clone)]
pub struct EquipmentTables {
    pub primary_weapons: Distribution<Tag>,
    pub secondary_weapon: Option<OptionalTable<Tag>>,
    pub shield: Option<OptionalTable<Tag>>,
    pub coverage: Option<OptionalTable<CoverageClass>>,
    pub poison: Option<OptionalTable<PoisonType>>,
    /// `None` when the archetype has no armor table; slots stay empty
    pub armor_tiers: Option<Distribution<ArmorTier>>,
    pub condition: ConditionRange,
}

/// Gold bounds scale with level: `[low * level, high * ceil(level / 2) + 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoldRange {
    pub base_low: u32,
    pub base_high: u32,
}

#[derive(Debug, Clone, Default)]
pub struct LootTables {
    pub gold: Option<GoldRange>,
    pub quantities: HashMap<LootField, QuantityTable>,
    pub books: Option<Distribution<bool>>,
    pub clothing: Option<Distribution<bool>>,
    pub extras: Option<Distribution<bool>>,
}

impl LootTables {
    pub fn quantity(&self, field: LootField) -> Option<&QuantityTable> {
        self.quantities.get(&field)
    }
}

impl ArchetypeTable {
    /// Parse an archetype table from config, validating every distribution
    pub fn from_config(config: ArchetypeFileConfig) -> Result<Self, String> {
        let key = ArchetypeKey::new(config.archetype.entity_type, config.archetype.career_index);
        let name = config.archetype.name;

        let traits = parse_traits(config.traits)?;

        let equipment = if config.archetype.uses_equipment {
            let equipment = config
                .equipment
                .ok_or("uses_equipment is set but [equipment] is missing")?;
            Some(parse_equipment(equipment)?)
        } else {
            if config.equipment.is_some() {
                tracing::warn!(archetype = %name, "[equipment] ignored, uses_equipment is false");
            }
            None
        };

        let loot = parse_loot(config.loot)?;

        Ok(ArchetypeTable {
            key,
            name,
            traits,
            equipment,
            loot,
        })
    }

    pub fn uses_equipment(&self) -> bool {
        self.equipment.is_some()
    }
}

fn parse_traits(config: TraitsConfig) -> Result<TraitTables, String> {
    let quirks = non_empty(config.quirks, "traits.quirks")?;
    let interest = config
        .interest
        .map(|c| optional(c, "traits.interest"))
        .transpose()?;
    Ok(TraitTables { quirks, interest })
}

fn parse_equipment(config: EquipmentConfig) -> Result<EquipmentTables, String> {
    let primary_weapons = Distribution::new(config.primary_weapons)
        .map_err(|e| format!("equipment.primary_weapons: {}", e))?;

    let condition = ConditionRange::new(config.condition.min, config.condition.max);
    if condition.min > condition.max || condition.min < 0 || condition.max > 100 {
        return Err(format!(
            "equipment.condition [{}, {}] must be ordered within 0..=100",
            condition.min, condition.max
        ));
    }

    let coverage = config
        .coverage
        .map(|c| optional(c, "equipment.coverage"))
        .transpose()?;
    if let Some(unknown) = coverage.as_ref().and_then(first_unknown_coverage) {
        // Unknown codes are kept so newer data still loads; they expand to nothing.
        tracing::warn!(code = unknown.0, "coverage class outside 0..=8");
    }

    Ok(EquipmentTables {
        primary_weapons,
        secondary_weapon: config
            .secondary_weapon
            .map(|c| optional(c, "equipment.secondary_weapon"))
            .transpose()?,
        shield: config
            .shield
            .map(|c| optional(c, "equipment.shield"))
            .transpose()?,
        coverage,
        poison: config
            .poison
            .map(|c| optional(c, "equipment.poison"))
            .transpose()?,
        armor_tiers: non_empty(config.armor_tiers, "equipment.armor_tiers")?,
        condition,
    })
}

fn first_unknown_coverage(table: &OptionalTable<CoverageClass>) -> Option<CoverageClass> {
    table.values().find(|class| !class.is_known()).copied()
}

fn parse_loot(config: LootConfig) -> Result<LootTables, String> {
    let gold = config.gold.map(|g| GoldRange {
        base_low: g.base_low,
        base_high: g.base_high,
    });

    let mut quantities = HashMap::new();
    for (name, entries) in config.materials {
        let field = name.parse::<LootField>()?;
        if !LootField::MATERIALS.contains(&field) {
            return Err(format!("loot.materials.{} is not a material field", name));
        }
        quantities.insert(field, quantity(entries, &name)?);
    }
    for (name, entries) in config.extra {
        let field = name.parse::<LootField>()?;
        if !field.is_extra() {
            return Err(format!("loot.extra.{} is not an extra-loot field", name));
        }
        quantities.insert(field, quantity(entries, &name)?);
    }

    Ok(LootTables {
        gold,
        quantities,
        books: non_empty(config.flags.books, "loot.flags.books")?,
        clothing: non_empty(config.flags.clothing, "loot.flags.clothing")?,
        extras: non_empty(config.flags.extras, "loot.flags.extras")?,
    })
}

/// An absent table is fine; a present one must be sampleable
fn non_empty<T>(
    options: Vec<WeightedOption<T>>,
    what: &str,
) -> Result<Option<Distribution<T>>, String> {
    if options.is_empty() {
        return Ok(None);
    }
    Distribution::new(options)
        .map(Some)
        .map_err(|e| format!("{}: {}", what, e))
}

fn optional<T>(config: OptionalConfig<T>, what: &str) -> Result<OptionalTable<T>, String> {
    OptionalTable::new(config.none_weight, config.options).map_err(|e| format!("{}: {}", what, e))
}

fn quantity(entries: Vec<QuantityEntryConfig>, what: &str) -> Result<QuantityTable, String> {
    let ranges = entries
        .into_iter()
        .map(|e| {
            CountRange::new(e.count.min(), e.count.max())
                .map(|range| WeightedOption::new(range, e.weight))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("{}: {}", what, e))?;
    QuantityTable::new(ranges).map_err(|e| format!("{}: {}", what, e))
}
