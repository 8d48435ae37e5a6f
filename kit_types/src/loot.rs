use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Counts per crafting-material category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaterialCounts {
    pub herbs: u32,
    pub minerals: u32,
    pub metals: u32,
    pub leather: u32,
    pub cloth: u32,
    pub animal_parts: u32,
    pub creature_parts: u32,
}

/// Base loot every archetype may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredefinedLoot {
    pub gold: u32,
    pub materials: MaterialCounts,
    pub books: bool,
    pub clothing: bool,
    pub extras: bool,
}

/// Secondary loot rolled independently per field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtraLoot {
    pub arrows: u32,
    pub potions: u32,
    pub gems: u32,
    pub magic_items: u32,
    pub food: u32,
    pub light_sources: u32,
    pub religious_items: u32,
    pub bandages: u32,
    pub repair_tools: u32,
    pub drugs: u32,
    pub extra_weapons: u32,
    pub maps: u32,
}

/// Every integer quantity in a loot bundle, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootField {
    Gold,
    Herbs,
    Minerals,
    Metals,
    Leather,
    Cloth,
    AnimalParts,
    CreatureParts,
    Arrows,
    Potions,
    Gems,
    MagicItems,
    Food,
    LightSources,
    ReligiousItems,
    Bandages,
    RepairTools,
    Drugs,
    ExtraWeapons,
    Maps,
}

impl LootField {
    /// Fields of the predefined part that are counts
    pub const MATERIALS: [LootField; 7] = [
        LootField::Herbs,
        LootField::Minerals,
        LootField::Metals,
        LootField::Leather,
        LootField::Cloth,
        LootField::AnimalParts,
        LootField::CreatureParts,
    ];

    /// Fields of the extra part
    pub const EXTRAS: [LootField; 12] = [
        LootField::Arrows,
        LootField::Potions,
        LootField::Gems,
        LootField::MagicItems,
        LootField::Food,
        LootField::LightSources,
        LootField::ReligiousItems,
        LootField::Bandages,
        LootField::RepairTools,
        LootField::Drugs,
        LootField::ExtraWeapons,
        LootField::Maps,
    ];

    pub fn is_extra(&self) -> bool {
        Self::EXTRAS.contains(self)
    }
}

impl FromStr for LootField {
    type Err = String;

    /// Parse the snake_case name used in configuration files
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "gold" => LootField::Gold,
            "herbs" => LootField::Herbs,
            "minerals" => LootField::Minerals,
            "metals" => LootField::Metals,
            "leather" => LootField::Leather,
            "cloth" => LootField::Cloth,
            "animal_parts" => LootField::AnimalParts,
            "creature_parts" => LootField::CreatureParts,
            "arrows" => LootField::Arrows,
            "potions" => LootField::Potions,
            "gems" => LootField::Gems,
            "magic_items" => LootField::MagicItems,
            "food" => LootField::Food,
            "light_sources" => LootField::LightSources,
            "religious_items" => LootField::ReligiousItems,
            "bandages" => LootField::Bandages,
            "repair_tools" => LootField::RepairTools,
            "drugs" => LootField::Drugs,
            "extra_weapons" => LootField::ExtraWeapons,
            "maps" => LootField::Maps,
            other => return Err(format!("unknown loot field '{}'", other)),
        };
        Ok(field)
    }
}

impl fmt::Display for LootField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LootField::Gold => "Gold",
            LootField::Herbs => "Herbs",
            LootField::Minerals => "Minerals",
            LootField::Metals => "Metals",
            LootField::Leather => "Leather",
            LootField::Cloth => "Cloth",
            LootField::AnimalParts => "Animal Parts",
            LootField::CreatureParts => "Creature Parts",
            LootField::Arrows => "Arrows",
            LootField::Potions => "Potions",
            LootField::Gems => "Gems",
            LootField::MagicItems => "Magic Items",
            LootField::Food => "Food",
            LootField::LightSources => "Light Sources",
            LootField::ReligiousItems => "Religious Items",
            LootField::Bandages => "Bandages",
            LootField::RepairTools => "Repair Tools",
            LootField::Drugs => "Drugs",
            LootField::ExtraWeapons => "Extra Weapons",
            LootField::Maps => "Maps",
        };
        write!(f, "{}", name)
    }
}

/// Predefined and extra loot for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LootBundle {
    pub predefined: PredefinedLoot,
    pub extra: ExtraLoot,
}

impl LootBundle {
    /// Nothing at all (unknown archetypes)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: LootField) -> u32 {
        let p = &self.predefined;
        let m = &p.materials;
        let e = &self.extra;
        match field {
            LootField::Gold => p.gold,
            LootField::Herbs => m.herbs,
            LootField::Minerals => m.minerals,
            LootField::Metals => m.metals,
            LootField::Leather => m.leather,
            LootField::Cloth => m.cloth,
            LootField::AnimalParts => m.animal_parts,
            LootField::CreatureParts => m.creature_parts,
            LootField::Arrows => e.arrows,
            LootField::Potions => e.potions,
            LootField::Gems => e.gems,
            LootField::MagicItems => e.magic_items,
            LootField::Food => e.food,
            LootField::LightSources => e.light_sources,
            LootField::ReligiousItems => e.religious_items,
            LootField::Bandages => e.bandages,
            LootField::RepairTools => e.repair_tools,
            LootField::Drugs => e.drugs,
            LootField::ExtraWeapons => e.extra_weapons,
            LootField::Maps => e.maps,
        }
    }

    pub fn field_mut(&mut self, field: LootField) -> &mut u32 {
        let p = &mut self.predefined;
        let e = &mut self.extra;
        match field {
            LootField::Gold => &mut p.gold,
            LootField::Herbs => &mut p.materials.herbs,
            LootField::Minerals => &mut p.materials.minerals,
            LootField::Metals => &mut p.materials.metals,
            LootField::Leather => &mut p.materials.leather,
            LootField::Cloth => &mut p.materials.cloth,
            LootField::AnimalParts => &mut p.materials.animal_parts,
            LootField::CreatureParts => &mut p.materials.creature_parts,
            LootField::Arrows => &mut e.arrows,
            LootField::Potions => &mut e.potions,
            LootField::Gems => &mut e.gems,
            LootField::MagicItems => &mut e.magic_items,
            LootField::Food => &mut e.food,
            LootField::LightSources => &mut e.light_sources,
            LootField::ReligiousItems => &mut e.religious_items,
            LootField::Bandages => &mut e.bandages,
            LootField::RepairTools => &mut e.repair_tools,
            LootField::Drugs => &mut e.drugs,
            LootField::ExtraWeapons => &mut e.extra_weapons,
            LootField::Maps => &mut e.maps,
        }
    }

    pub fn set(&mut self, field: LootField, value: u32) {
        *self.field_mut(field) = value;
    }

    /// Non-zero quantities, gold first
    pub fn nonzero_fields(&self) -> Vec<(LootField, u32)> {
        std::iter::once(LootField::Gold)
            .chain(LootField::MATERIALS)
            .chain(LootField::EXTRAS)
            .map(|field| (field, self.get(field)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nonzero_fields().is_empty()
            && !self.predefined.books
            && !self.predefined.clothing
            && !self.predefined.extras
    }

    /// Export loot to markdown format
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("### Loot\n");
        for (field, count) in self.nonzero_fields() {
            md.push_str(&format!("- {}: {}\n", field, count));
        }
        let flags = self.flag_names();
        if !flags.is_empty() {
            md.push_str(&format!("*Also carries: {}*\n", flags.join(", ")));
        }
        md
    }

    fn flag_names(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.predefined.books {
            flags.push("books");
        }
        if self.predefined.clothing {
            flags.push("clothing");
        }
        if self.predefined.extras {
            flags.push("extras");
        }
        flags
    }
}

impl fmt::Display for LootBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ Loot ══")?;
        if self.is_empty() {
            return write!(f, "  (nothing)");
        }
        for (field, count) in self.nonzero_fields() {
            writeln!(f, "  {}: {}", field, count)?;
        }
        let flags = self.flag_names();
        if !flags.is_empty() {
            write!(f, "Also carries: {}", flags.join(", "))?;
        }
        Ok(())
    }
}
