use serde::{Deserialize, Serialize};
use std::fmt;

/// A tag naming an externally materialized item (weapon, shield, ...)
pub type Tag = String;

/// Which family of configuration rows an archetype belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Career/class based humanoids (knights, thieves, ...)
    ClassBased,
    /// Monster species
    Monster,
}

/// Key into every per-archetype configuration table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArchetypeKey {
    pub entity_type: EntityType,
    pub career_index: i32,
}

impl ArchetypeKey {
    pub const fn new(entity_type: EntityType, career_index: i32) -> Self {
        ArchetypeKey {
            entity_type,
            career_index,
        }
    }

    pub const fn monster(career_index: i32) -> Self {
        Self::new(EntityType::Monster, career_index)
    }

    pub const fn class_based(career_index: i32) -> Self {
        Self::new(EntityType::ClassBased, career_index)
    }
}

impl fmt::Display for ArchetypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entity_type {
            EntityType::ClassBased => write!(f, "class:{}", self.career_index),
            EntityType::Monster => write!(f, "monster:{}", self.career_index),
        }
    }
}

/// Allegiance of a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    None,
    Vermin,
    Spriggans,
    Centaurs,
    Nymphs,
    Giants,
    Undead,
    Orcs,
    Daedra,
    Dragonlings,
    Harpies,
    Scorpions,
    Spiders,
    KnightsAndMages,
    Criminals,
    Imps,
    Magic,
    Atronachs,
    Beasts,
    Lycanthropes,
}

/// Dungeon-type taxonomy of the current encounter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DungeonType {
    Crypt,
    OrcStronghold,
    HumanStronghold,
    Prison,
    DesecratedTemple,
    Mine,
    NaturalCave,
    Coven,
    VampireHaunt,
    Laboratory,
    HarpyNest,
    RuinedCastle,
    SpiderNest,
    GiantStronghold,
    DragonsDen,
    BarbarianStronghold,
    VolcanicCaves,
    ScorpionNest,
    Cemetery,
    /// Not inside a dungeon (towns, wilderness)
    #[default]
    NoDungeon,
}

impl DungeonType {
    /// Get all dungeon types
    pub fn all() -> &'static [DungeonType] {
        &[
            DungeonType::Crypt,
            DungeonType::OrcStronghold,
            DungeonType::HumanStronghold,
            DungeonType::Prison,
            DungeonType::DesecratedTemple,
            DungeonType::Mine,
            DungeonType::NaturalCave,
            DungeonType::Coven,
            DungeonType::VampireHaunt,
            DungeonType::Laboratory,
            DungeonType::HarpyNest,
            DungeonType::RuinedCastle,
            DungeonType::SpiderNest,
            DungeonType::GiantStronghold,
            DungeonType::DragonsDen,
            DungeonType::BarbarianStronghold,
            DungeonType::VolcanicCaves,
            DungeonType::ScorpionNest,
            DungeonType::Cemetery,
            DungeonType::NoDungeon,
        ]
    }

    pub fn is_dungeon(&self) -> bool {
        *self != DungeonType::NoDungeon
    }
}

/// Where an entity is being spawned, supplied by the world-state collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationDescriptor {
    pub dungeon_type: DungeonType,
}

impl LocationDescriptor {
    pub fn dungeon(dungeon_type: DungeonType) -> Self {
        LocationDescriptor { dungeon_type }
    }

    pub fn outdoors() -> Self {
        Self::default()
    }
}

/// A spawned entity awaiting its kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub level: u32,
    pub archetype: ArchetypeKey,
    #[serde(default)]
    pub team: Team,
}

impl EnemyInstance {
    pub fn new(archetype: ArchetypeKey, level: u32, team: Team) -> Self {
        EnemyInstance {
            level,
            archetype,
            team,
        }
    }
}
