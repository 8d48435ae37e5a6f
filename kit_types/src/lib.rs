//! kit_types - Shared data model for NPC kit generation
//!
//! Everything here is plain data: archetype keys and spawn context going in,
//! personality traits, equipment descriptors and loot bundles coming out.
//! Outputs serialize with serde for the downstream item materializer.

pub mod equipment;
pub mod loot;
pub mod personality;
pub mod types;

pub use equipment::{
    ArmorSlot, ArmorTier, ConditionRange, CoverageClass, EquipmentDescriptor, PoisonType,
};
pub use loot::{ExtraLoot, LootBundle, LootField, MaterialCounts, PredefinedLoot};
pub use personality::{
    quirks_compatible, Interest, PersonalityTraits, Quirk, TraitTag, INCOMPATIBLE_QUIRKS,
};
pub use types::{
    ArchetypeKey, DungeonType, EnemyInstance, EntityType, LocationDescriptor, Tag, Team,
};
