//! kit_core - Spawn kit generation for non-player entities
//!
//! This library provides:
//! - Personality traits: two quirks and an interest per entity
//! - Equipment: weapons, shield, poison and per-slot armor tiers
//! - Loot: predefined (gold, materials, flags) and extra quantities
//! - Location context: resident, raider or unclassified
//! - Trait modifiers: personality rescales equipment and loot
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kit_core::prelude::*;
//! use std::path::Path;
//!
//! let generator = SpawnGenerator::load(Path::new("config/")).unwrap();
//! let enemy = EnemyInstance::new(ArchetypeKey::monster(3), 7, Team::Undead);
//! let location = LocationDescriptor::dungeon(DungeonType::Crypt);
//!
//! // Same seed, same kit
//! let kit = generator.generate(&enemy, &location, 12345);
//! println!("{}", kit);
//! ```

pub mod armor;
pub mod config;
pub mod equipment;
pub mod generator;
pub mod location;
pub mod loot;
pub mod modifiers;
pub mod personality;
pub mod prelude;

// Core API - what most users need
pub use generator::{SpawnGenerator, SpawnKit};
pub use location::{classify, LocationContext, LocationTaxonomy};

// Configuration
pub use config::{ConfigError, GenerationConstants};
pub use modifiers::{LootModifierTable, LootRule};

// Individual generators, for callers composing their own pipeline
pub use armor::{expand_coverage, slots_for_class};
pub use equipment::generate_equipment;
pub use loot::{apply_resident_gate, generate_extra, generate_predefined, roll_gold};
pub use modifiers::apply_equipment_modifiers;
pub use personality::generate_traits;
