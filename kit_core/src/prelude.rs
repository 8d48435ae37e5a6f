//! Prelude module for convenient imports
//!
//! ```rust
//! use kit_core::prelude::*;
//! ```

// Generation
pub use crate::generator::{SpawnGenerator, SpawnKit};
pub use crate::location::LocationContext;

// Config
pub use crate::config::{ConfigError, GenerationConstants};
pub use crate::modifiers::LootModifierTable;

// Re-exports from kit_types
pub use kit_types::{
    ArchetypeKey, DungeonType, EnemyInstance, EquipmentDescriptor, LocationDescriptor,
    LootBundle, PersonalityTraits, Team,
};

// Re-exports from tables_core
pub use tables_core::ArchetypeRegistry;
