//! Equipment descriptor generation

use kit_types::EquipmentDescriptor;
use rand::Rng;
use tables_core::EquipmentTables;

use crate::armor::expand_coverage;

/// Sample an equipment descriptor from an archetype's equipment tables.
///
/// Archetypes without equipment tables get an all-empty descriptor. Trait
/// modifiers are applied separately.
pub fn generate_equipment<R: Rng>(
    tables: Option<&EquipmentTables>,
    rng: &mut R,
) -> EquipmentDescriptor {
    let Some(tables) = tables else {
        return EquipmentDescriptor::none();
    };

    let mut equipment = EquipmentDescriptor {
        primary_weapon: Some(tables.primary_weapons.sample(rng).clone()),
        secondary_weapon: tables
            .secondary_weapon
            .as_ref()
            .and_then(|t| t.sample(rng).cloned()),
        shield: tables.shield.as_ref().and_then(|t| t.sample(rng).cloned()),
        coverage: tables.coverage.as_ref().and_then(|t| t.sample(rng).copied()),
        poison: tables.poison.as_ref().and_then(|t| t.sample(rng).copied()),
        condition: Some(tables.condition),
        ..EquipmentDescriptor::none()
    };

    if let Some(class) = equipment.coverage {
        expand_coverage(&mut equipment, class, tables.armor_tiers.as_ref(), rng);
    }

    equipment
}
