use kit_types::{ArmorSlot, ArmorTier, EquipmentDescriptor, PersonalityTraits, Quirk};
use rand::Rng;
use tables_core::pick_one_of_compact;

use crate::config::GenerationConstants;

/// Apply quirk effects to a generated descriptor.
///
/// Entities without equipment are left alone. For everybody else the
/// condition range always ends up inside the configured bounds.
pub fn apply_equipment_modifiers<R: Rng>(
    equipment: &mut EquipmentDescriptor,
    traits: &PersonalityTraits,
    constants: &GenerationConstants,
    rng: &mut R,
) {
    let Some(condition) = equipment.condition else {
        return;
    };

    let (min_delta, max_delta) = traits
        .quirks()
        .map(|q| constants.condition_delta(q))
        .fold((0, 0), |(a, b), (c, d)| (a + c, b + d));
    let bounds = &constants.condition;
    let shifted = condition.shifted(min_delta, max_delta, bounds.floor, bounds.ceiling);
    equipment.condition = Some(shifted);

    if traits.has_quirk(Quirk::Cowardly) {
        for slot in ArmorSlot::ALL {
            if equipment.tier(slot).is_some() {
                equipment.set_tier(slot, Some(ArmorTier::Heavy));
            }
        }
    }

    if traits.has_quirk(Quirk::Sadistic) && !equipment.uses_poison() {
        match pick_one_of_compact(&constants.sadistic.poisons, rng) {
            Ok(&poison) => equipment.poison = Some(poison),
            Err(e) => tracing::warn!(error = %e, "sadistic poison table unusable"),
        }
    }
}
