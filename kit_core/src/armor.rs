//! Coverage class expansion into per-slot armor tiers

use kit_types::{ArmorSlot, ArmorTier, CoverageClass, EquipmentDescriptor};
use rand::Rng;
use tables_core::Distribution;

use ArmorSlot::*;

const FULL: &[ArmorSlot] = &ArmorSlot::ALL;
const UPPER_BODY: &[ArmorSlot] = &[Helm, RightPauldron, LeftPauldron, Chest, Legs];
const TRAVELER: &[ArmorSlot] = &[Chest, Legs, Boots];
const BRIGAND: &[ArmorSlot] = &[Chest, Gloves, Legs];
const HELM_AND_CHEST: &[ArmorSlot] = &[Helm, Chest];
const CHEST_ONLY: &[ArmorSlot] = &[Chest];
const SHOULDERS: &[ArmorSlot] = &[RightPauldron, LeftPauldron, Chest, Gloves];
const LOWER_BODY: &[ArmorSlot] = &[Legs, Boots];
const HELM_ONLY: &[ArmorSlot] = &[Helm];

/// Slots populated by a coverage class; unknown codes populate nothing
pub fn slots_for_class(class: CoverageClass) -> &'static [ArmorSlot] {
    match class.0 {
        0 => FULL,
        1 => UPPER_BODY,
        2 => TRAVELER,
        3 => BRIGAND,
        4 => HELM_AND_CHEST,
        5 => CHEST_ONLY,
        6 => SHOULDERS,
        7 => LOWER_BODY,
        8 => HELM_ONLY,
        _ => &[],
    }
}

/// Give every slot of `class` an independently rolled tier.
///
/// Without a tier table the slots stay empty.
pub fn expand_coverage<R: Rng>(
    equipment: &mut EquipmentDescriptor,
    class: CoverageClass,
    tiers: Option<&Distribution<ArmorTier>>,
    rng: &mut R,
) {
    let slots = slots_for_class(class);
    if slots.is_empty() {
        tracing::debug!(code = class.0, "unknown coverage class, no armor assigned");
        return;
    }
    let Some(tiers) = tiers else {
        return;
    };
    for &slot in slots {
        equipment.set_tier(slot, Some(*tiers.sample(rng)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tables_core::WeightedOption;

    fn tiers() -> Distribution<ArmorTier> {
        Distribution::new(vec![
            WeightedOption::new(ArmorTier::Light, 1),
            WeightedOption::new(ArmorTier::Medium, 1),
            WeightedOption::new(ArmorTier::Heavy, 1),
        ])
        .unwrap()
    }

    #[test]
    fn test_each_class_populates_exactly_its_slots() {
        let tiers = tiers();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for code in 0..=CoverageClass::MAX_KNOWN {
            let class = CoverageClass(code);
            let mut equipment = EquipmentDescriptor::none();
            expand_coverage(&mut equipment, class, Some(&tiers), &mut rng);

            let expected = slots_for_class(class);
            for slot in ArmorSlot::ALL {
                let populated = equipment.tier(slot).is_some();
                assert_eq!(populated, expected.contains(&slot), "class {} {:?}", code, slot);
            }
            for (slot, code) in ArmorSlot::ALL.iter().zip(equipment.armor_codes()) {
                if !expected.contains(slot) {
                    assert_eq!(code, -1);
                }
            }
        }
    }

    #[test]
    fn test_documented_subsets() {
        assert_eq!(slots_for_class(CoverageClass(0)).len(), 7);
        assert_eq!(slots_for_class(CoverageClass(3)), &[Chest, Gloves, Legs]);
        assert_eq!(slots_for_class(CoverageClass(8)), &[Helm]);
    }

    #[test]
    fn test_unknown_class_is_noop() {
        let mut equipment = EquipmentDescriptor::none();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        expand_coverage(&mut equipment, CoverageClass(9), Some(&tiers()), &mut rng);
        expand_coverage(&mut equipment, CoverageClass(200), Some(&tiers()), &mut rng);
        assert_eq!(equipment.armor_codes(), [-1; 7]);
    }

    #[test]
    fn test_no_tier_table_leaves_slots_empty() {
        let mut equipment = EquipmentDescriptor::none();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        expand_coverage(&mut equipment, CoverageClass(0), None, &mut rng);
        assert_eq!(equipment.populated_slots().count(), 0);
    }

    #[test]
    fn test_fixed_tier_fills_every_slot() {
        let heavy = Distribution::fixed(ArmorTier::Heavy);
        let mut equipment = EquipmentDescriptor::none();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        expand_coverage(&mut equipment, CoverageClass(0), Some(&heavy), &mut rng);
        assert_eq!(equipment.armor_codes(), [2; 7]);
    }
}
