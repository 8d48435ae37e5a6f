//! Predefined and extra loot generation

use kit_types::{ExtraLoot, LootBundle, LootField, PredefinedLoot};
use rand::Rng;
use tables_core::{Distribution, GoldRange, LootTables, QuantityTable};

use crate::location::LocationContext;

/// Roll gold uniformly from `[low * level, high * ceil(level / 2) + 1)`.
///
/// Returns the lower bound when the range is empty.
pub fn roll_gold<R: Rng>(range: GoldRange, level: u32, rng: &mut R) -> u32 {
    let low = range.base_low.saturating_mul(level);
    let high = range
        .base_high
        .saturating_mul(level / 2 + level % 2)
        .saturating_add(1);
    if low >= high {
        return low;
    }
    rng.gen_range(low..high)
}

/// Gold, material counts and the books/clothing/extras flags
pub fn generate_predefined<R: Rng>(tables: &LootTables, level: u32, rng: &mut R) -> PredefinedLoot {
    let mut loot = LootBundle::empty();

    if let Some(range) = tables.gold {
        loot.predefined.gold = roll_gold(range, level, rng);
    }
    for field in LootField::MATERIALS {
        if let Some(table) = tables.quantity(field) {
            loot.set(field, table.sample(rng));
        }
    }

    let mut flag = |table: &Option<Distribution<bool>>| {
        table.as_ref().map(|d| *d.sample(rng)).unwrap_or(false)
    };
    loot.predefined.books = flag(&tables.books);
    loot.predefined.clothing = flag(&tables.clothing);
    loot.predefined.extras = flag(&tables.extras);

    loot.predefined
}

/// Every extra-loot field, rolled independently.
///
/// Maps fall back to `maps_default` when the archetype has no maps table.
pub fn generate_extra<R: Rng>(
    tables: &LootTables,
    maps_default: &QuantityTable,
    rng: &mut R,
) -> ExtraLoot {
    let mut loot = LootBundle::empty();
    for field in LootField::EXTRAS {
        let table = match tables.quantity(field) {
            Some(table) => table,
            None if field == LootField::Maps => maps_default,
            None => continue,
        };
        loot.set(field, table.sample(rng));
    }
    loot.extra
}

/// Residents keep their food and lights at home
pub fn apply_resident_gate(extra: &mut ExtraLoot, context: LocationContext) {
    if context == LocationContext::Resident {
        extra.food = 0;
        extra.light_sources = 0;
    }
}
