//! Personality trait generation

use kit_types::{quirks_compatible, PersonalityTraits};
use rand::Rng;
use tables_core::TraitTables;

/// Draw two quirks and an interest from an archetype's trait tables.
///
/// Both quirks come from the same distribution. When the second one repeats
/// the first or forms an incompatible pair it is dropped, never re-rolled.
pub fn generate_traits<R: Rng>(tables: &TraitTables, rng: &mut R) -> PersonalityTraits {
    let (quirk_a, mut quirk_b) = match &tables.quirks {
        Some(quirks) => (Some(*quirks.sample(rng)), Some(*quirks.sample(rng))),
        None => (None, None),
    };
    let interest = tables
        .interest
        .as_ref()
        .and_then(|table| table.sample(rng).copied());

    if let (Some(a), Some(b)) = (quirk_a, quirk_b) {
        if !quirks_compatible(a, b) {
            quirk_b = None;
        }
    }

    PersonalityTraits {
        quirk_a,
        quirk_b,
        interest,
    }
}
