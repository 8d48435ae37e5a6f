use crate::types::Tag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body slots an armor piece can occupy, in descriptor order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorSlot {
    Helm,
    RightPauldron,
    LeftPauldron,
    Chest,
    Gloves,
    Legs,
    Boots,
}

impl ArmorSlot {
    pub const COUNT: usize = 7;

    pub const ALL: [ArmorSlot; ArmorSlot::COUNT] = [
        ArmorSlot::Helm,
        ArmorSlot::RightPauldron,
        ArmorSlot::LeftPauldron,
        ArmorSlot::Chest,
        ArmorSlot::Gloves,
        ArmorSlot::Legs,
        ArmorSlot::Boots,
    ];

    /// Position of this slot in `EquipmentDescriptor::armor_slots`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ArmorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmorSlot::Helm => write!(f, "Helm"),
            ArmorSlot::RightPauldron => write!(f, "Right Pauldron"),
            ArmorSlot::LeftPauldron => write!(f, "Left Pauldron"),
            ArmorSlot::Chest => write!(f, "Chest"),
            ArmorSlot::Gloves => write!(f, "Gloves"),
            ArmorSlot::Legs => write!(f, "Legs"),
            ArmorSlot::Boots => write!(f, "Boots"),
        }
    }
}

/// Armor material tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorTier {
    Light,
    Medium,
    Heavy,
}

impl ArmorTier {
    /// Numeric tier used by the item materializer (0, 1, 2)
    pub fn code(&self) -> i8 {
        *self as i8
    }
}

/// Compact code naming which armor slots are populated.
///
/// Known codes are 0..=8; anything else is carried through untouched so newer
/// data keeps loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageClass(pub u8);

impl CoverageClass {
    pub const MAX_KNOWN: u8 = 8;

    pub fn is_known(&self) -> bool {
        self.0 <= Self::MAX_KNOWN
    }
}

/// Poison an entity coats its weapons with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoisonType {
    NuxVomica,
    Arsenic,
    Moonseed,
    Drothweed,
    Somnalius,
    PyrrhicAcid,
    Magebane,
    Thyrwort,
    Indulcet,
    Sursum,
    QuaestoVil,
    Aegrotat,
}

impl fmt::Display for PoisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Item condition range in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRange {
    pub min: i32,
    pub max: i32,
}

impl ConditionRange {
    pub fn new(min: i32, max: i32) -> Self {
        ConditionRange { min, max }
    }

    /// Shift both bounds, keeping them inside `[floor, ceiling]` and ordered.
    ///
    /// Inverted bounds are treated as `[ceiling, floor]`.
    pub fn shifted(&self, min_delta: i32, max_delta: i32, floor: i32, ceiling: i32) -> Self {
        let (lo, hi) = (floor.min(ceiling), floor.max(ceiling));
        let max = (self.max + max_delta).clamp(lo, hi);
        let min = (self.min + min_delta).clamp(lo, hi).min(max);
        ConditionRange { min, max }
    }
}

/// Weapons, armor and poison an entity spawns with
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentDescriptor {
    pub primary_weapon: Option<Tag>,
    pub secondary_weapon: Option<Tag>,
    pub shield: Option<Tag>,
    pub coverage: Option<CoverageClass>,
    pub poison: Option<PoisonType>,
    /// Indexed by `ArmorSlot::index`
    pub armor_slots: [Option<ArmorTier>; ArmorSlot::COUNT],
    /// `None` for entities that carry no equipment
    pub condition: Option<ConditionRange>,
}

impl EquipmentDescriptor {
    /// A descriptor with every field unset
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.primary_weapon.is_none()
            && self.secondary_weapon.is_none()
            && self.shield.is_none()
            && self.coverage.is_none()
            && self.poison.is_none()
            && self.armor_slots.iter().all(Option::is_none)
    }

    pub fn uses_poison(&self) -> bool {
        self.poison.is_some()
    }

    pub fn tier(&self, slot: ArmorSlot) -> Option<ArmorTier> {
        self.armor_slots[slot.index()]
    }

    pub fn set_tier(&mut self, slot: ArmorSlot, tier: Option<ArmorTier>) {
        self.armor_slots[slot.index()] = tier;
    }

    /// Slots that received an armor piece
    pub fn populated_slots(&self) -> impl Iterator<Item = (ArmorSlot, ArmorTier)> + '_ {
        ArmorSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.tier(slot).map(|tier| (slot, tier)))
    }

    /// Slot tiers in numeric form, -1 for an empty slot
    pub fn armor_codes(&self) -> [i8; ArmorSlot::COUNT] {
        let mut codes = [-1; ArmorSlot::COUNT];
        for (code, tier) in codes.iter_mut().zip(self.armor_slots.iter()) {
            if let Some(tier) = tier {
                *code = tier.code();
            }
        }
        codes
    }

    /// Export descriptor to markdown format
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("### Equipment\n");
        if self.is_empty() {
            md.push_str("- (none)\n");
            return md;
        }
        if let Some(ref weapon) = self.primary_weapon {
            md.push_str(&format!("- Primary: {}\n", weapon));
        }
        if let Some(ref weapon) = self.secondary_weapon {
            md.push_str(&format!("- Secondary: {}\n", weapon));
        }
        if let Some(ref shield) = self.shield {
            md.push_str(&format!("- Shield: {}\n", shield));
        }
        if let Some(poison) = self.poison {
            md.push_str(&format!("- Poison: {}\n", poison));
        }
        for (slot, tier) in self.populated_slots() {
            md.push_str(&format!("- {}: {:?}\n", slot, tier));
        }
        if let Some(condition) = self.condition {
            md.push_str(&format!(
                "*Condition: {}-{}%*\n",
                condition.min, condition.max
            ));
        }
        md
    }
}

impl fmt::Display for EquipmentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ Equipment ══")?;
        if self.is_empty() {
            return write!(f, "  (none)");
        }

        if let Some(ref weapon) = self.primary_weapon {
            writeln!(f, "  Primary: {}", weapon)?;
        }
        if let Some(ref weapon) = self.secondary_weapon {
            writeln!(f, "  Secondary: {}", weapon)?;
        }
        if let Some(ref shield) = self.shield {
            writeln!(f, "  Shield: {}", shield)?;
        }
        if let Some(poison) = self.poison {
            writeln!(f, "  Poison: {}", poison)?;
        }

        let armor: Vec<_> = self.populated_slots().collect();
        if !armor.is_empty() {
            writeln!(f)?;
            writeln!(f, "Armor")?;
            for (slot, tier) in armor {
                writeln!(f, "  {}: {:?}", slot, tier)?;
            }
        }

        if let Some(condition) = self.condition {
            writeln!(f)?;
            write!(f, "Condition: {}-{}%", condition.min, condition.max)?;
        }
        Ok(())
    }
}
