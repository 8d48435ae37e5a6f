//! Per-species resistance records
//!
//! Every multiplier defaults to 1.0, so a record only lists what differs from
//! baseline.

use serde::{Deserialize, Serialize};

use crate::types::{ArmorProperty, BodyPart, ElementalDamage, PhysicalDamage};

/// Damage multipliers for one species
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesResistance {
    #[serde(default)]
    pub physical: PhysicalMultipliers,
    #[serde(default)]
    pub elemental: ElementalMultipliers,
    /// Armor or a shield block can cancel this species' physical weaknesses
    #[serde(default)]
    pub hardened: Option<HardenedRule>,
    /// Per-part physical multipliers, checked before `physical`
    #[serde(default)]
    pub parts: Vec<PartOverride>,
}

impl SpeciesResistance {
    /// Physical multiplier before the hardened rule
    pub fn base_physical(&self, damage: PhysicalDamage, part: BodyPart) -> f64 {
        self.parts
            .iter()
            .find(|o| o.part == part && o.damage == damage)
            .map(|o| o.multiplier)
            .unwrap_or_else(|| self.physical.get(damage))
    }

    /// Every configured multiplier must be a finite, non-negative number
    pub fn validate(&self) -> Result<(), String> {
        let physical = PhysicalDamage::all()
            .iter()
            .map(|&d| (format!("physical.{:?}", d), self.physical.get(d)));
        let elemental = ElementalDamage::all()
            .iter()
            .map(|&d| (format!("elemental.{:?}", d), self.elemental.get(d)));
        let parts = self
            .parts
            .iter()
            .map(|o| (format!("parts.{:?}.{:?}", o.part, o.damage), o.multiplier));

        for (name, value) in physical.chain(elemental).chain(parts) {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} = {} must be finite and non-negative", name, value));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalMultipliers {
    #[serde(default = "baseline")]
    pub edged: f64,
    #[serde(default = "baseline")]
    pub blunt: f64,
    #[serde(default = "baseline")]
    pub archery: f64,
}

impl Default for PhysicalMultipliers {
    fn default() -> Self {
        PhysicalMultipliers {
            edged: 1.0,
            blunt: 1.0,
            archery: 1.0,
        }
    }
}

impl PhysicalMultipliers {
    pub fn get(&self, damage: PhysicalDamage) -> f64 {
        match damage {
            PhysicalDamage::Edged => self.edged,
            PhysicalDamage::Blunt => self.blunt,
            PhysicalDamage::Archery => self.archery,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementalMultipliers {
    #[serde(default = "baseline")]
    pub fire: f64,
    #[serde(default = "baseline")]
    pub frost: f64,
    #[serde(default = "baseline")]
    pub shock: f64,
    #[serde(default = "baseline")]
    pub poison: f64,
    #[serde(default = "baseline")]
    pub magic: f64,
}

impl Default for ElementalMultipliers {
    fn default() -> Self {
        ElementalMultipliers {
            fire: 1.0,
            frost: 1.0,
            shock: 1.0,
            poison: 1.0,
            magic: 1.0,
        }
    }
}

impl ElementalMultipliers {
    pub fn get(&self, damage: ElementalDamage) -> f64 {
        match damage {
            ElementalDamage::Fire => self.fire,
            ElementalDamage::Frost => self.frost,
            ElementalDamage::Shock => self.shock,
            ElementalDamage::Poison => self.poison,
            ElementalDamage::Magic => self.magic,
        }
    }
}

fn baseline() -> f64 {
    1.0
}

/// Caps physical multipliers at 1.0 when the struck armor is hard enough
/// against the incoming damage type, or when the hit was shield-blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardenedRule {
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default = "default_edged_property")]
    pub edged: ArmorProperty,
    #[serde(default = "default_blunt_property")]
    pub blunt: ArmorProperty,
    #[serde(default = "default_archery_property")]
    pub archery: ArmorProperty,
}

impl Default for HardenedRule {
    fn default() -> Self {
        HardenedRule {
            threshold: default_threshold(),
            edged: default_edged_property(),
            blunt: default_blunt_property(),
            archery: default_archery_property(),
        }
    }
}

impl HardenedRule {
    /// Armor property that resists `damage`
    pub fn property_for(&self, damage: PhysicalDamage) -> ArmorProperty {
        match damage {
            PhysicalDamage::Edged => self.edged,
            PhysicalDamage::Blunt => self.blunt,
            PhysicalDamage::Archery => self.archery,
        }
    }
}

fn default_threshold() -> u32 {
    300
}
fn default_edged_property() -> ArmorProperty {
    ArmorProperty::Fracture
}
fn default_blunt_property() -> ArmorProperty {
    ArmorProperty::Shear
}
fn default_archery_property() -> ArmorProperty {
    ArmorProperty::Density
}

/// Multiplier for one damage type striking one body part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartOverride {
    pub part: BodyPart,
    pub damage: PhysicalDamage,
    pub multiplier: f64,
}
