//! Damage and armor types seen by the resolver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weapon damage categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalDamage {
    Edged,
    Blunt,
    Archery,
}

impl PhysicalDamage {
    pub fn all() -> &'static [PhysicalDamage] {
        &[
            PhysicalDamage::Edged,
            PhysicalDamage::Blunt,
            PhysicalDamage::Archery,
        ]
    }
}

/// Spell and effect damage categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementalDamage {
    Fire,
    Frost,
    Shock,
    Poison,
    Magic,
}

impl ElementalDamage {
    pub fn all() -> &'static [ElementalDamage] {
        &[
            ElementalDamage::Fire,
            ElementalDamage::Frost,
            ElementalDamage::Shock,
            ElementalDamage::Poison,
            ElementalDamage::Magic,
        ]
    }
}

/// Where a physical hit landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Head,
    #[default]
    Torso,
    RightArm,
    LeftArm,
    Hands,
    Legs,
    Feet,
}

/// Material properties of the armor covering the struck part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmorProperties {
    #[serde(default)]
    pub fracture: u32,
    #[serde(default)]
    pub shear: u32,
    #[serde(default)]
    pub density: u32,
}

impl ArmorProperties {
    pub fn new(fracture: u32, shear: u32, density: u32) -> Self {
        ArmorProperties {
            fracture,
            shear,
            density,
        }
    }

    pub fn get(&self, property: ArmorProperty) -> u32 {
        match property {
            ArmorProperty::Fracture => self.fracture,
            ArmorProperty::Shear => self.shear,
            ArmorProperty::Density => self.density,
        }
    }
}

/// One of the three armor properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorProperty {
    Fracture,
    Shear,
    Density,
}

impl fmt::Display for ArmorProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmorProperty::Fracture => write!(f, "fracture"),
            ArmorProperty::Shear => write!(f, "shear"),
            ArmorProperty::Density => write!(f, "density"),
        }
    }
}
