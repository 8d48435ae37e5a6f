use kit_types::{Interest, LootBundle, LootField, PersonalityTraits, Quirk, TraitTag};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{load_toml, ConfigError};
use crate::location::LocationContext;

/// How a scaled quantity is brought back to a whole count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    #[default]
    Ceil,
    Floor,
}

/// One trait's effect on one loot field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootRule {
    #[serde(rename = "trait")]
    pub tag: TraitTag,
    pub field: LootField,
    pub factor: f64,
    #[serde(default)]
    pub rounding: Rounding,
    /// Replaces a sampled zero instead of scaling it
    #[serde(default)]
    pub floor_if_zero: Option<u32>,
    /// Only applies in this location context
    #[serde(default)]
    pub when: Option<LocationContext>,
}

impl LootRule {
    pub fn new(tag: TraitTag, field: LootField, factor: f64) -> Self {
        LootRule {
            tag,
            field,
            factor,
            rounding: Rounding::Ceil,
            floor_if_zero: None,
            when: None,
        }
    }

    pub fn quirk(quirk: Quirk, field: LootField, factor: f64) -> Self {
        Self::new(TraitTag::Quirk(quirk), field, factor)
    }

    pub fn interest(interest: Interest, field: LootField, factor: f64) -> Self {
        Self::new(TraitTag::Interest(interest), field, factor)
    }

    pub fn floor(mut self) -> Self {
        self.rounding = Rounding::Floor;
        self
    }

    pub fn floor_if_zero(mut self, floor: u32) -> Self {
        self.floor_if_zero = Some(floor);
        self
    }

    pub fn when(mut self, context: LocationContext) -> Self {
        self.when = Some(context);
        self
    }

    fn matches(&self, traits: &PersonalityTraits, context: LocationContext) -> bool {
        let carried = match self.tag {
            TraitTag::Quirk(q) => traits.has_quirk(q),
            TraitTag::Interest(i) => traits.has_interest(i),
        };
        carried && self.when.map_or(true, |when| when == context)
    }

    /// New quantity for a sampled `value`
    pub fn rescale(&self, value: u32) -> u32 {
        if value == 0 {
            if let Some(floor) = self.floor_if_zero {
                return floor;
            }
        }
        let scaled = f64::from(value) * self.factor;
        let rounded = match self.rounding {
            Rounding::Ceil => scaled.ceil(),
            Rounding::Floor => scaled.floor(),
        };
        rounded as u32
    }
}

/// Every trait-to-loot rule, applied in table order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootModifierTable {
    #[serde(default)]
    pub rules: Vec<LootRule>,
}

impl Default for LootModifierTable {
    fn default() -> Self {
        use Interest::*;
        use LootField::*;
        use Quirk::*;

        LootModifierTable {
            rules: vec![
                LootRule::quirk(Prepared, Gold, 1.5),
                LootRule::quirk(Prepared, Potions, 1.5),
                LootRule::quirk(Prepared, Bandages, 2.0),
                LootRule::quirk(Reckless, Potions, 0.5).floor(),
                LootRule::quirk(Nyctophobic, LightSources, 2.0)
                    .floor_if_zero(1)
                    .when(LocationContext::Raider),
                LootRule::quirk(Nyctophilic, LightSources, 0.0),
                LootRule::quirk(Glutton, Food, 2.0).floor_if_zero(1),
                LootRule::quirk(Faster, Food, 0.5).floor(),
                LootRule::quirk(Hoarder, Gold, 2.0),
                LootRule::quirk(Collector, Gems, 2.0).floor_if_zero(1),
                LootRule::quirk(Survivalist, Food, 2.0).floor_if_zero(2),
                LootRule::quirk(Survivalist, Bandages, 2.0).floor_if_zero(1),
                LootRule::quirk(Handy, RepairTools, 2.0).floor_if_zero(1),
                LootRule::quirk(Alcoholic, Drugs, 2.0).floor_if_zero(1),
                LootRule::quirk(Addict, Drugs, 2.5).floor_if_zero(2),
                LootRule::quirk(Pious, ReligiousItems, 2.0).floor_if_zero(1),
                LootRule::interest(Hunter, Food, 2.5),
                LootRule::interest(Hunter, Leather, 2.5),
                LootRule::interest(Hunter, AnimalParts, 2.5),
                LootRule::interest(Herbalist, Herbs, 2.5).floor_if_zero(1),
                LootRule::interest(Smith, Metals, 2.5),
                LootRule::interest(Tailor, Cloth, 2.5),
                LootRule::interest(Cartographer, Maps, 1.0).floor_if_zero(1),
            ],
        }
    }
}

impl LootModifierTable {
    /// Load rules from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let table: LootModifierTable = load_toml(path)?;
        table.validate().map_err(|message| ConfigError::Validation {
            message,
            path: path.to_path_buf(),
        })?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), String> {
        for rule in &self.rules {
            if !rule.factor.is_finite() || rule.factor < 0.0 {
                return Err(format!(
                    "rule {} on {}: factor {} must be finite and non-negative",
                    rule.tag, rule.field, rule.factor
                ));
            }
        }
        Ok(())
    }

    /// Rescale `loot` for the carried traits
    pub fn apply(
        &self,
        loot: &mut LootBundle,
        traits: &PersonalityTraits,
        context: LocationContext,
    ) {
        for rule in self.rules.iter().filter(|r| r.matches(traits, context)) {
            let value = loot.field_mut(rule.field);
            *value = rule.rescale(*value);
        }
    }

    /// Rules keyed by `tag`, in table order
    pub fn rules_for(&self, tag: TraitTag) -> impl Iterator<Item = &LootRule> {
        self.rules.iter().filter(move |r| r.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(quirk: Option<Quirk>, interest: Option<Interest>) -> PersonalityTraits {
        PersonalityTraits {
            quirk_a: quirk,
            quirk_b: None,
            interest,
        }
    }

    #[test]
    fn test_prepared_scales_with_ceil() {
        let mut loot = LootBundle::empty();
        loot.predefined.gold = 15;
        loot.extra.potions = 3;
        loot.extra.bandages = 2;

        LootModifierTable::default().apply(
            &mut loot,
            &traits(Some(Quirk::Prepared), None),
            LocationContext::Unclassified,
        );
        assert_eq!(loot.predefined.gold, 23);
        assert_eq!(loot.extra.potions, 5);
        assert_eq!(loot.extra.bandages, 4);
    }

    #[test]
    fn test_hunter_interest() {
        let mut loot = LootBundle::empty();
        loot.extra.food = 2;
        loot.predefined.materials.leather = 1;

        LootModifierTable::default().apply(
            &mut loot,
            &traits(None, Some(Interest::Hunter)),
            LocationContext::Raider,
        );
        assert_eq!(loot.extra.food, 5);
        assert_eq!(loot.predefined.materials.leather, 3);
    }

    #[test]
    fn test_survivalist_floor_when_zero() {
        let mut loot = LootBundle::empty();
        loot.extra.bandages = 3;

        LootModifierTable::default().apply(
            &mut loot,
            &traits(Some(Quirk::Survivalist), None),
            LocationContext::Raider,
        );
        assert_eq!(loot.extra.food, 2);
        assert_eq!(loot.extra.bandages, 6);
    }

    #[test]
    fn test_location_condition() {
        let table = LootModifierTable::default();
        let nyctophobe = traits(Some(Quirk::Nyctophobic), None);

        let mut raider = LootBundle::empty();
        raider.extra.light_sources = 2;
        table.apply(&mut raider, &nyctophobe, LocationContext::Raider);
        assert_eq!(raider.extra.light_sources, 4);

        let mut outdoors = LootBundle::empty();
        outdoors.extra.light_sources = 2;
        table.apply(&mut outdoors, &nyctophobe, LocationContext::Unclassified);
        assert_eq!(outdoors.extra.light_sources, 2);
    }

    #[test]
    fn test_no_traits_no_change() {
        let mut loot = LootBundle::empty();
        loot.predefined.gold = 7;
        let before = loot;
        LootModifierTable::default().apply(
            &mut loot,
            &PersonalityTraits::none(),
            LocationContext::Resident,
        );
        assert_eq!(loot, before);
    }

    #[test]
    fn test_rounding() {
        let ceil = LootRule::quirk(Quirk::Faster, LootField::Food, 0.5);
        let floor = ceil.clone().floor();
        assert_eq!(ceil.rescale(3), 2);
        assert_eq!(floor.rescale(3), 1);
        assert_eq!(floor.rescale(0), 0);
    }

    #[test]
    fn test_parse_rules() {
        let table: LootModifierTable = toml::from_str(
            r#"
[[rules]]
trait = "glutton"
field = "food"
factor = 3.0
floor_if_zero = 2

[[rules]]
trait = "jeweler"
field = "gems"
factor = 1.5
rounding = "floor"
when = "resident"
"#,
        )
        .unwrap();
        assert!(table.validate().is_ok());
        assert_eq!(table.rules[0].tag, TraitTag::Quirk(Quirk::Glutton));
        assert_eq!(table.rules[0].floor_if_zero, Some(2));
        assert_eq!(table.rules[1].tag, TraitTag::Interest(Interest::Jeweler));
        assert_eq!(table.rules[1].rounding, Rounding::Floor);
        assert_eq!(table.rules[1].when, Some(LocationContext::Resident));
        assert_eq!(table.rules_for(TraitTag::Quirk(Quirk::Glutton)).count(), 1);
    }

    #[test]
    fn test_negative_factor_rejected() {
        let table = LootModifierTable {
            rules: vec![LootRule::quirk(Quirk::Hoarder, LootField::Gold, -1.0)],
        };
        assert!(table.validate().unwrap_err().contains("non-negative"));
    }
}
