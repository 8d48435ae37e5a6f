//! Location context - is an entity at home where it spawned?
//!
//! Dungeon types either name the teams native to them, or give every team the
//! same fixed outcome (mines and nests are raided by everybody). Outside a
//! dungeon the context is unclassified.

use kit_types::{DungeonType, LocationDescriptor, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Relationship between an entity's team and the place it spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationContext {
    /// Native to the location
    Resident,
    /// Intruding on the location
    Raider,
    /// Not in a location-typed area
    Unclassified,
}

impl LocationContext {
    /// Numeric form: 0 resident, 1 raider, -1 unclassified
    pub fn code(&self) -> i8 {
        match self {
            LocationContext::Resident => 0,
            LocationContext::Raider => 1,
            LocationContext::Unclassified => -1,
        }
    }
}

impl fmt::Display for LocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationContext::Resident => write!(f, "Resident"),
            LocationContext::Raider => write!(f, "Raider"),
            LocationContext::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// Residency rule for one dungeon type.
///
/// With `fixed` set, every team gets that outcome. Otherwise teams listed in
/// `native` are residents and everybody else is a raider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonRule {
    pub dungeon: DungeonType,
    #[serde(default)]
    pub native: Vec<Team>,
    #[serde(default)]
    pub fixed: Option<LocationContext>,
}

impl DungeonRule {
    fn native(dungeon: DungeonType, teams: &[Team]) -> Self {
        DungeonRule {
            dungeon,
            native: teams.to_vec(),
            fixed: None,
        }
    }

    fn fixed(dungeon: DungeonType, context: LocationContext) -> Self {
        DungeonRule {
            dungeon,
            native: Vec::new(),
            fixed: Some(context),
        }
    }

    fn classify(&self, team: Team) -> LocationContext {
        match self.fixed {
            Some(context) => context,
            None if self.native.contains(&team) => LocationContext::Resident,
            None => LocationContext::Raider,
        }
    }
}

/// Residency rules for every dungeon type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTaxonomy {
    #[serde(default)]
    pub dungeons: Vec<DungeonRule>,
}

impl Default for LocationTaxonomy {
    fn default() -> Self {
        use DungeonType::*;
        use LocationContext::Raider;

        LocationTaxonomy {
            dungeons: vec![
                DungeonRule::native(Crypt, &[Team::Undead]),
                DungeonRule::native(VampireHaunt, &[Team::Undead]),
                DungeonRule::native(Cemetery, &[Team::Undead]),
                DungeonRule::native(OrcStronghold, &[Team::Orcs]),
                DungeonRule::native(DragonsDen, &[Team::Dragonlings]),
                DungeonRule::native(HumanStronghold, &[Team::KnightsAndMages]),
                DungeonRule::native(RuinedCastle, &[Team::KnightsAndMages]),
                DungeonRule::native(Prison, &[Team::Criminals]),
                DungeonRule::native(BarbarianStronghold, &[Team::Criminals]),
                DungeonRule::native(DesecratedTemple, &[Team::Daedra]),
                DungeonRule::native(Coven, &[Team::Daedra]),
                DungeonRule::native(Laboratory, &[Team::Magic, Team::Atronachs]),
                DungeonRule::native(GiantStronghold, &[Team::Giants]),
                DungeonRule::fixed(Mine, Raider),
                DungeonRule::fixed(NaturalCave, Raider),
                DungeonRule::fixed(VolcanicCaves, Raider),
                DungeonRule::fixed(HarpyNest, Raider),
                DungeonRule::fixed(SpiderNest, Raider),
                DungeonRule::fixed(ScorpionNest, Raider),
            ],
        }
    }
}

impl LocationTaxonomy {
    /// Classify `team` at `location`
    pub fn classify(&self, team: Team, location: &LocationDescriptor) -> LocationContext {
        let dungeon = location.dungeon_type;
        if !dungeon.is_dungeon() {
            return LocationContext::Unclassified;
        }

        let context = match self.rule(dungeon) {
            Some(rule) => rule.classify(team),
            None => {
                tracing::warn!(?dungeon, "no residency rule for dungeon type");
                LocationContext::Unclassified
            }
        };
        tracing::trace!(?team, ?dungeon, %context, "classified location");
        context
    }

    pub fn rule(&self, dungeon: DungeonType) -> Option<&DungeonRule> {
        self.dungeons.iter().find(|r| r.dungeon == dungeon)
    }

    /// Each dungeon type at most once, every rule decidable
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for rule in &self.dungeons {
            if !rule.dungeon.is_dungeon() {
                return Err("locations: no_dungeon cannot carry a residency rule".to_string());
            }
            if !seen.insert(rule.dungeon) {
                return Err(format!("locations: {:?} listed twice", rule.dungeon));
            }
            if rule.fixed.is_none() && rule.native.is_empty() {
                return Err(format!(
                    "locations: {:?} needs native teams or a fixed context",
                    rule.dungeon
                ));
            }
        }
        Ok(())
    }
}

fn builtin_taxonomy() -> &'static LocationTaxonomy {
    static BUILTIN: OnceLock<LocationTaxonomy> = OnceLock::new();
    BUILTIN.get_or_init(LocationTaxonomy::default)
}

/// Classify with the built-in taxonomy
pub fn classify(team: Team, location: &LocationDescriptor) -> LocationContext {
    builtin_taxonomy().classify(team, location)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(dungeon: DungeonType) -> LocationDescriptor {
        LocationDescriptor::dungeon(dungeon)
    }

    #[test]
    fn test_undead_contexts() {
        assert_eq!(
            classify(Team::Undead, &at(DungeonType::Crypt)),
            LocationContext::Resident
        );
        assert_eq!(
            classify(Team::Undead, &at(DungeonType::OrcStronghold)),
            LocationContext::Raider
        );
        assert_eq!(
            classify(Team::Undead, &at(DungeonType::NoDungeon)),
            LocationContext::Unclassified
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(classify(Team::Undead, &at(DungeonType::Crypt)).code(), 0);
        assert_eq!(classify(Team::Undead, &at(DungeonType::OrcStronghold)).code(), 1);
        assert_eq!(classify(Team::Undead, &LocationDescriptor::outdoors()).code(), -1);
    }

    #[test]
    fn test_fixed_dungeons_raid_everyone() {
        for team in [Team::Spiders, Team::Orcs, Team::None] {
            assert_eq!(
                classify(team, &at(DungeonType::SpiderNest)),
                LocationContext::Raider
            );
            assert_eq!(classify(team, &at(DungeonType::Mine)), LocationContext::Raider);
        }
    }

    #[test]
    fn test_multiple_native_teams() {
        let lab = at(DungeonType::Laboratory);
        assert_eq!(classify(Team::Magic, &lab), LocationContext::Resident);
        assert_eq!(classify(Team::Atronachs, &lab), LocationContext::Resident);
        assert_eq!(classify(Team::Criminals, &lab), LocationContext::Raider);
    }

    #[test]
    fn test_default_taxonomy_covers_every_dungeon() {
        let taxonomy = LocationTaxonomy::default();
        assert!(taxonomy.validate().is_ok());
        for &dungeon in DungeonType::all().iter().filter(|d| d.is_dungeon()) {
            assert!(taxonomy.rule(dungeon).is_some(), "{:?}", dungeon);
        }
    }

    #[test]
    fn test_builtin_taxonomy_built_once() {
        let first = builtin_taxonomy();
        let second = builtin_taxonomy();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &LocationTaxonomy::default());
    }

    #[test]
    fn test_missing_rule_is_unclassified() {
        let taxonomy = LocationTaxonomy { dungeons: vec![] };
        assert_eq!(
            taxonomy.classify(Team::Undead, &at(DungeonType::Crypt)),
            LocationContext::Unclassified
        );
    }

    #[test]
    fn test_parse_taxonomy() {
        let taxonomy: LocationTaxonomy = toml::from_str(
            r#"
[[dungeons]]
dungeon = "crypt"
native = ["undead", "imps"]

[[dungeons]]
dungeon = "mine"
fixed = "resident"
"#,
        )
        .unwrap();
        assert!(taxonomy.validate().is_ok());
        assert_eq!(
            taxonomy.classify(Team::Imps, &at(DungeonType::Crypt)),
            LocationContext::Resident
        );
        assert_eq!(
            taxonomy.classify(Team::Orcs, &at(DungeonType::Mine)),
            LocationContext::Resident
        );
    }

    #[test]
    fn test_validation_rejects_duplicates() {
        let mut taxonomy = LocationTaxonomy::default();
        taxonomy
            .dungeons
            .push(DungeonRule::fixed(DungeonType::Crypt, LocationContext::Raider));
        assert!(taxonomy.validate().unwrap_err().contains("twice"));
    }
}
