use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral quirk; an entity carries up to two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quirk {
    Prepared,
    Reckless,
    Nyctophobic,
    Nyctophilic,
    Glutton,
    Faster,
    Cautious,
    Hoarder,
    Collector,
    Survivalist,
    Handy,
    Alcoholic,
    Cowardly,
    Sadistic,
    Addict,
    Pious,
}

impl Quirk {
    /// Get all quirk variants
    pub fn all() -> &'static [Quirk] {
        &[
            Quirk::Prepared,
            Quirk::Reckless,
            Quirk::Nyctophobic,
            Quirk::Nyctophilic,
            Quirk::Glutton,
            Quirk::Faster,
            Quirk::Cautious,
            Quirk::Hoarder,
            Quirk::Collector,
            Quirk::Survivalist,
            Quirk::Handy,
            Quirk::Alcoholic,
            Quirk::Cowardly,
            Quirk::Sadistic,
            Quirk::Addict,
            Quirk::Pious,
        ]
    }
}

impl fmt::Display for Quirk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Pastime tag; an entity carries at most one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    Hunter,
    Herbalist,
    Alchemist,
    Scholar,
    Jeweler,
    Smith,
    Tailor,
    Cartographer,
    Devout,
    Cook,
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Quirk pairs that can never be carried together
pub const INCOMPATIBLE_QUIRKS: [(Quirk, Quirk); 3] = [
    (Quirk::Prepared, Quirk::Reckless),
    (Quirk::Nyctophobic, Quirk::Nyctophilic),
    (Quirk::Glutton, Quirk::Faster),
];

/// Whether two quirks may be carried by the same entity
pub fn quirks_compatible(a: Quirk, b: Quirk) -> bool {
    if a == b {
        return false;
    }
    !INCOMPATIBLE_QUIRKS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Either kind of personality tag, used as a key by trait modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitTag {
    Quirk(Quirk),
    Interest(Interest),
}

impl fmt::Display for TraitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitTag::Quirk(q) => write!(f, "{}", q),
            TraitTag::Interest(i) => write!(f, "{}", i),
        }
    }
}

/// Generated personality of a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub quirk_a: Option<Quirk>,
    pub quirk_b: Option<Quirk>,
    pub interest: Option<Interest>,
}

impl PersonalityTraits {
    /// No traits at all (unknown archetypes)
    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_quirk(&self, quirk: Quirk) -> bool {
        self.quirk_a == Some(quirk) || self.quirk_b == Some(quirk)
    }

    pub fn has_interest(&self, interest: Interest) -> bool {
        self.interest == Some(interest)
    }

    /// Carried quirks, quirk A first
    pub fn quirks(&self) -> impl Iterator<Item = Quirk> {
        self.quirk_a.into_iter().chain(self.quirk_b)
    }

    /// Every carried tag: quirks first, then the interest
    pub fn tags(&self) -> Vec<TraitTag> {
        self.quirks()
            .map(TraitTag::Quirk)
            .chain(self.interest.map(TraitTag::Interest))
            .collect()
    }

    /// Quirk B never duplicates quirk A nor forms an incompatible pair
    pub fn is_consistent(&self) -> bool {
        match (self.quirk_a, self.quirk_b) {
            (Some(a), Some(b)) => quirks_compatible(a, b),
            _ => true,
        }
    }
}

impl fmt::Display for PersonalityTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = self.tags();
        if tags.is_empty() {
            return write!(f, "(no traits)");
        }
        let names: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_pairs_both_orders() {
        for &(a, b) in &INCOMPATIBLE_QUIRKS {
            assert!(!quirks_compatible(a, b));
            assert!(!quirks_compatible(b, a));
        }
        assert!(quirks_compatible(Quirk::Prepared, Quirk::Glutton));
    }

    #[test]
    fn test_same_quirk_is_incompatible() {
        for &q in Quirk::all() {
            assert!(!quirks_compatible(q, q));
        }
    }

    #[test]
    fn test_tags_order() {
        let traits = PersonalityTraits {
            quirk_a: Some(Quirk::Sadistic),
            quirk_b: None,
            interest: Some(Interest::Hunter),
        };
        assert_eq!(
            traits.tags(),
            vec![
                TraitTag::Quirk(Quirk::Sadistic),
                TraitTag::Interest(Interest::Hunter)
            ]
        );
        assert_eq!(traits.to_string(), "Sadistic, Hunter");
    }

    #[test]
    fn test_trait_tag_parses_either_kind() {
        let quirk: TraitTag = serde_json::from_str("\"survivalist\"").unwrap();
        let interest: TraitTag = serde_json::from_str("\"hunter\"").unwrap();
        assert_eq!(quirk, TraitTag::Quirk(Quirk::Survivalist));
        assert_eq!(interest, TraitTag::Interest(Interest::Hunter));
    }
}
