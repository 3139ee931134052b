//! Elements and per-entity elemental affinities.

use std::collections::BTreeMap;

/// Damage element carried by every skill and item.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Physical,
    Gun,
    Fire,
    Ice,
    Electric,
    Wind,
    Psychic,
    Nuclear,
    Bless,
    Curse,
    /// Ignores every affinity.
    Almighty,
}

/// How an entity reacts to an element.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Affinity {
    #[default]
    Normal,
    Weak,
    Resist,
    Immune,
    /// Incoming damage heals instead.
    Absorb,
}

impl Affinity {
    /// Whether a hit with this affinity deals damage at all.
    pub fn deals_damage(self) -> bool {
        !matches!(self, Affinity::Immune | Affinity::Absorb)
    }
}

/// Element → affinity mapping owned by a character template.
///
/// Elements that are not listed resolve to [`Affinity::Normal`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AffinityTable {
    entries: BTreeMap<Element, Affinity>,
}

impl AffinityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder helper used by templates and tests.
    pub fn with(mut self, element: Element, affinity: Affinity) -> Self {
        self.set(element, affinity);
        self
    }

    pub fn set(&mut self, element: Element, affinity: Affinity) {
        if affinity == Affinity::Normal {
            self.entries.remove(&element);
        } else {
            self.entries.insert(element, affinity);
        }
    }

    /// Looks up the affinity for an incoming element.
    pub fn get(&self, element: Element) -> Affinity {
        if element == Element::Almighty {
            return Affinity::Normal;
        }
        self.entries.get(&element).copied().unwrap_or_default()
    }

    /// Elements this table marks as Weak.
    pub fn weaknesses(&self) -> impl Iterator<Item = Element> + '_ {
        self.entries
            .iter()
            .filter(|(_, affinity)| **affinity == Affinity::Weak)
            .map(|(element, _)| *element)
    }
}
