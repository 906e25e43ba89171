//! Where a card can be.

use serde::{Deserialize, Serialize};

/// The two slotted rows on each side of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    #[serde(rename = "monster")]
    Monster,
    #[serde(rename = "spell-trap")]
    SpellTrap,
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ZoneKind::Monster => "monster",
            ZoneKind::SpellTrap => "spell-trap",
        })
    }
}

/// A card's recorded position. Slot indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Deck,
    Hand,
    MonsterZone(u8),
    SpellTrapZone(u8),
    Graveyard,
    Banished,
}

impl Location {
    /// Slot location for a zone row.
    #[must_use]
    pub const fn slot(kind: ZoneKind, index: u8) -> Self {
        match kind {
            ZoneKind::Monster => Location::MonsterZone(index),
            ZoneKind::SpellTrap => Location::SpellTrapZone(index),
        }
    }

    #[must_use]
    pub const fn is_field(self) -> bool {
        matches!(self, Location::MonsterZone(_) | Location::SpellTrapZone(_))
    }

    /// Row and index, for field locations.
    #[must_use]
    pub const fn zone(self) -> Option<(ZoneKind, u8)> {
        match self {
            Location::MonsterZone(i) => Some((ZoneKind::Monster, i)),
            Location::SpellTrapZone(i) => Some((ZoneKind::SpellTrap, i)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Deck => f.write_str("deck"),
            Location::Hand => f.write_str("hand"),
            Location::MonsterZone(i) => write!(f, "monster zone {i}"),
            Location::SpellTrapZone(i) => write!(f, "spell-trap zone {i}"),
            Location::Graveyard => f.write_str("graveyard"),
            Location::Banished => f.write_str("banished"),
        }
    }
}
