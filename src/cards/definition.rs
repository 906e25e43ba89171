//! Card definitions - immutable catalog data.
//!
//! A `CardDefinition` describes a card as printed: its catalog code, name,
//! kind and optional effect. Definitions are shared between every instance
//! of the card through `Arc` and never change during a match.
//!
//! ## Kinds
//!
//! - **Monster**: attack, defense, level and attribute. Level decides the
//!   tribute cost (5-6 needs one, 7+ needs two).
//! - **Spell**: Normal, Quick-Play, Continuous, Field, Equip, Ritual.
//! - **Trap**: Normal, Continuous, Counter.
//!
//! ```
//! use duel_engine::cards::{Attribute, CardDefinition, MonsterStats};
//!
//! let dragon = CardDefinition::monster("LOB-001", "Blue-Eyes White Dragon",
//!     MonsterStats::new(3000, 2500, 8, Attribute::Light));
//! assert_eq!(dragon.tributes_required(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::zones::ZoneKind;

/// Catalog code identifying a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardCode(pub String);

impl CardCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CardCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CardCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Dark,
    Light,
    Earth,
    Water,
    Fire,
    Wind,
    Divine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellKind {
    Normal,
    QuickPlay,
    Continuous,
    Field,
    Equip,
    Ritual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    Normal,
    Continuous,
    Counter,
}

/// Printed monster statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterStats {
    pub attack: i64,
    pub defense: i64,
    pub level: u8,
    pub attribute: Attribute,
}

impl MonsterStats {
    #[must_use]
    pub const fn new(attack: i64, defense: i64, level: u8, attribute: Attribute) -> Self {
        Self {
            attack,
            defense,
            level,
            attribute,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Monster(MonsterStats),
    Spell(SpellKind),
    Trap(TrapKind),
}

/// Immutable catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub code: CardCode,
    pub name: String,
    pub kind: CardKind,

    /// Effect performed when the card resolves on the chain.
    pub effect: Option<Effect>,

    #[serde(default)]
    pub description: String,
}

impl CardDefinition {
    pub fn monster(code: impl Into<CardCode>, name: impl Into<String>, stats: MonsterStats) -> Self {
        Self::new(code.into(), name.into(), CardKind::Monster(stats))
    }

    pub fn spell(code: impl Into<CardCode>, name: impl Into<String>, kind: SpellKind) -> Self {
        Self::new(code.into(), name.into(), CardKind::Spell(kind))
    }

    pub fn trap(code: impl Into<CardCode>, name: impl Into<String>, kind: TrapKind) -> Self {
        Self::new(code.into(), name.into(), CardKind::Trap(kind))
    }

    fn new(code: CardCode, name: String, kind: CardKind) -> Self {
        Self {
            code,
            name,
            kind,
            effect: None,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Monster statistics, if this is a monster.
    #[must_use]
    pub fn stats(&self) -> Option<&MonsterStats> {
        match &self.kind {
            CardKind::Monster(stats) => Some(stats),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CardKind::Monster(_))
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell(_))
    }

    #[must_use]
    pub fn is_trap(&self) -> bool {
        matches!(self.kind, CardKind::Trap(_))
    }

    /// The zone row this card is placed into.
    #[must_use]
    pub fn zone_kind(&self) -> ZoneKind {
        if self.is_monster() {
            ZoneKind::Monster
        } else {
            ZoneKind::SpellTrap
        }
    }

    /// Tributes needed for a normal summon.
    #[must_use]
    pub fn tributes_required(&self) -> usize {
        match self.stats().map(|s| s.level) {
            Some(level) if level >= 7 => 2,
            Some(level) if level >= 5 => 1,
            _ => 0,
        }
    }

    /// Quick cards may be activated on the opponent's turn and in response
    /// to a chain.
    #[must_use]
    pub fn is_quick(&self) -> bool {
        matches!(
            self.kind,
            CardKind::Trap(_) | CardKind::Spell(SpellKind::QuickPlay)
        )
    }

    /// Cards that must be set for a turn before they can be activated.
    #[must_use]
    pub fn waits_a_turn(&self) -> bool {
        self.is_quick()
    }

    /// Lingering cards stay on the field after they resolve.
    #[must_use]
    pub fn stays_on_field(&self) -> bool {
        matches!(
            self.kind,
            CardKind::Spell(SpellKind::Continuous | SpellKind::Field | SpellKind::Equip)
                | CardKind::Trap(TrapKind::Continuous)
        )
    }
}
