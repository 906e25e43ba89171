//! Intents: the requests a participant can make against a match.
//!
//! Every boundary operation of the match store turns into exactly one
//! `Intent`. The engine validates the intent against the current state and
//! either commits all of its effects or none.
//!
//! ```
//! use duel_engine::core::{InstanceId, Intent, PlaceRequest, Position};
//!
//! let summon = Intent::Place(PlaceRequest::monster(InstanceId(4), 0, Position::Attack));
//! assert!(!summon.is_pass());
//!
//! let tribute = PlaceRequest::monster(InstanceId(9), 1, Position::Attack)
//!     .with_tributes([InstanceId(4)]);
//! assert_eq!(tribute.tributes.as_deref(), Some(&[InstanceId(4)][..]));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::InstanceId;
use super::phase::Phase;
use super::player::PlayerId;
use crate::zones::ZoneKind;

/// Target list for effects and tributes. Almost always 0-2 cards.
pub type Targets = SmallVec<[InstanceId; 2]>;

/// Requested position for a card being placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Face-up attack position (monsters).
    #[serde(rename = "ATTACK")]
    Attack,
    /// Face-up defense position (monsters).
    #[serde(rename = "DEFENSE")]
    Defense,
    /// Face-up activation (spells).
    #[serde(rename = "FACE-UP")]
    FaceUp,
    /// Face-down. Monsters are set in defense position.
    #[serde(rename = "SET")]
    Set,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Position::Attack => "ATTACK",
            Position::Defense => "DEFENSE",
            Position::FaceUp => "FACE-UP",
            Position::Set => "SET",
        };
        f.write_str(name)
    }
}

/// A request to move a card from hand into a zone slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRequest {
    pub card: InstanceId,
    pub zone: ZoneKind,
    pub index: u8,
    pub position: Position,

    /// Special placements bypass the once-per-turn normal summon and take
    /// no tributes.
    pub special: bool,

    /// Explicit tributes. `None` lets the engine pick the leftmost monsters.
    pub tributes: Option<Targets>,

    /// Targets for a spell placed face-up (activated on placement).
    pub targets: Targets,
}

impl PlaceRequest {
    /// Place a monster into a monster zone slot.
    #[must_use]
    pub fn monster(card: InstanceId, index: u8, position: Position) -> Self {
        Self {
            card,
            zone: ZoneKind::Monster,
            index,
            position,
            special: false,
            tributes: None,
            targets: Targets::new(),
        }
    }

    /// Place a spell or trap into a spell/trap zone slot.
    #[must_use]
    pub fn spell_trap(card: InstanceId, index: u8, position: Position) -> Self {
        Self {
            zone: ZoneKind::SpellTrap,
            ..Self::monster(card, index, position)
        }
    }

    /// Mark as a special placement.
    #[must_use]
    pub fn special(mut self) -> Self {
        self.special = true;
        self
    }

    /// Name the tributes explicitly.
    #[must_use]
    pub fn with_tributes(mut self, tributes: impl IntoIterator<Item = InstanceId>) -> Self {
        self.tributes = Some(tributes.into_iter().collect());
        self
    }

    /// Targets for a face-up spell's effect.
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = InstanceId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }
}

/// One participant request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Move to another phase.
    ChangePhase { target: Phase },

    /// Perform the pending turn draw.
    Draw,

    /// Summon, set or activate-by-placing a card from hand.
    Place(PlaceRequest),

    /// Activate a set spell or trap, adding a link to the chain.
    Activate { card: InstanceId, targets: Targets },

    /// Decline to respond while holding chain priority.
    Pass,

    /// Declare an attack. `None` attacks the opponent directly.
    Attack {
        attacker: InstanceId,
        target: Option<InstanceId>,
    },

    /// Finish the turn from any phase.
    EndTurn,
}

impl Intent {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Intent::Pass)
    }

    /// Short label used in logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Intent::ChangePhase { .. } => "change-phase",
            Intent::Draw => "draw",
            Intent::Place(_) => "place",
            Intent::Activate { .. } => "activate",
            Intent::Pass => "pass",
            Intent::Attack { .. } => "attack",
            Intent::EndTurn => "end-turn",
        }
    }
}

/// An accepted intent with ordering metadata, kept as match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that made the request.
    pub player: PlayerId,

    pub intent: Intent,

    /// Turn number when the intent was accepted.
    pub turn: u32,

    /// Match-wide acceptance order.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, intent: Intent, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            intent,
            turn,
            sequence,
        }
    }
}
