//! Effect descriptors.
//!
//! The engine hosts a closed set of effect kinds. A card definition names
//! at most one; the chain carries it together with the targets chosen at
//! activation time.

use serde::{Deserialize, Serialize};

/// Where a special summon takes its monster from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonSource {
    Hand,
    Graveyard,
    Deck,
}

/// How an effect picks its targets at activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRule {
    /// No targets.
    None,
    /// Between 1 and `max` distinct cards on either field.
    FieldCards { max: u8 },
    /// Optionally one monster from the activator's own pile.
    OwnMonsterIn(SummonSource),
}

/// One effect kind.
///
/// - `Destroy`, `ReturnToHand`, `Banish`: move targeted field cards to
///   their owners' graveyard, hand or banished pile
/// - `Draw`: the activator draws `count` cards
/// - `SpecialSummon`: one monster from the activator's `from` pile to the
///   first empty monster zone in face-up attack position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Destroy { max_targets: u8 },
    Draw { count: u8 },
    SpecialSummon { from: SummonSource },
    ReturnToHand { max_targets: u8 },
    Banish { max_targets: u8 },
}

impl Effect {
    /// Destroy a single field card.
    pub const DESTROY_ONE: Effect = Effect::Destroy { max_targets: 1 };

    #[must_use]
    pub const fn target_rule(self) -> TargetRule {
        match self {
            Effect::Destroy { max_targets }
            | Effect::ReturnToHand { max_targets }
            | Effect::Banish { max_targets } => TargetRule::FieldCards { max: max_targets },
            Effect::Draw { .. } => TargetRule::None,
            Effect::SpecialSummon { from } => TargetRule::OwnMonsterIn(from),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Effect::Destroy { .. } => "destroy",
            Effect::Draw { .. } => "draw",
            Effect::SpecialSummon { .. } => "special summon",
            Effect::ReturnToHand { .. } => "return to hand",
            Effect::Banish { .. } => "banish",
        }
    }
}
