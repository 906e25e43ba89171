//! Turn phases.
//!
//! A turn walks `DRAW → STANDBY → MAIN_1 → BATTLE → MAIN_2 → END` and then
//! wraps to `DRAW` for the other participant. The only shortcut is
//! `MAIN_1 → END`, which skips battle entirely.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "DRAW")]
    Draw,
    #[serde(rename = "STANDBY")]
    Standby,
    #[serde(rename = "MAIN_1")]
    Main1,
    #[serde(rename = "BATTLE")]
    Battle,
    #[serde(rename = "MAIN_2")]
    Main2,
    #[serde(rename = "END")]
    End,
}

impl Phase {
    /// The phase that follows in the normal cycle.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Draw => Phase::Standby,
            Phase::Standby => Phase::Main1,
            Phase::Main1 => Phase::Battle,
            Phase::Battle => Phase::Main2,
            Phase::Main2 => Phase::End,
            Phase::End => Phase::Draw,
        }
    }

    /// Whether a requested transition is reachable from this phase.
    ///
    /// ```
    /// use duel_engine::core::Phase;
    ///
    /// assert!(Phase::Main1.can_advance_to(Phase::Battle));
    /// assert!(Phase::Main1.can_advance_to(Phase::End));
    /// assert!(!Phase::Draw.can_advance_to(Phase::Battle));
    /// assert!(!Phase::Battle.can_advance_to(Phase::Main1));
    /// ```
    #[must_use]
    pub fn can_advance_to(self, target: Phase) -> bool {
        self.next() == target || (self == Phase::Main1 && target == Phase::End)
    }

    /// Cards may be placed only in the main phases.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Draw => "DRAW",
            Phase::Standby => "STANDBY",
            Phase::Main1 => "MAIN_1",
            Phase::Battle => "BATTLE",
            Phase::Main2 => "MAIN_2",
            Phase::End => "END",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
