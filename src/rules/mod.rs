//! Game rules.
//!
//! - `phase`: phase transitions, turn draw, end of turn
//! - `summon`: placing cards from hand, tributes
//! - `activation`: spell/trap placement, activation, priority passing
//! - `battle`: attack declaration and damage calculation
//! - `engine`: `Duel`, which validates and commits intents
//!
//! Rule functions work on `Duel`'s working copy of the state; a rejection
//! from any of them discards the copy.

pub mod activation;
pub mod battle;
pub mod engine;
pub mod phase;
pub mod summon;

pub use battle::{compute_outcome, BattleOutcome, BattleTarget};
pub use engine::{adjudicate, Duel, GameResult, Seat};

use crate::core::error::{EngineResult, Rejection};
use crate::core::player::PlayerId;
use crate::core::state::MatchState;

fn require_active(state: &MatchState, seat: PlayerId) -> EngineResult<()> {
    if state.active == seat {
        Ok(())
    } else {
        Err(Rejection::NotYourTurn(seat))
    }
}

fn require_no_chain(state: &MatchState) -> EngineResult<()> {
    if state.chain.is_empty() {
        Ok(())
    } else {
        Err(Rejection::ChainPending)
    }
}
