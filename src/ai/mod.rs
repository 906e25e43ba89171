//! Built-in opponent.
//!
//! The opponent acts through the same `Duel::act` path as any participant,
//! so every move it makes is validated and recorded like a human's.
//!
//! - `Opponent`: hook the duel calls when the AI seat must act
//! - `ScriptedOpponent`: fixed-order heuristic player
//! - `generate_ai_deck`: random deck for the AI seat

mod deck;
mod driver;

pub use deck::generate_ai_deck;
pub use driver::ScriptedOpponent;

use crate::core::action::Intent;
use crate::core::player::PlayerId;
use crate::rules::Duel;

/// Plays one seat of a duel.
pub trait Opponent: Send {
    /// Play a whole turn for `seat`, ending with `EndTurn`. The duel ends
    /// the turn itself if the opponent does not.
    fn take_turn(&mut self, duel: &mut Duel, seat: PlayerId);

    /// Respond while holding chain priority. Passes by default.
    fn respond(&mut self, duel: &mut Duel, seat: PlayerId) {
        // A rejected pass leaves priority where it was; the duel passes again.
        driver::try_act(duel, seat, Intent::Pass);
    }
}
