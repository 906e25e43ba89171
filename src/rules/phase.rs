//! Phase transitions and their side effects.
//!
//! ## Entry effects
//!
//! - `DRAW`: the active participant draws one card, except on turn 1. In
//!   manual-draw mode the draw is left pending until requested.
//! - `BATTLE`: face-up attack-position monsters may attack again, except
//!   on turn 1.
//! - `END`: per-turn flags reset, the turn counter advances and the other
//!   participant enters `DRAW`.

use tracing::trace;

use crate::cards::Face;
use crate::core::config::MatchConfig;
use crate::core::error::{EngineResult, Rejection};
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::MatchState;

use super::{require_active, require_no_chain};

/// Move to `target` if it is reachable from the current phase.
pub fn change_phase(
    state: &mut MatchState,
    config: &MatchConfig,
    seat: PlayerId,
    target: Phase,
) -> EngineResult<()> {
    require_active(state, seat)?;

    let from = state.phase;
    if !state.chain.is_empty() || state.draw_pending || !from.can_advance_to(target) {
        return Err(Rejection::IllegalPhaseTransition { from, to: target });
    }

    enter(state, config, target);
    Ok(())
}

/// Take the pending turn draw.
pub fn request_draw(state: &mut MatchState, seat: PlayerId) -> EngineResult<()> {
    require_active(state, seat)?;
    require_no_chain(state)?;
    if !state.draw_pending {
        return Err(Rejection::DrawUnavailable);
    }

    let drawn = state.participant_mut(seat).draw(1);
    state.draw_pending = false;
    state.set_last_action(format!("{seat} drew {drawn} card(s)"));
    Ok(())
}

/// Walk straight to `END` from any phase.
pub fn end_turn(state: &mut MatchState, config: &MatchConfig, seat: PlayerId) -> EngineResult<()> {
    require_active(state, seat)?;
    require_no_chain(state)?;
    if state.draw_pending {
        return Err(Rejection::IllegalPhaseTransition {
            from: state.phase,
            to: Phase::End,
        });
    }

    enter(state, config, Phase::End);
    Ok(())
}

/// Enter a phase and apply its side effects.
pub(crate) fn enter(state: &mut MatchState, config: &MatchConfig, phase: Phase) {
    trace!(turn = state.turn, %phase, "entering phase");
    state.phase = phase;
    state.set_last_action(format!("{} entered {phase}", state.active));

    match phase {
        Phase::Draw => begin_draw(state, config),
        Phase::Battle => rearm_attackers(state),
        Phase::End => finish_turn(state, config),
        Phase::Standby | Phase::Main1 | Phase::Main2 => {}
    }
}

/// Start-of-turn draw. Called with the phase already set to `DRAW`.
pub(crate) fn begin_draw(state: &mut MatchState, config: &MatchConfig) {
    if state.is_first_turn() {
        return;
    }
    if config.auto_draw {
        let seat = state.active;
        let drawn = state.participant_mut(seat).draw(1);
        state.set_last_action(format!("{seat} drew {drawn} card(s)"));
    } else {
        state.draw_pending = true;
    }
}

fn rearm_attackers(state: &mut MatchState) {
    if state.is_first_turn() {
        return;
    }
    let seat = state.active;
    for monster in state.participant_mut(seat).monster_zones.iter_mut().flatten() {
        monster.can_attack = monster.face == Face::Up && monster.in_attack_position();
    }
}

fn finish_turn(state: &mut MatchState, config: &MatchConfig) {
    for (_, participant) in state.participants.iter_mut() {
        participant.has_normal_summoned = false;
        for monster in participant.monster_zones.iter_mut().flatten() {
            monster.can_attack = false;
        }
    }

    let ending = state.active;
    state.turn += 1;
    state.active = ending.opponent();
    state.draw_pending = false;

    enter(state, config, Phase::Draw);
    state.set_last_action(format!("{ending} ended the turn; turn {} begins", state.turn));
}
