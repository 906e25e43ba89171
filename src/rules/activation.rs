//! Spell and trap placement, activation and chain resolution.
//!
//! A spell placed face-up activates at once: its link is pushed and the
//! chain resolves immediately. Set cards stay inert until activated. An
//! activation pushes a link and hands priority to the opponent; the chain
//! resolves once both participants pass in a row.
//!
//! ## Timing
//!
//! - Normal, Continuous, Field, Equip and Ritual spells: the active
//!   participant's main phase, empty chain
//! - Quick-Play spells and traps: any time the activator may act, but not
//!   on the turn they were set
//! - Counter traps: only in response to an open chain

use tracing::debug;

use crate::cards::{CardKind, Face, TrapKind};
use crate::core::action::{PlaceRequest, Position, Targets};
use crate::core::entity::InstanceId;
use crate::core::error::{ActivationBlock, EngineResult, Rejection};
use crate::core::player::PlayerId;
use crate::core::state::MatchState;
use crate::effects::validate_targets;
use crate::stack::{resolve_all, PassOutcome};

/// Place a spell or trap from hand. Called after the common placement
/// checks have passed.
pub(crate) fn place_spell_trap(
    state: &mut MatchState,
    seat: PlayerId,
    request: &PlaceRequest,
) -> EngineResult<()> {
    let side = state.participant(seat);
    let definition = side
        .card(request.card)
        .map(|c| c.definition.clone())
        .ok_or(Rejection::CardNotFound(request.card))?;

    let activate_now = match request.position {
        Position::Set => false,
        Position::FaceUp if definition.is_spell() => true,
        _ => {
            return Err(Rejection::InvalidPosition {
                card: request.card,
                position: request.position,
            })
        }
    };

    if activate_now {
        validate_targets(state, seat, request.card, definition.effect, &request.targets).map_err(
            |reason| Rejection::InvalidActivation {
                card: request.card,
                reason,
            },
        )?;
    } else if !request.targets.is_empty() {
        return Err(Rejection::InvalidActivation {
            card: request.card,
            reason: ActivationBlock::UnexpectedTargets,
        });
    }

    let turn = state.turn;
    let placed = state
        .participant_mut(seat)
        .place(request.card, request.zone, request.index)?;
    placed.turn_played = Some(turn);
    placed.face = if activate_now { Face::Up } else { Face::Down };

    if activate_now {
        state
            .chain
            .push(request.card, seat, definition.effect, request.targets.clone());
        let resolved = resolve_all(state);
        debug!(%seat, card = %request.card, links = resolved.len(), "spell activated on placement");
        state.set_last_action(format!("{seat} activated {}", definition.name));
    } else {
        state.set_last_action(format!("{seat} set a card"));
    }
    Ok(())
}

/// Activate a set spell or trap, adding a link to the chain.
pub fn activate(
    state: &mut MatchState,
    seat: PlayerId,
    card: InstanceId,
    targets: &Targets,
) -> EngineResult<()> {
    let instance = state
        .participant(seat)
        .card(card)
        .ok_or(Rejection::CardNotFound(card))?;
    let definition = instance.definition.clone();
    let block = |reason| Rejection::InvalidActivation { card, reason };

    if definition.is_monster() {
        return Err(block(ActivationBlock::NotSpellOrTrap));
    }
    if !instance.location.is_field() {
        return Err(block(ActivationBlock::NotSet));
    }
    if instance.face == Face::Up {
        return Err(block(ActivationBlock::AlreadyFaceUp));
    }

    if state.chain.is_empty() {
        if seat != state.active && !definition.is_quick() {
            return Err(Rejection::NotYourTurn(seat));
        }
        if !definition.is_quick() && !state.phase.is_main() {
            return Err(block(ActivationBlock::WrongPhase(state.phase)));
        }
        if matches!(definition.kind, CardKind::Trap(TrapKind::Counter)) {
            return Err(block(ActivationBlock::NeedsChain));
        }
    } else {
        if state.chain.priority() != Some(seat) {
            return Err(Rejection::NoPriority(seat));
        }
        if !definition.is_quick() {
            return Err(block(ActivationBlock::ChainOpen));
        }
    }

    if definition.waits_a_turn() && instance.turn_played == Some(state.turn) {
        return Err(block(ActivationBlock::SetThisTurn));
    }

    validate_targets(state, seat, card, definition.effect, targets).map_err(block)?;

    if let Some(instance) = state.participant_mut(seat).field_card_mut(card) {
        instance.face = Face::Up;
    }
    let link = state
        .chain
        .push(card, seat, definition.effect, targets.clone());

    debug!(%seat, %card, link, "chain link added");
    state.set_last_action(format!("{seat} activated {} (chain link {link})", definition.name));
    Ok(())
}

/// Decline to respond. Resolves the chain once both participants pass.
pub fn pass(state: &mut MatchState, seat: PlayerId) -> EngineResult<()> {
    match state.chain.pass(seat)? {
        PassOutcome::Continue => {
            state.set_last_action(format!("{seat} passed"));
        }
        PassOutcome::Resolve => {
            let resolved = resolve_all(state);
            state.set_last_action(format!("chain of {} link(s) resolved", resolved.len()));
        }
    }
    Ok(())
}
