//! Placing cards from hand: monster summons, and the dispatch to spell/trap
//! placement.
//!
//! A normal summon is once per turn and pays tributes by level (5-6 needs
//! one, 7+ needs two). Tributes go to the graveyard before the summoned
//! monster is placed. A special placement skips both.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{BattlePosition, Face};
use crate::core::action::{PlaceRequest, Position};
use crate::core::entity::InstanceId;
use crate::core::error::{EngineResult, Rejection};
use crate::core::player::PlayerId;
use crate::core::state::MatchState;

use super::activation::place_spell_trap;
use super::{require_active, require_no_chain};

/// Place a card from the requester's hand.
pub fn place_card(state: &mut MatchState, seat: PlayerId, request: &PlaceRequest) -> EngineResult<()> {
    require_active(state, seat)?;
    require_no_chain(state)?;

    let side = state.participant(seat);
    let card = side
        .hand()
        .iter()
        .find(|c| c.id == request.card)
        .ok_or(Rejection::CardNotFound(request.card))?;
    let is_monster = card.definition.is_monster();

    if !state.phase.is_main() {
        return Err(Rejection::NotMainPhase(state.phase));
    }
    side.check_placement(request.card, request.zone, request.index)?;

    if is_monster {
        summon(state, seat, request)
    } else {
        place_spell_trap(state, seat, request)
    }
}

fn summon(state: &mut MatchState, seat: PlayerId, request: &PlaceRequest) -> EngineResult<()> {
    let (face, position) = match request.position {
        Position::Attack => (Face::Up, BattlePosition::Attack),
        Position::Defense => (Face::Up, BattlePosition::Defense),
        Position::Set => (Face::Down, BattlePosition::Defense),
        Position::FaceUp => {
            return Err(Rejection::InvalidPosition {
                card: request.card,
                position: request.position,
            })
        }
    };

    let side = state.participant(seat);
    if !request.special && side.has_normal_summoned() {
        return Err(Rejection::NormalSummonExhausted);
    }

    let tributes = if request.special {
        SmallVec::new()
    } else {
        choose_tributes(state, seat, request)?
    };

    let turn = state.turn;
    let can_attack = position == BattlePosition::Attack && !state.is_first_turn();
    let side = state.participant_mut(seat);

    for &tribute in &tributes {
        side.discard(tribute)?;
    }

    let placed = side.place(request.card, request.zone, request.index)?;
    placed.face = face;
    placed.battle_position = Some(position);
    placed.turn_played = Some(turn);
    placed.can_attack = can_attack;
    let name = placed.name().to_string();

    if !request.special {
        side.has_normal_summoned = true;
    }

    let how = if request.special { "special summoned" } else { "summoned" };
    debug!(%seat, card = %request.card, tributes = tributes.len(), "{how}");
    state.set_last_action(format!("{seat} {how} {name} in {} position", request.position));
    Ok(())
}

/// Pick the monsters paid for a normal summon.
///
/// Explicit tributes must be exactly the required count of distinct
/// monsters on the summoner's field. Without a list the leftmost monsters
/// are used.
fn choose_tributes(
    state: &MatchState,
    seat: PlayerId,
    request: &PlaceRequest,
) -> EngineResult<SmallVec<[InstanceId; 2]>> {
    let side = state.participant(seat);
    let required = side
        .card(request.card)
        .map_or(0, |c| c.definition.tributes_required());

    match &request.tributes {
        Some(named) => {
            if named.len() != required {
                return Err(Rejection::InsufficientTributes {
                    required,
                    offered: named.len(),
                });
            }
            for (i, &tribute) in named.iter().enumerate() {
                let on_field = side.monsters().any(|m| m.id == tribute);
                if !on_field || named[..i].contains(&tribute) {
                    return Err(Rejection::CardNotFound(tribute));
                }
            }
            Ok(named.clone())
        }
        None => {
            let available = side.monsters().count();
            if available < required {
                return Err(Rejection::InsufficientTributes {
                    required,
                    offered: available,
                });
            }
            Ok(side.monsters().take(required).map(|m| m.id).collect())
        }
    }
}
