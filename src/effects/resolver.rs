//! Effect resolution - applying a chain link to match state.
//!
//! Targets are re-checked at resolution: anything that left the field
//! after activation is skipped, and a link whose targets are all gone
//! fizzles. Once a link resolves, its source card is sent to the graveyard
//! unless it is a lingering card (Continuous, Field, Equip).

use tracing::debug;

use crate::cards::BattlePosition;
use crate::cards::Face;
use crate::core::entity::InstanceId;
use crate::core::state::MatchState;
use crate::stack::ChainEntry;
use crate::zones::{Location, ZoneKind};

use super::effect::{Effect, SummonSource};
use super::targeting::source_location;

/// Result of resolving one link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect applied to this many cards (or drew this many).
    Applied(usize),
    /// Every target was gone.
    Fizzled,
    /// The source has no effect.
    NoEffect,
}

/// Resolve one link against the state and retire its source.
pub fn resolve_entry(state: &mut MatchState, entry: &ChainEntry) -> ResolveResult {
    let result = match entry.effect {
        None => ResolveResult::NoEffect,
        Some(Effect::Draw { count }) => {
            let drawn = state.participant_mut(entry.controller).draw(count as usize);
            ResolveResult::Applied(drawn)
        }
        Some(Effect::Destroy { .. }) => move_targets(state, entry, Location::Graveyard),
        Some(Effect::ReturnToHand { .. }) => move_targets(state, entry, Location::Hand),
        Some(Effect::Banish { .. }) => move_targets(state, entry, Location::Banished),
        Some(Effect::SpecialSummon { from }) => special_summon(state, entry, from),
    };

    retire_source(state, entry.source);
    result
}

fn move_targets(state: &mut MatchState, entry: &ChainEntry, to: Location) -> ResolveResult {
    let mut moved = 0;
    for &target in &entry.targets {
        let Some((owner, loc)) = state.locate(target) else {
            continue;
        };
        if !loc.is_field() {
            continue;
        }
        let side = state.participant_mut(owner);
        let outcome = match to {
            Location::Hand => side.return_to_hand(target),
            Location::Banished => side.banish(target),
            _ => side.discard(target),
        };
        if outcome.is_ok() {
            moved += 1;
        }
    }

    if moved == 0 {
        debug!(link = entry.link, "all targets gone, link fizzles");
        ResolveResult::Fizzled
    } else {
        ResolveResult::Applied(moved)
    }
}

fn special_summon(state: &mut MatchState, entry: &ChainEntry, from: SummonSource) -> ResolveResult {
    let turn = state.turn;
    let first_turn = state.is_first_turn();
    let pile = source_location(from);
    let side = state.participant_mut(entry.controller);

    let chosen = match entry.targets.first() {
        Some(&target) => side
            .card(target)
            .filter(|c| c.location == pile)
            .map(|c| c.id),
        None => {
            let candidates = match from {
                SummonSource::Hand => side.hand(),
                SummonSource::Graveyard => side.graveyard(),
                SummonSource::Deck => side.deck(),
            };
            candidates
                .iter()
                .find(|c| c.definition.is_monster())
                .map(|c| c.id)
        }
    };
    let Some(card) = chosen else {
        return ResolveResult::Fizzled;
    };
    let Some(index) = side.first_empty(ZoneKind::Monster) else {
        return ResolveResult::Fizzled;
    };

    match side.place_from(card, ZoneKind::Monster, index) {
        Ok(instance) => {
            instance.face = Face::Up;
            instance.battle_position = Some(BattlePosition::Attack);
            instance.turn_played = Some(turn);
            instance.can_attack = !first_turn;
            ResolveResult::Applied(1)
        }
        Err(_) => ResolveResult::Fizzled,
    }
}

fn retire_source(state: &mut MatchState, source: InstanceId) {
    let Some((owner, loc)) = state.locate(source) else {
        return;
    };
    let lingers = state
        .card(source)
        .is_some_and(|c| c.definition.stays_on_field());
    if loc.is_field() && !lingers {
        let _ = state.participant_mut(owner).discard(source);
    }
}
