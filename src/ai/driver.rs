//! Scripted opponent.
//!
//! Plays a turn in a fixed order: take the draw, walk to `MAIN_1`, summon
//! its strongest affordable monster, set traps and play draw spells, then
//! (after turn 1) attack whatever face-up monster it can beat and end the
//! turn. Attacks go straight at the opponent when their monster zones are
//! empty.

use tracing::debug;

use crate::cards::CardInstance;
use crate::core::action::{Intent, PlaceRequest, Position};
use crate::core::entity::InstanceId;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::MatchState;
use crate::effects::TargetRule;
use crate::rules::Duel;
use crate::zones::ZoneKind;

use super::Opponent;

#[derive(Clone, Debug, Default)]
pub struct ScriptedOpponent {
    turns_played: u32,
}

impl ScriptedOpponent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }
}

impl Opponent for ScriptedOpponent {
    fn take_turn(&mut self, duel: &mut Duel, seat: PlayerId) {
        self.turns_played += 1;

        if duel.state().draw_pending() {
            try_act(duel, seat, Intent::Draw);
        }
        for target in [Phase::Standby, Phase::Main1] {
            if duel.state().phase().next() == target {
                try_act(duel, seat, Intent::ChangePhase { target });
            }
        }

        summon_strongest(duel, seat);
        play_spells_and_traps(duel, seat);

        if !duel.state().is_first_turn() && try_act(duel, seat, Intent::ChangePhase { target: Phase::Battle }) {
            attack_all(duel, seat);
            try_act(duel, seat, Intent::ChangePhase { target: Phase::Main2 });
        }

        try_act(duel, seat, Intent::EndTurn);
    }
}

/// Submit one opponent move, logging it at debug level when rejected.
pub(super) fn try_act(duel: &mut Duel, seat: PlayerId, intent: Intent) -> bool {
    let label = intent.label();
    match duel.act(seat, intent) {
        Ok(()) => true,
        Err(rejection) => {
            debug!(%seat, intent = label, %rejection, "opponent move rejected");
            false
        }
    }
}

fn summon_strongest(duel: &mut Duel, seat: PlayerId) {
    let state = duel.state();
    let side = state.participant(seat);
    let Some(index) = side.first_empty(ZoneKind::Monster) else {
        return;
    };

    let own_monsters = side.monsters().count();
    let mut candidates: Vec<&CardInstance> = side
        .hand()
        .iter()
        .filter(|c| c.definition.is_monster() && c.definition.tributes_required() <= own_monsters)
        .collect();
    candidates.sort_by_key(|c| std::cmp::Reverse(c.attack()));

    let strongest_enemy = strongest_attack(state, seat.opponent());
    let picks: Vec<(InstanceId, Position)> = candidates
        .iter()
        .map(|c| {
            let position = if c.attack() >= strongest_enemy {
                Position::Attack
            } else {
                Position::Defense
            };
            (c.id, position)
        })
        .collect();

    for (card, position) in picks {
        if try_act(duel, seat, Intent::Place(PlaceRequest::monster(card, index, position))) {
            break;
        }
    }
}

fn play_spells_and_traps(duel: &mut Duel, seat: PlayerId) {
    loop {
        let side = duel.state().participant(seat);
        let Some(index) = side.first_empty(ZoneKind::SpellTrap) else {
            return;
        };

        let next = side.hand().iter().find_map(|c| {
            let def = &c.definition;
            if def.is_trap() {
                Some(PlaceRequest::spell_trap(c.id, index, Position::Set))
            } else if def.is_spell() && def.effect.is_some_and(|e| e.target_rule() == TargetRule::None) {
                Some(PlaceRequest::spell_trap(c.id, index, Position::FaceUp))
            } else {
                None
            }
        });
        let Some(request) = next else {
            return;
        };
        if !try_act(duel, seat, Intent::Place(request)) {
            return;
        }
    }
}

fn attack_all(duel: &mut Duel, seat: PlayerId) {
    let attackers: Vec<InstanceId> = duel
        .state()
        .participant(seat)
        .monsters()
        .filter(|m| m.can_attack)
        .map(|m| m.id)
        .collect();

    for attacker in attackers {
        let state = duel.state();
        let Some(attack) = state.card(attacker).map(CardInstance::attack) else {
            continue;
        };
        let defenders = state.participant(seat.opponent());

        let target = if defenders.monsters().next().is_none() {
            None
        } else {
            let beatable = defenders
                .monsters()
                .filter(|m| m.is_face_up())
                .filter(|m| {
                    let guard = if m.in_attack_position() { m.attack() } else { m.defense() };
                    attack > guard
                })
                .max_by_key(|m| m.attack());
            match beatable {
                Some(m) => Some(m.id),
                None => continue,
            }
        };

        try_act(duel, seat, Intent::Attack { attacker, target });
    }
}

fn strongest_attack(state: &MatchState, seat: PlayerId) -> i64 {
    state
        .participant(seat)
        .monsters()
        .filter(|m| m.is_face_up())
        .map(CardInstance::attack)
        .max()
        .unwrap_or(0)
}
