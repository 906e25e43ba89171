//! Attack declaration and damage calculation.
//!
//! ```
//! use duel_engine::rules::{compute_outcome, BattleTarget};
//!
//! let outcome = compute_outcome(1800, BattleTarget::Attack(1200));
//! assert!(outcome.target_destroyed);
//! assert_eq!(outcome.defender_damage, 600);
//!
//! let outcome = compute_outcome(1000, BattleTarget::Defense(1500));
//! assert!(!outcome.attacker_destroyed && !outcome.target_destroyed);
//! assert_eq!(outcome.attacker_damage, 500);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Face;
use crate::core::entity::InstanceId;
use crate::core::error::{AttackBlock, EngineResult, Rejection};
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::MatchState;

use super::{require_active, require_no_chain};

/// What the attack is aimed at, with the stat it is compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleTarget {
    Direct,
    Attack(i64),
    Defense(i64),
}

/// Result of one battle. Damage values are life points lost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub attacker_destroyed: bool,
    pub target_destroyed: bool,
    /// Lost by the attacking participant.
    pub attacker_damage: i64,
    /// Lost by the defending participant.
    pub defender_damage: i64,
}

/// Damage calculation for an attacker with `attack` points.
#[must_use]
pub fn compute_outcome(attack: i64, target: BattleTarget) -> BattleOutcome {
    let none = BattleOutcome::default();
    match target {
        BattleTarget::Direct => BattleOutcome {
            defender_damage: attack,
            ..none
        },
        BattleTarget::Attack(defending) => {
            let diff = attack - defending;
            match diff.signum() {
                1 => BattleOutcome {
                    target_destroyed: true,
                    defender_damage: diff,
                    ..none
                },
                -1 => BattleOutcome {
                    attacker_destroyed: true,
                    attacker_damage: -diff,
                    ..none
                },
                _ => BattleOutcome {
                    attacker_destroyed: true,
                    target_destroyed: true,
                    ..none
                },
            }
        }
        BattleTarget::Defense(defense) => {
            if attack > defense {
                BattleOutcome {
                    target_destroyed: true,
                    ..none
                }
            } else if attack < defense {
                BattleOutcome {
                    attacker_damage: defense - attack,
                    ..none
                }
            } else {
                none
            }
        }
    }
}

/// Declare an attack and resolve it.
pub fn declare_attack(
    state: &mut MatchState,
    seat: PlayerId,
    attacker: InstanceId,
    target: Option<InstanceId>,
) -> EngineResult<BattleOutcome> {
    require_active(state, seat)?;
    require_no_chain(state)?;

    let blocked = |reason| Rejection::InvalidAttacker {
        card: attacker,
        reason,
    };
    if state.phase != Phase::Battle {
        return Err(blocked(AttackBlock::WrongPhase(state.phase)));
    }

    let side = state.participant(seat);
    let attacking = side
        .monsters()
        .find(|m| m.id == attacker)
        .ok_or(Rejection::CardNotFound(attacker))?;
    if attacking.face != Face::Up {
        return Err(blocked(AttackBlock::FaceDown));
    }
    if !attacking.in_attack_position() {
        return Err(blocked(AttackBlock::NotAttackPosition));
    }
    if !attacking.can_attack {
        return Err(blocked(AttackBlock::AlreadyAttacked));
    }
    let attack = attacking.attack();
    let attacker_name = attacking.name().to_string();

    let defender = seat.opponent();
    let (battle_target, aimed) = match target {
        None => (BattleTarget::Direct, String::from("directly")),
        Some(id) => {
            let defending = state
                .participant(defender)
                .monsters()
                .find(|m| m.id == id)
                .ok_or(Rejection::CardNotFound(id))?;
            let stat = if defending.in_attack_position() {
                BattleTarget::Attack(defending.attack())
            } else {
                BattleTarget::Defense(defending.defense())
            };
            (stat, defending.name().to_string())
        }
    };

    let outcome = compute_outcome(attack, battle_target);

    if let Some(id) = target {
        if let Some(card) = state.participant_mut(defender).field_card_mut(id) {
            card.face = Face::Up;
        }
        if outcome.target_destroyed {
            state.participant_mut(defender).discard(id)?;
        }
    }

    let own = state.participant_mut(seat);
    if outcome.attacker_destroyed {
        own.discard(attacker)?;
    } else if let Some(card) = own.field_card_mut(attacker) {
        card.can_attack = false;
    }
    own.life_points -= outcome.attacker_damage;
    state.participant_mut(defender).life_points -= outcome.defender_damage;

    debug!(%seat, %attacker, ?target, ?outcome, "battle resolved");
    state.set_last_action(format!("{attacker_name} attacked {aimed}"));
    Ok(outcome)
}
