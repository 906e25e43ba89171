//! Spell/trap activation and chain resolution tests.

mod common;

use common::*;
use duel_engine::cards::Face;
use duel_engine::core::{
    ActivationBlock, InstanceId, Intent, Phase, PlaceRequest, PlayerId, Position, Rejection, Targets,
};
use duel_engine::rules::Duel;
use duel_engine::zones::Location;

fn set(duel: &mut Duel, seat: PlayerId, code: &str, index: u8) -> InstanceId {
    let card = in_hand(duel, seat, code);
    act(duel, seat, Intent::Place(PlaceRequest::spell_trap(card, index, Position::Set)));
    card
}

fn summon(duel: &mut Duel, seat: PlayerId, code: &str, index: u8) -> InstanceId {
    let card = in_hand(duel, seat, code);
    act(
        duel,
        seat,
        Intent::Place(PlaceRequest::monster(card, index, Position::Attack).special()),
    );
    card
}

fn activate(card: InstanceId, targets: &[InstanceId]) -> Intent {
    Intent::Activate {
        card,
        targets: targets.iter().copied().collect::<Targets>(),
    }
}

fn location(duel: &Duel, card: InstanceId) -> Option<Location> {
    duel.state().card(card).map(|c| c.location)
}

// =============================================================================
// Spells From Hand
// =============================================================================

/// A normal spell placed face-up resolves at once and goes to the graveyard.
#[test]
fn test_face_up_spell_resolves_immediately() {
    let mut duel = duel(&["POT"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let pot = in_hand(&duel, ALICE, "POT");

    act(&mut duel, ALICE, Intent::Place(PlaceRequest::spell_trap(pot, 0, Position::FaceUp)));

    let side = duel.state().participant(ALICE);
    assert_eq!(side.hand().len(), 5);
    assert_eq!(side.deck().len(), 34);
    assert_eq!(location(&duel, pot), Some(Location::Graveyard));
    assert!(duel.state().chain().is_empty());
    assert_conserved(&duel);
}

/// A field spell stays face-up on the field after resolving.
#[test]
fn test_lingering_spell_stays() {
    let mut duel = duel(&["FIELD"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let field = in_hand(&duel, ALICE, "FIELD");

    act(&mut duel, ALICE, Intent::Place(PlaceRequest::spell_trap(field, 4, Position::FaceUp)));

    let card = duel.state().card(field).expect("field spell exists");
    assert_eq!(card.location, Location::SpellTrapZone(4));
    assert_eq!(card.face, Face::Up);
}

/// Traps cannot be placed face-up.
#[test]
fn test_trap_must_be_set() {
    let mut duel = duel(&["HOLE"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let hole = in_hand(&duel, ALICE, "HOLE");

    let err = reject(&mut duel, ALICE, Intent::Place(PlaceRequest::spell_trap(hole, 0, Position::FaceUp)));
    assert_eq!(
        err,
        Rejection::InvalidPosition {
            card: hole,
            position: Position::FaceUp
        }
    );
}

/// Targeted spells need legal field targets.
#[test]
fn test_target_validation() {
    let mut duel = duel(&["FISSURE", "SCOUT"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let fissure = in_hand(&duel, ALICE, "FISSURE");
    let in_hand_scout = in_hand(&duel, ALICE, "SCOUT");
    let place = |targets: &[InstanceId]| {
        Intent::Place(PlaceRequest::spell_trap(fissure, 0, Position::FaceUp).with_targets(targets.iter().copied()))
    };

    let err = reject(&mut duel, ALICE, place(&[]));
    assert_eq!(
        err,
        Rejection::InvalidActivation {
            card: fissure,
            reason: ActivationBlock::MissingTargets
        }
    );

    let err = reject(&mut duel, ALICE, place(&[in_hand_scout]));
    assert_eq!(
        err,
        Rejection::InvalidActivation {
            card: fissure,
            reason: ActivationBlock::InvalidTarget(in_hand_scout)
        }
    );

    let err = reject(
        &mut duel,
        ALICE,
        Intent::Place(PlaceRequest::spell_trap(fissure, 0, Position::Set).with_targets([in_hand_scout])),
    );
    assert_eq!(
        err,
        Rejection::InvalidActivation {
            card: fissure,
            reason: ActivationBlock::UnexpectedTargets
        }
    );
    assert_eq!(location(&duel, fissure), Some(Location::Hand));
}

/// Destroy, return and banish effects move their targets.
#[test]
fn test_removal_effects() {
    let mut duel = duel(&["FISSURE", "BOUNCE", "EXILE"], &["WARRIOR", "WALL", "SCOUT", "OGRE"]);
    next_turn(&mut duel);
    let warrior = summon(&mut duel, BOB, "WARRIOR", 0);
    let wall = summon(&mut duel, BOB, "WALL", 1);
    let scout = summon(&mut duel, BOB, "SCOUT", 2);
    let ogre = summon(&mut duel, BOB, "OGRE", 3);
    next_turn(&mut duel);

    let fissure = in_hand(&duel, ALICE, "FISSURE");
    let bounce = in_hand(&duel, ALICE, "BOUNCE");
    let exile = in_hand(&duel, ALICE, "EXILE");
    for (card, targets) in [(fissure, vec![warrior]), (bounce, vec![wall]), (exile, vec![scout, ogre])] {
        act(
            &mut duel,
            ALICE,
            Intent::Place(PlaceRequest::spell_trap(card, 0, Position::FaceUp).with_targets(targets)),
        );
    }

    assert_eq!(location(&duel, warrior), Some(Location::Graveyard));
    assert_eq!(location(&duel, wall), Some(Location::Hand));
    assert_eq!(location(&duel, scout), Some(Location::Banished));
    assert_eq!(location(&duel, ogre), Some(Location::Banished));
    assert_eq!(duel.state().participant(ALICE).graveyard().len(), 3);
    assert!(duel.state().participant(BOB).monsters().next().is_none());
    assert_conserved(&duel);
}

/// Special summon from the graveyard brings the first monster back in
/// face-up attack position.
#[test]
fn test_special_summon_from_graveyard() {
    let mut duel = duel(&["SCOUT", "FISSURE", "REBORN"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let reborn = in_hand(&duel, ALICE, "REBORN");
    let scout = summon(&mut duel, ALICE, "SCOUT", 2);
    let fissure = in_hand(&duel, ALICE, "FISSURE");
    act(
        &mut duel,
        ALICE,
        Intent::Place(PlaceRequest::spell_trap(fissure, 0, Position::FaceUp).with_targets([scout])),
    );
    assert_eq!(location(&duel, scout), Some(Location::Graveyard));

    act(&mut duel, ALICE, Intent::Place(PlaceRequest::spell_trap(reborn, 0, Position::FaceUp)));

    let card = duel.state().card(scout).expect("scout exists");
    assert_eq!(card.location, Location::MonsterZone(0));
    assert_eq!(card.face, Face::Up);
    assert!(!card.can_attack);
    assert_eq!(location(&duel, reborn), Some(Location::Graveyard));
    assert_conserved(&duel);
}

/// With nothing to bring back, special summon resolves without effect.
#[test]
fn test_special_summon_empty_graveyard() {
    let mut duel = duel(&["REBORN"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let reborn = in_hand(&duel, ALICE, "REBORN");

    act(&mut duel, ALICE, Intent::Place(PlaceRequest::spell_trap(reborn, 0, Position::FaceUp)));

    assert!(duel.state().participant(ALICE).monsters().next().is_none());
    assert_eq!(location(&duel, reborn), Some(Location::Graveyard));
}

// =============================================================================
// Activation Timing
// =============================================================================

/// Traps cannot be activated on the turn they were set.
#[test]
fn test_trap_waits_a_turn() {
    let mut duel = duel(&["JAR"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let jar = set(&mut duel, ALICE, "JAR", 0);

    let err = reject(&mut duel, ALICE, activate(jar, &[]));
    assert_eq!(
        err,
        Rejection::InvalidActivation {
            card: jar,
            reason: ActivationBlock::SetThisTurn
        }
    );

    next_turn(&mut duel);
    next_turn(&mut duel);
    act(&mut duel, ALICE, activate(jar, &[]));
    assert_eq!(duel.state().chain().len(), 1);
    assert_eq!(duel.state().chain().priority(), Some(BOB));
}

/// A set normal spell can be activated the same turn, but only in a main
/// phase and only by the active participant.
#[test]
fn test_normal_spell_timing() {
    let mut duel = duel(&["POT", "POT"], &["FISSURE"]);
    advance_to(&mut duel, Phase::Main1);
    let pot = set(&mut duel, ALICE, "POT", 0);

    act(&mut duel, ALICE, activate(pot, &[]));
    act(&mut duel, BOB, Intent::Pass);
    act(&mut duel, ALICE, Intent::Pass);
    assert_eq!(location(&duel, pot), Some(Location::Graveyard));
    assert_eq!(duel.state().participant(ALICE).hand().len(), 5);

    let second = set(&mut duel, ALICE, "POT", 1);
    advance_to(&mut duel, Phase::Battle);
    let err = reject(&mut duel, ALICE, activate(second, &[]));
    assert_eq!(
        err,
        Rejection::InvalidActivation {
            card: second,
            reason: ActivationBlock::WrongPhase(Phase::Battle)
        }
    );

    act(&mut duel, ALICE, Intent::EndTurn);
    advance_to(&mut duel, Phase::Main1);
    let fissure = set(&mut duel, BOB, "FISSURE", 0);
    act(&mut duel, BOB, Intent::EndTurn);
    advance_to(&mut duel, Phase::Main1);

    let err = reject(&mut duel, BOB, activate(fissure, &[second]));
    assert_eq!(err, Rejection::NotYourTurn(BOB));
}

/// Counter traps only respond to an open chain.
#[test]
fn test_counter_trap_needs_chain() {
    let mut duel = duel(&["JAR"], &["COUNTER"]);
    advance_to(&mut duel, Phase::Main1);
    let jar = set(&mut duel, ALICE, "JAR", 0);
    next_turn(&mut duel);
    let counter = set(&mut duel, BOB, "COUNTER", 2);
    next_turn(&mut duel);

    let err = reject(&mut duel, BOB, activate(counter, &[jar]));
    assert_eq!(
        err,
        Rejection::InvalidActivation {
            card: counter,
            reason: ActivationBlock::NeedsChain
        }
    );

    act(&mut duel, ALICE, activate(jar, &[]));
    act(&mut duel, BOB, activate(counter, &[jar]));
    act(&mut duel, ALICE, Intent::Pass);
    act(&mut duel, BOB, Intent::Pass);

    assert_eq!(location(&duel, jar), Some(Location::Banished));
    assert_eq!(location(&duel, counter), Some(Location::Graveyard));
    assert_conserved(&duel);
}

/// Already face-up cards and cards in hand cannot be activated.
#[test]
fn test_activation_source_checks() {
    let mut duel = duel(&["FIELD", "POT", "SCOUT"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let field = in_hand(&duel, ALICE, "FIELD");
    let pot = in_hand(&duel, ALICE, "POT");
    let scout = summon(&mut duel, ALICE, "SCOUT", 0);
    act(&mut duel, ALICE, Intent::Place(PlaceRequest::spell_trap(field, 0, Position::FaceUp)));

    let block = |card, reason| Rejection::InvalidActivation { card, reason };
    assert_eq!(reject(&mut duel, ALICE, activate(field, &[])), block(field, ActivationBlock::AlreadyFaceUp));
    assert_eq!(reject(&mut duel, ALICE, activate(pot, &[])), block(pot, ActivationBlock::NotSet));
    assert_eq!(reject(&mut duel, ALICE, activate(scout, &[])), block(scout, ActivationBlock::NotSpellOrTrap));
}

// =============================================================================
// Chain Resolution
// =============================================================================

/// A response resolves before the link it answers: the destroy removes its
/// target, then the draw happens.
#[test]
fn test_chain_resolves_last_in_first_out() {
    let mut duel = duel(&["JAR", "SCOUT"], &["HOLE"]);
    advance_to(&mut duel, Phase::Main1);
    let jar = set(&mut duel, ALICE, "JAR", 0);
    let scout = in_hand(&duel, ALICE, "SCOUT");
    act(&mut duel, ALICE, Intent::Place(PlaceRequest::monster(scout, 0, Position::Attack)));
    next_turn(&mut duel);
    let hole = set(&mut duel, BOB, "HOLE", 0);
    next_turn(&mut duel);
    let hand_before = duel.state().participant(ALICE).hand().len();

    act(&mut duel, ALICE, activate(jar, &[]));
    act(&mut duel, BOB, activate(hole, &[scout]));

    let chain = duel.state().chain();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.peek_top().map(|e| e.source), Some(hole));
    assert_eq!(chain.priority(), Some(ALICE));

    act(&mut duel, ALICE, Intent::Pass);
    assert_eq!(location(&duel, scout), Some(Location::MonsterZone(0)));
    act(&mut duel, BOB, Intent::Pass);

    assert!(duel.state().chain().is_empty());
    let alice = duel.state().participant(ALICE);
    let graveyard: Vec<_> = alice.graveyard().iter().map(|c| c.id).collect();
    assert_eq!(graveyard, vec![scout, jar]);
    assert_eq!(alice.hand().len(), hand_before + 1);
    assert_eq!(location(&duel, hole), Some(Location::Graveyard));
    assert_conserved(&duel);
}

/// While a chain is open only the priority holder acts, and only by
/// passing or activating.
#[test]
fn test_open_chain_blocks_other_intents() {
    let mut duel = duel(&["JAR", "SCOUT"], &[]);
    advance_to(&mut duel, Phase::Main1);
    let jar = set(&mut duel, ALICE, "JAR", 0);
    next_turn(&mut duel);
    next_turn(&mut duel);
    let scout = in_hand(&duel, ALICE, "SCOUT");

    act(&mut duel, ALICE, activate(jar, &[]));

    assert_eq!(reject(&mut duel, ALICE, Intent::Pass), Rejection::NoPriority(ALICE));
    assert_eq!(
        reject(&mut duel, ALICE, Intent::Place(PlaceRequest::monster(scout, 0, Position::Attack))),
        Rejection::ChainPending
    );
    assert_eq!(reject(&mut duel, ALICE, Intent::EndTurn), Rejection::ChainPending);
    assert!(matches!(
        reject(&mut duel, ALICE, Intent::ChangePhase { target: Phase::Battle }),
        Rejection::IllegalPhaseTransition { .. }
    ));

    act(&mut duel, BOB, Intent::Pass);
    assert_eq!(duel.state().chain().priority(), Some(ALICE));
    act(&mut duel, ALICE, Intent::Pass);
    assert!(duel.state().chain().is_empty());
}

/// Passing with no chain is rejected.
#[test]
fn test_pass_without_chain() {
    let mut duel = duel(&[], &[]);
    assert_eq!(reject(&mut duel, ALICE, Intent::Pass), Rejection::NothingToResolve);
}

/// A link whose targets left the field fizzles, and its card is still
/// sent to the graveyard.
#[test]
fn test_fizzle_when_target_gone() {
    let mut duel = duel(&["HOLE"], &["WARRIOR", "BOLT"]);
    advance_to(&mut duel, Phase::Main1);
    let hole = set(&mut duel, ALICE, "HOLE", 0);
    next_turn(&mut duel);
    let warrior = summon(&mut duel, BOB, "WARRIOR", 0);
    let bolt = set(&mut duel, BOB, "BOLT", 1);
    next_turn(&mut duel);

    act(&mut duel, ALICE, activate(hole, &[warrior]));
    act(&mut duel, BOB, activate(bolt, &[warrior]));
    act(&mut duel, ALICE, Intent::Pass);
    act(&mut duel, BOB, Intent::Pass);

    let bob = duel.state().participant(BOB);
    let graveyard: Vec<_> = bob.graveyard().iter().map(|c| c.id).collect();
    assert_eq!(graveyard, vec![warrior, bolt]);
    assert_eq!(location(&duel, hole), Some(Location::Graveyard));
    assert_conserved(&duel);
}
