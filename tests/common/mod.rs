//! Shared fixtures for integration tests.
//!
//! Decks are dealt without shuffling, so the first five codes of a deck
//! list are the opening hand and the sixth is the first turn draw.

#![allow(dead_code)]

use std::sync::Arc;

use duel_engine::cards::{Attribute, CardCode, CardDefinition, CardRegistry, MonsterStats, SpellKind, TrapKind};
use duel_engine::core::{InstanceId, Intent, MatchConfig, MatchId, Phase, PlayerId, Rejection};
use duel_engine::effects::{Effect, SummonSource};
use duel_engine::rules::{Duel, Seat};
use duel_engine::{CardCatalog, ScriptedOpponent};

pub const ALICE: PlayerId = PlayerId::FIRST;
pub const BOB: PlayerId = PlayerId::SECOND;

pub fn registry() -> CardRegistry {
    let monster = |code: &str, name: &str, atk, def, level| {
        CardDefinition::monster(code, name, MonsterStats::new(atk, def, level, Attribute::Earth))
    };
    [
        monster("WARRIOR", "Sword Warrior", 1800, 1200, 4),
        monster("GOBLIN", "Cave Goblin", 1200, 1000, 4),
        monster("SCOUT", "Lone Scout", 1000, 800, 3),
        monster("WALL", "Stone Wall", 800, 1500, 4),
        monster("KNIGHT", "Even Knight", 1500, 1500, 4),
        monster("OGRE", "Hill Ogre", 2200, 1800, 5),
        monster("DRAGON", "Elder Dragon", 3000, 2500, 8),
        CardDefinition::spell("POT", "Pot of Plenty", SpellKind::Normal).with_effect(Effect::Draw { count: 1 }),
        CardDefinition::spell("FISSURE", "Fissure", SpellKind::Normal).with_effect(Effect::DESTROY_ONE),
        CardDefinition::spell("BOLT", "Quick Bolt", SpellKind::QuickPlay).with_effect(Effect::DESTROY_ONE),
        CardDefinition::spell("BOUNCE", "Recall", SpellKind::Normal)
            .with_effect(Effect::ReturnToHand { max_targets: 1 }),
        CardDefinition::spell("EXILE", "Exile", SpellKind::Normal).with_effect(Effect::Banish { max_targets: 2 }),
        CardDefinition::spell("REBORN", "Rebirth", SpellKind::Normal)
            .with_effect(Effect::SpecialSummon { from: SummonSource::Graveyard }),
        CardDefinition::spell("FIELD", "Mountain", SpellKind::Field),
        CardDefinition::trap("HOLE", "Trap Hole", TrapKind::Normal).with_effect(Effect::DESTROY_ONE),
        CardDefinition::trap("JAR", "Jar of Greed", TrapKind::Normal).with_effect(Effect::Draw { count: 1 }),
        CardDefinition::trap("COUNTER", "Seal", TrapKind::Counter).with_effect(Effect::Banish { max_targets: 1 }),
    ]
    .into_iter()
    .collect()
}

/// A 40-card deck list starting with `top`, padded with `filler`.
pub fn deck(top: &[&str], filler: &str) -> Vec<CardCode> {
    let mut codes: Vec<CardCode> = top.iter().map(|c| CardCode::from(*c)).collect();
    while codes.len() < 40 {
        codes.push(CardCode::from(filler));
    }
    codes
}

fn resolve(registry: &CardRegistry, codes: &[CardCode]) -> Vec<Arc<CardDefinition>> {
    registry.resolve_deck(codes).expect("fixture deck resolves")
}

/// Alice versus Bob, both human, unshuffled.
pub fn duel(alice_top: &[&str], bob_top: &[&str]) -> Duel {
    duel_with(MatchConfig::default(), alice_top, bob_top)
}

pub fn duel_with(config: MatchConfig, alice_top: &[&str], bob_top: &[&str]) -> Duel {
    let registry = registry();
    Duel::new(
        MatchId::new(1),
        config,
        Seat::human("alice", resolve(&registry, &deck(alice_top, "GOBLIN"))),
        Seat::human("bob", resolve(&registry, &deck(bob_top, "GOBLIN"))),
    )
}

/// Alice versus the scripted opponent in the second seat.
pub fn ai_duel(alice_top: &[&str], ai_top: &[&str]) -> Duel {
    let registry = registry();
    Duel::new(
        MatchId::new(1),
        MatchConfig::default(),
        Seat::human("alice", resolve(&registry, &deck(alice_top, "GOBLIN"))),
        Seat::ai(resolve(&registry, &deck(ai_top, "GOBLIN"))),
    )
    .with_opponent(Box::new(ScriptedOpponent::new()))
}

/// Instance id of the first card with `code` in a seat's hand.
pub fn in_hand(duel: &Duel, seat: PlayerId, code: &str) -> InstanceId {
    duel.state()
        .participant(seat)
        .hand()
        .iter()
        .find(|c| c.definition.code.as_str() == code)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("{code} not in {seat}'s hand"))
}

pub fn act(duel: &mut Duel, seat: PlayerId, intent: Intent) {
    if let Err(rejection) = duel.act(seat, intent.clone()) {
        panic!("{intent:?} by {seat} rejected: {rejection}");
    }
}

pub fn reject(duel: &mut Duel, seat: PlayerId, intent: Intent) -> Rejection {
    match duel.act(seat, intent.clone()) {
        Ok(()) => panic!("{intent:?} by {seat} unexpectedly accepted"),
        Err(rejection) => rejection,
    }
}

/// Walk the active seat forward to `target`.
pub fn advance_to(duel: &mut Duel, target: Phase) {
    let seat = duel.state().active_player();
    while duel.state().phase() != target {
        let next = duel.state().phase().next();
        act(duel, seat, Intent::ChangePhase { target: next });
    }
}

/// End the current turn and walk the next seat to `MAIN_1`.
pub fn next_turn(duel: &mut Duel) {
    let seat = duel.state().active_player();
    act(duel, seat, Intent::EndTurn);
    advance_to(duel, Phase::Main1);
}

pub fn assert_conserved(duel: &Duel) {
    if let Err(violation) = duel.state().audit() {
        panic!("card conservation broken: {violation}");
    }
}
