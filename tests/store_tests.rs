//! Match store tests: lifecycle, routing and the built-in opponent.

mod common;

use std::sync::Arc;
use std::thread;

use common::{deck, registry};
use duel_engine::cards::CardCode;
use duel_engine::core::{MatchConfig, ParticipantId, Phase, PlaceRequest, PlayerId, Position, Rejection};
use duel_engine::snapshot::{decode, encode, CardView};
use duel_engine::store::MatchStore;

fn store() -> MatchStore {
    MatchStore::new(Arc::new(registry()), MatchConfig::default())
}

fn alice() -> ParticipantId {
    ParticipantId::from("alice")
}

fn bob() -> ParticipantId {
    ParticipantId::from("bob")
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Starting a match deals opening hands and waits in the human's DRAW.
#[test]
fn test_start_match_against_ai() {
    let store = store();
    let state = store.start_match(&alice(), &deck(&[], "WARRIOR")).unwrap();

    assert_eq!(state.phase(), Phase::Draw);
    assert_eq!(state.turn(), 1);
    assert_eq!(state.active_player(), PlayerId::FIRST);
    assert_eq!(state.participant(PlayerId::FIRST).id(), &alice());

    let ai = state.participant(PlayerId::SECOND);
    assert!(ai.is_ai());
    assert_eq!(ai.id().as_str(), ParticipantId::AI);
    for (_, side) in state.participants() {
        assert_eq!(side.hand().len(), 5);
        assert_eq!(side.deck().len(), 35);
        assert_eq!(side.life_points(), 8000);
    }
    assert_eq!(state.audit(), Ok(()));
    assert_eq!(store.len(), 1);
}

/// Ending the human's turn lets the opponent play a whole turn.
#[test]
fn test_ai_takes_its_turn() {
    let store = store();
    store.start_match(&alice(), &deck(&[], "WARRIOR")).unwrap();

    let state = store.request_end_turn(&alice()).unwrap();

    assert_eq!(state.turn(), 3);
    assert_eq!(state.active_player(), PlayerId::FIRST);
    assert_eq!(state.phase(), Phase::Draw);
    assert_eq!(state.participant(PlayerId::FIRST).hand().len(), 6);
    assert!(state
        .history()
        .iter()
        .any(|record| record.player == PlayerId::SECOND && record.turn == 2));
    assert_eq!(state.audit(), Ok(()));
}

/// Unknown catalog codes are rejected before a match exists.
#[test]
fn test_unknown_card_code() {
    let store = store();
    let mut codes = deck(&[], "WARRIOR");
    codes[3] = CardCode::from("MISSING");

    let err = store.start_match(&alice(), &codes).unwrap_err();
    assert_eq!(err, Rejection::UnknownCard(CardCode::from("MISSING")));
    assert!(store.is_empty());
}

/// The opponent's reserved id cannot be used by a human.
#[test]
fn test_ai_id_reserved() {
    let store = store();
    let err = store.start_match(&ParticipantId::ai(), &deck(&[], "WARRIOR")).unwrap_err();
    assert_eq!(err, Rejection::NotAParticipant(ParticipantId::ai()));
}

/// Ending a match is idempotent and later requests are rejected.
#[test]
fn test_end_match() {
    let store = store();
    store.start_match(&alice(), &deck(&[], "WARRIOR")).unwrap();

    assert!(store.end_match(&alice()));
    assert!(!store.end_match(&alice()));
    assert!(store.is_empty());
    assert_eq!(store.match_of(&alice()), None);

    let err = store.request_end_turn(&alice()).unwrap_err();
    assert_eq!(err, Rejection::NotAParticipant(alice()));
}

/// A second start replaces the participant's running match.
#[test]
fn test_restart_replaces_match() {
    let store = store();
    store.start_match(&alice(), &deck(&[], "WARRIOR")).unwrap();
    let first = store.match_of(&alice());

    store.start_match(&alice(), &deck(&[], "GOBLIN")).unwrap();

    assert_eq!(store.len(), 1);
    assert_ne!(store.match_of(&alice()), first);
    let state = store.state(&alice()).unwrap();
    assert_eq!(state.turn(), 1);
}

// =============================================================================
// Routing
// =============================================================================

/// Requests from someone without a match are rejected.
#[test]
fn test_unknown_participant() {
    let store = store();
    let err = store
        .request_phase_change(&bob(), Phase::Standby)
        .unwrap_err();
    assert_eq!(err, Rejection::NotAParticipant(bob()));
    assert!(store.snapshot(&bob()).is_err());
}

/// Two humans share a match; each request is checked against its sender.
#[test]
fn test_start_versus() {
    let store = store();
    let alice_deck = deck(&["WARRIOR"], "GOBLIN");
    let bob_deck = deck(&[], "SCOUT");
    store
        .start_versus((&alice(), &alice_deck), (&bob(), &bob_deck))
        .unwrap();
    assert_eq!(store.match_of(&alice()), store.match_of(&bob()));

    let err = store.request_phase_change(&bob(), Phase::Standby).unwrap_err();
    assert_eq!(err, Rejection::NotYourTurn(PlayerId::SECOND));

    store.request_phase_change(&alice(), Phase::Standby).unwrap();
    let state = store.request_phase_change(&alice(), Phase::Main1).unwrap();
    let warrior = state.participant(PlayerId::FIRST).hand()[0].id;
    store
        .request_place_card(&alice(), PlaceRequest::monster(warrior, 0, Position::Attack))
        .unwrap();
    let state = store.request_end_turn(&alice()).unwrap();

    assert_eq!(state.active_player(), PlayerId::SECOND);
    assert_eq!(state.participant(PlayerId::SECOND).hand().len(), 6);
    assert_eq!(store.state(&bob()).unwrap(), state);

    assert!(store.end_match(&bob()));
    assert_eq!(store.match_of(&alice()), None);
}

/// One participant cannot take both seats of a match.
#[test]
fn test_versus_same_participant_rejected() {
    let store = store();
    let cards = deck(&[], "GOBLIN");
    let err = store
        .start_versus((&alice(), &cards), (&alice(), &cards))
        .unwrap_err();

    assert_eq!(err, Rejection::NotAParticipant(alice()));
    assert!(store.is_empty());
    assert_eq!(store.match_of(&alice()), None);
}

/// A rejected versus start leaves the participant's running match alone.
#[test]
fn test_versus_rejection_keeps_running_match() {
    let store = store();
    store.start_match(&alice(), &deck(&[], "WARRIOR")).unwrap();
    let running = store.match_of(&alice());

    let cards = deck(&[], "GOBLIN");
    assert!(store.start_versus((&alice(), &cards), (&alice(), &cards)).is_err());
    assert_eq!(store.match_of(&alice()), running);
    assert_eq!(store.len(), 1);
}

/// Separate matches run side by side.
#[test]
fn test_concurrent_matches() {
    let store = store();
    let players: Vec<ParticipantId> = (0..4).map(|i| ParticipantId::new(format!("player-{i}"))).collect();

    thread::scope(|scope| {
        for player in &players {
            let store = &store;
            scope.spawn(move || {
                store.start_match(player, &deck(&[], "KNIGHT")).unwrap();
                for _ in 0..3 {
                    store.request_end_turn(player).unwrap();
                }
            });
        }
    });

    assert_eq!(store.len(), 4);
    for player in &players {
        let state = store.state(player).unwrap();
        assert_eq!(state.turn(), 7);
        assert_eq!(state.audit(), Ok(()));
    }
}

/// Racing starts for one participant leave exactly one registered match.
#[test]
fn test_concurrent_restarts_keep_one_match() {
    let store = store();

    thread::scope(|scope| {
        for _ in 0..8 {
            let store = &store;
            scope.spawn(move || {
                store.start_match(&alice(), &deck(&[], "KNIGHT")).unwrap();
            });
        }
    });

    assert_eq!(store.len(), 1);
    let id = store.match_of(&alice()).expect("alice has a match");
    assert_eq!(store.state(&alice()).unwrap().match_id(), id);
}

/// Starting a versus match ends the matches both participants were in.
#[test]
fn test_versus_replaces_running_matches() {
    let store = store();
    store.start_match(&alice(), &deck(&[], "WARRIOR")).unwrap();
    store.start_match(&bob(), &deck(&[], "WARRIOR")).unwrap();
    assert_eq!(store.len(), 2);

    let cards = deck(&[], "GOBLIN");
    let state = store.start_versus((&alice(), &cards), (&bob(), &cards)).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.match_of(&alice()), Some(state.match_id()));
    assert_eq!(store.match_of(&bob()), Some(state.match_id()));
}

// =============================================================================
// Snapshots
// =============================================================================

/// The snapshot shows the requester's hand and hides the opponent's.
#[test]
fn test_snapshot_hides_opponent_hand() {
    let store = store();
    store.start_match(&alice(), &deck(&[], "WARRIOR")).unwrap();

    let view = store.snapshot(&alice()).unwrap();

    assert_eq!(view.viewer, PlayerId::FIRST);
    assert!(view.is_your_turn);
    assert_eq!(view.you.hand.len(), 5);
    assert!(view.you.hand.iter().all(|c| !c.is_hidden()));
    assert_eq!(view.opponent.hand.len(), 5);
    assert!(view.opponent.hand.iter().all(CardView::is_hidden));
    assert_eq!(view.opponent.deck_count, 35);
    assert_eq!(view.opponent.life_points, 8000);
}

/// Face-down cards on the opponent's field are hidden; face-up ones are not.
#[test]
fn test_snapshot_field_visibility() {
    let store = store();
    store
        .start_versus((&alice(), &deck(&["WALL", "JAR"], "GOBLIN")), (&bob(), &deck(&[], "GOBLIN")))
        .unwrap();
    store.request_phase_change(&alice(), Phase::Standby).unwrap();
    let state = store.request_phase_change(&alice(), Phase::Main1).unwrap();
    let hand = state.participant(PlayerId::FIRST).hand();
    let (wall, jar) = (hand[0].id, hand[1].id);
    store
        .request_place_card(&alice(), PlaceRequest::monster(wall, 0, Position::Defense))
        .unwrap();
    store
        .request_place_card(&alice(), PlaceRequest::spell_trap(jar, 0, Position::Set))
        .unwrap();

    let view = store.snapshot(&bob()).unwrap();
    let monster = view.opponent.monster_zones[0].as_ref().expect("wall on field");
    assert!(!monster.is_hidden());
    let set = view.opponent.spell_trap_zones[0].as_ref().expect("jar on field");
    assert!(set.is_hidden());
    assert_eq!(set.id(), jar);

    let own = store.snapshot(&alice()).unwrap();
    assert!(own.you.spell_trap_zones[0].as_ref().is_some_and(|c| !c.is_hidden()));
}

/// A binary snapshot restores the exact state.
#[test]
fn test_binary_snapshot_round_trip() {
    let store = store();
    store.start_match(&alice(), &deck(&["POT"], "WARRIOR")).unwrap();
    store.request_end_turn(&alice()).unwrap();
    let state = store.state(&alice()).unwrap();

    let bytes = encode(&state).unwrap();
    let restored = decode(&bytes).unwrap();

    assert_eq!(restored, state);
    assert!(decode(&bytes[..bytes.len() / 2]).is_err());
}
