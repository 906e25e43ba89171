//! Match state: the authoritative record of one duel.
//!
//! ## ParticipantState
//!
//! One side of the table: deck, hand, two slotted zone rows, graveyard,
//! banished pile, life points and the once-per-turn normal summon flag.
//! Zone movement lives in `zones::manager`.
//!
//! ## MatchState
//!
//! Both participants plus turn progression (active seat, phase, turn
//! counter), the chain and the accepted-intent history.
//!
//! Piles use `im` persistent vectors so the engine can take a working copy
//! of the whole state per intent and discard it on rejection.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ActionRecord;
use super::config::ZONE_CAPACITY;
use super::entity::{InstanceId, MatchId};
use super::phase::Phase;
use super::player::{ParticipantId, PlayerId, PlayerMap};
use crate::cards::CardInstance;
use crate::stack::Chain;
use crate::zones::{Location, ZoneKind};

/// One row of field slots.
pub type ZoneRow = [Option<CardInstance>; ZONE_CAPACITY];

/// One participant's side of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantState {
    pub(crate) id: ParticipantId,
    pub(crate) is_ai: bool,

    /// Index 0 is the top of the deck.
    pub(crate) deck: Vector<CardInstance>,
    pub(crate) hand: Vector<CardInstance>,
    pub(crate) monster_zones: ZoneRow,
    pub(crate) spell_trap_zones: ZoneRow,
    pub(crate) graveyard: Vector<CardInstance>,
    pub(crate) banished: Vector<CardInstance>,

    /// May go negative; winner detection is left to the host.
    pub(crate) life_points: i64,
    pub(crate) has_normal_summoned: bool,
}

impl ParticipantState {
    /// A participant with the given deck (top first) and empty zones.
    pub fn new(id: ParticipantId, is_ai: bool, deck: Vec<CardInstance>, life_points: i64) -> Self {
        Self {
            id,
            is_ai,
            deck: deck.into_iter().collect(),
            hand: Vector::new(),
            monster_zones: Default::default(),
            spell_trap_zones: Default::default(),
            graveyard: Vector::new(),
            banished: Vector::new(),
            life_points,
            has_normal_summoned: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    #[must_use]
    pub fn deck(&self) -> &Vector<CardInstance> {
        &self.deck
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    #[must_use]
    pub fn graveyard(&self) -> &Vector<CardInstance> {
        &self.graveyard
    }

    #[must_use]
    pub fn banished(&self) -> &Vector<CardInstance> {
        &self.banished
    }

    #[must_use]
    pub fn monster_zones(&self) -> &ZoneRow {
        &self.monster_zones
    }

    #[must_use]
    pub fn spell_trap_zones(&self) -> &ZoneRow {
        &self.spell_trap_zones
    }

    #[must_use]
    pub fn row(&self, kind: ZoneKind) -> &ZoneRow {
        match kind {
            ZoneKind::Monster => &self.monster_zones,
            ZoneKind::SpellTrap => &self.spell_trap_zones,
        }
    }

    pub(crate) fn row_mut(&mut self, kind: ZoneKind) -> &mut ZoneRow {
        match kind {
            ZoneKind::Monster => &mut self.monster_zones,
            ZoneKind::SpellTrap => &mut self.spell_trap_zones,
        }
    }

    #[must_use]
    pub fn life_points(&self) -> i64 {
        self.life_points
    }

    #[must_use]
    pub fn has_normal_summoned(&self) -> bool {
        self.has_normal_summoned
    }

    /// Monsters currently on the field, left to right.
    pub fn monsters(&self) -> impl Iterator<Item = &CardInstance> {
        self.monster_zones.iter().flatten()
    }

    /// Spells and traps currently on the field, left to right.
    pub fn spells_and_traps(&self) -> impl Iterator<Item = &CardInstance> {
        self.spell_trap_zones.iter().flatten()
    }
}

/// Authoritative state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) match_id: MatchId,
    pub(crate) participants: PlayerMap<ParticipantState>,

    /// Seat whose turn it is.
    pub(crate) active: PlayerId,

    /// Seat that took turn 1.
    pub(crate) first_player: PlayerId,

    pub(crate) phase: Phase,

    /// Starts at 1, incremented when a turn ends.
    pub(crate) turn: u32,

    /// Manual-draw mode: the turn draw has not been taken yet.
    pub(crate) draw_pending: bool,

    pub(crate) chain: Chain,

    /// Human-readable description of the last accepted intent.
    pub(crate) last_action: String,

    pub(crate) history: Vector<ActionRecord>,

    /// Number of instances created at match start.
    pub(crate) instance_total: u32,

    pub(crate) action_sequence: u32,
}

impl MatchState {
    /// A match at the start of turn 1, before opening hands are drawn.
    pub fn new(
        match_id: MatchId,
        participants: PlayerMap<ParticipantState>,
        first_player: PlayerId,
        instance_total: u32,
    ) -> Self {
        Self {
            match_id,
            participants,
            active: first_player,
            first_player,
            phase: Phase::Draw,
            turn: 1,
            draw_pending: false,
            chain: Chain::new(),
            last_action: String::from("Match started"),
            history: Vector::new(),
            instance_total,
            action_sequence: 0,
        }
    }

    #[must_use]
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    #[must_use]
    pub fn draw_pending(&self) -> bool {
        self.draw_pending
    }

    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    #[must_use]
    pub fn last_action(&self) -> &str {
        &self.last_action
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn participant(&self, seat: PlayerId) -> &ParticipantState {
        &self.participants[seat]
    }

    pub(crate) fn participant_mut(&mut self, seat: PlayerId) -> &mut ParticipantState {
        &mut self.participants[seat]
    }

    pub fn participants(&self) -> impl Iterator<Item = (PlayerId, &ParticipantState)> {
        self.participants.iter()
    }

    /// Seat held by a participant.
    #[must_use]
    pub fn seat_of(&self, participant: &ParticipantId) -> Option<PlayerId> {
        self.participants.find(|p| &p.id == participant)
    }

    /// The turn-1 rule: no draw and no attacks.
    #[must_use]
    pub fn is_first_turn(&self) -> bool {
        self.turn == 1
    }

    /// Seat holding an instance and its location.
    #[must_use]
    pub fn locate(&self, card: InstanceId) -> Option<(PlayerId, Location)> {
        self.participants
            .iter()
            .find_map(|(seat, p)| p.locate(card).map(|loc| (seat, loc)))
    }

    /// Look an instance up anywhere in the match.
    #[must_use]
    pub fn card(&self, card: InstanceId) -> Option<&CardInstance> {
        self.participants.iter().find_map(|(_, p)| p.card(card))
    }

    pub(crate) fn set_last_action(&mut self, text: impl Into<String>) {
        self.last_action = text.into();
    }

    pub(crate) fn record(&mut self, player: PlayerId, intent: super::action::Intent) {
        self.action_sequence += 1;
        self.history.push_back(ActionRecord::new(
            player,
            intent,
            self.turn,
            self.action_sequence,
        ));
    }

    /// Check card conservation: every instance is in exactly one zone, its
    /// recorded location matches the zone holding it, it sits on its
    /// owner's side, and no instance was created or lost.
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        let mut seen = rustc_hash::FxHashSet::default();

        for (seat, participant) in self.participants.iter() {
            for (actual, card) in participant.cards_with_location() {
                if !seen.insert(card.id) {
                    return Err(InvariantViolation::Duplicate(card.id));
                }
                if card.location != actual {
                    return Err(InvariantViolation::Misplaced {
                        card: card.id,
                        recorded: card.location,
                        actual,
                    });
                }
                if card.owner != seat {
                    return Err(InvariantViolation::WrongSide(card.id));
                }
            }
        }

        if seen.len() != self.instance_total as usize {
            return Err(InvariantViolation::CountMismatch {
                expected: self.instance_total as usize,
                found: seen.len(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{0} appears in more than one zone")]
    Duplicate(InstanceId),

    #[error("{card} records {recorded} but sits in {actual}")]
    Misplaced {
        card: InstanceId,
        recorded: Location,
        actual: Location,
    },

    #[error("{0} is on the wrong side of the table")]
    WrongSide(InstanceId),

    #[error("expected {expected} instances, found {found}")]
    CountMismatch { expected: usize, found: usize },
}
