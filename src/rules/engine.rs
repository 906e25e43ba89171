//! Per-match orchestration.
//!
//! `Duel` owns one `MatchState` and applies intents with
//! validate-then-commit: every intent runs against a working copy of the
//! state, which replaces the live state only if the intent is accepted.
//! `im` vectors make the copy cheap.
//!
//! When a built-in opponent is attached, the duel hands it control
//! whenever it becomes the active participant or holds chain priority,
//! before returning to the caller.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::ai::{generate_ai_deck, Opponent, ScriptedOpponent};
use crate::cards::{CardDefinition, CardInstance};
use crate::core::action::Intent;
use crate::core::config::MatchConfig;
use crate::core::entity::{InstanceId, MatchId};
use crate::core::error::{EngineResult, Rejection};
use crate::core::player::{ParticipantId, PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::{MatchState, ParticipantState};

use super::{activation, battle, phase, summon};

/// Upper bound on opponent hand-offs per request.
const MAX_OPPONENT_STEPS: usize = 8;

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Decide the match from life points, if it is over.
///
/// The engine never ends a match on its own; hosts call this after each
/// accepted intent if they want life-point wins.
#[must_use]
pub fn adjudicate(state: &MatchState) -> Option<GameResult> {
    let out: Vec<PlayerId> = state
        .participants()
        .filter(|(_, p)| p.life_points() <= 0)
        .map(|(seat, _)| seat)
        .collect();
    match out.as_slice() {
        [] => None,
        [loser] => Some(GameResult::Winner(loser.opponent())),
        _ => Some(GameResult::Draw),
    }
}

/// One side of a new duel.
#[derive(Clone, Debug)]
pub struct Seat {
    pub participant: ParticipantId,
    /// Deck list, top card first.
    pub deck: Vec<Arc<CardDefinition>>,
    pub is_ai: bool,
}

impl Seat {
    pub fn human(participant: impl Into<ParticipantId>, deck: Vec<Arc<CardDefinition>>) -> Self {
        Self {
            participant: participant.into(),
            deck,
            is_ai: false,
        }
    }

    #[must_use]
    pub fn ai(deck: Vec<Arc<CardDefinition>>) -> Self {
        Self {
            participant: ParticipantId::ai(),
            deck,
            is_ai: true,
        }
    }
}

/// A running match.
pub struct Duel {
    state: MatchState,
    config: MatchConfig,
    opponent: Option<Box<dyn Opponent>>,
}

impl std::fmt::Debug for Duel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Duel")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("opponent", &self.opponent.is_some())
            .finish()
    }
}

impl Duel {
    /// Deal a new duel: build instances, optionally shuffle, draw opening
    /// hands. The first seat starts in `DRAW` of turn 1.
    pub fn new(match_id: MatchId, config: MatchConfig, first: Seat, second: Seat) -> Self {
        let mut next_id = InstanceId::new(0);
        let mut build = |seat: Seat, owner: PlayerId| {
            let deck = seat
                .deck
                .into_iter()
                .map(|definition| {
                    let id = next_id;
                    next_id = next_id.next();
                    CardInstance::new(id, definition, owner)
                })
                .collect();
            ParticipantState::new(seat.participant, seat.is_ai, deck, config.starting_life)
        };
        let participants = PlayerMap::pair(build(first, PlayerId::FIRST), build(second, PlayerId::SECOND));

        let mut state = MatchState::new(match_id, participants, PlayerId::FIRST, next_id.raw());

        let mut shuffles = GameRng::new(config.seed).stream("shuffle");
        for (_, participant) in state.participants.iter_mut() {
            if config.shuffle_decks {
                participant.shuffle_deck(&mut shuffles);
            }
            participant.draw(config.opening_hand);
        }
        phase::begin_draw(&mut state, &config);

        Self {
            state,
            config,
            opponent: None,
        }
    }

    /// A duel against the scripted opponent with a generated deck.
    pub fn versus_ai(
        match_id: MatchId,
        config: MatchConfig,
        participant: ParticipantId,
        deck: Vec<Arc<CardDefinition>>,
    ) -> Self {
        let mut rng = GameRng::new(config.seed).stream("ai-deck");
        let ai_deck = generate_ai_deck(&mut rng, config.ai_deck_size);

        let mut duel = Self::new(match_id, config, Seat::human(participant, deck), Seat::ai(ai_deck))
            .with_opponent(Box::new(ScriptedOpponent::new()));
        duel.drive_opponent();
        duel
    }

    /// Attach an opponent that plays the AI seat.
    #[must_use]
    pub fn with_opponent(mut self, opponent: Box<dyn Opponent>) -> Self {
        self.opponent = Some(opponent);
        self
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Apply a participant's intent, then let the opponent act if it is
    /// now its turn or its priority.
    pub fn submit(&mut self, participant: &ParticipantId, intent: Intent) -> EngineResult<&MatchState> {
        let seat = self
            .state
            .seat_of(participant)
            .ok_or_else(|| Rejection::NotAParticipant(participant.clone()))?;
        if self.state.participant(seat).is_ai() && self.opponent.is_some() {
            return Err(Rejection::NotAParticipant(participant.clone()));
        }

        self.act(seat, intent)?;
        self.drive_opponent();
        Ok(&self.state)
    }

    /// Validate and commit one intent for a seat.
    pub fn act(&mut self, seat: PlayerId, intent: Intent) -> EngineResult<()> {
        if !seat.is_seat() {
            debug!(%seat, intent = intent.label(), "intent from unknown seat");
            return Err(Rejection::NotYourTurn(seat));
        }
        let mut working = self.state.clone();

        if let Err(rejection) = apply(&mut working, &self.config, seat, &intent) {
            debug!(%seat, intent = intent.label(), %rejection, "intent rejected");
            return Err(rejection);
        }

        trace!(%seat, intent = intent.label(), turn = working.turn, phase = %working.phase, "intent accepted");
        working.record(seat, intent);
        debug_assert_eq!(working.audit(), Ok(()));
        self.state = working;
        Ok(())
    }

    fn drive_opponent(&mut self) {
        let Some(mut opponent) = self.opponent.take() else {
            return;
        };
        let Some(seat) = self.state.participants.find(ParticipantState::is_ai) else {
            self.opponent = Some(opponent);
            return;
        };

        for _ in 0..MAX_OPPONENT_STEPS {
            if !self.state.chain.is_empty() {
                if self.state.chain.priority() != Some(seat) {
                    break;
                }
                opponent.respond(self, seat);
                if self.state.chain.priority() == Some(seat) && self.act(seat, Intent::Pass).is_err() {
                    break;
                }
                continue;
            }

            if self.state.active != seat {
                break;
            }

            let turn = self.state.turn;
            opponent.take_turn(self, seat);
            if self.state.active == seat && self.state.turn == turn {
                warn!(%seat, turn, "opponent did not end its turn, ending it");
                if let Err(rejection) = self.act(seat, Intent::EndTurn) {
                    warn!(%seat, %rejection, "could not end opponent turn");
                    break;
                }
            }
        }

        self.opponent = Some(opponent);
    }
}

/// Dispatch an intent to its rule.
fn apply(state: &mut MatchState, config: &MatchConfig, seat: PlayerId, intent: &Intent) -> EngineResult<()> {
    match intent {
        Intent::ChangePhase { target } => phase::change_phase(state, config, seat, *target),
        Intent::Draw => phase::request_draw(state, seat),
        Intent::Place(request) => summon::place_card(state, seat, request),
        Intent::Activate { card, targets } => activation::activate(state, seat, *card, targets),
        Intent::Pass => activation::pass(state, seat),
        Intent::Attack { attacker, target } => {
            battle::declare_attack(state, seat, *attacker, *target).map(|_| ())
        }
        Intent::EndTurn => phase::end_turn(state, config, seat),
    }
}
