//! Match state store.
//!
//! Maps participants to their running match and routes each boundary
//! request to that match's worker. Requests for different matches run
//! concurrently; requests for one match are applied in order by its worker.
//!
//! ```
//! use std::sync::Arc;
//! use duel_engine::cards::{Attribute, CardCode, CardDefinition, CardRegistry, MonsterStats};
//! use duel_engine::core::{MatchConfig, ParticipantId, Phase};
//! use duel_engine::store::MatchStore;
//!
//! let registry: CardRegistry = [CardDefinition::monster(
//!     "IMP", "Imp", MonsterStats::new(1300, 1400, 4, Attribute::Dark),
//! )]
//! .into_iter()
//! .collect();
//!
//! let store = MatchStore::new(Arc::new(registry), MatchConfig::default());
//! let alice = ParticipantId::from("alice");
//! let deck = vec![CardCode::from("IMP"); 40];
//!
//! let state = store.start_match(&alice, &deck).unwrap();
//! assert_eq!(state.phase(), Phase::Draw);
//! assert_eq!(state.turn(), 1);
//!
//! assert!(store.end_match(&alice));
//! assert!(!store.end_match(&alice));
//! ```

mod actor;

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use tracing::info;

use crate::cards::{CardCatalog, CardCode};
use crate::core::action::{Intent, PlaceRequest, Targets};
use crate::core::config::MatchConfig;
use crate::core::entity::{InstanceId, MatchId};
use crate::core::error::{EngineResult, Rejection};
use crate::core::phase::Phase;
use crate::core::player::ParticipantId;
use crate::core::state::MatchState;
use crate::rules::{Duel, Seat};
use crate::snapshot::MatchView;

use actor::{MatchClient, MatchHandle};

/// Shared catalog handle.
pub type SharedCatalog = Arc<dyn CardCatalog + Send + Sync>;

#[derive(Default)]
struct Registry {
    matches: FxHashMap<MatchId, MatchHandle>,
    seats: FxHashMap<ParticipantId, MatchId>,
    next_match_id: u64,
}

impl Registry {
    fn allocate(&mut self) -> MatchId {
        self.next_match_id += 1;
        MatchId::new(self.next_match_id)
    }

    /// Unregister the match a participant is in, returning its handle.
    fn remove_for(&mut self, participant: &ParticipantId) -> Option<MatchHandle> {
        let id = self.seats.remove(participant)?;
        let handle = self.matches.remove(&id)?;
        for other in &handle.participants {
            self.seats.remove(other);
        }
        Some(handle)
    }
}

/// All running matches.
pub struct MatchStore {
    catalog: SharedCatalog,
    config: MatchConfig,
    registry: RwLock<Registry>,
}

impl std::fmt::Debug for MatchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchStore")
            .field("config", &self.config)
            .field("matches", &self.len())
            .finish()
    }
}

impl MatchStore {
    pub fn new(catalog: SharedCatalog, config: MatchConfig) -> Self {
        Self {
            catalog,
            config,
            registry: RwLock::new(Registry::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Number of running matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(|r| r.matches.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Match a participant is seated in.
    #[must_use]
    pub fn match_of(&self, participant: &ParticipantId) -> Option<MatchId> {
        self.read(|r| r.seats.get(participant).copied())
    }

    /// Start a match against the built-in opponent. Any match the
    /// participant was already in is ended first.
    pub fn start_match(&self, participant: &ParticipantId, deck: &[CardCode]) -> EngineResult<MatchState> {
        if participant.as_str() == ParticipantId::AI {
            return Err(Rejection::NotAParticipant(participant.clone()));
        }
        let deck = self.catalog.resolve_deck(deck)?;

        let state = self.install(vec![participant.clone()], |id| {
            Duel::versus_ai(id, self.config.clone(), participant.clone(), deck)
        });
        info!(id = %state.match_id(), %participant, "match started against ai");
        Ok(state)
    }

    /// Start a match between two participants. `first` takes turn 1.
    pub fn start_versus(
        &self,
        first: (&ParticipantId, &[CardCode]),
        second: (&ParticipantId, &[CardCode]),
    ) -> EngineResult<MatchState> {
        for participant in [first.0, second.0] {
            if participant.as_str() == ParticipantId::AI {
                return Err(Rejection::NotAParticipant(participant.clone()));
            }
        }
        if first.0 == second.0 {
            return Err(Rejection::NotAParticipant(second.0.clone()));
        }
        let first_deck = self.catalog.resolve_deck(first.1)?;
        let second_deck = self.catalog.resolve_deck(second.1)?;

        let state = self.install(vec![first.0.clone(), second.0.clone()], |id| {
            Duel::new(
                id,
                self.config.clone(),
                Seat::human(first.0.clone(), first_deck),
                Seat::human(second.0.clone(), second_deck),
            )
        });
        info!(id = %state.match_id(), first = %first.0, second = %second.0, "match started");
        Ok(state)
    }

    pub fn request_phase_change(&self, participant: &ParticipantId, target: Phase) -> EngineResult<MatchState> {
        self.apply(participant, Intent::ChangePhase { target })
    }

    pub fn request_draw(&self, participant: &ParticipantId) -> EngineResult<MatchState> {
        self.apply(participant, Intent::Draw)
    }

    pub fn request_place_card(&self, participant: &ParticipantId, request: PlaceRequest) -> EngineResult<MatchState> {
        self.apply(participant, Intent::Place(request))
    }

    pub fn request_activate(
        &self,
        participant: &ParticipantId,
        card: InstanceId,
        targets: impl IntoIterator<Item = InstanceId>,
    ) -> EngineResult<MatchState> {
        let targets: Targets = targets.into_iter().collect();
        self.apply(participant, Intent::Activate { card, targets })
    }

    /// Pass chain priority.
    pub fn request_pass(&self, participant: &ParticipantId) -> EngineResult<MatchState> {
        self.apply(participant, Intent::Pass)
    }

    pub fn request_attack(
        &self,
        participant: &ParticipantId,
        attacker: InstanceId,
        target: Option<InstanceId>,
    ) -> EngineResult<MatchState> {
        self.apply(participant, Intent::Attack { attacker, target })
    }

    pub fn request_end_turn(&self, participant: &ParticipantId) -> EngineResult<MatchState> {
        self.apply(participant, Intent::EndTurn)
    }

    /// Apply any intent for a participant.
    pub fn apply(&self, participant: &ParticipantId, intent: Intent) -> EngineResult<MatchState> {
        self.client_for(participant)?.apply(participant.clone(), intent)
    }

    /// Full authoritative state of the participant's match.
    pub fn state(&self, participant: &ParticipantId) -> EngineResult<MatchState> {
        self.client_for(participant)?.state()
    }

    /// The participant's filtered view of their match.
    pub fn snapshot(&self, participant: &ParticipantId) -> EngineResult<MatchView> {
        self.client_for(participant)?.view(participant.clone())
    }

    /// Release the participant's match. Returns whether one was running.
    pub fn end_match(&self, participant: &ParticipantId) -> bool {
        let handle = self.write(|r| r.remove_for(participant));
        match handle {
            Some(handle) => {
                info!(%participant, "match ended");
                // Joins the worker outside the registry lock.
                drop(handle);
                true
            }
            None => false,
        }
    }

    /// End the participants' running matches and register a new one in a
    /// single registry write. Replaced workers are joined after the lock is
    /// released.
    fn install(&self, participants: Vec<ParticipantId>, build: impl FnOnce(MatchId) -> Duel) -> MatchState {
        let (state, replaced) = self.write(|r| {
            let replaced: Vec<MatchHandle> = participants.iter().filter_map(|p| r.remove_for(p)).collect();
            let id = r.allocate();
            let duel = build(id);
            let state = duel.state().clone();

            let handle = MatchHandle::spawn(duel, participants.clone());
            for participant in participants {
                r.seats.insert(participant, id);
            }
            r.matches.insert(id, handle);
            (state, replaced)
        });
        if !replaced.is_empty() {
            info!(count = replaced.len(), "running matches replaced");
        }
        drop(replaced);
        state
    }

    fn client_for(&self, participant: &ParticipantId) -> EngineResult<MatchClient> {
        self.read(|r| {
            let id = r
                .seats
                .get(participant)
                .ok_or_else(|| Rejection::NotAParticipant(participant.clone()))?;
            r.matches.get(id).ok_or(Rejection::NoSuchMatch)?.client()
        })
    }

    fn read<T>(&self, f: impl FnOnce(&Registry) -> T) -> T {
        let guard = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Registry) -> T) -> T {
        let mut guard = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
