//! # duel-engine
//!
//! Authoritative rules engine for two-player trading card duels.
//!
//! The engine owns per-match state, enforces phase sequencing, resolves
//! summons, spell/trap activation and combat, and runs a last-in-first-out
//! effect chain. Callers deliver one intent at a time for a participant;
//! the engine either commits it and returns the new state or rejects it
//! and leaves the match untouched.
//!
//! ## Design Principles
//!
//! 1. **Validate, then commit**: each intent runs against a working copy
//!    of the state. `im` persistent vectors make the copy O(1).
//!
//! 2. **Single writer per match**: the store gives every match its own
//!    worker thread; matches share no mutable state.
//!
//! 3. **Closed effect set**: effects are an enum resolved by one function,
//!    so new effect kinds never touch engine invariants.
//!
//! ## Modules
//!
//! - `core`: identifiers, seats, phases, intents, errors, config, state
//! - `cards`: catalog definitions, per-match instances, catalog lookup
//! - `zones`: locations and card movement
//! - `effects`: effect kinds, targeting, resolution
//! - `stack`: the chain
//! - `rules`: phase, summon, activation and battle rules; `Duel`
//! - `ai`: the built-in opponent
//! - `store`: running matches, one worker per match
//! - `snapshot`: binary snapshots and perspective views

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod snapshot;
pub mod stack;
pub mod store;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, EngineResult, InstanceId, Intent, MatchConfig, MatchId, MatchState, ParticipantId,
    ParticipantState, Phase, PlaceRequest, PlayerId, PlayerMap, Position, Rejection,
};

pub use crate::cards::{
    Attribute, CardCatalog, CardCode, CardDefinition, CardInstance, CardKind, CardRegistry, MonsterStats,
    SpellKind, TrapKind,
};

pub use crate::zones::{Location, ZoneKind};

pub use crate::effects::{Effect, ResolveResult, SummonSource};

pub use crate::stack::{Chain, ChainEntry};

pub use crate::rules::{adjudicate, BattleOutcome, Duel, GameResult, Seat};

pub use crate::ai::{Opponent, ScriptedOpponent};

pub use crate::store::MatchStore;

pub use crate::snapshot::{view_for, MatchView};
