//! Core engine types: identifiers, seats, phases, intents, errors, RNG,
//! configuration and match state.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionRecord, Intent, PlaceRequest, Position, Targets};
pub use config::{MatchConfig, ZONE_CAPACITY};
pub use entity::{InstanceId, MatchId};
pub use error::{ActivationBlock, AttackBlock, EngineResult, Rejection};
pub use phase::Phase;
pub use player::{ParticipantId, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{InvariantViolation, MatchState, ParticipantState, ZoneRow};
