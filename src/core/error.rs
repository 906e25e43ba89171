//! Rejection reasons.
//!
//! A rejected intent leaves the match untouched; the caller gets one of
//! these back and may retry with a different request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Position;
use super::entity::InstanceId;
use super::phase::Phase;
use super::player::{ParticipantId, PlayerId};
use crate::cards::CardCode;
use crate::zones::ZoneKind;

pub type EngineResult<T> = Result<T, Rejection>;

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("cannot move from {from} to {to}")]
    IllegalPhaseTransition { from: Phase, to: Phase },

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{zone} zone {index} is occupied")]
    ZoneOccupied { zone: ZoneKind, index: u8 },

    #[error("{card} cannot go in a {zone} zone")]
    ZoneTypeMismatch { card: InstanceId, zone: ZoneKind },

    #[error("zone index {index} is out of range")]
    InvalidZoneIndex { index: u8 },

    #[error("{card} cannot be placed in {position} position")]
    InvalidPosition { card: InstanceId, position: Position },

    #[error("cards can only be placed in a main phase, not {0}")]
    NotMainPhase(Phase),

    #[error("normal summon already used this turn")]
    NormalSummonExhausted,

    #[error("summon needs {required} tributes, {offered} available")]
    InsufficientTributes { required: usize, offered: usize },

    #[error("{card} cannot be activated: {reason}")]
    InvalidActivation {
        card: InstanceId,
        reason: ActivationBlock,
    },

    #[error("{card} cannot attack: {reason}")]
    InvalidAttacker { card: InstanceId, reason: AttackBlock },

    #[error("{0} not found")]
    CardNotFound(InstanceId),

    #[error("unknown catalog code {0}")]
    UnknownCard(CardCode),

    #[error("a chain is being built")]
    ChainPending,

    #[error("{0} does not hold priority")]
    NoPriority(PlayerId),

    #[error("no chain to resolve")]
    NothingToResolve,

    #[error("no draw is pending")]
    DrawUnavailable,

    #[error("{0} is not in a match")]
    NotAParticipant(ParticipantId),

    #[error("no such match")]
    NoSuchMatch,

    #[error("match has been closed")]
    MatchClosed,
}

/// Why an activation was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActivationBlock {
    #[error("not allowed during {0}")]
    WrongPhase(Phase),
    #[error("set this turn")]
    SetThisTurn,
    #[error("not set")]
    NotSet,
    #[error("already face-up")]
    AlreadyFaceUp,
    #[error("not a spell or trap")]
    NotSpellOrTrap,
    #[error("needs a chain to respond to")]
    NeedsChain,
    #[error("a chain is open")]
    ChainOpen,
    #[error("missing targets")]
    MissingTargets,
    #[error("takes no targets")]
    UnexpectedTargets,
    #[error("{0} is not a legal target")]
    InvalidTarget(InstanceId),
    #[error("no free zone")]
    NoFreeZone,
}

/// Why an attack declaration was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AttackBlock {
    #[error("not the battle phase ({0})")]
    WrongPhase(Phase),
    #[error("not in attack position")]
    NotAttackPosition,
    #[error("face-down")]
    FaceDown,
    #[error("already attacked or cannot attack this turn")]
    AlreadyAttacked,
}
