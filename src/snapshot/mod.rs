//! Match snapshots.
//!
//! - `encode`/`decode`: compact binary form of a full `MatchState`
//!   (bincode). Decoding re-checks card conservation before handing the
//!   state back.
//! - `view_for`: what one participant is allowed to see.

mod view;

pub use view::{view_for, CardView, MatchView, ParticipantView, VisibleCard, ZoneVisibility};

use thiserror::Error;

use crate::core::state::{InvariantViolation, MatchState};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),

    #[error("snapshot is inconsistent: {0}")]
    Corrupt(#[from] InvariantViolation),
}

pub fn encode(state: &MatchState) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(state).map_err(SnapshotError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<MatchState, SnapshotError> {
    let state: MatchState = bincode::deserialize(bytes).map_err(SnapshotError::Decode)?;
    state.audit()?;
    Ok(state)
}
