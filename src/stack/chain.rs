//! The chain: a LIFO stack of activated effects with priority passing.
//!
//! Activations are pushed as numbered links. After each push the
//! activator's opponent holds priority and may respond with another link
//! or pass. When both participants pass in a row, the whole chain resolves
//! top-first and nothing else happens until it is empty.
//!
//! ```
//! use duel_engine::core::{InstanceId, PlayerId};
//! use duel_engine::effects::Effect;
//! use duel_engine::stack::{Chain, PassOutcome};
//!
//! let mut chain = Chain::new();
//! chain.push(InstanceId(1), PlayerId::FIRST, Some(Effect::Draw { count: 1 }), Default::default());
//! assert_eq!(chain.priority(), Some(PlayerId::SECOND));
//!
//! assert_eq!(chain.pass(PlayerId::SECOND), Ok(PassOutcome::Continue));
//! assert_eq!(chain.pass(PlayerId::FIRST), Ok(PassOutcome::Resolve));
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::action::Targets;
use crate::core::entity::InstanceId;
use crate::core::error::{EngineResult, Rejection};
use crate::core::player::PlayerId;
use crate::core::state::MatchState;
use crate::effects::{resolve_entry, Effect, ResolveResult};

/// One link on the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// 1-based position in the chain.
    pub link: u32,

    /// The card that was activated.
    pub source: InstanceId,

    /// Who activated it.
    pub controller: PlayerId,

    pub effect: Option<Effect>,

    pub targets: Targets,
}

/// What a pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// Priority moved to the other participant.
    Continue,
    /// Both participants passed; the chain should resolve.
    Resolve,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Index 0 = first link, last = top.
    entries: Vec<ChainEntry>,

    priority: Option<PlayerId>,

    consecutive_passes: u8,
}

impl Chain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Links from first to top.
    #[must_use]
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    #[must_use]
    pub fn peek_top(&self) -> Option<&ChainEntry> {
        self.entries.last()
    }

    /// Seat that may respond or pass. `None` while the chain is empty.
    #[must_use]
    pub fn priority(&self) -> Option<PlayerId> {
        self.priority
    }

    #[must_use]
    pub fn contains(&self, source: InstanceId) -> bool {
        self.entries.iter().any(|e| e.source == source)
    }

    /// Add a link. Priority goes to the activator's opponent.
    pub fn push(
        &mut self,
        source: InstanceId,
        controller: PlayerId,
        effect: Option<Effect>,
        targets: Targets,
    ) -> u32 {
        let link = self.entries.len() as u32 + 1;
        self.entries.push(ChainEntry {
            link,
            source,
            controller,
            effect,
            targets,
        });
        self.priority = Some(controller.opponent());
        self.consecutive_passes = 0;
        link
    }

    /// The priority holder declines to respond.
    pub fn pass(&mut self, player: PlayerId) -> EngineResult<PassOutcome> {
        let holder = self.priority.ok_or(Rejection::NothingToResolve)?;
        if holder != player {
            return Err(Rejection::NoPriority(player));
        }

        self.consecutive_passes += 1;
        if self.consecutive_passes >= 2 {
            Ok(PassOutcome::Resolve)
        } else {
            self.priority = Some(player.opponent());
            Ok(PassOutcome::Continue)
        }
    }

    /// Remove the top link.
    pub fn pop(&mut self) -> Option<ChainEntry> {
        let entry = self.entries.pop();
        if self.entries.is_empty() {
            self.priority = None;
            self.consecutive_passes = 0;
        }
        entry
    }
}

/// Resolve every link, top first, until the chain is empty.
///
/// Returns each link number with its result, in resolution order.
pub fn resolve_all(state: &mut MatchState) -> Vec<(u32, ResolveResult)> {
    let mut resolved = Vec::with_capacity(state.chain.len());
    while let Some(entry) = state.chain.pop() {
        let result = resolve_entry(state, &entry);
        trace!(link = entry.link, source = %entry.source, ?result, "chain link resolved");
        resolved.push((entry.link, result));
    }
    resolved
}
