//! Effect resolution stack.
//!
//! Spells and traps do not resolve when activated. They are pushed onto the
//! chain as links, participants trade priority to respond, and the chain
//! then resolves in strict LIFO order.

mod chain;

pub use chain::{resolve_all, Chain, ChainEntry, PassOutcome};
