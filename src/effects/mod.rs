//! Card effects.
//!
//! - `Effect`: the closed set of effect kinds a card can carry
//! - `validate_targets`: activation-time target checks
//! - `resolve_entry`: applies one chain link to match state
//!
//! New effect kinds are added as enum variants with a target rule and a
//! resolution arm; nothing else in the engine needs to change.

mod effect;
mod resolver;
mod targeting;

pub use effect::{Effect, SummonSource, TargetRule};
pub use resolver::{resolve_entry, ResolveResult};
pub use targeting::{source_location, validate_targets};
