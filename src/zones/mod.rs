//! Zones and card movement.
//!
//! Each participant owns an ordered deck (index 0 is the top), a hand,
//! two fixed rows of `ZONE_CAPACITY` slots, a graveyard and a banished
//! pile. Every move goes through `zones::manager`, which removes the card
//! from its old zone and places it in the new one in a single step and
//! keeps the card's recorded `Location` in step.
//!
//! ## Key Types
//!
//! - `ZoneKind`: the monster row or the spell/trap row
//! - `Location`: a card's recorded position

pub mod location;
pub mod manager;

pub use location::{Location, ZoneKind};
pub use crate::core::config::ZONE_CAPACITY;
