//! Card instances - per-match card state.
//!
//! `CardInstance` is one physical copy of a catalog card inside a match.
//! It carries the facets that only make sense while the card is in play
//! (face, battle position, summon turn, attack eligibility). Moving the card
//! off the field clears them again.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, MonsterStats};
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::zones::Location;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePosition {
    Attack,
    Defense,
}

/// A card copy in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: InstanceId,

    /// Shared catalog data.
    pub definition: Arc<CardDefinition>,

    /// Seat whose deck the card started in.
    pub owner: PlayerId,

    /// Where the card currently is. Kept in step with the holding zone.
    pub location: Location,

    pub face: Face,

    /// Only set for monsters on the field.
    pub battle_position: Option<BattlePosition>,

    /// Turn the card was placed on the field.
    pub turn_played: Option<u32>,

    /// Monster may still declare an attack this turn.
    pub can_attack: bool,
}

impl CardInstance {
    /// A fresh instance sitting in its owner's deck.
    pub fn new(id: InstanceId, definition: Arc<CardDefinition>, owner: PlayerId) -> Self {
        Self {
            id,
            definition,
            owner,
            location: Location::Deck,
            face: Face::Down,
            battle_position: None,
            turn_played: None,
            can_attack: false,
        }
    }

    /// Relocate, clearing field facets when the destination is off-field.
    #[must_use]
    pub fn moved_to(mut self, location: Location) -> Self {
        self.location = location;
        if !location.is_field() {
            self.face = match location {
                Location::Graveyard | Location::Banished | Location::Hand => Face::Up,
                _ => Face::Down,
            };
            self.battle_position = None;
            self.turn_played = None;
            self.can_attack = false;
        }
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn stats(&self) -> Option<&MonsterStats> {
        self.definition.stats()
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face == Face::Up
    }

    #[must_use]
    pub fn in_attack_position(&self) -> bool {
        self.battle_position == Some(BattlePosition::Attack)
    }

    /// Attack points, zero for non-monsters.
    #[must_use]
    pub fn attack(&self) -> i64 {
        self.stats().map_or(0, |s| s.attack)
    }

    /// Defense points, zero for non-monsters.
    #[must_use]
    pub fn defense(&self) -> i64 {
        self.stats().map_or(0, |s| s.defense)
    }
}
