//! Card movement between a participant's zones.
//!
//! Every operation removes the card from where it is and inserts it at the
//! destination inside one `&mut self` call, then rewrites the card's
//! recorded `Location`. A failed check leaves the participant untouched.
//!
//! ```
//! # use std::sync::Arc;
//! use duel_engine::cards::{Attribute, CardDefinition, CardInstance, MonsterStats};
//! use duel_engine::core::{InstanceId, ParticipantState, PlayerId};
//! use duel_engine::zones::{Location, ZoneKind};
//!
//! let def = Arc::new(CardDefinition::monster("M", "Imp", MonsterStats::new(1300, 1400, 4, Attribute::Dark)));
//! let deck = vec![CardInstance::new(InstanceId(0), def, PlayerId::FIRST)];
//! let mut side = ParticipantState::new("alice".into(), false, deck, 8000);
//!
//! assert_eq!(side.draw(2), 1);
//! side.place(InstanceId(0), ZoneKind::Monster, 3).unwrap();
//! assert_eq!(side.locate(InstanceId(0)), Some(Location::MonsterZone(3)));
//! ```

use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::error::{EngineResult, Rejection};
use crate::core::rng::GameRng;
use crate::core::state::{ParticipantState, ZoneRow};

use super::location::{Location, ZoneKind};

impl ParticipantState {
    /// Move up to `n` cards from the top of the deck to the hand.
    ///
    /// Returns how many were moved. Running out of cards is not an error.
    pub fn draw(&mut self, n: usize) -> usize {
        let mut drawn = 0;
        while drawn < n {
            let Some(card) = self.deck.pop_front() else {
                break;
            };
            self.hand.push_back(card.moved_to(Location::Hand));
            drawn += 1;
        }
        drawn
    }

    /// Where an instance is on this side of the table.
    #[must_use]
    pub fn locate(&self, card: InstanceId) -> Option<Location> {
        self.card(card).map(|c| c.location)
    }

    /// Look an instance up in any of this participant's zones.
    #[must_use]
    pub fn card(&self, card: InstanceId) -> Option<&CardInstance> {
        self.cards().find(|c| c.id == card)
    }

    /// Mutable access to a card on the field.
    pub(crate) fn field_card_mut(&mut self, card: InstanceId) -> Option<&mut CardInstance> {
        self.monster_zones
            .iter_mut()
            .chain(self.spell_trap_zones.iter_mut())
            .flatten()
            .find(|c| c.id == card)
    }

    /// Every card this participant holds, in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards_with_location().map(|(_, card)| card)
    }

    /// Every card paired with the location of the zone that holds it.
    pub fn cards_with_location(&self) -> impl Iterator<Item = (Location, &CardInstance)> {
        let piles = [
            (Location::Deck, &self.deck),
            (Location::Hand, &self.hand),
            (Location::Graveyard, &self.graveyard),
            (Location::Banished, &self.banished),
        ];
        let piles = piles
            .into_iter()
            .flat_map(|(loc, pile)| pile.iter().map(move |c| (loc, c)));

        piles
            .chain(row_cards(ZoneKind::Monster, &self.monster_zones))
            .chain(row_cards(ZoneKind::SpellTrap, &self.spell_trap_zones))
    }

    /// Remove an instance from wherever it is.
    pub(crate) fn take(&mut self, card: InstanceId) -> Option<CardInstance> {
        let location = self.locate(card)?;
        match location {
            Location::Deck => take_from(&mut self.deck, card),
            Location::Hand => take_from(&mut self.hand, card),
            Location::Graveyard => take_from(&mut self.graveyard, card),
            Location::Banished => take_from(&mut self.banished, card),
            Location::MonsterZone(i) | Location::SpellTrapZone(i) => {
                let (kind, _) = location.zone()?;
                self.row_mut(kind).get_mut(i as usize)?.take()
            }
        }
    }

    /// Leftmost empty slot in a row.
    #[must_use]
    pub fn first_empty(&self, kind: ZoneKind) -> Option<u8> {
        self.row(kind)
            .iter()
            .position(Option::is_none)
            .map(|i| i as u8)
    }

    /// Validate moving a card from hand into a slot without moving it.
    pub fn check_placement(&self, card: InstanceId, kind: ZoneKind, index: u8) -> EngineResult<()> {
        let instance = self
            .hand
            .iter()
            .find(|c| c.id == card)
            .ok_or(Rejection::CardNotFound(card))?;

        if instance.definition.zone_kind() != kind {
            return Err(Rejection::ZoneTypeMismatch { card, zone: kind });
        }
        self.check_slot(kind, index)
    }

    fn check_slot(&self, kind: ZoneKind, index: u8) -> EngineResult<()> {
        match self.row(kind).get(index as usize) {
            None => Err(Rejection::InvalidZoneIndex { index }),
            Some(Some(_)) => Err(Rejection::ZoneOccupied { zone: kind, index }),
            Some(None) => Ok(()),
        }
    }

    /// Move a card from hand into an empty slot of the matching row.
    pub fn place(&mut self, card: InstanceId, kind: ZoneKind, index: u8) -> EngineResult<&mut CardInstance> {
        self.check_placement(card, kind, index)?;
        let instance = take_from(&mut self.hand, card).ok_or(Rejection::CardNotFound(card))?;
        self.put_in_slot(instance, kind, index)
    }

    /// Move a card from any non-field zone into an empty slot.
    pub(crate) fn place_from(
        &mut self,
        card: InstanceId,
        kind: ZoneKind,
        index: u8,
    ) -> EngineResult<&mut CardInstance> {
        match self.locate(card) {
            None => return Err(Rejection::CardNotFound(card)),
            Some(loc) if loc.is_field() => return Err(Rejection::CardNotFound(card)),
            Some(_) => {}
        }
        self.check_slot(kind, index)?;
        let instance = self.take(card).ok_or(Rejection::CardNotFound(card))?;
        self.put_in_slot(instance, kind, index)
    }

    fn put_in_slot(
        &mut self,
        instance: CardInstance,
        kind: ZoneKind,
        index: u8,
    ) -> EngineResult<&mut CardInstance> {
        let slot = self
            .row_mut(kind)
            .get_mut(index as usize)
            .ok_or(Rejection::InvalidZoneIndex { index })?;
        Ok(slot.insert(instance.moved_to(Location::slot(kind, index))))
    }

    /// Send a card from any zone to the graveyard.
    pub fn discard(&mut self, card: InstanceId) -> EngineResult<()> {
        self.relocate(card, Location::Graveyard, false)
    }

    /// Return a field card to the hand without passing the graveyard.
    pub fn return_to_hand(&mut self, card: InstanceId) -> EngineResult<()> {
        self.relocate(card, Location::Hand, true)
    }

    /// Remove a field card from play.
    pub fn banish(&mut self, card: InstanceId) -> EngineResult<()> {
        self.relocate(card, Location::Banished, true)
    }

    fn relocate(&mut self, card: InstanceId, to: Location, field_only: bool) -> EngineResult<()> {
        let from = self.locate(card).ok_or(Rejection::CardNotFound(card))?;
        if field_only && !from.is_field() {
            return Err(Rejection::CardNotFound(card));
        }
        let instance = self.take(card).ok_or(Rejection::CardNotFound(card))?.moved_to(to);
        match to {
            Location::Graveyard => self.graveyard.push_back(instance),
            Location::Hand => self.hand.push_back(instance),
            Location::Banished => self.banished.push_back(instance),
            Location::Deck => self.deck.push_back(instance),
            Location::MonsterZone(_) | Location::SpellTrapZone(_) => {
                return Err(Rejection::CardNotFound(card))
            }
        }
        Ok(())
    }

    /// Shuffle the deck in place.
    pub fn shuffle_deck(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<_> = self.deck.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.deck = cards.into_iter().collect();
    }
}

fn row_cards(kind: ZoneKind, row: &ZoneRow) -> impl Iterator<Item = (Location, &CardInstance)> {
    row.iter().enumerate().filter_map(move |(i, slot)| {
        slot.as_ref().map(|c| (Location::slot(kind, i as u8), c))
    })
}

fn take_from(pile: &mut im::Vector<CardInstance>, card: InstanceId) -> Option<CardInstance> {
    let index = pile.iter().position(|c| c.id == card)?;
    Some(pile.remove(index))
}
