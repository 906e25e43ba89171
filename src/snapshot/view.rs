//! Perspective-filtered views of a match.
//!
//! A viewer sees everything public, their own hand, and nothing face-down
//! on the other side. Hidden cards keep their instance id so they can still
//! be targeted.

use serde::{Deserialize, Serialize};

use crate::cards::{BattlePosition, CardCode, CardInstance, CardKind, Face};
use crate::core::entity::{InstanceId, MatchId};
use crate::core::phase::Phase;
use crate::core::player::{ParticipantId, PlayerId};
use crate::core::state::{MatchState, ParticipantState};
use crate::effects::Effect;
use crate::stack::ChainEntry;
use crate::zones::Location;

/// Who may see a card in a given spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneVisibility {
    /// Everyone (face-up field cards, graveyard, banished).
    Public,
    /// Only the owner (hand, own face-down cards).
    OwnerOnly,
    /// Nobody (deck).
    Hidden,
}

impl ZoneVisibility {
    #[must_use]
    pub fn of(location: Location, face: Face) -> Self {
        match location {
            Location::Deck => ZoneVisibility::Hidden,
            Location::Hand => ZoneVisibility::OwnerOnly,
            Location::Graveyard | Location::Banished => ZoneVisibility::Public,
            Location::MonsterZone(_) | Location::SpellTrapZone(_) => match face {
                Face::Up => ZoneVisibility::Public,
                Face::Down => ZoneVisibility::OwnerOnly,
            },
        }
    }

    #[must_use]
    pub fn allows(self, is_owner: bool) -> bool {
        match self {
            ZoneVisibility::Public => true,
            ZoneVisibility::OwnerOnly => is_owner,
            ZoneVisibility::Hidden => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleCard {
    pub id: InstanceId,
    pub code: CardCode,
    pub name: String,
    pub kind: CardKind,
    pub effect: Option<Effect>,
    pub location: Location,
    pub face: Face,
    pub battle_position: Option<BattlePosition>,
    pub can_attack: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardView {
    Hidden { id: InstanceId },
    Visible(VisibleCard),
}

impl CardView {
    fn of(card: &CardInstance, is_owner: bool) -> Self {
        if ZoneVisibility::of(card.location, card.face).allows(is_owner) {
            CardView::Visible(VisibleCard {
                id: card.id,
                code: card.definition.code.clone(),
                name: card.definition.name.clone(),
                kind: card.definition.kind,
                effect: card.definition.effect,
                location: card.location,
                face: card.face,
                battle_position: card.battle_position,
                can_attack: card.can_attack,
            })
        } else {
            CardView::Hidden { id: card.id }
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        match self {
            CardView::Hidden { id } => *id,
            CardView::Visible(card) => card.id,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, CardView::Hidden { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub participant: ParticipantId,
    pub is_ai: bool,
    pub life_points: i64,
    pub deck_count: usize,
    pub hand: Vec<CardView>,
    pub monster_zones: Vec<Option<CardView>>,
    pub spell_trap_zones: Vec<Option<CardView>>,
    pub graveyard: Vec<CardView>,
    pub banished: Vec<CardView>,
    pub has_normal_summoned: bool,
}

impl ParticipantView {
    fn of(side: &ParticipantState, is_owner: bool) -> Self {
        let pile = |cards: &im::Vector<CardInstance>| -> Vec<CardView> {
            cards.iter().map(|c| CardView::of(c, is_owner)).collect()
        };
        let row = |slots: &[Option<CardInstance>]| -> Vec<Option<CardView>> {
            slots
                .iter()
                .map(|slot| slot.as_ref().map(|c| CardView::of(c, is_owner)))
                .collect()
        };

        Self {
            participant: side.id().clone(),
            is_ai: side.is_ai(),
            life_points: side.life_points(),
            deck_count: side.deck().len(),
            hand: pile(side.hand()),
            monster_zones: row(side.monster_zones().as_slice()),
            spell_trap_zones: row(side.spell_trap_zones().as_slice()),
            graveyard: pile(side.graveyard()),
            banished: pile(side.banished()),
            has_normal_summoned: side.has_normal_summoned(),
        }
    }
}

/// One participant's view of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub match_id: MatchId,
    pub viewer: PlayerId,
    pub phase: Phase,
    pub turn: u32,
    pub is_your_turn: bool,
    pub draw_pending: bool,
    pub chain: Vec<ChainEntry>,
    pub priority: Option<PlayerId>,
    pub last_action: String,
    pub you: ParticipantView,
    pub opponent: ParticipantView,
}

/// Build the view `viewer` is allowed to see.
#[must_use]
pub fn view_for(state: &MatchState, viewer: PlayerId) -> MatchView {
    MatchView {
        match_id: state.match_id(),
        viewer,
        phase: state.phase(),
        turn: state.turn(),
        is_your_turn: state.active_player() == viewer,
        draw_pending: state.draw_pending(),
        chain: state.chain().entries().to_vec(),
        priority: state.chain().priority(),
        last_action: state.last_action().to_string(),
        you: ParticipantView::of(state.participant(viewer), true),
        opponent: ParticipantView::of(state.participant(viewer.opponent()), false),
    }
}
