//! Random deck for the AI seat.
//!
//! Half monsters (level 1-4, ATK/DEF 1000-1999, DARK), a quarter draw
//! spells, the rest effectless traps. A 40-card deck is 20/10/10.

use std::sync::Arc;

use crate::cards::{Attribute, CardDefinition, MonsterStats, SpellKind, TrapKind};
use crate::core::rng::GameRng;
use crate::effects::Effect;

/// Generate `size` card definitions, top of deck first.
pub fn generate_ai_deck(rng: &mut GameRng, size: usize) -> Vec<Arc<CardDefinition>> {
    let monsters = size / 2;
    let spells = size / 4;
    let traps = size - monsters - spells;

    let mut deck = Vec::with_capacity(size);
    for i in 0..monsters {
        let stats = MonsterStats::new(
            rng.stat(1000..2000),
            rng.stat(1000..2000),
            rng.level(1..=4),
            Attribute::Dark,
        );
        deck.push(CardDefinition::monster(
            format!("AI-M{i:02}"),
            format!("Shadow Fiend {}", i + 1),
            stats,
        ));
    }
    for i in 0..spells {
        deck.push(
            CardDefinition::spell(format!("AI-S{i:02}"), format!("Dark Insight {}", i + 1), SpellKind::Normal)
                .with_effect(Effect::Draw { count: 1 })
                .with_description("Draw 1 card."),
        );
    }
    for i in 0..traps {
        deck.push(CardDefinition::trap(
            format!("AI-T{i:02}"),
            format!("Hollow Snare {}", i + 1),
            TrapKind::Normal,
        ));
    }

    let mut deck: Vec<_> = deck.into_iter().map(Arc::new).collect();
    rng.shuffle(&mut deck);
    deck
}
