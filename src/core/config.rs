//! Match configuration.
//!
//! Hosts configure a match at start time with `MatchConfig`. Every field
//! has a default matching the standard duel rules, so a config file only
//! needs to name what it overrides:
//!
//! ```
//! use duel_engine::core::MatchConfig;
//!
//! let config = MatchConfig::default().with_starting_life(4000).with_seed(7);
//! assert_eq!(config.starting_life, 4000);
//! assert_eq!(config.opening_hand, 5);
//! assert!(config.auto_draw);
//! ```

use serde::{Deserialize, Serialize};

/// Number of slots in each monster and spell/trap zone row.
pub const ZONE_CAPACITY: usize = 5;

/// Rules and setup knobs for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Life points each participant starts with.
    pub starting_life: i64,

    /// Cards drawn by each participant before the first turn.
    pub opening_hand: usize,

    /// Perform the turn draw on entering DRAW. When false the draw stays
    /// pending until the active participant requests it.
    pub auto_draw: bool,

    /// Shuffle each deck before dealing opening hands.
    pub shuffle_decks: bool,

    /// Size of the deck generated for the built-in opponent.
    pub ai_deck_size: usize,

    /// Seed for the match RNG.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_life: 8000,
            opening_hand: 5,
            auto_draw: true,
            shuffle_decks: false,
            ai_deck_size: 40,
            seed: 0,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Require an explicit draw request each turn.
    #[must_use]
    pub fn manual_draw(mut self) -> Self {
        self.auto_draw = false;
        self
    }

    /// Shuffle decks at match start.
    #[must_use]
    pub fn shuffled(mut self) -> Self {
        self.shuffle_decks = true;
        self
    }

    #[must_use]
    pub fn with_ai_deck_size(mut self, size: usize) -> Self {
        self.ai_deck_size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
