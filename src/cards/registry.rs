//! Card catalog lookup.
//!
//! The engine only consumes the catalog: it resolves deck lists into shared
//! definitions at match start. `CardCatalog` is the seam an external
//! catalog plugs into; `CardRegistry` is the in-memory implementation used
//! by hosts that preload definitions and by tests.
//!
//! ```
//! use duel_engine::cards::{CardCatalog, CardCode, CardDefinition, CardRegistry, SpellKind};
//!
//! let mut registry = CardRegistry::new();
//! registry.register(CardDefinition::spell("POT", "Pot of Greed", SpellKind::Normal)).unwrap();
//!
//! let found = registry.lookup(&CardCode::from("POT")).unwrap();
//! assert_eq!(found.name, "Pot of Greed");
//! assert!(registry.lookup(&CardCode::from("NOPE")).is_none());
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::{CardCode, CardDefinition};
use crate::core::error::{EngineResult, Rejection};

/// Read-only source of card definitions.
pub trait CardCatalog {
    /// Look up a definition by catalog code.
    fn lookup(&self, code: &CardCode) -> Option<Arc<CardDefinition>>;

    /// Resolve a deck list in order, failing on the first unknown code.
    fn resolve_deck(&self, codes: &[CardCode]) -> EngineResult<Vec<Arc<CardDefinition>>> {
        codes
            .iter()
            .map(|code| {
                self.lookup(code)
                    .ok_or_else(|| Rejection::UnknownCard(code.clone()))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("card {0} already registered")]
    Duplicate(CardCode),
}

/// In-memory catalog keyed by card code.
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardCode, Arc<CardDefinition>>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Codes must be unique.
    pub fn register(&mut self, card: CardDefinition) -> Result<Arc<CardDefinition>, CatalogError> {
        if self.cards.contains_key(&card.code) {
            return Err(CatalogError::Duplicate(card.code));
        }
        let card = Arc::new(card);
        self.cards.insert(card.code.clone(), Arc::clone(&card));
        Ok(card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values()
    }
}

impl CardCatalog for CardRegistry {
    fn lookup(&self, code: &CardCode) -> Option<Arc<CardDefinition>> {
        self.cards.get(code).cloned()
    }
}

impl FromIterator<CardDefinition> for CardRegistry {
    /// Later duplicates replace earlier ones.
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let cards = iter
            .into_iter()
            .map(|card| (card.code.clone(), Arc::new(card)))
            .collect();
        Self { cards }
    }
}
