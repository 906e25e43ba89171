//! Card definitions, per-match instances and the catalog seam.

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{Attribute, CardCode, CardDefinition, CardKind, MonsterStats, SpellKind, TrapKind};
pub use instance::{BattlePosition, CardInstance, Face};
pub use registry::{CardCatalog, CardRegistry, CatalogError};
