//! Data-driven battle content and loaders.
//!
//! This crate turns authored data files into `battle-core` values:
//! - Status, skill and item catalogs (RON)
//! - Encounter rosters (RON)
//! - Battle tuning (`BattleConfig`, TOML)
//!
//! Definitions are loaded once, wrapped in `Arc`, and shared by every
//! combatant that references them. Nothing here runs at battle time.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    Catalog, CombatantSpec, ConfigLoader, ContentFactory, Encounter, EncounterLoader,
    EncounterSpec, ItemLoader, ItemSpec, SkillLoader, SkillSpec, StatusLoader,
};
