//! Content loaders for reading battle data from files.
//!
//! Catalog loaders resolve cross references (skill → status, roster → skill)
//! at load time, so an unknown id is a load error rather than a silent gap at
//! battle time.

pub mod catalog;
pub mod config;
pub mod encounter;
pub mod factory;
pub mod item;
pub mod skill;

pub use catalog::{Catalog, StatusLoader};
pub use config::ConfigLoader;
pub use encounter::{CombatantSpec, Encounter, EncounterLoader, EncounterSpec};
pub use factory::ContentFactory;
pub use item::{ItemLoader, ItemSpec};
pub use skill::{SkillLoader, SkillSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
