//! Content factory for loading a whole content directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::loaders::{
    Catalog, ConfigLoader, Encounter, EncounterLoader, ItemLoader, LoadResult, SkillLoader,
    StatusLoader,
};

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── statuses.ron
/// ├── skills.ron
/// ├── items.ron
/// └── encounters/
///     ├── training.ron
///     └── crypt.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load battle tuning from `battle.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no battle.toml, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load statuses, then skills and items that reference them.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();
        catalog.add_statuses(StatusLoader::load(&self.data_dir.join("statuses.ron"))?)?;

        let skills = SkillLoader::load(&self.data_dir.join("skills.ron"), &catalog)?;
        catalog.add_skills(skills)?;

        let items = ItemLoader::load(&self.data_dir.join("items.ron"), &catalog)?;
        catalog.add_items(items)?;

        tracing::info!(
            statuses = catalog.status_count(),
            skills = catalog.skill_count(),
            items = catalog.item_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load `encounters/<name>.ron`. A name ending in `.ron` or containing a
    /// path separator is treated as a path instead.
    pub fn load_encounter(
        &self,
        name: &str,
        catalog: &Catalog,
        config: &BattleConfig,
    ) -> LoadResult<Encounter> {
        let path = if name.ends_with(".ron") || name.contains(std::path::MAIN_SEPARATOR) {
            PathBuf::from(name)
        } else {
            self.data_dir.join("encounters").join(format!("{name}.ron"))
        };
        EncounterLoader::load(&path, catalog, config)
    }
}
