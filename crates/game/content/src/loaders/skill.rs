//! Skill catalog loader.

use std::path::Path;

use battle_core::{EffectType, SkillDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{Catalog, LoadResult, read_file};

/// Authored skill as it appears in RON. Statuses are referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sp_cost: u32,
    pub effect: EffectType,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub override_with_power: bool,
    #[serde(default)]
    pub is_percent: bool,
    #[serde(default)]
    pub targets_self_only: bool,
    #[serde(default)]
    pub status: Option<String>,
}

impl SkillSpec {
    /// Builds the runtime definition, resolving the status reference.
    pub fn resolve(self, catalog: &Catalog) -> LoadResult<SkillDefinition> {
        let status = catalog.resolve_status(&self.id, self.status.as_deref())?;

        Ok(SkillDefinition {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            sp_cost: self.sp_cost,
            effect: self.effect,
            power: self.power,
            override_with_power: self.override_with_power,
            is_percent: self.is_percent,
            targets_self_only: self.targets_self_only,
            status_to_apply: status,
        })
    }
}

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillSpec>,
}

/// Loader for skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skills, resolving status ids against `catalog`.
    pub fn load(path: &Path, catalog: &Catalog) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &Catalog) -> LoadResult<Vec<SkillDefinition>> {
        let raw: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        raw.skills
            .into_iter()
            .map(|spec| spec.resolve(catalog))
            .collect()
    }
}
