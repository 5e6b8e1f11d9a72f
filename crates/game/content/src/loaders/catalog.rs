//! Status catalog loader and the combined definition catalog.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use battle_core::{ItemDefinition, SkillDefinition, StatusDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Status catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusDefinition>,
}

/// Loader for status catalog from RON files.
pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<StatusDefinition>> {
        let catalog: StatusCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse status catalog RON: {}", e))?;

        Ok(catalog.statuses)
    }
}

/// Every authored definition, indexed by id and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    statuses: HashMap<String, Arc<StatusDefinition>>,
    skills: HashMap<String, Arc<SkillDefinition>>,
    items: HashMap<String, Arc<ItemDefinition>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers statuses. Duplicate ids are an error.
    pub fn add_statuses(&mut self, statuses: Vec<StatusDefinition>) -> LoadResult<()> {
        for status in statuses {
            insert_unique(&mut self.statuses, status.id.clone(), Arc::new(status), "status")?;
        }
        Ok(())
    }

    pub fn add_skills(&mut self, skills: Vec<SkillDefinition>) -> LoadResult<()> {
        for skill in skills {
            insert_unique(&mut self.skills, skill.id.clone(), Arc::new(skill), "skill")?;
        }
        Ok(())
    }

    pub fn add_items(&mut self, items: Vec<ItemDefinition>) -> LoadResult<()> {
        for item in items {
            insert_unique(&mut self.items, item.id.clone(), Arc::new(item), "item")?;
        }
        Ok(())
    }

    pub fn status(&self, id: &str) -> Option<Arc<StatusDefinition>> {
        self.statuses.get(id).cloned()
    }

    pub fn skill(&self, id: &str) -> Option<Arc<SkillDefinition>> {
        self.skills.get(id).cloned()
    }

    pub fn item(&self, id: &str) -> Option<Arc<ItemDefinition>> {
        self.items.get(id).cloned()
    }

    /// Resolves an optional status reference, failing on unknown ids.
    pub(crate) fn resolve_status(
        &self,
        owner: &str,
        id: Option<&str>,
    ) -> LoadResult<Option<Arc<StatusDefinition>>> {
        id.map(|id| {
            self.status(id)
                .ok_or_else(|| anyhow::anyhow!("'{}' references unknown status '{}'", owner, id))
        })
        .transpose()
    }

    pub fn status_count(&self) -> usize {
        self.statuses.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

fn insert_unique<T>(
    map: &mut HashMap<String, Arc<T>>,
    id: String,
    value: Arc<T>,
    kind: &str,
) -> LoadResult<()> {
    if map.contains_key(&id) {
        anyhow::bail!("Duplicate {} id '{}'", kind, id);
    }
    map.insert(id, value);
    Ok(())
}
