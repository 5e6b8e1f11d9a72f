//! Item catalog loader.

use std::path::Path;

use battle_core::{EffectType, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{Catalog, LoadResult, read_file};

/// Authored item as it appears in RON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub effect: EffectType,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub is_percent: bool,
    #[serde(default)]
    pub status: Option<String>,
}

impl ItemSpec {
    pub fn resolve(self, catalog: &Catalog) -> LoadResult<ItemDefinition> {
        let status = catalog.resolve_status(&self.id, self.status.as_deref())?;

        Ok(ItemDefinition {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            effect: self.effect,
            power: self.power,
            is_percent: self.is_percent,
            status_to_apply: status,
        })
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    /// * `catalog` - Statuses the items may reference
    pub fn load(path: &Path, catalog: &Catalog) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &Catalog) -> LoadResult<Vec<ItemDefinition>> {
        let raw: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        raw.items
            .into_iter()
            .map(|spec| spec.resolve(catalog))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_default_their_name_to_the_id() {
        let items = ItemLoader::parse(
            r#"(items: [(id: "potion", effect: Heal, power: 15)])"#,
            &Catalog::new(),
        )
        .expect("items should parse");

        assert_eq!(items[0].name, "potion");
        assert_eq!(items[0].power, 15);
        assert!(items[0].status_to_apply.is_none());
    }
}
