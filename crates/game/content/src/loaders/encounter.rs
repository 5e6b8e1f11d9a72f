//! Encounter (roster) loader.
//!
//! An encounter lists every combatant on both sides in turn order. Skill and
//! item ids are resolved against a [`Catalog`]; unknown ids fail the load.

use std::path::Path;

use battle_core::{ActionTiming, BattleConfig, CombatStats, Combatant, Inventory, Roster, Side};
use serde::{Deserialize, Serialize};

use crate::loaders::{Catalog, LoadResult, read_file};

/// One authored combatant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub side: Side,
    pub max_hp: u32,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub max_sp: u32,
    #[serde(default)]
    pub sp: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub timing: Option<ActionTiming>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// `None` means unlimited item use; `Some` is a counted inventory.
    #[serde(default)]
    pub items: Option<Vec<(String, u32)>>,
}

impl CombatantSpec {
    /// Builds a combatant using `config` for SP cap and default timing.
    pub fn build(&self, catalog: &Catalog, config: &BattleConfig) -> LoadResult<Combatant> {
        let skills = self
            .skills
            .iter()
            .map(|id| {
                catalog.skill(id).ok_or_else(|| {
                    anyhow::anyhow!("Combatant '{}' knows unknown skill '{}'", self.name, id)
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let inventory = self
            .items
            .as_ref()
            .map(|stacks| {
                let mut inventory = Inventory::empty();
                for (id, count) in stacks {
                    let item = catalog.item(id).ok_or_else(|| {
                        anyhow::anyhow!("Combatant '{}' carries unknown item '{}'", self.name, id)
                    })?;
                    inventory.add(item, *count);
                }
                Ok::<_, anyhow::Error>(inventory)
            })
            .transpose()?;

        let max_sp = self.max_sp.min(config.sp_cap());
        let mut combatant = Combatant::new(self.name.clone(), self.side, self.max_hp, max_sp)
            .with_stats(CombatStats::new(self.attack, self.defense))
            .with_timing(self.timing.unwrap_or(config.default_timing))
            .with_sp(self.sp)
            .with_skills(skills);

        if let Some(hp) = self.hp {
            combatant = combatant.with_hp(hp);
        }
        if let Some(inventory) = inventory {
            combatant = combatant.with_inventory(inventory);
        }
        Ok(combatant)
    }
}

/// Encounter structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub name: String,
    pub combatants: Vec<CombatantSpec>,
}

/// A loaded encounter, ready to fight.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub name: String,
    pub roster: Roster,
}

/// Loader for encounter rosters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path, catalog: &Catalog, config: &BattleConfig) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content, catalog, config)
    }

    pub fn parse(content: &str, catalog: &Catalog, config: &BattleConfig) -> LoadResult<Encounter> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        let mut roster = Roster::new();
        for combatant in &spec.combatants {
            roster.insert(combatant.build(catalog, config)?);
        }

        for side in [Side::Party, Side::Enemy] {
            if roster.side(side).is_empty() {
                anyhow::bail!("Encounter '{}' has no {} combatants", spec.name, side);
            }
        }

        tracing::debug!(encounter = %spec.name, combatants = roster.len(), "encounter loaded");
        Ok(Encounter {
            name: spec.name,
            roster,
        })
    }
}
