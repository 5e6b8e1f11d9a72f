//! Authored action definitions (skills, items, statuses).
//!
//! Definitions are read-only at battle time and shared by reference
//! (`Arc`) across every combatant that knows the skill or carries the item.

use std::sync::Arc;

/// What a skill or item does to its targets.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectType {
    Damage,
    Heal,
    ApplyStatus,
}

/// A status effect that can be added to a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDefinition {
    pub id: String,
    pub name: String,
}

impl StatusDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Skill authored offline; costs SP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    pub sp_cost: u32,
    pub effect: EffectType,
    pub power: u32,
    /// Damage uses `power` alone instead of adding it to the attacker's attack.
    pub override_with_power: bool,
    /// Heal `power` is a percentage of the target's maximum HP.
    pub is_percent: bool,
    pub targets_self_only: bool,
    pub status_to_apply: Option<Arc<StatusDefinition>>,
}

impl SkillDefinition {
    /// Creates a skill with the given effect and no cost, flags or status.
    pub fn new(id: impl Into<String>, effect: EffectType, power: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            sp_cost: 0,
            effect,
            power,
            override_with_power: false,
            is_percent: false,
            targets_self_only: false,
            status_to_apply: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cost(mut self, sp_cost: u32) -> Self {
        self.sp_cost = sp_cost;
        self
    }

    pub fn self_only(mut self) -> Self {
        self.targets_self_only = true;
        self
    }

    pub fn percent(mut self) -> Self {
        self.is_percent = true;
        self
    }

    pub fn overriding_power(mut self) -> Self {
        self.override_with_power = true;
        self
    }

    pub fn with_status(mut self, status: Arc<StatusDefinition>) -> Self {
        self.status_to_apply = Some(status);
        self
    }

    /// Returns true when the skill can run without explicit targets.
    pub fn requires_targets(&self) -> bool {
        !self.targets_self_only
    }
}

/// Consumable item authored offline; costs one inventory unit per use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub effect: EffectType,
    pub power: u32,
    pub is_percent: bool,
    pub status_to_apply: Option<Arc<StatusDefinition>>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<String>, effect: EffectType, power: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            effect,
            power,
            is_percent: false,
            status_to_apply: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn percent(mut self) -> Self {
        self.is_percent = true;
        self
    }

    pub fn with_status(mut self, status: Arc<StatusDefinition>) -> Self {
        self.status_to_apply = Some(status);
        self
    }
}
