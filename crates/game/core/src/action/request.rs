//! Normalized action requests.
//!
//! Players issue a [`Command`] and AI controllers issue an [`Intent`]; both
//! collapse into one [`ActionRequest`] so the sequencer has a single entry
//! point.

use std::sync::Arc;

use crate::definition::{ItemDefinition, SkillDefinition};
use crate::state::CombatantId;

/// What the actor wants to do. Definitions are optional so that requests
/// coming from loose input can be rejected instead of unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    BasicAttack,
    Skill(Option<Arc<SkillDefinition>>),
    Item(Option<Arc<ItemDefinition>>),
    Guard,
}

impl ActionKind {
    /// Returns the snake_case name of the action kind, used for logging.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            ActionKind::BasicAttack => "basic_attack",
            ActionKind::Skill(_) => "skill",
            ActionKind::Item(_) => "item",
            ActionKind::Guard => "guard",
        }
    }
}

/// One action to sequence: a kind plus the (possibly empty) target list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub targets: Vec<CombatantId>,
}

impl ActionRequest {
    pub fn new(kind: ActionKind, targets: Vec<CombatantId>) -> Self {
        Self { kind, targets }
    }

    pub fn basic_attack(targets: Vec<CombatantId>) -> Self {
        Self::new(ActionKind::BasicAttack, targets)
    }

    pub fn skill(skill: Arc<SkillDefinition>, targets: Vec<CombatantId>) -> Self {
        Self::new(ActionKind::Skill(Some(skill)), targets)
    }

    pub fn item(item: Arc<ItemDefinition>, targets: Vec<CombatantId>) -> Self {
        Self::new(ActionKind::Item(Some(item)), targets)
    }

    pub fn guard() -> Self {
        Self::new(ActionKind::Guard, Vec::new())
    }
}

// ============================================================================
// Player Commands
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    Attack,
    Skill,
    Item,
    Guard,
}

/// Decision produced by the player-input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub skill: Option<Arc<SkillDefinition>>,
    pub item: Option<Arc<ItemDefinition>>,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            skill: None,
            item: None,
        }
    }

    pub fn attack() -> Self {
        Self::new(CommandKind::Attack)
    }

    pub fn guard() -> Self {
        Self::new(CommandKind::Guard)
    }

    pub fn skill(skill: Arc<SkillDefinition>) -> Self {
        Self {
            skill: Some(skill),
            ..Self::new(CommandKind::Skill)
        }
    }

    pub fn item(item: Arc<ItemDefinition>) -> Self {
        Self {
            item: Some(item),
            ..Self::new(CommandKind::Item)
        }
    }

    /// Pairs the decision with the targets chosen for it.
    pub fn into_request(self, targets: Vec<CombatantId>) -> ActionRequest {
        let kind = match self.kind {
            CommandKind::Attack => ActionKind::BasicAttack,
            CommandKind::Skill => ActionKind::Skill(self.skill),
            CommandKind::Item => ActionKind::Item(self.item),
            CommandKind::Guard => ActionKind::Guard,
        };
        ActionRequest::new(kind, targets)
    }
}

// ============================================================================
// AI Intents
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IntentKind {
    /// The AI produced nothing; treated like guarding.
    #[default]
    None,
    BasicAttack,
    Skill,
    Item,
    Guard,
}

/// Decision produced by an AI layer, targets included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub kind: IntentKind,
    pub skill: Option<Arc<SkillDefinition>>,
    pub item: Option<Arc<ItemDefinition>>,
    pub targets: Vec<CombatantId>,
}

impl Intent {
    pub fn basic_attack(target: CombatantId) -> Self {
        Self {
            kind: IntentKind::BasicAttack,
            targets: vec![target],
            ..Self::default()
        }
    }

    pub fn skill(skill: Arc<SkillDefinition>, targets: Vec<CombatantId>) -> Self {
        Self {
            kind: IntentKind::Skill,
            skill: Some(skill),
            targets,
            ..Self::default()
        }
    }

    pub fn item(item: Arc<ItemDefinition>, targets: Vec<CombatantId>) -> Self {
        Self {
            kind: IntentKind::Item,
            item: Some(item),
            targets,
            ..Self::default()
        }
    }
}

impl From<Intent> for ActionRequest {
    fn from(intent: Intent) -> Self {
        let kind = match intent.kind {
            IntentKind::BasicAttack => ActionKind::BasicAttack,
            IntentKind::Skill => ActionKind::Skill(intent.skill),
            IntentKind::Item => ActionKind::Item(intent.item),
            IntentKind::Guard | IntentKind::None => ActionKind::Guard,
        };
        ActionRequest::new(kind, intent.targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::EffectType;

    #[test]
    fn command_and_intent_normalize_to_the_same_request() {
        let skill = Arc::new(SkillDefinition::new("fire", EffectType::Damage, 3));
        let target = CombatantId(4);

        let from_command = Command::skill(Arc::clone(&skill)).into_request(vec![target]);
        let from_intent: ActionRequest = Intent::skill(skill, vec![target]).into();

        assert_eq!(from_command, from_intent);
    }

    #[test]
    fn empty_intent_is_a_guard() {
        let request: ActionRequest = Intent::default().into();
        assert_eq!(request.kind, ActionKind::Guard);
    }

    #[test]
    fn skill_command_without_skill_keeps_the_gap() {
        let request = Command::new(CommandKind::Skill).into_request(Vec::new());
        assert_eq!(request.kind, ActionKind::Skill(None));
    }
}
