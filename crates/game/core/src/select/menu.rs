//! Action list selection: choosing which skill or item to use.
//!
//! Same navigation contract as target selection, but the entries come from
//! the owner's state and are re-read every tick. Entries that disappear
//! mid-loop (an item stack running out, the owner leaving the roster) never
//! invalidate the cursor; it is clamped back into range instead.

use std::sync::Arc;

use crate::definition::{ItemDefinition, SkillDefinition};
use crate::select::{InputEvents, ListCursor, SelectContext};
use crate::state::{CombatantId, Roster};
use crate::task::{Step, Task};

/// Which list of the owner the menu shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MenuKind {
    Skills,
    Items,
}

/// A selectable menu row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Skill(Arc<SkillDefinition>),
    Item {
        item: Arc<ItemDefinition>,
        count: u32,
    },
}

impl MenuEntry {
    pub fn label(&self) -> &str {
        match self {
            MenuEntry::Skill(skill) => &skill.name,
            MenuEntry::Item { item, .. } => &item.name,
        }
    }
}

/// Outcome of the action list loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuResult {
    Cancelled,
    Skill(Arc<SkillDefinition>),
    Item(Arc<ItemDefinition>),
}

impl From<MenuEntry> for MenuResult {
    fn from(entry: MenuEntry) -> Self {
        match entry {
            MenuEntry::Skill(skill) => MenuResult::Skill(skill),
            MenuEntry::Item { item, .. } => MenuResult::Item(item),
        }
    }
}

/// Reads the owner's current entries. Unknown owners have none.
pub fn menu_entries(roster: &Roster, owner: CombatantId, kind: MenuKind) -> Vec<MenuEntry> {
    let Some(combatant) = roster.get(owner) else {
        return Vec::new();
    };

    match kind {
        MenuKind::Skills => combatant
            .skills
            .iter()
            .cloned()
            .map(MenuEntry::Skill)
            .collect(),
        MenuKind::Items => combatant
            .inventory
            .iter()
            .flat_map(|inventory| inventory.available())
            .map(|stack| MenuEntry::Item {
                item: Arc::clone(&stack.item),
                count: stack.count,
            })
            .collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Start,
    Polling,
    Done,
}

/// Resumable skill/item menu.
#[derive(Clone, Debug)]
pub struct ActionMenu {
    owner: CombatantId,
    kind: MenuKind,
    cursor: ListCursor,
    cancel_requested: bool,
    phase: Phase,
}

impl ActionMenu {
    pub fn new(owner: CombatantId, kind: MenuKind) -> Self {
        Self {
            owner,
            kind,
            cursor: ListCursor::new(),
            cancel_requested: false,
            phase: Phase::Start,
        }
    }

    pub fn skills(owner: CombatantId) -> Self {
        Self::new(owner, MenuKind::Skills)
    }

    pub fn items(owner: CombatantId) -> Self {
        Self::new(owner, MenuKind::Items)
    }

    pub fn kind(&self) -> MenuKind {
        self.kind
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    /// Asks the menu to close. Honored on the next poll.
    pub fn cancel(&mut self) {
        self.cancel_requested = true;
    }

    fn focus(&self, ctx: &mut SelectContext<'_>, entries: &[MenuEntry]) {
        if let (Some(view), Some(entry)) = (ctx.view.as_deref_mut(), entries.get(self.cursor.index())) {
            view.focus_entry(self.cursor.index(), entry.label());
        }
    }

    fn finish(&mut self, ctx: &mut SelectContext<'_>, result: MenuResult) -> Step<MenuResult> {
        if let Some(view) = ctx.view.as_deref_mut() {
            view.clear();
        }
        tracing::debug!(owner = %self.owner, kind = %self.kind, ?result, "action menu closed");
        self.phase = Phase::Done;
        Step::Complete(result)
    }
}

impl<'a> Task<SelectContext<'a>> for ActionMenu {
    type Output = MenuResult;

    fn poll(&mut self, ctx: &mut SelectContext<'a>) -> Step<MenuResult> {
        match self.phase {
            Phase::Start => {
                let entries = menu_entries(ctx.roster, self.owner, self.kind);
                self.cursor.reset();
                self.focus(ctx, &entries);
                self.phase = Phase::Polling;
                Step::next_tick()
            }

            Phase::Polling => {
                if self.cancel_requested {
                    return self.finish(ctx, MenuResult::Cancelled);
                }

                let entries = menu_entries(ctx.roster, self.owner, self.kind);
                self.cursor.clamp(entries.len());

                let events = ctx.input.poll_events();
                tracing::trace!(owner = %self.owner, ?events, cursor = self.cursor.index(), "menu input");

                if entries.len() > 1 {
                    if events.contains(InputEvents::PREVIOUS) {
                        self.cursor.previous(entries.len());
                        self.focus(ctx, &entries);
                    }
                    if events.contains(InputEvents::NEXT) {
                        self.cursor.next(entries.len());
                        self.focus(ctx, &entries);
                    }
                }
                if events.contains(InputEvents::CANCEL) {
                    return self.finish(ctx, MenuResult::Cancelled);
                }
                if events.contains(InputEvents::CONFIRM)
                    && let Some(entry) = entries.into_iter().nth(self.cursor.index())
                {
                    return self.finish(ctx, entry.into());
                }
                Step::next_tick()
            }

            Phase::Done => {
                tracing::warn!(owner = %self.owner, "polled a closed action menu");
                Step::Complete(MenuResult::Cancelled)
            }
        }
    }
}
