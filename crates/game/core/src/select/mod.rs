//! Interactive selection loops: who to target and which skill or item to use.
//!
//! Both selectors are [`Task`](crate::task::Task)s polled once per scheduling
//! tick against a [`SelectContext`]. They never mutate the roster.
pub mod input;
pub mod menu;
pub mod navigator;
pub mod target;

pub use input::{InputEvents, InputSource, ScriptedInput};
pub use menu::{ActionMenu, MenuEntry, MenuKind, MenuResult, menu_entries};
pub use navigator::ListCursor;
pub use target::{SelectionResult, TargetMode, TargetSelection};

use crate::state::{CombatantId, Roster};

/// Cursor and highlight feedback. Every method defaults to a no-op.
pub trait SelectionView {
    fn highlight(&mut self, _target: CombatantId) {}

    fn focus_entry(&mut self, _index: usize, _label: &str) {}

    /// Called once when a selector finishes.
    fn clear(&mut self) {}
}

/// Everything a selector borrows for one poll.
pub struct SelectContext<'a> {
    pub roster: &'a Roster,
    pub input: &'a mut dyn InputSource,
    pub view: Option<&'a mut dyn SelectionView>,
}

impl<'a> SelectContext<'a> {
    pub fn new(roster: &'a Roster, input: &'a mut dyn InputSource) -> Self {
        Self {
            roster,
            input,
            view: None,
        }
    }

    pub fn with_view(mut self, view: &'a mut dyn SelectionView) -> Self {
        self.view = Some(view);
        self
    }
}
