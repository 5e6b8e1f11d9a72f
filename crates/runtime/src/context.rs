//! Per-tick borrow bundle for composite turn tasks.
use battle_core::{
    BattleConfig, InputSource, PopupSink, Presentation, Roster, SelectContext, SelectionView,
    SequenceContext,
};

/// Everything a player turn or a battle borrows for one poll.
///
/// Composite tasks hand out narrower contexts to the core tasks they wrap,
/// re-borrowing from this one for the duration of a single poll.
pub struct TurnContext<'a> {
    pub roster: &'a mut Roster,
    pub config: &'a BattleConfig,
    pub presentation: &'a mut dyn Presentation,
    pub popups: Option<&'a mut dyn PopupSink>,
    pub input: &'a mut dyn InputSource,
    pub view: Option<&'a mut dyn SelectionView>,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        roster: &'a mut Roster,
        config: &'a BattleConfig,
        presentation: &'a mut dyn Presentation,
        input: &'a mut dyn InputSource,
    ) -> Self {
        Self {
            roster,
            config,
            presentation,
            popups: None,
            input,
            view: None,
        }
    }

    pub fn with_popups(mut self, popups: &'a mut dyn PopupSink) -> Self {
        self.popups = Some(popups);
        self
    }

    pub fn with_view(mut self, view: &'a mut dyn SelectionView) -> Self {
        self.view = Some(view);
        self
    }

    /// Context for an action sequence.
    pub fn sequence(&mut self) -> SequenceContext<'_> {
        let ctx = SequenceContext::new(&mut *self.roster, self.config, &mut *self.presentation);
        match self.popups.as_deref_mut() {
            Some(popups) => ctx.with_popups(popups),
            None => ctx,
        }
    }

    /// Context for a target selector or action menu.
    pub fn select(&mut self) -> SelectContext<'_> {
        let ctx = SelectContext::new(&*self.roster, &mut *self.input);
        match self.view.as_deref_mut() {
            Some(view) => ctx.with_view(view),
            None => ctx,
        }
    }
}
