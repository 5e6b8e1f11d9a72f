//! Per-tick input edges consumed by the selectors.

use std::collections::VecDeque;

use bitflags::bitflags;

bitflags! {
    /// Input edges observed during one scheduling tick.
    ///
    /// Several edges may be set at once; selectors process them in a fixed
    /// order (previous, next, cancel, confirm).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InputEvents: u8 {
        const PREVIOUS = 1 << 0;
        const NEXT     = 1 << 1;
        const CONFIRM  = 1 << 2;
        const CANCEL   = 1 << 3;
    }
}

/// Source of input edges, polled once per tick by an active selector.
pub trait InputSource {
    fn poll_events(&mut self) -> InputEvents;
}

impl<F> InputSource for F
where
    F: FnMut() -> InputEvents,
{
    fn poll_events(&mut self) -> InputEvents {
        self()
    }
}

/// Replays a fixed list of frames, then reports no input forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputEvents>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputEvents>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Appends one frame to the end of the script.
    pub fn push(&mut self, events: InputEvents) {
        self.frames.push_back(events);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> InputEvents {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_runs_dry_into_empty_frames() {
        let mut input = ScriptedInput::new([InputEvents::NEXT, InputEvents::CONFIRM]);

        assert_eq!(input.poll_events(), InputEvents::NEXT);
        assert_eq!(input.poll_events(), InputEvents::CONFIRM);
        assert!(input.poll_events().is_empty());
        assert_eq!(input.remaining(), 0);
    }
}
