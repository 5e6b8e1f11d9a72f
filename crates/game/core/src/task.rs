//! Resumable tasks driven by an external scheduler.
//!
//! Every component that suspends (the action sequencer and both selectors)
//! is a [`Task`]: an explicit state object whose `poll` runs until the next
//! suspension point and reports how long the scheduler should wait before
//! polling again.
//!
//! - **Single-threaded**: tasks are polled from one control flow
//! - **Cooperative**: a task only yields at the points it reports
//! - **Committed**: every mutation made before a yield is visible when the
//!   yield is returned

use core::time::Duration;

/// How long the scheduler must wait before polling again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suspend {
    /// Resume on the next scheduling tick (one frame).
    NextTick,

    /// Resume once the duration has elapsed.
    For(Duration),
}

/// Result of polling a task once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<T> {
    /// The task suspended and wants to be polled again later.
    Yield(Suspend),

    /// The task finished. Polling again is a logic error.
    Complete(T),
}

impl<T> Step<T> {
    /// Returns `true` if this step finished the task.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// Returns the suspension if the task yielded.
    #[inline]
    pub fn suspension(&self) -> Option<Suspend> {
        match self {
            Step::Yield(suspend) => Some(*suspend),
            Step::Complete(_) => None,
        }
    }

    /// Consumes the step and returns the output if the task finished.
    #[inline]
    pub fn into_output(self) -> Option<T> {
        match self {
            Step::Complete(output) => Some(output),
            Step::Yield(_) => None,
        }
    }

    pub(crate) fn wait(duration: Duration) -> Self {
        Step::Yield(Suspend::For(duration))
    }

    pub(crate) fn next_tick() -> Self {
        Step::Yield(Suspend::NextTick)
    }
}

/// A resumable unit of work polled against a context.
///
/// The context carries everything the task borrows for one tick (roster,
/// input, presentation hooks). Nothing is held across polls except the
/// task's own state.
pub trait Task<C> {
    type Output;

    /// Run until the next suspension point or completion.
    fn poll(&mut self, ctx: &mut C) -> Step<Self::Output>;
}

/// Blanket implementation for boxed tasks.
impl<C, O> Task<C> for Box<dyn Task<C, Output = O>> {
    type Output = O;

    #[inline]
    fn poll(&mut self, ctx: &mut C) -> Step<O> {
        (**self).poll(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(u32);

    impl Task<Vec<u32>> for Countdown {
        type Output = &'static str;

        fn poll(&mut self, log: &mut Vec<u32>) -> Step<&'static str> {
            log.push(self.0);
            if self.0 == 0 {
                return Step::Complete("done");
            }
            self.0 -= 1;
            Step::next_tick()
        }
    }

    #[test]
    fn polling_resumes_where_it_left_off() {
        let mut task: Box<dyn Task<Vec<u32>, Output = &'static str>> = Box::new(Countdown(2));
        let mut log = Vec::new();

        assert_eq!(task.poll(&mut log).suspension(), Some(Suspend::NextTick));
        assert_eq!(task.poll(&mut log).suspension(), Some(Suspend::NextTick));
        assert_eq!(task.poll(&mut log).into_output(), Some("done"));
        assert_eq!(log, vec![2, 1, 0]);
    }
}
