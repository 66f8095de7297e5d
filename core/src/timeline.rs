use alloc::collections::VecDeque;
use core::time::Duration;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum StepAction {
    /// Grow the sequence by one color and schedule its playback.
    BeginRound,
    Light(ColorIndex),
    Dim(ColorIndex),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub due: Duration,
    pub generation: u64,
    pub action: StepAction,
}

/// Pending timed steps ordered by due time, first-scheduled first among equal deadlines.
///
/// Cancelling bumps the generation, so a step that somehow outlives its cancellation is recognizable as stale.
#[derive(Clone, Debug, Default)]
pub(crate) struct Timeline {
    steps: VecDeque<Step>,
    generation: u64,
}

impl Timeline {
    pub fn schedule(&mut self, due: Duration, action: StepAction) {
        let index = self.steps.partition_point(|step| step.due <= due);
        self.steps.insert(
            index,
            Step {
                due,
                generation: self.generation,
                action,
            },
        );
    }

    pub fn cancel_all(&mut self) {
        self.steps.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_current(&self, step: &Step) -> bool {
        step.generation == self.generation
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.steps.front().map(|step| step.due)
    }

    pub fn pop_due(&mut self, now: Duration) -> Option<Step> {
        if self.next_due()? <= now {
            self.steps.pop_front()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn pops_in_due_order_and_keeps_fifo_for_ties() {
        let mut timeline = Timeline::default();
        timeline.schedule(ms(20), StepAction::Dim(0));
        timeline.schedule(ms(10), StepAction::Light(0));
        timeline.schedule(ms(20), StepAction::Light(1));

        assert_eq!(timeline.next_due(), Some(ms(10)));
        assert_eq!(timeline.pop_due(ms(5)), None);
        assert_eq!(timeline.pop_due(ms(30)).map(|s| s.action), Some(StepAction::Light(0)));
        assert_eq!(timeline.pop_due(ms(30)).map(|s| s.action), Some(StepAction::Dim(0)));
        assert_eq!(timeline.pop_due(ms(30)).map(|s| s.action), Some(StepAction::Light(1)));
        assert!(timeline.is_empty());
    }

    #[test]
    fn cancel_makes_earlier_steps_stale() {
        let mut timeline = Timeline::default();
        timeline.schedule(ms(0), StepAction::BeginRound);
        let step = timeline.pop_due(ms(0)).unwrap();

        timeline.schedule(ms(5), StepAction::Light(2));
        timeline.cancel_all();

        assert!(!timeline.is_current(&step));
        assert!(timeline.is_empty());
    }
}
