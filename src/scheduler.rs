use crate::stage::Stage;
use std::time::Duration;

/// One-shot timer port used by the stage controller.
///
/// A scheduled entry is never cancelled; when it fires the host hands the
/// stage back to `StageController::on_timer`.
pub trait Scheduler {
    fn schedule_once(&mut self, delay: Duration, stage: Stage);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    due: f64,
    stage: Stage,
}

/// Timers driven by the frame clock (seconds, as reported by `egui::InputState::time`)
#[derive(Debug, Default)]
pub struct FrameTimers {
    now: f64,
    pending: Vec<Pending>,
}

impl FrameTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock; call once at the start of every frame
    pub fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    /// Removes and returns every stage whose delay has elapsed, earliest first
    pub fn take_due(&mut self) -> Vec<Stage> {
        let now = self.now;
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|pending| {
            if pending.due <= now {
                due.push(*pending);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due.into_iter().map(|pending| pending.stage).collect()
    }

    /// Time until the next timer fires, if any is pending
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|pending| pending.due)
            .min_by(f64::total_cmp)
            .map(|due| Duration::from_secs_f64((due - self.now).max(0.0)))
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for FrameTimers {
    fn schedule_once(&mut self, delay: Duration, stage: Stage) {
        log::debug!("Scheduling {:?} in {:?}", stage, delay);
        self.pending.push(Pending {
            due: self.now + delay.as_secs_f64(),
            stage,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_after_delay() {
        let mut timers = FrameTimers::new();
        timers.set_now(1.0);
        timers.schedule_once(Duration::from_millis(500), Stage::AwaitingOperandA);

        timers.set_now(1.4);
        assert!(timers.take_due().is_empty());
        assert!(!timers.is_idle());

        timers.set_now(1.5);
        assert_eq!(timers.take_due(), vec![Stage::AwaitingOperandA]);
        assert!(timers.is_idle());
        assert!(timers.take_due().is_empty());
    }

    #[test]
    fn test_next_wakeup() {
        let mut timers = FrameTimers::new();
        assert_eq!(timers.next_wakeup(), None);

        timers.schedule_once(Duration::from_millis(500), Stage::AwaitingOperandB);
        timers.set_now(0.25);
        let wakeup = timers.next_wakeup().unwrap();
        assert!((wakeup.as_secs_f64() - 0.25).abs() < 1e-9);

        timers.set_now(2.0);
        assert_eq!(timers.next_wakeup(), Some(Duration::ZERO));
    }

    #[test]
    fn test_due_timers_come_out_in_order() {
        let mut timers = FrameTimers::new();
        timers.schedule_once(Duration::from_millis(300), Stage::AwaitingOperandB);
        timers.schedule_once(Duration::from_millis(100), Stage::AwaitingOperandA);
        timers.set_now(1.0);
        assert_eq!(
            timers.take_due(),
            vec![Stage::AwaitingOperandA, Stage::AwaitingOperandB]
        );
    }
}
