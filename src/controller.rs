use crate::answer::{self, Verdict};
use crate::exercise::{Exercise, Operand};
use crate::field::{FieldId, FieldTone};
use crate::renderer::ExerciseOptions;
use crate::scheduler::Scheduler;
use crate::stage::Stage;
use crate::view::View;
use std::time::Duration;

/// Pause before each stage is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDelays {
    /// Before the first field appears and after each operand is solved
    pub operand: Duration,
    /// After the result is solved; zero enters `Solved` synchronously
    pub result: Duration,
}

impl Default for StageDelays {
    fn default() -> Self {
        Self {
            operand: Duration::from_millis(500),
            result: Duration::ZERO,
        }
    }
}

impl StageDelays {
    /// Delay before leaving `stage` once its condition is met
    fn after(&self, stage: Stage) -> Duration {
        match stage {
            Stage::AwaitingResult => self.result,
            _ => self.operand,
        }
    }
}

/// The field the learner is typing into, with what it must contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveField {
    pub field: FieldId,
    pub expected: u32,
    /// Operand highlighted while the answer is wrong; none for the result
    pub mark: Option<Operand>,
    pub tone: FieldTone,
}

/// Sequences one exercise through its stages.
///
/// The controller owns the stage and the active field exclusively. The view and
/// the scheduler are borrowed per event, so the host stays free to paint and
/// poll them between events.
#[derive(Debug)]
pub struct StageController {
    exercise: Exercise,
    stage: Stage,
    active: Option<ActiveField>,
    delays: StageDelays,
    started: bool,
}

impl StageController {
    pub fn new(exercise: Exercise, delays: StageDelays) -> Self {
        Self {
            exercise,
            stage: Stage::Init,
            active: None,
            delays,
            started: false,
        }
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn active_field(&self) -> Option<&ActiveField> {
        self.active.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Entry action of `Init`: draws the unsolved exercise and arms the first stage
    pub fn run(&mut self, view: &mut dyn View, scheduler: &mut dyn Scheduler) {
        if self.started {
            log::warn!("Exercise already running");
            return;
        }
        self.started = true;
        log::info!("Starting exercise {}", self.exercise);

        view.draw_exercise(ExerciseOptions::neutral());
        if let Some(next) = self.stage.next() {
            scheduler.schedule_once(self.delays.operand, next);
        }
    }

    /// A timer scheduled by this controller fired
    pub fn on_timer(&mut self, stage: Stage, view: &mut dyn View) {
        if !self.stage.can_transition_to(stage) {
            log::warn!("Ignoring timer for {:?} while in {:?}", stage, self.stage);
            return;
        }
        self.enter(stage, view);
    }

    /// The text of `field` changed to `text`.
    ///
    /// Returns the verdict, or `None` if `field` is not the active field.
    pub fn on_input(
        &mut self,
        field: FieldId,
        text: &str,
        view: &mut dyn View,
        scheduler: &mut dyn Scheduler,
    ) -> Option<Verdict> {
        let active = self.active.as_mut().filter(|active| active.field == field);
        let Some(active) = active else {
            log::debug!("Ignoring input for inactive field {:?}", field);
            return None;
        };

        let verdict = answer::check(text, active.expected);
        log::debug!("{:?}: {:?} -> {:?}", self.stage, text, verdict);

        match verdict {
            Verdict::Match => {
                self.active = None;
                view.remove_field(field);
                view.draw_exercise(ExerciseOptions::neutral());
                self.advance(view, scheduler);
            }
            Verdict::Empty => {
                active.tone = FieldTone::Neutral;
                view.set_field_tone(field, FieldTone::Neutral);
                view.draw_exercise(ExerciseOptions::neutral());
            }
            Verdict::Mismatch => {
                active.tone = FieldTone::Error;
                let mark = active.mark;
                view.set_field_tone(field, FieldTone::Error);
                view.draw_exercise(ExerciseOptions::marked(mark));
            }
        }
        Some(verdict)
    }

    /// Redraws everything the current stage shows, after the view was relaid out
    pub fn restore(&self, view: &mut dyn View) {
        if !self.started {
            return;
        }
        let options = match (self.stage, &self.active) {
            (Stage::Solved, _) => ExerciseOptions::solved(),
            (_, Some(active)) if active.tone == FieldTone::Error => ExerciseOptions::marked(active.mark),
            _ => ExerciseOptions::neutral(),
        };
        view.draw_exercise(options);

        for operand in [Operand::A, Operand::B] {
            if self.stage.shows_arrow(operand) {
                view.draw_arrow(operand);
            }
        }
    }

    fn advance(&mut self, view: &mut dyn View, scheduler: &mut dyn Scheduler) {
        let Some(next) = self.stage.next() else {
            return;
        };
        let delay = self.delays.after(self.stage);
        if delay.is_zero() {
            self.enter(next, view);
        } else {
            scheduler.schedule_once(delay, next);
        }
    }

    fn enter(&mut self, stage: Stage, view: &mut dyn View) {
        log::info!("Entering {:?}", stage);
        self.stage = stage;

        let field = match stage {
            Stage::AwaitingOperandA | Stage::AwaitingOperandB => {
                let Some(operand) = stage.operand() else {
                    return;
                };
                view.draw_arrow(operand);
                Some(view.create_operand_input(operand))
            }
            Stage::AwaitingResult => Some(view.create_result_input()),
            Stage::Solved => {
                view.draw_exercise(ExerciseOptions::solved());
                None
            }
            Stage::Init => None,
        };

        self.active = field.zip(stage.expected(&self.exercise)).map(|(field, expected)| ActiveField {
            field,
            expected,
            mark: stage.operand(),
            tone: FieldTone::Neutral,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_per_stage() {
        let delays = StageDelays::default();
        assert_eq!(delays.after(Stage::Init), Duration::from_millis(500));
        assert_eq!(delays.after(Stage::AwaitingOperandA), Duration::from_millis(500));
        assert_eq!(delays.after(Stage::AwaitingOperandB), Duration::from_millis(500));
        assert_eq!(delays.after(Stage::AwaitingResult), Duration::ZERO);
    }

    #[test]
    fn test_new_controller_is_idle() {
        let controller = StageController::new(Exercise::new(7, 4), StageDelays::default());
        assert_eq!(controller.stage(), Stage::Init);
        assert!(controller.active_field().is_none());
        assert!(!controller.is_started());
    }
}
