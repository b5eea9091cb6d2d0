//! The stage machine driving one exercise.
//!
//! Stages only ever move forward, one step at a time:
//!
//! ```text
//! ┌──────┐   ┌──────────────────┐   ┌──────────────────┐   ┌────────────────┐   ┌────────┐
//! │ Init ├──►│ AwaitingOperandA ├──►│ AwaitingOperandB ├──►│ AwaitingResult ├──►│ Solved │
//! └──────┘   └──────────────────┘   └──────────────────┘   └────────────────┘   └────────┘
//! ```
//!
//! `Init` is left on a timer, each awaiting stage is left when its field holds
//! the right answer, and `Solved` is terminal.

use crate::exercise::{Exercise, Operand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    /// Exercise drawn with "?", nothing to type yet
    #[default]
    Init,
    /// Field over the first arrow
    AwaitingOperandA,
    /// Field over the second arrow
    AwaitingOperandB,
    /// Field over the result slot
    AwaitingResult,
    /// Result shown, no more input
    Solved,
}

impl Stage {
    /// Successor of this stage, `None` once solved
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Init => Some(Stage::AwaitingOperandA),
            Stage::AwaitingOperandA => Some(Stage::AwaitingOperandB),
            Stage::AwaitingOperandB => Some(Stage::AwaitingResult),
            Stage::AwaitingResult => Some(Stage::Solved),
            Stage::Solved => None,
        }
    }

    pub fn can_transition_to(self, other: Stage) -> bool {
        self.next() == Some(other)
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Solved
    }

    /// Operand whose field is open in this stage
    pub fn operand(self) -> Option<Operand> {
        match self {
            Stage::AwaitingOperandA => Some(Operand::A),
            Stage::AwaitingOperandB => Some(Operand::B),
            _ => None,
        }
    }

    /// Answer the field of this stage must hold
    pub fn expected(self, exercise: &Exercise) -> Option<u32> {
        match self {
            Stage::AwaitingOperandA => Some(exercise.a()),
            Stage::AwaitingOperandB => Some(exercise.b()),
            Stage::AwaitingResult => Some(exercise.result()),
            Stage::Init | Stage::Solved => None,
        }
    }

    /// Whether the arrow of `operand` has been drawn by the time this stage is active
    pub fn shows_arrow(self, operand: Operand) -> bool {
        match operand {
            Operand::A => self >= Stage::AwaitingOperandA,
            Operand::B => self >= Stage::AwaitingOperandB,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_linear() {
        let mut visited = vec![Stage::Init];
        let mut stage = Stage::Init;
        while let Some(next) = stage.next() {
            assert!(next > stage);
            assert!(!visited.contains(&next));
            visited.push(next);
            stage = next;
        }
        assert_eq!(
            visited,
            vec![
                Stage::Init,
                Stage::AwaitingOperandA,
                Stage::AwaitingOperandB,
                Stage::AwaitingResult,
                Stage::Solved,
            ]
        );
        assert!(stage.is_terminal());
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        assert!(Stage::Init.can_transition_to(Stage::AwaitingOperandA));
        assert!(!Stage::Init.can_transition_to(Stage::AwaitingOperandB));
        assert!(!Stage::AwaitingOperandB.can_transition_to(Stage::AwaitingOperandA));
        assert!(!Stage::Solved.can_transition_to(Stage::Init));
    }

    #[test]
    fn test_expected_values() {
        let exercise = Exercise::new(6, 5);
        assert_eq!(Stage::Init.expected(&exercise), None);
        assert_eq!(Stage::AwaitingOperandA.expected(&exercise), Some(6));
        assert_eq!(Stage::AwaitingOperandB.expected(&exercise), Some(5));
        assert_eq!(Stage::AwaitingResult.expected(&exercise), Some(11));
        assert_eq!(Stage::Solved.expected(&exercise), None);
    }

    #[test]
    fn test_arrows_accumulate() {
        assert!(!Stage::Init.shows_arrow(Operand::A));
        assert!(Stage::AwaitingOperandA.shows_arrow(Operand::A));
        assert!(!Stage::AwaitingOperandA.shows_arrow(Operand::B));
        assert!(Stage::Solved.shows_arrow(Operand::B));
    }
}
