#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bonus event controller for the special-food mini-event.
//!
//! Eating the special food suspends normal ticking while an external trivia
//! question is answered, then resumes through a short countdown. The flow is
//! an explicit state machine rather than chained callbacks:
//!
//! `Idle → AwaitingAnswer → Resuming → Idle`
//!
//! The adapter owning the tick timer consults [`BonusController::blocks_ticking`]
//! each timer fire; while the controller is away from `Idle` the snake does
//! not move, though heading input keeps being buffered by the world.

use snake_arcade_core::{Command, Event};
use thiserror::Error;

/// Phases of the bonus mini-event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No bonus event in flight; normal ticking.
    Idle,
    /// Special food was eaten; ticking is suspended pending the answer.
    AwaitingAnswer,
    /// Answer applied; counting down frozen steps before ticking resumes.
    Resuming {
        /// Frozen steps remaining before the controller returns to `Idle`.
        remaining: u32,
    },
}

/// Token tying an in-flight question to the run that asked it.
///
/// Stale resolutions carrying a token from a superseded run are discarded
/// instead of being applied to the new game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

/// Errors reported by a bonus-question provider.
///
/// Every variant resolves the event as "no bonus, continue play"; a fetch
/// failure never leaves the controller stuck awaiting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// The provider could not be reached or returned no question.
    #[error("bonus question provider unavailable")]
    Unavailable,
    /// The provider did not answer within the allotted time.
    #[error("bonus question fetch timed out")]
    Timeout,
}

/// Opaque question handed to the answer-collection step outside this core.
///
/// The controller never inspects the prompt; it only consumes the eventual
/// correctness boolean.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    /// Reference to the prompt shown to the player.
    pub prompt: String,
    /// Solution the collection step compares the player's answer against.
    pub solution: String,
}

/// External provider of bonus questions.
pub trait QuestionSource {
    /// Fetches the next question, or fails without blocking the simulation.
    fn fetch_question(&mut self) -> Result<Question, QuestionError>;
}

/// State machine driving the special-food bonus flow.
#[derive(Debug)]
pub struct BonusController {
    phase: Phase,
    run: RunToken,
    bonus_points: u32,
    countdown_ticks: u32,
}

impl BonusController {
    /// Creates an idle controller with the provided award and countdown tuning.
    #[must_use]
    pub const fn new(bonus_points: u32, countdown_ticks: u32) -> Self {
        Self {
            phase: Phase::Idle,
            run: RunToken(0),
            bonus_points,
            countdown_ticks,
        }
    }

    /// Current phase of the controller.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Token identifying the run the controller currently serves.
    #[must_use]
    pub const fn run_token(&self) -> RunToken {
        self.run
    }

    /// Reports whether the adapter must withhold simulation ticks.
    #[must_use]
    pub const fn blocks_ticking(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Consumes world events, entering or cancelling the bonus flow.
    ///
    /// A board reset or a terminal run invalidates the run token so that any
    /// answer still in flight is discarded when it eventually arrives.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::SpecialFoodEaten { .. } => {
                    if self.phase == Phase::Idle {
                        self.phase = Phase::AwaitingAnswer;
                    }
                }
                Event::BoardConfigured { .. } | Event::GameEnded { .. } => {
                    self.cancel();
                }
                _ => {}
            }
        }
    }

    /// Applies the outcome of the answer-collection step.
    ///
    /// Emits [`Command::ResolveBonus`] with the award (zero for a wrong
    /// answer or any fetch failure) and starts the resume countdown. A token
    /// from a superseded run, or a resolution outside `AwaitingAnswer`, is
    /// ignored entirely.
    pub fn resolve(
        &mut self,
        token: RunToken,
        answer: Result<bool, QuestionError>,
        out: &mut Vec<Command>,
    ) {
        if token != self.run || self.phase != Phase::AwaitingAnswer {
            return;
        }

        let awarded = match answer {
            Ok(true) => self.bonus_points,
            Ok(false) | Err(_) => 0,
        };
        out.push(Command::ResolveBonus { awarded });
        self.phase = if self.countdown_ticks == 0 {
            Phase::Idle
        } else {
            Phase::Resuming {
                remaining: self.countdown_ticks,
            }
        };
    }

    /// Advances the resume countdown by one timer fire.
    ///
    /// Returns `true` on the fire that returns the controller to `Idle`.
    pub fn advance_countdown(&mut self) -> bool {
        match self.phase {
            Phase::Resuming { remaining } if remaining <= 1 => {
                self.phase = Phase::Idle;
                true
            }
            Phase::Resuming { remaining } => {
                self.phase = Phase::Resuming {
                    remaining: remaining - 1,
                };
                false
            }
            Phase::Idle | Phase::AwaitingAnswer => false,
        }
    }

    fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.run = RunToken(self.run.0.wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_core::{CellCoord, GameOverCause, GridSize};

    fn special_eaten() -> Vec<Event> {
        vec![Event::SpecialFoodEaten {
            cell: CellCoord::new(4, 4),
        }]
    }

    #[test]
    fn special_food_suspends_ticking() {
        let mut controller = BonusController::new(10, 3);
        assert!(!controller.blocks_ticking());
        controller.handle(&special_eaten());
        assert_eq!(controller.phase(), Phase::AwaitingAnswer);
        assert!(controller.blocks_ticking());
    }

    #[test]
    fn correct_answer_awards_the_bonus() {
        let mut controller = BonusController::new(10, 3);
        controller.handle(&special_eaten());
        let mut commands = Vec::new();
        controller.resolve(controller.run_token(), Ok(true), &mut commands);
        assert_eq!(commands, vec![Command::ResolveBonus { awarded: 10 }]);
        assert_eq!(controller.phase(), Phase::Resuming { remaining: 3 });
    }

    #[test]
    fn fetch_failure_resolves_without_award() {
        let mut controller = BonusController::new(10, 3);
        controller.handle(&special_eaten());
        let mut commands = Vec::new();
        controller.resolve(
            controller.run_token(),
            Err(QuestionError::Unavailable),
            &mut commands,
        );
        assert_eq!(commands, vec![Command::ResolveBonus { awarded: 0 }]);
        assert!(matches!(controller.phase(), Phase::Resuming { .. }));
    }

    #[test]
    fn countdown_returns_to_idle() {
        let mut controller = BonusController::new(10, 3);
        controller.handle(&special_eaten());
        let mut commands = Vec::new();
        controller.resolve(controller.run_token(), Ok(false), &mut commands);

        assert!(!controller.advance_countdown());
        assert!(!controller.advance_countdown());
        assert!(controller.advance_countdown());
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.blocks_ticking());
    }

    #[test]
    fn stale_run_token_is_discarded() {
        let mut controller = BonusController::new(10, 3);
        controller.handle(&special_eaten());
        let stale = controller.run_token();

        // The run ends while the question is still in flight.
        controller.handle(&[Event::GameEnded {
            cause: GameOverCause::WallCollision,
            score: 30,
        }]);
        assert_eq!(controller.phase(), Phase::Idle);

        let mut commands = Vec::new();
        controller.resolve(stale, Ok(true), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn board_reset_cancels_the_flow() {
        let mut controller = BonusController::new(10, 3);
        controller.handle(&special_eaten());
        controller.handle(&[Event::BoardConfigured {
            grid: GridSize::new(10, 10),
        }]);
        assert_eq!(controller.phase(), Phase::Idle);

        let mut commands = Vec::new();
        controller.resolve(controller.run_token(), Ok(true), &mut commands);
        assert!(commands.is_empty(), "resolution outside AwaitingAnswer is ignored");
    }

    #[test]
    fn resolving_twice_applies_once() {
        let mut controller = BonusController::new(10, 0);
        controller.handle(&special_eaten());
        let token = controller.run_token();
        let mut commands = Vec::new();
        controller.resolve(token, Ok(true), &mut commands);
        controller.resolve(token, Ok(true), &mut commands);
        assert_eq!(commands, vec![Command::ResolveBonus { awarded: 10 }]);
        assert_eq!(controller.phase(), Phase::Idle);
    }
}
