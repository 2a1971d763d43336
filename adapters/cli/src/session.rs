//! Headless game session driven by a deterministic greedy bot.
//!
//! The session owns the timing loop the rendering shell would normally
//! provide: it fires the tick source, withholds ticks while the bonus
//! controller blocks, and pumps world events through the systems until the
//! batch quiesces. With a fixed seed and question deck the whole run replays
//! identically.

use snake_arcade_core::{
    Command, DifficultyProfile, Event, GameOutcome, GameOverCause, GridSize, Heading,
};
use snake_arcade_system_bonus::{BonusController, Phase, Question, QuestionError, QuestionSource};
use snake_arcade_system_spawning::{Config as SpawnConfig, Spawning};
use snake_arcade_world::{self as world, query, World};

/// Summary of a finished headless session.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionOutcome {
    /// Score accumulated before the difficulty multiplier.
    pub(crate) base_score: u32,
    /// Cause that terminated the run, if it terminated.
    pub(crate) cause: Option<GameOverCause>,
    /// Simulation ticks processed.
    pub(crate) ticks: u64,
    /// Final body length of the snake.
    pub(crate) snake_length: usize,
    /// Number of bonus questions the session answered.
    pub(crate) questions_answered: u32,
}

/// Finite deck of canned trivia questions.
///
/// Once exhausted, fetches fail with [`QuestionError::Unavailable`], which
/// exercises the no-bonus recovery path of the controller.
#[derive(Debug, Default)]
pub(crate) struct TriviaDeck {
    questions: Vec<Question>,
}

impl TriviaDeck {
    pub(crate) fn canned() -> Self {
        let questions = vec![
            Question {
                prompt: "2 + 2 = ?".to_owned(),
                solution: "4".to_owned(),
            },
            Question {
                prompt: "7 - 3 = ?".to_owned(),
                solution: "4".to_owned(),
            },
            Question {
                prompt: "3 * 3 = ?".to_owned(),
                solution: "9".to_owned(),
            },
        ];
        Self { questions }
    }
}

impl QuestionSource for TriviaDeck {
    fn fetch_question(&mut self) -> Result<Question, QuestionError> {
        if self.questions.is_empty() {
            return Err(QuestionError::Unavailable);
        }
        Ok(self.questions.remove(0))
    }
}

/// Runs a full game to termination or the tick budget, whichever comes first.
pub(crate) fn run(
    profile: DifficultyProfile,
    grid: GridSize,
    seed: u64,
    max_ticks: u64,
    questions: &mut dyn QuestionSource,
) -> SessionOutcome {
    let mut world = World::new(profile);
    let mut spawning = Spawning::new(SpawnConfig::new(profile.special_food_chance(), seed));
    let mut bonus = BonusController::new(profile.bonus_points(), profile.countdown_ticks());

    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureBoard { grid }, &mut events);

    let mut questions_answered = 0;

    // Each iteration models one fire of the periodic tick source.
    for _ in 0..max_ticks {
        pump(&mut world, &mut spawning, &mut bonus, &mut events);

        if query::outcome(&world).is_game_over() {
            break;
        }

        if bonus.blocks_ticking() {
            if bonus.phase() == Phase::AwaitingAnswer {
                let token = bonus.run_token();
                let answer = questions
                    .fetch_question()
                    .map(|question| collect_answer(&question));
                if answer.is_ok() {
                    questions_answered += 1;
                }
                let mut commands = Vec::new();
                bonus.resolve(token, answer, &mut commands);
                for command in commands {
                    world::apply(&mut world, command, &mut events);
                }
            } else {
                let _ = bonus.advance_countdown();
            }
            continue;
        }

        if let Some(heading) = plan_heading(&world) {
            world::apply(&mut world, Command::SetHeading { heading }, &mut events);
        }
        world::apply(&mut world, Command::Tick, &mut events);
    }

    pump(&mut world, &mut spawning, &mut bonus, &mut events);

    let cause = match query::outcome(&world) {
        GameOutcome::Running => None,
        GameOutcome::GameOver(cause) => Some(cause),
    };
    SessionOutcome {
        base_score: query::score(&world),
        cause,
        ticks: query::tick_index(&world),
        snake_length: query::snake_view(&world).len(),
        questions_answered,
    }
}

/// Drains world events through the systems until no commands remain.
fn pump(world: &mut World, spawning: &mut Spawning, bonus: &mut BonusController, events: &mut Vec<Event>) {
    while !events.is_empty() {
        let batch = std::mem::take(events);
        bonus.handle(&batch);

        let grid = query::grid_size(world);
        let snake = query::snake_view(world);
        let food = query::food_view(world);
        let mut commands = Vec::new();
        spawning.handle(&batch, grid, &snake, &food, &mut commands);
        for command in commands {
            world::apply(world, command, events);
        }
    }
}

/// The scripted player reads the solution straight off the card, so any
/// question with a usable solution is answered correctly.
fn collect_answer(question: &Question) -> bool {
    !question.solution.is_empty()
}

/// Greedy heading choice: close on the special food when pending, otherwise
/// the normal food, never reversing and never stepping into a wall or body.
fn plan_heading(world: &World) -> Option<Heading> {
    let grid = query::grid_size(world);
    let snake = query::snake_view(world);
    let food = query::food_view(world);
    let current = query::heading(world);
    let head = snake.head();

    let target = food.special.or(food.normal)?;

    let candidates = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];
    let mut best: Option<(u32, Heading)> = None;
    for heading in candidates {
        if heading.is_reversal_of(current) {
            continue;
        }
        let Some(next) = heading.step(head, grid) else {
            continue;
        };
        if snake.contains(next) {
            continue;
        }
        let distance = next.manhattan_distance(target);
        let better = match best {
            None => true,
            Some((best_distance, _)) => distance < best_distance,
        };
        if better {
            best = Some((distance, heading));
        }
    }
    best.map(|(_, heading)| heading)
}

/// Formats a terminal cause for the session report.
pub(crate) fn describe_cause(cause: Option<GameOverCause>) -> &'static str {
    match cause {
        None => "tick budget exhausted",
        Some(GameOverCause::WallCollision) => "hit the wall",
        Some(GameOverCause::SelfCollision) => "ran into itself",
        Some(GameOverCause::BoardFull) => "board full",
    }
}
