#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Snake Arcade.
//!
//! The world owns the snake body, the food board, the running score, and the
//! terminal flag. All mutation flows through [`apply`], which processes one
//! [`Command`] to completion and broadcasts [`Event`] values describing what
//! actually happened. Systems and adapters observe the run exclusively
//! through those events and the read-only [`query`] module.

mod food;
mod snake;

use food::FoodBoard;
use snake::Snake;
use snake_arcade_core::{
    CellCoord, Command, DifficultyProfile, Event, FoodKind, GameOutcome, GameOverCause, GridSize,
    Heading, PlacementError, TickResult,
};

/// Default playfield carved from a 900 x 650 pixel surface with 25px cells.
pub const DEFAULT_GRID: GridSize = GridSize::new(36, 26);

/// Represents the authoritative Snake Arcade run state.
#[derive(Debug)]
pub struct World {
    profile: DifficultyProfile,
    grid: GridSize,
    snake: Snake,
    food: FoodBoard,
    score: u32,
    outcome: GameOutcome,
    /// Heading latched at the start of the previous tick.
    heading: Heading,
    /// Latest accepted heading request, applied on the next tick.
    pending_heading: Heading,
    tick_index: u64,
}

impl World {
    /// Creates a new world on the default grid using the provided profile.
    #[must_use]
    pub fn new(profile: DifficultyProfile) -> Self {
        let mut world = Self {
            profile,
            grid: DEFAULT_GRID,
            snake: Snake::spawn_centered(DEFAULT_GRID).expect("default grid fits the snake"),
            food: FoodBoard::default(),
            score: 0,
            outcome: GameOutcome::Running,
            heading: snake::INITIAL_HEADING,
            pending_heading: snake::INITIAL_HEADING,
            tick_index: 0,
        };
        world.reset_run(DEFAULT_GRID);
        world
    }

    fn reset_run(&mut self, grid: GridSize) {
        self.grid = grid;
        self.score = 0;
        self.tick_index = 0;
        self.heading = snake::INITIAL_HEADING;
        self.pending_heading = snake::INITIAL_HEADING;
        self.food.clear();
        match Snake::spawn_centered(grid) {
            Some(snake) => {
                self.snake = snake;
                self.outcome = GameOutcome::Running;
            }
            None => {
                // A grid too small for the starting body cannot host a run.
                self.outcome = GameOutcome::GameOver(GameOverCause::BoardFull);
            }
        }
    }

    fn end_run(&mut self, cause: GameOverCause, out_events: &mut Vec<Event>) {
        self.outcome = GameOutcome::GameOver(cause);
        out_events.push(Event::GameEnded {
            cause,
            score: self.score,
        });
    }

    fn placement_error_for(&self, cell: CellCoord, kind: FoodKind) -> Option<PlacementError> {
        if !self.grid.contains(cell) {
            return Some(PlacementError::OutOfBounds);
        }
        if kind == FoodKind::Special && self.food.special_pending() {
            return Some(PlacementError::SlotFilled);
        }
        let other_food = match kind {
            FoodKind::Normal => self.food.special(),
            FoodKind::Special => self.food.normal(),
        };
        if self.snake.contains(cell) || other_food == Some(cell) {
            return Some(PlacementError::Occupied);
        }
        None
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBoard { grid } => {
            world.reset_run(grid);
            out_events.push(Event::BoardConfigured { grid });
        }
        Command::SetHeading { heading } => {
            if world.outcome.is_game_over() {
                return;
            }
            // Reject reversals against the heading the snake is actually
            // travelling, not the still-pending request; two quick inputs
            // must never fold into a 180 degree turn.
            if heading.is_reversal_of(world.heading) {
                return;
            }
            if world.pending_heading != heading {
                world.pending_heading = heading;
                out_events.push(Event::HeadingChanged { heading });
            }
        }
        Command::Tick => {
            let _ = tick(world, out_events);
        }
        Command::PlaceFood { cell, kind } => {
            if let Some(reason) = world.placement_error_for(cell, kind) {
                out_events.push(Event::FoodPlacementRejected { cell, kind, reason });
                return;
            }
            match kind {
                FoodKind::Normal => world.food.place_normal(cell),
                FoodKind::Special => world.food.place_special(cell),
            }
            out_events.push(Event::FoodPlaced { cell, kind });
        }
        Command::ResolveBonus { awarded } => {
            if world.outcome.is_game_over() {
                return;
            }
            world.score = world.score.saturating_add(awarded);
            out_events.push(Event::BonusResolved { awarded });
        }
        Command::AbortRun { cause } => {
            if world.outcome.is_game_over() {
                return;
            }
            world.end_run(cause, out_events);
        }
    }
}

/// Advances the simulation by one discrete step.
///
/// Collision checks run strictly before consumption checks: a head landing on
/// a cell that is simultaneously food and body ends the run with no score
/// awarded. Calling `tick` on a terminal world is a no-op that reports
/// [`TickResult::GameOver`].
pub fn tick(world: &mut World, out_events: &mut Vec<Event>) -> TickResult {
    if world.outcome.is_game_over() {
        return TickResult::GameOver;
    }

    world.tick_index = world.tick_index.saturating_add(1);
    world.heading = world.pending_heading;

    let head = world.snake.head();
    let Some(next) = world.heading.step(head, world.grid) else {
        world.end_run(GameOverCause::WallCollision, out_events);
        return TickResult::GameOver;
    };

    let growing = world.food.occupies(next);
    if world.snake.would_collide(next, growing) {
        world.end_run(GameOverCause::SelfCollision, out_events);
        return TickResult::GameOver;
    }

    match world.food.consume_at(next) {
        Some(FoodKind::Special) => {
            world.snake.advance(next, true);
            out_events.push(Event::SpecialFoodEaten { cell: next });
            TickResult::AteSpecialFood
        }
        Some(FoodKind::Normal) => {
            world.snake.advance(next, true);
            let points = world.profile.points_per_food();
            world.score = world.score.saturating_add(points);
            out_events.push(Event::FoodEaten { cell: next, points });
            TickResult::AteFood
        }
        None => {
            world.snake.advance(next, false);
            out_events.push(Event::SnakeAdvanced {
                from: head,
                to: next,
            });
            TickResult::Continued
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use snake_arcade_core::{
        CellCoord, DifficultyProfile, GameOutcome, GridSize, Heading,
    };

    /// Grid dimensions active for the current run.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid
    }

    /// Immutable tuning profile the run was constructed with.
    #[must_use]
    pub fn profile(world: &World) -> &DifficultyProfile {
        &world.profile
    }

    /// Base score accumulated so far, before the difficulty multiplier.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Terminal flag for the current run.
    #[must_use]
    pub fn outcome(world: &World) -> GameOutcome {
        world.outcome
    }

    /// Heading latched at the start of the previous tick.
    #[must_use]
    pub fn heading(world: &World) -> Heading {
        world.heading
    }

    /// Latest accepted heading request, applied on the next tick.
    #[must_use]
    pub fn pending_heading(world: &World) -> Heading {
        world.pending_heading
    }

    /// Number of ticks processed since the board was configured.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only view of the snake body, head first.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView {
        SnakeView {
            cells: world.snake.cells().collect(),
        }
    }

    /// Captures a read-only view of the food items on the board.
    #[must_use]
    pub fn food_view(world: &World) -> FoodView {
        FoodView {
            normal: world.food.normal(),
            special: world.food.special(),
        }
    }

    /// Read-only snapshot of the snake body, head at index zero.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SnakeView {
        cells: Vec<CellCoord>,
    }

    impl SnakeView {
        /// Cell currently occupied by the snake's head.
        #[must_use]
        pub fn head(&self) -> CellCoord {
            self.cells[0]
        }

        /// Number of cells composing the body.
        #[must_use]
        pub fn len(&self) -> usize {
            self.cells.len()
        }

        /// Reports whether the body is empty; never true for a live run.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.cells.is_empty()
        }

        /// Reports whether the body occupies the provided cell.
        #[must_use]
        pub fn contains(&self, cell: CellCoord) -> bool {
            self.cells.contains(&cell)
        }

        /// Body cells in order, head first.
        #[must_use]
        pub fn cells(&self) -> &[CellCoord] {
            &self.cells
        }
    }

    /// Read-only snapshot of the food items on the board.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FoodView {
        /// Cell holding the normal food, if placed.
        pub normal: Option<CellCoord>,
        /// Cell holding the pending special food, if any.
        pub special: Option<CellCoord>,
    }

    impl FoodView {
        /// Reports whether either food item occupies the provided cell.
        #[must_use]
        pub fn occupies(&self, cell: CellCoord) -> bool {
            self.normal == Some(cell) || self.special == Some(cell)
        }
    }
}
