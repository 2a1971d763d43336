#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic food spawning system.
//!
//! The spawner reacts to world events and emits [`Command::PlaceFood`]
//! batches. It owns the only source of randomness in the simulation: a seeded
//! [`ChaCha8Rng`], so identical seeds replay identical food sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_arcade_core::{CellCoord, Command, Event, FoodKind, GameOverCause, GridSize};
use snake_arcade_world::query::{FoodView, SnakeView};

/// Upper bound on random placement attempts for the special food.
const MAX_SPECIAL_ATTEMPTS: u32 = 100;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    special_chance_percent: u8,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided chance and seed.
    #[must_use]
    pub const fn new(special_chance_percent: u8, rng_seed: u64) -> Self {
        Self {
            special_chance_percent,
            rng_seed,
        }
    }
}

/// Pure system that keeps the board supplied with food.
#[derive(Debug)]
pub struct Spawning {
    special_chance_percent: u8,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            special_chance_percent: config.special_chance_percent,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and immutable views to emit placement commands.
    ///
    /// A fresh normal food is requested whenever the board is configured, the
    /// normal food is eaten, or a bonus question resolves. The special-food
    /// roll happens on the first two triggers only, and never while a special
    /// food is already pending.
    pub fn handle(
        &mut self,
        events: &[Event],
        grid: GridSize,
        snake: &SnakeView,
        food: &FoodView,
        out: &mut Vec<Command>,
    ) {
        let mut place_normal = false;
        let mut roll_special = false;

        for event in events {
            match event {
                Event::BoardConfigured { .. } | Event::FoodEaten { .. } => {
                    place_normal = true;
                    roll_special = true;
                }
                Event::BonusResolved { .. } => {
                    place_normal = true;
                }
                _ => {}
            }
        }

        if !place_normal {
            return;
        }

        let Some(normal_cell) = self.place_normal_food(grid, snake, food.special) else {
            out.push(Command::AbortRun {
                cause: GameOverCause::BoardFull,
            });
            return;
        };
        out.push(Command::PlaceFood {
            cell: normal_cell,
            kind: FoodKind::Normal,
        });

        if roll_special && food.special.is_none() {
            if let Some(cell) = self.maybe_spawn_special(grid, snake, normal_cell) {
                out.push(Command::PlaceFood {
                    cell,
                    kind: FoodKind::Special,
                });
            }
        }
    }

    /// Draws uniformly from the free cells of the grid.
    ///
    /// Enumerating the free set guarantees termination: an empty set reports
    /// `None` (the board-full condition) instead of looping on rejection.
    fn place_normal_food(
        &mut self,
        grid: GridSize,
        snake: &SnakeView,
        special: Option<CellCoord>,
    ) -> Option<CellCoord> {
        let mut free: Vec<CellCoord> = Vec::with_capacity(grid.cell_count());
        for row in 0..grid.rows() {
            for column in 0..grid.columns() {
                let cell = CellCoord::new(column, row);
                if snake.contains(cell) || special == Some(cell) {
                    continue;
                }
                free.push(cell);
            }
        }

        if free.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..free.len());
        Some(free[index])
    }

    /// Rolls once for the special food and attempts a bounded placement.
    ///
    /// Exhausting the retry budget falls back to no special food; the
    /// mandatory normal food has already been placed by the caller.
    fn maybe_spawn_special(
        &mut self,
        grid: GridSize,
        snake: &SnakeView,
        normal: CellCoord,
    ) -> Option<CellCoord> {
        if grid.columns() == 0 || grid.rows() == 0 {
            return None;
        }

        let roll: u8 = self.rng.gen_range(0..100);
        if roll >= self.special_chance_percent {
            return None;
        }

        for _ in 0..MAX_SPECIAL_ATTEMPTS {
            let cell = CellCoord::new(
                self.rng.gen_range(0..grid.columns()),
                self.rng.gen_range(0..grid.rows()),
            );
            if cell == normal || snake.contains(cell) {
                continue;
            }
            return Some(cell);
        }
        None
    }
}
