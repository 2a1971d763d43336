#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared vocabulary of the Snake Arcade engine.
//!
//! Everything that crosses a crate boundary is named here and nowhere else:
//! the [`Command`] values adapters feed into the world, the [`Event`] values
//! the world answers with, and the small copyable types those messages are
//! assembled from. Grid geometry, headings, difficulty tuning, and persisted
//! score records all live in this crate so that the world and the systems
//! agree on meaning without depending on one another. No game rules are
//! implemented here; a command describes an intent, and only the world
//! decides what actually happens.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the run on a board with the provided grid dimensions.
    ConfigureBoard {
        /// Number of columns and rows composing the playfield.
        grid: GridSize,
    },
    /// Requests that the snake steer toward the provided heading.
    ///
    /// An exact reversal of the heading applied on the previous tick is
    /// rejected silently and the prior heading is retained.
    SetHeading {
        /// Heading the snake should adopt on the next tick.
        heading: Heading,
    },
    /// Advances the simulation by a single discrete step.
    Tick,
    /// Requests placement of a food item at the provided cell.
    PlaceFood {
        /// Cell the food item should occupy.
        cell: CellCoord,
        /// Whether the item is the normal or the special food.
        kind: FoodKind,
    },
    /// Applies the outcome of a bonus question to the run.
    ResolveBonus {
        /// Points awarded for the answer; zero when incorrect or failed.
        awarded: u32,
    },
    /// Forcibly terminates the run outside of the collision rules.
    AbortRun {
        /// Terminal cause recorded for the aborted run.
        cause: GameOverCause,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the board was reset with fresh run state.
    BoardConfigured {
        /// Grid dimensions activated for the run.
        grid: GridSize,
    },
    /// Confirms that a heading request was accepted for the next tick.
    HeadingChanged {
        /// Heading that will be latched when the next tick starts.
        heading: Heading,
    },
    /// Confirms that the snake moved one cell without consuming food.
    SnakeAdvanced {
        /// Cell the head occupied before the step.
        from: CellCoord,
        /// Cell the head occupies after the step.
        to: CellCoord,
    },
    /// Confirms that the snake consumed the normal food and grew.
    FoodEaten {
        /// Cell the consumed food occupied.
        cell: CellCoord,
        /// Points credited to the running score.
        points: u32,
    },
    /// Confirms that the snake consumed the special food.
    ///
    /// No points are credited here; the bonus controller decides the award.
    SpecialFoodEaten {
        /// Cell the consumed special food occupied.
        cell: CellCoord,
    },
    /// Confirms that a food item was placed onto the board.
    FoodPlaced {
        /// Cell the food item occupies.
        cell: CellCoord,
        /// Whether the item is the normal or the special food.
        kind: FoodKind,
    },
    /// Reports that a food placement request was rejected.
    FoodPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Kind of food requested for placement.
        kind: FoodKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a bonus question outcome was applied.
    BonusResolved {
        /// Points credited to the running score; zero for no bonus.
        awarded: u32,
    },
    /// Announces that the run reached a terminal state.
    GameEnded {
        /// Cause that terminated the run.
        cause: GameOverCause,
        /// Base score accumulated when the run ended.
        score: u32,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Dimensions of the playfield measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new grid size descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the provided cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Total number of cells composing the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Cell closest to the geometric center of the grid.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }
}

/// Pure conversion between pixel coordinates and discrete board cells.
///
/// The playfield is carved from a pixel surface by integer division: a board
/// of `width × height` pixels with square cells of `cell_length` pixels
/// yields a `width / cell_length` by `height / cell_length` grid. Pixels in
/// the remainder strip beyond the last whole cell belong to no cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    width: u32,
    height: u32,
    cell_length: u32,
}

impl BoardGeometry {
    /// Creates a new geometry from board pixel dimensions and cell edge length.
    #[must_use]
    pub const fn new(width: u32, height: u32, cell_length: u32) -> Self {
        Self {
            width,
            height,
            cell_length,
        }
    }

    /// Width of the board surface in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the board surface in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Edge length of a single square cell in pixels.
    #[must_use]
    pub const fn cell_length(&self) -> u32 {
        self.cell_length
    }

    /// Grid dimensions derived from the pixel surface.
    ///
    /// A zero cell length produces an empty grid instead of dividing by zero.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        if self.cell_length == 0 {
            return GridSize::new(0, 0);
        }
        GridSize::new(self.width / self.cell_length, self.height / self.cell_length)
    }

    /// Resolves the cell containing the provided pixel coordinate, if any.
    #[must_use]
    pub fn cell_at(&self, x: u32, y: u32) -> Option<CellCoord> {
        if self.cell_length == 0 {
            return None;
        }
        let cell = CellCoord::new(x / self.cell_length, y / self.cell_length);
        if self.grid_size().contains(cell) {
            Some(cell)
        } else {
            None
        }
    }

    /// Pixel coordinate of the upper-left corner of the provided cell.
    #[must_use]
    pub const fn pixel_origin(&self, cell: CellCoord) -> (u32, u32) {
        (
            cell.column() * self.cell_length,
            cell.row() * self.cell_length,
        )
    }
}

/// Travel headings available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Heading {
    /// Heading pointing in the exact opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether adopting `self` would reverse the provided heading.
    #[must_use]
    pub fn is_reversal_of(self, other: Heading) -> bool {
        self == other.opposite()
    }

    /// Cell one step along the heading, or `None` when the step leaves the grid.
    #[must_use]
    pub fn step(self, from: CellCoord, grid: GridSize) -> Option<CellCoord> {
        let next = match self {
            Self::Up => CellCoord::new(from.column(), from.row().checked_sub(1)?),
            Self::Down => CellCoord::new(from.column(), from.row() + 1),
            Self::Left => CellCoord::new(from.column().checked_sub(1)?, from.row()),
            Self::Right => CellCoord::new(from.column() + 1, from.row()),
        };
        if grid.contains(next) {
            Some(next)
        } else {
            None
        }
    }
}

/// Distinguishes the two food items that can occupy the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoodKind {
    /// The always-present consumable food worth `points_per_food`.
    Normal,
    /// The rare food that triggers a bonus question when consumed.
    Special,
}

/// Outcome reported by a single simulation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// The snake advanced without consuming anything.
    Continued,
    /// The snake consumed the normal food and grew.
    AteFood,
    /// The snake consumed the special food; ticking should suspend.
    AteSpecialFood,
    /// The run is terminal; the tick timer should stop.
    GameOver,
}

/// Terminal causes that end a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The snake's head left the grid bounds.
    WallCollision,
    /// The snake's head entered a cell occupied by its own body.
    SelfCollision,
    /// The spawner found no free cell to place the mandatory food.
    BoardFull,
}

/// Whether a run is still advancing or has reached a terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// The run is live and ticks mutate state.
    Running,
    /// The run is terminal; further ticks are no-ops.
    GameOver(GameOverCause),
}

impl GameOutcome {
    /// Reports whether the run reached a terminal state.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver(_))
    }
}

/// Reasons a food placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies beyond the configured grid bounds.
    OutOfBounds,
    /// The requested cell is occupied by the snake or the other food item.
    Occupied,
    /// A special food is already pending; only one may exist at a time.
    SlotFilled,
}

/// Named difficulty buckets that scope scoring and leaderboard queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Slowest cadence, lowest point values.
    Easy,
    /// Middle cadence and point values.
    Medium,
    /// Fastest cadence, highest point values.
    Hard,
}

impl Difficulty {
    /// Human-readable bucket name used for display and persistence.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Simulation steps per second for the bucket.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        match self {
            Self::Easy => 5,
            Self::Medium => 8,
            Self::Hard => 12,
        }
    }

    /// Multiplier applied to the base score when a record is built.
    #[must_use]
    pub const fn score_multiplier(&self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.5,
        }
    }

    /// Points credited for each normal food consumed.
    #[must_use]
    pub const fn points_per_food(&self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 15,
            Self::Hard => 20,
        }
    }
}

/// Immutable tuning values selected once before a run starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile {
    difficulty: Difficulty,
    tick_interval: Duration,
    score_multiplier: f64,
    points_per_food: u32,
    special_food_chance: u8,
    bonus_points: u32,
    countdown_ticks: u32,
}

/// Percent chance that eating normal food also spawns the special food.
const SPECIAL_FOOD_CHANCE: u8 = 80;
/// Points awarded for a correctly answered bonus question.
const BONUS_POINTS: u32 = 10;
/// Number of frozen steps counted down before ticking resumes.
const COUNTDOWN_TICKS: u32 = 3;

impl DifficultyProfile {
    /// Builds the canonical profile for a difficulty bucket.
    #[must_use]
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            tick_interval: Duration::from_millis(1000 / difficulty.speed() as u64),
            score_multiplier: difficulty.score_multiplier(),
            points_per_food: difficulty.points_per_food(),
            special_food_chance: SPECIAL_FOOD_CHANCE,
            bonus_points: BONUS_POINTS,
            countdown_ticks: COUNTDOWN_TICKS,
        }
    }

    /// Difficulty bucket the profile was derived from.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Fixed interval between simulation steps for the whole run.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Points credited for each normal food consumed.
    #[must_use]
    pub const fn points_per_food(&self) -> u32 {
        self.points_per_food
    }

    /// Percent chance in `[0, 100]` to spawn the special food.
    #[must_use]
    pub const fn special_food_chance(&self) -> u8 {
        self.special_food_chance
    }

    /// Points awarded for a correctly answered bonus question.
    #[must_use]
    pub const fn bonus_points(&self) -> u32 {
        self.bonus_points
    }

    /// Number of frozen steps counted down before ticking resumes.
    #[must_use]
    pub const fn countdown_ticks(&self) -> u32 {
        self.countdown_ticks
    }

    /// Scales a base score by the difficulty multiplier.
    #[must_use]
    pub fn final_score(&self, base_score: u32) -> u32 {
        (base_score as f64 * self.score_multiplier) as u32
    }
}

/// Unique identifier assigned to a player by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a new player identifier from its string representation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the string representation of the identifier.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

/// Immutable record of a finished game, created once and persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Identifier of the player who finished the run.
    pub player: PlayerId,
    /// Display name captured when the record was created.
    pub display_name: String,
    /// Reference to the player's avatar image.
    pub avatar_ref: String,
    /// Final score after the difficulty multiplier was applied.
    pub score: u32,
    /// Difficulty bucket the run was played in.
    pub difficulty: Difficulty,
    /// Milliseconds since the Unix epoch when the run finished.
    pub timestamp_ms: u64,
}

impl ScoreRecord {
    /// Creates a new score record for a finished run.
    #[must_use]
    pub fn new(
        player: PlayerId,
        display_name: impl Into<String>,
        avatar_ref: impl Into<String>,
        score: u32,
        difficulty: Difficulty,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            player,
            display_name: display_name.into(),
            avatar_ref: avatar_ref.into(),
            score,
            difficulty,
            timestamp_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BoardGeometry, CellCoord, Difficulty, DifficultyProfile, GameOverCause, GridSize, Heading,
        PlacementError, PlayerId, ScoreRecord,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn geometry_derives_grid_by_integer_division() {
        let geometry = BoardGeometry::new(900, 650, 25);
        assert_eq!(geometry.grid_size(), GridSize::new(36, 26));
    }

    #[test]
    fn geometry_with_zero_cell_length_is_empty() {
        let geometry = BoardGeometry::new(800, 600, 0);
        assert_eq!(geometry.grid_size(), GridSize::new(0, 0));
        assert_eq!(geometry.cell_at(10, 10), None);
    }

    #[test]
    fn geometry_maps_pixels_into_cells() {
        let geometry = BoardGeometry::new(200, 100, 20);
        assert_eq!(geometry.cell_at(0, 0), Some(CellCoord::new(0, 0)));
        assert_eq!(geometry.cell_at(39, 21), Some(CellCoord::new(1, 1)));
        assert_eq!(geometry.cell_at(199, 99), Some(CellCoord::new(9, 4)));
        assert_eq!(geometry.pixel_origin(CellCoord::new(3, 2)), (60, 40));
    }

    #[test]
    fn heading_step_stays_on_grid() {
        let grid = GridSize::new(4, 4);
        assert_eq!(
            Heading::Right.step(CellCoord::new(2, 2), grid),
            Some(CellCoord::new(3, 2))
        );
        assert_eq!(Heading::Right.step(CellCoord::new(3, 2), grid), None);
        assert_eq!(Heading::Up.step(CellCoord::new(2, 0), grid), None);
        assert_eq!(Heading::Left.step(CellCoord::new(0, 2), grid), None);
        assert_eq!(Heading::Down.step(CellCoord::new(2, 3), grid), None);
    }

    #[test]
    fn heading_reversal_detection_is_symmetric() {
        assert!(Heading::Left.is_reversal_of(Heading::Right));
        assert!(Heading::Right.is_reversal_of(Heading::Left));
        assert!(Heading::Up.is_reversal_of(Heading::Down));
        assert!(!Heading::Up.is_reversal_of(Heading::Left));
        assert!(!Heading::Right.is_reversal_of(Heading::Right));
    }

    #[test]
    fn profiles_carry_per_bucket_tuning() {
        let easy = DifficultyProfile::for_difficulty(Difficulty::Easy);
        assert_eq!(easy.tick_interval(), Duration::from_millis(200));
        assert_eq!(easy.points_per_food(), 10);
        assert_eq!(easy.final_score(100), 100);

        let medium = DifficultyProfile::for_difficulty(Difficulty::Medium);
        assert_eq!(medium.tick_interval(), Duration::from_millis(125));
        assert_eq!(medium.points_per_food(), 15);
        assert_eq!(medium.final_score(100), 150);

        let hard = DifficultyProfile::for_difficulty(Difficulty::Hard);
        assert_eq!(hard.tick_interval(), Duration::from_millis(83));
        assert_eq!(hard.points_per_food(), 20);
        assert_eq!(hard.final_score(100), 250);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 3));
    }

    #[test]
    fn difficulty_round_trips_through_bincode() {
        assert_round_trip(&Difficulty::Medium);
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::Occupied);
    }

    #[test]
    fn game_over_cause_round_trips_through_bincode() {
        assert_round_trip(&GameOverCause::BoardFull);
    }

    #[test]
    fn score_record_round_trips_through_bincode() {
        let record = ScoreRecord::new(
            PlayerId::new("player-7"),
            "Dana",
            "avatars/dana.png",
            420,
            Difficulty::Hard,
            1_700_000_000_000,
        );
        assert_round_trip(&record);
    }
}
