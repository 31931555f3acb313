use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::collision::{Outcome, classify_move};
use crate::config::{GridSize, SessionConfig};
use crate::error::ConfigError;
use crate::food::FoodSpawner;
use crate::grid::Vector2i;
use crate::heading::{Heading, resolve_input};
use crate::snake::SnakeBody;

/// Lifecycle of a session. Both non-running states are final.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum SessionState {
    Running,
    /// The head ran into the body.
    GameOver,
    /// The body covers every cell, so no food can be placed.
    BoardFull,
}

impl SessionState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

/// Immutable view of a session handed to the shell after every tick.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TickResult {
    /// Head first.
    pub body_cells: Vec<Vector2i>,
    /// After `BoardFull` this is the cell that was eaten last.
    pub food_cell: Vector2i,
    pub score: u32,
    pub state: SessionState,
    pub outcome: Outcome,
    pub heading: Heading,
    pub tick: u64,
}

/// Builds a session with a vertically seeded body. See [`GameSession::new`].
pub fn create_session(
    grid_size: u16,
    initial_length: u16,
    seed: Option<u64>,
) -> Result<GameSession, ConfigError> {
    GameSession::new(&SessionConfig {
        grid_size,
        initial_length,
        seed,
        ..SessionConfig::default()
    })
}

/// Complete simulation state for one game.
#[derive(Debug, Clone)]
pub struct GameSession {
    body: SnakeBody,
    food: Vector2i,
    score: u32,
    state: SessionState,
    last_outcome: Outcome,
    tick_count: u64,
    spawner: FoodSpawner,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session from a validated config.
    ///
    /// The body starts as a vertical column headed up from the grid centre
    /// and the first food is drawn from the session RNG.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid();
        let mut rng = session_rng(config.seed);
        let body = SnakeBody::seeded_vertical(grid, config.initial_length);
        let spawner = FoodSpawner::new(grid);
        let food = spawner.spawn(&body.occupied_cells(), &mut rng)?;

        tracing::debug!(
            grid_size = grid.side,
            length = body.len(),
            seed = ?config.seed,
            "session created"
        );

        Ok(Self::assemble(body, food, spawner, rng))
    }

    /// Creates a session from an explicit body and food cell.
    ///
    /// The food may overlap the body; callers that build layouts by hand are
    /// trusted to mean it.
    pub fn from_parts(
        body: SnakeBody,
        food: Vector2i,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let grid = body.grid();
        if grid.side < 2 {
            return Err(ConfigError::GridTooSmall {
                grid_size: grid.side,
            });
        }
        if !food.is_within_bounds(grid) {
            return Err(ConfigError::CellOutOfBounds {
                cell: food,
                grid_size: grid.side,
            });
        }

        Ok(Self::assemble(
            body,
            food,
            FoodSpawner::new(grid),
            session_rng(seed),
        ))
    }

    fn assemble(body: SnakeBody, food: Vector2i, spawner: FoodSpawner, rng: StdRng) -> Self {
        Self {
            body,
            food,
            score: 0,
            state: SessionState::Running,
            last_outcome: Outcome::None,
            tick_count: 0,
            spawner,
            rng,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// `requested` is the heading read from input this tick; `None` stands for
    /// no usable input and keeps the current heading. Once the session has
    /// ended, further calls change nothing and return the final snapshot.
    pub fn tick(&mut self, requested: impl Into<Option<Heading>>) -> TickResult {
        if self.state.is_terminal() {
            return self.snapshot();
        }

        let heading = resolve_input(self.body.last_heading(), requested.into());
        let next_head = self.body.next_head(heading);
        let outcome = classify_move(&self.body, next_head, self.food);
        let grew = outcome == Outcome::FoodEaten;

        self.body = self.body.advance(heading, grew);
        self.tick_count += 1;
        self.last_outcome = outcome;

        match outcome {
            Outcome::FoodEaten => {
                self.score += 1;
                self.respawn_food();
            }
            Outcome::SelfCollision => {
                self.state = SessionState::GameOver;
                tracing::info!(
                    tick = self.tick_count,
                    score = self.score,
                    head = ?next_head,
                    "snake ran into itself"
                );
            }
            Outcome::None => {}
        }

        tracing::debug!(
            tick = self.tick_count,
            ?heading,
            ?outcome,
            score = self.score,
            length = self.body.len(),
            "tick"
        );

        self.snapshot()
    }

    fn respawn_food(&mut self) {
        match self
            .spawner
            .spawn(&self.body.occupied_cells(), &mut self.rng)
        {
            Ok(cell) => self.food = cell,
            Err(error) => {
                self.state = SessionState::BoardFull;
                tracing::info!(tick = self.tick_count, score = self.score, %error, "board full");
            }
        }
    }

    /// Returns the current state as an owned snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TickResult {
        TickResult {
            body_cells: self.body.cells().copied().collect(),
            food_cell: self.food,
            score: self.score,
            state: self.state,
            outcome: self.last_outcome,
            heading: self.body.last_heading(),
            tick: self.tick_count,
        }
    }

    #[must_use]
    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    #[must_use]
    pub fn food(&self) -> Vector2i {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.body.last_heading()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.body.grid()
    }
}

fn session_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}
