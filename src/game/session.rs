use tracing::info;

use super::board::Dimensions;
use super::engine::{GameEngine, MoveResult, TerminationOrder};
use super::player::Player;

/// Holds the game currently being played, if any. Starting a new game
/// throws the old one away.
#[derive(Debug, Clone, Default)]
pub struct Session {
    engine: Option<GameEngine>,
    order: TerminationOrder,
    games_started: usize,
}

impl Session {
    pub fn new(order: TerminationOrder) -> Self {
        Session {
            engine: None,
            order,
            games_started: 0,
        }
    }

    /// Start a fresh game between two players, discarding any prior game
    pub fn start_game(&mut self, first: Player, second: Player, dims: Dimensions) -> &GameEngine {
        self.games_started += 1;
        info!(
            game = self.games_started,
            first = first.token(),
            second = second.token(),
            "new game"
        );
        self.engine
            .insert(GameEngine::with_order(first, second, dims, self.order))
    }

    /// Forward a column intent to the running game. `None` when no game
    /// has been started.
    pub fn apply_move(&mut self, column: usize) -> Option<MoveResult> {
        self.engine.as_mut().map(|engine| engine.apply_move(column))
    }

    pub fn engine(&self) -> Option<&GameEngine> {
        self.engine.as_ref()
    }

    pub fn games_started(&self) -> usize {
        self.games_started
    }
}
