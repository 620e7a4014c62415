//! Core Connect Four game logic: board representation, player identities,
//! win detection, and the turn-based engine that ties them together.

mod board;
mod engine;
mod player;
pub mod rules;
mod session;

pub use board::{
    Board, DimensionError, Dimensions, InvariantViolation, DEFAULT_HEIGHT, DEFAULT_WIDTH,
    MAX_SIDE,
};
pub use engine::{Finish, GameEngine, GameStatus, MoveRejection, MoveResult, TerminationOrder};
pub use player::{Cell, Player, Seat};
pub use rules::{check_for_win, find_winning_run, Run};
pub use session::Session;
