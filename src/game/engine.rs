//! Turn-based game engine. A game is Active until a placement completes four
//! in a row or fills the board, after which every move is rejected.

use tracing::{debug, info};

use super::board::{Board, Dimensions};
use super::player::{Player, Seat};
use super::rules::{self, Run};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Win(Seat),
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Finished(Finish),
}

/// Why a move was refused. Rejections never change the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("column {column} is outside the board (width {width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("game is already finished")]
    GameAlreadyFinished,
}

/// Outcome of a single `apply_move` call, sent to the front end for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Continue {
        row: usize,
        column: usize,
        player: Seat,
    },
    Win {
        player: Seat,
        row: usize,
        column: usize,
        run: Run,
    },
    Tie {
        row: usize,
        column: usize,
    },
    Rejected(MoveRejection),
}

impl MoveResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, MoveResult::Rejected(_))
    }

    /// Cell filled by this move, if one was
    pub fn placed(&self) -> Option<(usize, usize)> {
        match *self {
            MoveResult::Continue { row, column, .. }
            | MoveResult::Win { row, column, .. }
            | MoveResult::Tie { row, column } => Some((row, column)),
            MoveResult::Rejected(_) => None,
        }
    }
}

/// Order in which a placement is tested for termination. Only matters for
/// the move that fills the board while also completing a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminationOrder {
    /// A completed run wins even on the final cell.
    #[default]
    WinFirst,
    /// A full board is a tie even if the final piece completed a run.
    TieFirst,
}

/// Turn sequencing and termination for one game.
#[derive(Debug, Clone)]
pub struct GameEngine {
    players: [Player; 2],
    board: Board,
    current: Seat,
    status: GameStatus,
    order: TerminationOrder,
    history: Vec<usize>,
}

impl GameEngine {
    /// Start a game on a fresh board. The first player moves first.
    pub fn new(first: Player, second: Player, dims: Dimensions) -> Self {
        Self::with_order(first, second, dims, TerminationOrder::default())
    }

    pub fn with_order(
        first: Player,
        second: Player,
        dims: Dimensions,
        order: TerminationOrder,
    ) -> Self {
        debug!(
            height = dims.height(),
            width = dims.width(),
            first = first.token(),
            second = second.token(),
            ?order,
            "starting game"
        );
        GameEngine {
            players: [first, second],
            board: Board::new(dims),
            current: Seat::First,
            status: GameStatus::Active,
            order,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seat whose turn it is; after the game ends, the seat that moved last
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished(_))
    }

    pub fn termination_order(&self) -> TerminationOrder {
        self.order
    }

    /// Columns of every accepted move, oldest first
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Rejected moves leave the engine untouched.
    pub fn apply_move(&mut self, column: usize) -> MoveResult {
        match self.try_move(column) {
            Ok(result) => result,
            Err(rejection) => {
                debug!(column, %rejection, "move rejected");
                MoveResult::Rejected(rejection)
            }
        }
    }

    fn try_move(&mut self, column: usize) -> Result<MoveResult, MoveRejection> {
        if self.is_over() {
            return Err(MoveRejection::GameAlreadyFinished);
        }
        if column >= self.board.width() {
            return Err(MoveRejection::InvalidColumn {
                column,
                width: self.board.width(),
            });
        }
        let row = self
            .board
            .find_landing_row(column)
            .ok_or(MoveRejection::ColumnFull { column })?;

        let seat = self.current;
        if let Err(violation) = self.board.place(row, column, seat) {
            unreachable!("landing row {row} rejected by board: {violation}");
        }
        self.history.push(column);
        debug!(row, column, %seat, "piece placed");

        let result = match self.termination(seat) {
            Some(Termination::Win(run)) => {
                self.status = GameStatus::Finished(Finish::Win(seat));
                info!(winner = %seat, moves = self.history.len(), "game won");
                MoveResult::Win {
                    player: seat,
                    row,
                    column,
                    run,
                }
            }
            Some(Termination::Tie) => {
                self.status = GameStatus::Finished(Finish::Tie);
                info!(moves = self.history.len(), "game tied");
                MoveResult::Tie { row, column }
            }
            None => {
                self.current = seat.other();
                MoveResult::Continue {
                    row,
                    column,
                    player: seat,
                }
            }
        };
        Ok(result)
    }

    fn termination(&self, seat: Seat) -> Option<Termination> {
        let win = || rules::find_winning_run(&self.board, seat).map(Termination::Win);
        let tie = || self.board.is_full().then_some(Termination::Tie);
        match self.order {
            TerminationOrder::WinFirst => win().or_else(tie),
            TerminationOrder::TieFirst => tie().or_else(win),
        }
    }
}

enum Termination {
    Win(Run),
    Tie,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    /// 42 alternating moves that fill a 6x7 board with no four-in-a-row.
    const DRAW_6X7: [usize; 42] = [
        0, 3, 0, 0, 1, 0, 2, 0, 0, 1, 1, 1, 3, 1, 3, 1, 3, 2, 4, 2, 4, 2, 2, 3, 2, 3, 5, 5, 5,
        6, 6, 4, 6, 4, 4, 5, 4, 6, 6, 5, 6, 5,
    ];

    /// On a 3x4 board the last move both fills the board and completes the
    /// top row for the second player.
    const FILL_AND_WIN_3X4: [usize; 12] = [3, 1, 3, 3, 2, 1, 2, 2, 0, 1, 0, 0];

    fn engine() -> GameEngine {
        GameEngine::new(Player::new("red"), Player::new("yellow"), Dimensions::default())
    }

    fn play(engine: &mut GameEngine, moves: &[usize]) -> MoveResult {
        let mut last = None;
        for &col in moves {
            last = Some(engine.apply_move(col));
        }
        last.unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = engine();
        assert_eq!(engine.current_seat(), Seat::First);
        assert_eq!(engine.current_player().token(), "red");
        assert_eq!(engine.player(Seat::Second).token(), "yellow");
        assert_eq!(engine.status(), GameStatus::Active);
        assert!(!engine.is_over());
        assert_eq!(engine.moves_played(), 0);
    }

    #[test]
    fn test_apply_move_continues_and_alternates() {
        let mut engine = engine();
        assert_eq!(
            engine.apply_move(3),
            MoveResult::Continue {
                row: 5,
                column: 3,
                player: Seat::First
            }
        );
        assert_eq!(engine.current_seat(), Seat::Second);
        assert_eq!(engine.board().owner_at(5, 3), Cell::Taken(Seat::First));

        assert_eq!(
            engine.apply_move(3),
            MoveResult::Continue {
                row: 4,
                column: 3,
                player: Seat::Second
            }
        );
        assert_eq!(engine.current_seat(), Seat::First);
        assert_eq!(engine.history(), &[3, 3]);
    }

    #[test]
    fn test_invalid_column_rejected_without_change() {
        let mut engine = engine();
        engine.apply_move(0);
        let before = engine.board().clone();

        assert_eq!(
            engine.apply_move(7),
            MoveResult::Rejected(MoveRejection::InvalidColumn { column: 7, width: 7 })
        );
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.current_seat(), Seat::Second);
        assert_eq!(engine.moves_played(), 1);
    }

    #[test]
    fn test_full_column_rejected_without_change() {
        let mut engine = engine();
        play(&mut engine, &[0; 6]);
        let before = engine.board().clone();
        let seat = engine.current_seat();

        let result = engine.apply_move(0);
        assert_eq!(
            result,
            MoveResult::Rejected(MoveRejection::ColumnFull { column: 0 })
        );
        assert!(result.is_rejected());
        assert_eq!(result.placed(), None);
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.current_seat(), seat);
        assert!(!engine.is_over());
    }

    #[test]
    fn test_horizontal_win() {
        let mut engine = engine();
        // Second player stacks on top so the first player's bottom row grows.
        let result = play(&mut engine, &[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(
            result,
            MoveResult::Win {
                player: Seat::First,
                row: 5,
                column: 3,
                run: [(5, 0), (5, 1), (5, 2), (5, 3)],
            }
        );
        assert_eq!(engine.status(), GameStatus::Finished(Finish::Win(Seat::First)));
        assert_eq!(engine.current_seat(), Seat::First);
    }

    #[test]
    fn test_vertical_win() {
        let mut engine = engine();
        let result = play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(
            result,
            MoveResult::Win {
                player: Seat::First,
                row: 2,
                column: 0,
                run: [(2, 0), (3, 0), (4, 0), (5, 0)],
            }
        );
    }

    #[test]
    fn test_second_player_can_win() {
        let mut engine = engine();
        let result = play(&mut engine, &[6, 0, 6, 1, 5, 2, 6, 3]);
        assert!(matches!(result, MoveResult::Win { player: Seat::Second, .. }));
    }

    #[test]
    fn test_moves_after_win_rejected() {
        let mut engine = engine();
        play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);
        let before = engine.board().clone();

        assert_eq!(
            engine.apply_move(4),
            MoveResult::Rejected(MoveRejection::GameAlreadyFinished)
        );
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.moves_played(), 7);
    }

    #[test]
    fn test_tie_on_full_board() {
        let mut engine = engine();
        for (i, &col) in DRAW_6X7.iter().enumerate() {
            let result = engine.apply_move(col);
            if i + 1 < DRAW_6X7.len() {
                assert!(
                    matches!(result, MoveResult::Continue { .. }),
                    "move {i} in column {col} gave {result:?}"
                );
            } else {
                assert!(matches!(result, MoveResult::Tie { .. }));
            }
        }
        assert!(engine.board().is_full());
        assert_eq!(engine.status(), GameStatus::Finished(Finish::Tie));

        let board = engine.board().clone();
        let seat = engine.current_seat();
        for col in 0..7 {
            assert_eq!(
                engine.apply_move(col),
                MoveResult::Rejected(MoveRejection::GameAlreadyFinished)
            );
        }
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.current_seat(), seat);
        assert_eq!(engine.moves_played(), DRAW_6X7.len());
    }

    #[test]
    fn test_final_move_win_beats_tie_by_default() {
        let dims = Dimensions::new(3, 4).unwrap();
        let mut engine = GameEngine::new(Player::new("red"), Player::new("yellow"), dims);
        let result = play(&mut engine, &FILL_AND_WIN_3X4);
        assert!(engine.board().is_full());
        assert_eq!(
            result,
            MoveResult::Win {
                player: Seat::Second,
                row: 0,
                column: 0,
                run: [(0, 0), (0, 1), (0, 2), (0, 3)],
            }
        );
    }

    #[test]
    fn test_tie_first_order_reports_tie() {
        let dims = Dimensions::new(3, 4).unwrap();
        let mut engine = GameEngine::with_order(
            Player::new("red"),
            Player::new("yellow"),
            dims,
            TerminationOrder::TieFirst,
        );
        let result = play(&mut engine, &FILL_AND_WIN_3X4);
        assert_eq!(result, MoveResult::Tie { row: 0, column: 0 });
        assert_eq!(engine.status(), GameStatus::Finished(Finish::Tie));
    }

    #[test]
    fn test_single_cell_board_ties_immediately() {
        let dims = Dimensions::new(1, 1).unwrap();
        let mut engine = GameEngine::new(Player::new("a"), Player::new("b"), dims);
        assert_eq!(engine.apply_move(0), MoveResult::Tie { row: 0, column: 0 });
        assert!(engine.is_over());
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            MoveRejection::InvalidColumn { column: 9, width: 7 }.to_string(),
            "column 9 is outside the board (width 7)"
        );
        assert_eq!(
            MoveRejection::ColumnFull { column: 2 }.to_string(),
            "column 2 is full"
        );
        assert_eq!(
            MoveRejection::GameAlreadyFinished.to_string(),
            "game is already finished"
        );
    }
}
