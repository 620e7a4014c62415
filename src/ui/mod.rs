//! Terminal UI: forwards column choices to the engine and renders the board
//! and move results.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
