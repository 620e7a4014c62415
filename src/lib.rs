//! # Connect Four
//!
//! Rules engine for two-player Connect Four on a configurable grid, with a
//! terminal front end built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, players, win detection, engine, session
//! - [`ui`]: Terminal UI that forwards column choices and renders results
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
