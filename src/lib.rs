//! Discrete-time snake simulation on a wrap-around square grid.
//!
//! The simulation core (`grid`, `heading`, `snake`, `food`, `collision`,
//! `session`) is pure state transition: a shell feeds one requested heading
//! per tick into [`session::GameSession::tick`] and draws the returned
//! [`session::TickResult`]. The terminal shell lives in `input`, `renderer`
//! and `terminal_runtime`; `replay` drives a session from a move string.

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod heading;
pub mod input;
pub mod renderer;
pub mod replay;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
