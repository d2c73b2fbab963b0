//! Wrap-around terminal Snake.
//!
//! [`game::GameState`] is the tick engine; everything else feeds it input or
//! draws what it reports.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
