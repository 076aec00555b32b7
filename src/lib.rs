//! Arcade Snake: a frame-stepped simulation with timed power-ups, combo
//! scoring and obstacle levels, plus a small terminal front-end.

pub mod cadence;
pub mod collectible;
pub mod config;
pub mod effects;
pub mod events;
pub mod game;
pub mod grid;
pub mod input;
pub mod obstacle;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod snapshot;
pub mod terminal;
pub mod ui;
