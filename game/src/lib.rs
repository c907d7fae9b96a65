//! Two-agent trail duel: a human and a bot leave permanent trails on a grid
//! until one of them (or both) runs into a wall or a trail.
//!
//! The simulation lives in [`duel`] and has no rendering dependencies; the
//! macroquad front end is [`duel_app`].

pub mod arena;
pub mod config;
pub mod direction;
pub mod duel;
pub mod grid;
pub mod position;

pub(crate) mod input;
pub(crate) mod render;
pub(crate) mod screen_wake;

pub mod assets;
pub mod duel_app;
