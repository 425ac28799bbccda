//! # Pellet Chase
//!
//! A small arena game on top of `scene_engine`: the player steers a
//! pellet-eater around a bounded rectangle, walls block sideways movement and
//! a spawner keeps up to ten pellets on the field. Pellets that land on top of
//! each other merge; pellets the player touches are collected for a point.
//!
//! - [`scene`]: entity collection and the two-phase tick
//! - [`entities`]: the five entity kinds and their per-tick rules
//! - [`config`]: tunables loaded from TOML or RON
//! - [`terminal`]: crossterm renderer and keyboard input

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod entities;
pub mod error;
pub mod scene;
pub mod terminal;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use scene::{PelletCounter, Scene};
