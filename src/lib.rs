//! Tile-grid maze chase: the player eats pellets while randomly patrolling
//! pursuers cost it lives on contact.
//!
//! The core (grid, movers, orchestrator) is pure and synchronous. Drawing and
//! keyboard input sit behind the [`Renderer`] and [`InputSource`] traits;
//! [`terminal`] provides crossterm implementations of both.

pub mod config;
pub mod entity;
pub mod error;
pub mod grid;
pub mod host;
pub mod input;
pub mod player;
pub mod pursuer;
pub mod render;
pub mod simulation;
pub mod snapshot;
pub mod terminal;

pub use config::Config;
pub use entity::{Drawable, MobileEntity, Mover, Position, Velocity};
pub use error::{Error, Result};
pub use grid::{Direction, Grid, Tile, TileIndex};
pub use input::{Flow, InputSource, Intent, ScriptedInput};
pub use player::Player;
pub use pursuer::Pursuer;
pub use render::{DrawCommand, Frame, Palette, Renderer, Rgb, Sprite, SpriteKind};
pub use simulation::{Actor, GameState, Simulation};
pub use snapshot::Snapshot;
