use std::time::Duration;

use crate::grid::{Direction, TileIndex};
use crate::render::{Palette, Rgb};

const DEFAULT_TICK_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Pixel edge of one tile.
    pub tile_size: u32,
    pub screen: (u32, u32),
    /// Tiles per tick.
    pub player_speed: f32,
    pub pursuer_speed: f32,
    pub lives: u32,
    pub player_spawn: TileIndex,
    pub pursuer_spawn: TileIndex,
    pub pursuer_heading: Direction,
    /// One pursuer is created per colour, in this order.
    pub pursuer_colors: Vec<Rgb>,
    pub tick: Duration,
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: 600 / 30,
            screen: (800, 600),
            player_speed: 0.25,
            pursuer_speed: 0.75,
            lives: 3,
            player_spawn: TileIndex::new(1, 1),
            pursuer_spawn: TileIndex::new(15, 13),
            pursuer_heading: Direction::Up,
            pursuer_colors: vec![Rgb::RED, Rgb::CYAN, Rgb::ORANGE, Rgb::ROSE],
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Defaults, with `PACMAN_TICK_MS` and `PACMAN_SEED` applied when they
    /// parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(ms) = lookup("PACMAN_TICK_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
        {
            config.tick = Duration::from_millis(ms);
        }
        config.seed = lookup("PACMAN_SEED").and_then(|v| v.parse::<u64>().ok());
        config
    }
}
