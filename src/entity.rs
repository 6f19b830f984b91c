use rand::Rng;

use crate::grid::{Direction, Tile, TileIndex};
use crate::render::{Point, Sprite};

/// Fractional (line, column) coordinate in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub line: f32,
    pub column: f32,
}

impl Position {
    pub const fn new(line: f32, column: f32) -> Self {
        Self { line, column }
    }

    pub fn at(tile: TileIndex) -> Self {
        Self::new(tile.line as f32, tile.column as f32)
    }

    /// Tile the position currently sits in. Positions are never negative
    /// because the maze perimeter is solid.
    pub fn tile(self) -> TileIndex {
        TileIndex::new(self.line as usize, self.column as usize)
    }

    /// Pixel centre of an entity at this position: the tile origin plus half a
    /// tile, floored onto the pixel grid.
    pub fn pixel_center(self, tile_size: u32) -> Point {
        let size = tile_size as f32;
        let half = (tile_size / 2) as f32;
        Point::new(
            (self.column * size + half).floor(),
            (self.line * size + half).floor(),
        )
    }

    fn offset(self, velocity: Velocity) -> Position {
        Position::new(self.line + velocity.d_line, self.column + velocity.d_column)
    }
}

/// Displacement per tick, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub d_line: f32,
    pub d_column: f32,
}

impl Velocity {
    pub fn toward(dir: Direction, speed: f32) -> Self {
        let (dl, dc) = dir.delta();
        Self {
            d_line: dl as f32 * speed,
            d_column: dc as f32 * speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MobileEntity {
    pub position: Position,
    pub intention: Position,
    pub velocity: Velocity,
}

impl MobileEntity {
    pub fn new(spawn: TileIndex) -> Self {
        let position = Position::at(spawn);
        Self {
            position,
            intention: position,
            velocity: Velocity::default(),
        }
    }

    pub fn compute_intention(&mut self) {
        self.intention = self.position.offset(self.velocity);
    }

    pub fn accept(&mut self) {
        self.position = self.intention;
    }

    pub fn reject(&mut self) {
        self.intention = self.position;
    }

    pub fn teleport(&mut self, to: TileIndex) {
        self.position = Position::at(to);
        self.intention = self.position;
    }

    pub fn current_tile(&self) -> TileIndex {
        self.position.tile()
    }

    /// Integer tile the intention commits to. Each axis rounds toward the
    /// direction of travel (ceil forward, floor backward, floor when still),
    /// so any fractional overlap with the next tile already claims it.
    pub fn target(&self) -> (i64, i64) {
        (
            round_toward(self.intention.line, self.position.line),
            round_toward(self.intention.column, self.position.column),
        )
    }
}

fn round_toward(intended: f32, from: f32) -> i64 {
    if intended > from {
        intended.ceil() as i64
    } else {
        intended.floor() as i64
    }
}

/// Movement capability shared by everything the orchestrator resolves.
pub trait Mover {
    fn body(&self) -> &MobileEntity;

    fn body_mut(&mut self) -> &mut MobileEntity;

    /// Whether this mover may step onto a non-wall tile of the given kind.
    fn can_enter(&self, tile: Tile) -> bool;

    fn compute_intention(&mut self) {
        self.body_mut().compute_intention();
    }

    fn accept_movement(&mut self) {
        self.body_mut().accept();
    }

    fn refuse_movement<R: Rng + ?Sized>(&mut self, legal: &[Direction], rng: &mut R) {
        let _ = (legal, rng);
        self.body_mut().reject();
    }

    /// Called on tiles with three or more open neighbours.
    fn choose_path<R: Rng + ?Sized>(&mut self, legal: &[Direction], rng: &mut R) {
        let _ = (legal, rng);
    }
}

/// Anything that hands the renderer a sprite each frame.
pub trait Drawable {
    fn sprite(&self, tile_size: u32) -> Sprite;
}
