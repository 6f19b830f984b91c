use std::collections::BTreeSet;

use crate::error::{Error, Result};

pub const LINES: usize = 30;
pub const COLUMNS: usize = 28;

/// Reference maze. 0 = pellet, 1 = wall, 2 = empty floor, 3 = pen gate.
#[rustfmt::skip]
pub const LAYOUT: [[u8; COLUMNS]; LINES] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1],
    [1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1],
    [1, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 3, 3, 3, 3, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 2, 2, 2, 2, 2, 2, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 2, 2, 2, 2, 2, 2, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 2, 2, 2, 2, 2, 2, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1],
    [1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Consumed,
    /// Pen gate: pursuers pass, the player does not.
    GateMarker,
}

impl Tile {
    fn from_code(code: u8) -> Tile {
        match code {
            0 => Tile::Pellet,
            2 => Tile::Empty,
            3 => Tile::GateMarker,
            _ => Tile::Wall,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }

    pub fn blocks_player(self) -> bool {
        matches!(self, Tile::Wall | Tile::GateMarker)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Query order for neighbour legality.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (line, column) offset of one step.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Integer tile coordinate, always inside the grid it was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileIndex {
    pub line: usize,
    pub column: usize,
}

impl TileIndex {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Builds the reference maze with every pellet in place.
    pub fn new() -> Self {
        let tiles = LAYOUT
            .iter()
            .map(|row| row.iter().map(|&code| Tile::from_code(code)).collect())
            .collect();
        Self { tiles }
    }

    pub fn lines(&self) -> usize {
        self.tiles.len()
    }

    pub fn columns(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    /// Range-checks signed coordinates; `None` when outside the extent.
    pub fn index(&self, line: i64, column: i64) -> Option<TileIndex> {
        let line = usize::try_from(line).ok()?;
        let column = usize::try_from(column).ok()?;
        (line < self.lines() && column < self.columns()).then_some(TileIndex { line, column })
    }

    pub fn tile_at(&self, line: usize, column: usize) -> Result<Tile> {
        self.tiles
            .get(line)
            .and_then(|row| row.get(column))
            .copied()
            .ok_or(Error::OutOfBounds {
                line: line as i64,
                column: column as i64,
            })
    }

    /// Directions whose neighbouring tile is inside the grid and not a wall,
    /// in `Direction::ALL` order.
    pub fn legal_neighbors(&self, at: TileIndex) -> Vec<Direction> {
        let mut legal = Vec::with_capacity(4);
        for dir in Direction::ALL {
            if let Some(next) = self.neighbor(at, dir) {
                if !self.tiles[next.line][next.column].is_wall() {
                    legal.push(dir);
                }
            }
        }
        legal
    }

    pub fn neighbor(&self, at: TileIndex, dir: Direction) -> Option<TileIndex> {
        let (dl, dc) = dir.delta();
        self.index(at.line as i64 + dl, at.column as i64 + dc)
    }

    /// Pellet -> Consumed. Returns whether a pellet was actually eaten; any
    /// other tile is left untouched.
    pub fn consume_pellet_at(&mut self, line: usize, column: usize) -> Result<bool> {
        let tile = self
            .tiles
            .get_mut(line)
            .and_then(|row| row.get_mut(column))
            .ok_or(Error::OutOfBounds {
                line: line as i64,
                column: column as i64,
            })?;
        if *tile == Tile::Pellet {
            *tile = Tile::Consumed;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn pellets_left(&self) -> usize {
        self.count(Tile::Pellet)
    }

    /// Pellets in the untouched layout; the victory threshold.
    pub fn total_pellets(&self) -> usize {
        self.count(Tile::Pellet) + self.count(Tile::Consumed)
    }

    pub fn consumed_tiles(&self) -> BTreeSet<(usize, usize)> {
        let mut consumed = BTreeSet::new();
        for (line, row) in self.tiles.iter().enumerate() {
            for (column, tile) in row.iter().enumerate() {
                if *tile == Tile::Consumed {
                    consumed.insert((line, column));
                }
            }
        }
        consumed
    }

    fn count(&self, kind: Tile) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&tile| tile == kind)
            .count()
    }
}
