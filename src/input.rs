use std::collections::VecDeque;

use crate::error::Result;
use crate::grid::Direction;

/// Discrete player-facing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Quit,
}

impl Intent {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Intent::Up => Some(Direction::Up),
            Intent::Down => Some(Direction::Down),
            Intent::Left => Some(Direction::Left),
            Intent::Right => Some(Direction::Right),
            Intent::Pause | Intent::Quit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub trait InputSource {
    /// Drains whatever arrived since the last call. Never blocks.
    fn poll(&mut self) -> Result<Vec<Intent>>;
}

/// Replays fixed batches, one per poll; asks to quit once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<Intent>>,
}

impl ScriptedInput {
    pub fn new(batches: impl IntoIterator<Item = Vec<Intent>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Vec<Intent>> {
        Ok(self.batches.pop_front().unwrap_or_else(|| vec![Intent::Quit]))
    }
}
