use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A grid query fell outside the fixed maze extent.
    #[error("tile ({line}, {column}) is outside the maze")]
    OutOfBounds { line: i64, column: i64 },
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The recorded score disagrees with the pellets the snapshot marks eaten.
    #[error("snapshot score {score} does not match {eaten} eaten pellets")]
    ScoreMismatch { score: u32, eaten: u32 },
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
