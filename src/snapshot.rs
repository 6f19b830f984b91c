use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pellet progress of a run: which tiles were eaten and the score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub consumed: BTreeSet<(usize, usize)>,
    pub score: u32,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
