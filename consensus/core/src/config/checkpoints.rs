use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{ParamsError, ParamsResult};
use crate::Hash;

/// Hardcoded (height, hash) pairs; alternate histories below the highest
/// checkpoint are rejected by chain validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointData {
    checkpoints: BTreeMap<u32, Hash>,
}

impl CheckpointData {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the table from entries listed in ascending height order
    pub fn new(entries: &[(u32, Hash)]) -> ParamsResult<Self> {
        let mut checkpoints = BTreeMap::new();
        let mut previous: Option<u32> = None;
        for &(height, hash) in entries {
            if let Some(prev) = previous {
                if height <= prev {
                    return Err(ParamsError::InvalidCheckpoints { previous: prev, next: height });
                }
            }
            checkpoints.insert(height, hash);
            previous = Some(height);
        }
        Ok(Self { checkpoints })
    }

    pub fn get(&self, height: u32) -> Option<&Hash> {
        self.checkpoints.get(&height)
    }

    pub fn last_height(&self) -> Option<u32> {
        self.checkpoints.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Hash)> {
        self.checkpoints.iter().map(|(h, hash)| (*h, hash))
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
