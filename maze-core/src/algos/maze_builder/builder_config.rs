use crate::constants::DEFAULT_MAZE_SIZE;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeBuilderConfig {
    pub rows: usize,
    pub cols: usize,
    // When set, every maze built from this config is identical.
    pub seed: Option<u64>,
}

impl Default for MazeBuilderConfig {
    fn default() -> Self {
        MazeBuilderConfig {
            rows: DEFAULT_MAZE_SIZE,
            cols: DEFAULT_MAZE_SIZE,
            seed: None,
        }
    }
}

impl MazeBuilderConfig {
    pub fn square(size: usize) -> Self {
        MazeBuilderConfig {
            rows: size,
            cols: size,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
