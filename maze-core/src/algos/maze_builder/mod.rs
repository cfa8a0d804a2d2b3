use crate::{
    error::MazeError,
    types::{Maze, room_count},
};

use rand::Rng;
use tracing::{Level, event, span};

mod builder_config;
mod carve_passages;
mod init_rooms;

pub use builder_config::MazeBuilderConfig;

/// Builds perfect mazes: every room is reachable and there is exactly one
/// carved path between any two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeBuilder {
    pub rows: usize,
    pub cols: usize,
}

impl MazeBuilder {
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        room_count(rows, cols)?;

        Ok(MazeBuilder { rows, cols })
    }

    pub fn from_config(config: &MazeBuilderConfig) -> Result<Self, MazeError> {
        Self::new(config.rows, config.cols)
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Maze, MazeError> {
        let span = span!(Level::DEBUG, "build_maze", rows = self.rows, cols = self.cols);
        let _guard = span.enter();

        let build_start = std::time::Instant::now();

        let mut maze = self.initialize_rooms()?;

        let rooms_time = std::time::Instant::now();
        event!(
            Level::DEBUG,
            "Initialized [{}x{}] rooms in {}µs",
            self.rows,
            self.cols,
            rooms_time.duration_since(build_start).as_micros()
        );

        let carved = Self::carve_passages(&mut maze, rng)?;

        let carved_time = std::time::Instant::now();
        event!(
            Level::DEBUG,
            "Carved {} passages in {}µs",
            carved,
            carved_time.duration_since(rooms_time).as_micros()
        );

        Ok(maze)
    }
}
