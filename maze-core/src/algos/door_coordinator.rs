use crate::{
    error::MazeError,
    types::{Cell, Direction, DoorState, DoorTransition, Maze},
};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

impl From<bool> for AnswerOutcome {
    fn from(correct: bool) -> Self {
        if correct {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }
}

/// Both sides of a wall after an answer has been applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallUpdate {
    pub transition: DoorTransition,
    pub near_cell: Cell,
    pub far_cell: Cell,
    pub near: DoorState,
    pub far: DoorState,
}

/// Turns an answer outcome into a door transition applied to both sides of a wall.
pub struct DoorStateCoordinator;

impl DoorStateCoordinator {
    /// A correct answer opens the wall, an incorrect one seals it for good.
    ///
    /// # Errors
    ///
    /// - [MazeError::OutOfBounds] if `cell` is not part of the maze.
    /// - [MazeError::NoNeighbour] if the wall faces the outside of the grid.
    pub fn apply(
        maze: &mut Maze,
        cell: Cell,
        direction: Direction,
        outcome: AnswerOutcome,
    ) -> Result<WallUpdate, MazeError> {
        maze.room(cell)?;
        let far_cell = maze
            .neighbour(cell, direction)
            .ok_or(MazeError::NoNeighbour { cell, direction })?;

        let transition = match outcome {
            AnswerOutcome::Correct => maze.open_door(cell, direction)?,
            AnswerOutcome::Incorrect => maze.permanently_lock_door(cell, direction)?,
        };

        let near = maze.room(cell)?.door(direction).state();
        let far = maze.room(far_cell)?.door(direction.opposite()).state();

        event!(
            tracing::Level::DEBUG,
            "{} answer on wall {} -- {}: {} ({})",
            outcome,
            cell,
            far_cell,
            near,
            transition
        );

        Ok(WallUpdate {
            transition,
            near_cell: cell,
            far_cell,
            near,
            far,
        })
    }
}
