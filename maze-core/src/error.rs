use crate::{
    constants::{MAX_ROOM_COUNT, MIN_ROOM_COUNT},
    types::{Cell, Direction},
};

use thiserror::Error;

/// Failures raised by the maze model itself.
///
/// Apart from [MazeError::InvalidDimensions] and [MazeError::OutOfBounds], every variant
/// points at a broken invariant: the caller tried to re-set a set-once flag or handed us
/// a grid that could not have been produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error(
        "maze needs between {min} and {max} rooms, got a [{rows}x{cols}] grid",
        min = MIN_ROOM_COUNT,
        max = MAX_ROOM_COUNT
    )]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("cell [{row}, {col}] is outside of the [{rows}x{cols}] grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("room {cell} has no neighbour to the {direction}")]
    NoNeighbour { cell: Cell, direction: Direction },
    #[error("room {0} is already marked as visited")]
    AlreadyVisited(Cell),
    #[error("room {0} is already marked as the start room")]
    AlreadyStart(Cell),
    #[error("room {0} is already marked as the exit room")]
    AlreadyExit(Cell),
    #[error("passage {direction} of room {cell} is already open")]
    PassageAlreadyOpen { cell: Cell, direction: Direction },
    #[error("wall {direction} of room {cell} is sealed and cannot be carved")]
    SealedWall { cell: Cell, direction: Direction },
    #[error("snapshot rejected: {0}")]
    CorruptSnapshot(&'static str),
}

/// Failures of the question bank port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionBankError {
    #[error("question text cannot be empty")]
    EmptyText,
    #[error(r#"answer cannot be empty for question "{0}""#)]
    EmptyAnswer(String),
    #[error(r#"multiple-choice question "{0}" has no choices"#)]
    MissingChoices(String),
    #[error("question source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error("there is no pending challenge to answer")]
    NoPendingChallenge,
    #[error("the question bank has no questions of the requested kinds")]
    EmptyQuestionDeck,
}
