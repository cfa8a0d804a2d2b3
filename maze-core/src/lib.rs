mod algos;
mod constants;
mod error;
mod questions;
mod session;
mod types;

use tracing::{Level, span};

pub use algos::{
    AnswerOutcome, DoorStateCoordinator, MazeBuilder, MazeBuilderConfig, ReachabilityAnalyzer,
    WallUpdate,
};
pub use constants::{DIRECTIONS, QUESTION_KINDS};
pub use error::{MazeError, QuestionBankError, SessionError};
pub use questions::{InMemoryQuestionBank, Question, QuestionDeck, QuestionKind, QuestionSource};
pub use session::{
    AnswerReport, GameSession, GameSnapshot, GameStatus, MoveRequest, SessionConfig,
};
pub use types::{Cell, Direction, Door, DoorState, DoorTransition, Maze, Room};

/// Builds a fresh maze with the start at the top-left and the exit at the bottom-right.
pub fn create_maze(config: &MazeBuilderConfig) -> Result<Maze, MazeError> {
    let span = span!(Level::DEBUG, "create_maze");
    let _guard = span.enter();

    let mut rng = algos::RngHandler::rng(config.seed);
    let builder = MazeBuilder::from_config(config)?;

    builder.build(&mut rng)
}
