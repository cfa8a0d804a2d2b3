use crate::{questions::QuestionKind, types::Direction};

pub(crate) const DEFAULT_MAZE_SIZE: usize = 3;

// Start and exit must be two different rooms.
pub(crate) const MIN_ROOM_COUNT: usize = 2;

pub(crate) const MAX_ROOM_COUNT: usize = 10_000;

pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

// Deck order: every multiple-choice question first, then true/false, then short answer.
pub const QUESTION_KINDS: [QuestionKind; 3] = [
    QuestionKind::MultipleChoice,
    QuestionKind::TrueFalse,
    QuestionKind::ShortAnswer,
];
