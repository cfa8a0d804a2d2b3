/*!
   Module `session` ties the maze, the door coordinator and the question deck together into
   a single game.

   A session is driven one call at a time by the presentation layer: it asks to move, gets
   either a move or a question back, and reports whether the question was answered correctly.
*/

use crate::{
    algos::{
        AnswerOutcome, DoorStateCoordinator, MazeBuilder, MazeBuilderConfig,
        ReachabilityAnalyzer, RngHandler, WallUpdate,
    },
    constants::QUESTION_KINDS,
    error::SessionError,
    questions::{Question, QuestionDeck, QuestionKind, QuestionSource},
    types::{Cell, Direction, Maze},
};

use derive_more::Display;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub maze: MazeBuilderConfig,
    pub question_kinds: Vec<QuestionKind>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            maze: MazeBuilderConfig::default(),
            question_kinds: QUESTION_KINDS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    /// The door was already open and the player walked through it.
    Moved(Cell),
    /// The door is closed; answer this question to open it.
    Challenge(Question),
    /// Outside of the grid, behind a permanently locked door, or the game is over.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReport {
    pub outcome: AnswerOutcome,
    pub update: WallUpdate,
    pub player: Cell,
    pub status: GameStatus,
}

/// Everything needed to resume a game: the whole grid (door states included), the
/// player position and the questions answered so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub maze: Maze,
    pub answered: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingChallenge {
    cell: Cell,
    direction: Direction,
    question: Question,
}

pub struct GameSession<S: QuestionSource> {
    config: SessionConfig,
    source: S,
    rng: StdRng,
    maze: Maze,
    deck: QuestionDeck,
    answered: Vec<Question>,
    pending: Option<PendingChallenge>,
}

impl<S: QuestionSource> GameSession<S> {
    /// # Errors
    ///
    /// - [SessionError::Maze] if the configured grid is too small or too large.
    /// - [SessionError::QuestionBank] if the source cannot be read.
    /// - [SessionError::EmptyQuestionDeck] if the source has no question of the configured kinds.
    pub fn new(config: SessionConfig, source: S) -> Result<Self, SessionError> {
        let mut rng = RngHandler::rng(config.maze.seed);

        let maze = MazeBuilder::from_config(&config.maze)?.build(&mut rng)?;
        let deck = QuestionDeck::build(&source, &config.question_kinds, &mut rng)?;

        if deck.is_empty() {
            return Err(SessionError::EmptyQuestionDeck);
        }

        Ok(GameSession {
            config,
            source,
            rng,
            maze,
            deck,
            answered: Vec::new(),
            pending: None,
        })
    }

    /// Throws the current grid away and starts over on a new one.
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        self.maze = MazeBuilder::from_config(&self.config.maze)?.build(&mut self.rng)?;
        self.deck = QuestionDeck::build(&self.source, &self.config.question_kinds, &mut self.rng)?;
        self.answered.clear();
        self.pending = None;

        event!(Level::INFO, "Started a new game");

        Ok(())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn answered_questions(&self) -> &[Question] {
        &self.answered
    }

    pub fn pending_question(&self) -> Option<&Question> {
        self.pending.as_ref().map(|pending| &pending.question)
    }

    pub fn status(&self) -> GameStatus {
        if self.maze.is_at_exit() {
            GameStatus::Won
        } else if !ReachabilityAnalyzer::exit_reachable(&self.maze, self.maze.player()) {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    pub fn request_move(&mut self, direction: Direction) -> Result<MoveRequest, SessionError> {
        if self.status() != GameStatus::InProgress {
            return Ok(MoveRequest::Blocked);
        }

        let cell = self.maze.player();

        if self.maze.neighbour(cell, direction).is_none() {
            return Ok(MoveRequest::Blocked);
        }

        let door = self.maze.current_room().door(direction);

        if door.is_permanently_locked() {
            return Ok(MoveRequest::Blocked);
        }

        if door.is_passable() {
            self.pending = None;

            return Ok(match self.maze.move_player(direction) {
                Some(target) => MoveRequest::Moved(target),
                None => MoveRequest::Blocked,
            });
        }

        // Asking again for the same door repeats the same question.
        if let Some(pending) = self
            .pending
            .as_ref()
            .filter(|pending| pending.cell == cell && pending.direction == direction)
        {
            return Ok(MoveRequest::Challenge(pending.question.clone()));
        }

        let question = self
            .deck
            .draw(&self.source, &mut self.rng)?
            .ok_or(SessionError::EmptyQuestionDeck)?;

        self.maze.attach_question(cell, direction, question.clone())?;
        self.pending = Some(PendingChallenge {
            cell,
            direction,
            question: question.clone(),
        });

        event!(
            Level::DEBUG,
            "Door {} of room {} asks: {}",
            direction,
            cell,
            question.text()
        );

        Ok(MoveRequest::Challenge(question))
    }

    /// Resolves the pending challenge. A correct answer opens the door and moves the
    /// player through it; an incorrect one seals the door for the rest of the game.
    pub fn submit_outcome(
        &mut self,
        outcome: impl Into<AnswerOutcome>,
    ) -> Result<AnswerReport, SessionError> {
        let outcome = outcome.into();
        let pending = self.pending.take().ok_or(SessionError::NoPendingChallenge)?;

        let update =
            DoorStateCoordinator::apply(&mut self.maze, pending.cell, pending.direction, outcome)?;

        self.answered.push(pending.question);

        if outcome == AnswerOutcome::Correct && update.transition.is_applied() {
            let _ = self.maze.move_player(pending.direction);
        }

        let status = self.status();
        match status {
            GameStatus::Won => event!(Level::INFO, "Player reached the exit"),
            GameStatus::Lost => event!(Level::INFO, "No path left to the exit"),
            GameStatus::InProgress => {}
        }

        Ok(AnswerReport {
            outcome,
            update,
            player: self.maze.player(),
            status,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            maze: self.maze.clone(),
            answered: self.answered.clone(),
        }
    }

    /// Replaces the running game with `snapshot`, after checking that the grid inside
    /// it is one this crate could have produced.
    pub fn restore(&mut self, snapshot: GameSnapshot) -> Result<(), SessionError> {
        snapshot.maze.validate()?;

        self.maze = snapshot.maze;
        self.answered = snapshot.answered;
        self.pending = None;

        event!(
            Level::DEBUG,
            "Restored a [{}x{}] game at {}",
            self.maze.rows(),
            self.maze.cols(),
            self.maze.player()
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        constants::DIRECTIONS,
        error::MazeError,
        questions::InMemoryQuestionBank,
        types::DoorState,
    };

    fn question_bank() -> InMemoryQuestionBank {
        InMemoryQuestionBank::new(vec![
            Question::short_answer("Who is the king of the gods in Greek mythology?", "Zeus")
                .unwrap(),
            Question::short_answer("What is the chemical symbol for mercury?", "Hg").unwrap(),
            Question::true_false("Google was initially called BackRub.", true).unwrap(),
            Question::true_false("Bananas are berries.", true).unwrap(),
        ])
    }

    fn seeded_session(seed: u64) -> GameSession<InMemoryQuestionBank> {
        let config = SessionConfig {
            maze: MazeBuilderConfig::default().with_seed(seed),
            ..SessionConfig::default()
        };

        GameSession::new(config, question_bank()).unwrap()
    }

    // A direction out of the player's room whose door is closed but not sealed.
    fn closed_direction(session: &GameSession<InMemoryQuestionBank>) -> Option<Direction> {
        let maze = session.maze();
        DIRECTIONS.into_iter().find(|direction| {
            maze.neighbour(maze.player(), *direction).is_some()
                && maze.current_room().door(*direction).state() == DoorState::Closed
        })
    }

    #[test]
    fn test_new_session_starts_in_progress() {
        let session = seeded_session(1);

        assert_eq!(session.maze().player(), Cell::new(0, 0));
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.answered_questions().is_empty());
        assert!(session.pending_question().is_none());
    }

    #[test]
    fn test_session_needs_questions() {
        let config = SessionConfig::default();

        assert!(matches!(
            GameSession::new(config, InMemoryQuestionBank::default()),
            Err(SessionError::EmptyQuestionDeck)
        ));
    }

    #[test]
    fn test_session_rejects_degenerate_grid() {
        let config = SessionConfig {
            maze: MazeBuilderConfig::square(1),
            ..SessionConfig::default()
        };

        assert!(matches!(
            GameSession::new(config, question_bank()),
            Err(SessionError::Maze(MazeError::InvalidDimensions { rows: 1, cols: 1 }))
        ));

        let config = SessionConfig {
            maze: MazeBuilderConfig {
                rows: usize::MAX,
                cols: usize::MAX,
                seed: Some(1),
            },
            ..SessionConfig::default()
        };

        assert!(matches!(
            GameSession::new(config, question_bank()),
            Err(SessionError::Maze(MazeError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_moving_into_the_boundary_is_blocked() {
        let mut session = seeded_session(2);

        assert_eq!(
            session.request_move(Direction::North).unwrap(),
            MoveRequest::Blocked
        );
        assert_eq!(
            session.request_move(Direction::West).unwrap(),
            MoveRequest::Blocked
        );
    }

    #[test]
    fn test_open_passages_move_without_questions() {
        let mut session = seeded_session(3);
        let maze = session.maze();

        let open = DIRECTIONS
            .into_iter()
            .find(|direction| maze.can_move(*direction))
            .expect("the start room always has a carved passage");
        let target = maze.neighbour(maze.player(), open).unwrap();

        assert_eq!(
            session.request_move(open).unwrap(),
            MoveRequest::Moved(target)
        );
        assert_eq!(session.maze().player(), target);
    }

    #[test]
    fn test_correct_answer_opens_and_moves() {
        // Find a seed where the start room has a closed interior door.
        let (mut session, direction) = (0..50)
            .find_map(|seed| {
                let session = seeded_session(seed);
                closed_direction(&session).map(|direction| (session, direction))
            })
            .unwrap();
        let start = session.maze().player();

        let MoveRequest::Challenge(question) = session.request_move(direction).unwrap() else {
            panic!("a closed door must ask a question");
        };
        assert_eq!(session.pending_question(), Some(&question));
        assert_eq!(
            session.maze().room(start).unwrap().door(direction).questions(),
            &[question.clone()]
        );

        // Asking twice does not draw a second question.
        assert_eq!(
            session.request_move(direction).unwrap(),
            MoveRequest::Challenge(question.clone())
        );

        let report = session.submit_outcome(true).unwrap();

        assert_eq!(report.outcome, AnswerOutcome::Correct);
        assert_eq!(report.update.near, DoorState::Open);
        assert_eq!(report.update.far, DoorState::Open);
        assert_eq!(report.player, start.step(direction, 3, 3).unwrap());
        assert_eq!(session.answered_questions(), &[question]);
        assert!(session.pending_question().is_none());
    }

    #[test]
    fn test_incorrect_answer_seals_the_door() {
        let (mut session, direction) = (0..50)
            .find_map(|seed| {
                let session = seeded_session(seed);
                closed_direction(&session).map(|direction| (session, direction))
            })
            .unwrap();
        let start = session.maze().player();

        assert!(matches!(
            session.request_move(direction).unwrap(),
            MoveRequest::Challenge(_)
        ));

        let report = session.submit_outcome(AnswerOutcome::Incorrect).unwrap();

        assert_eq!(report.player, start);
        assert_eq!(report.update.near, DoorState::PermanentlyLocked);
        assert_eq!(report.update.far, DoorState::PermanentlyLocked);
        assert_eq!(
            session.request_move(direction).unwrap(),
            MoveRequest::Blocked
        );
        assert_eq!(session.answered_questions().len(), 1);
    }

    #[test]
    fn test_submitting_without_a_challenge_fails() {
        let mut session = seeded_session(4);

        assert_eq!(
            session.submit_outcome(true),
            Err(SessionError::NoPendingChallenge)
        );
    }

    #[test]
    fn test_sealing_every_way_out_loses_the_game() {
        let mut session = seeded_session(5);
        let start = session.maze().player();

        for direction in [Direction::East, Direction::South] {
            let _ = session
                .maze
                .permanently_lock_door(start, direction)
                .unwrap();
        }

        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(
            session.request_move(Direction::East).unwrap(),
            MoveRequest::Blocked
        );
    }

    #[test]
    fn test_reaching_the_exit_wins() {
        let mut session = seeded_session(6);

        session.maze.set_player(Cell::new(2, 2)).unwrap();

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(
            session.request_move(Direction::North).unwrap(),
            MoveRequest::Blocked
        );
    }

    #[test]
    fn test_start_game_discards_progress() {
        let mut session = seeded_session(7);
        let _ = session
            .maze
            .permanently_lock_door(Cell::new(1, 1), Direction::North)
            .unwrap();
        session.answered.push(question_bank().load_questions().unwrap()[0].clone());

        session.start_game().unwrap();

        assert!(session.answered_questions().is_empty());
        assert_eq!(session.maze().player(), Cell::new(0, 0));
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.maze().validate().is_ok());

        // Only the boundary is sealed in a fresh grid.
        let sealed_interior = session
            .maze()
            .iter_rooms()
            .flat_map(|room| {
                DIRECTIONS
                    .into_iter()
                    .filter(move |direction| room.door(*direction).is_permanently_locked())
                    .map(move |direction| (room.cell(), direction))
            })
            .filter(|(cell, direction)| session.maze().neighbour(*cell, *direction).is_some())
            .count();
        assert_eq!(sealed_interior, 0);
    }

    #[test]
    fn test_snapshot_restores_the_same_game() {
        let (mut session, direction) = (0..50)
            .find_map(|seed| {
                let session = seeded_session(seed);
                closed_direction(&session).map(|direction| (session, direction))
            })
            .unwrap();

        let _ = session.request_move(direction).unwrap();
        session.submit_outcome(false).unwrap();

        let snapshot = session.snapshot();
        let saved = serde_json::to_string(&snapshot).unwrap();

        session.start_game().unwrap();
        assert_ne!(session.snapshot(), snapshot);

        let loaded: GameSnapshot = serde_json::from_str(&saved).unwrap();
        session.restore(loaded).unwrap();

        assert_eq!(session.snapshot(), snapshot);
        assert_eq!(serde_json::to_string(&session.snapshot()).unwrap(), saved);
    }

    #[test]
    fn test_restore_rejects_tampered_snapshots() {
        let mut session = seeded_session(8);
        let mut snapshot = session.snapshot();

        let _ = snapshot
            .maze
            .room_mut(Cell::new(0, 1))
            .unwrap()
            .door_mut(Direction::South)
            .permanently_lock();

        assert!(matches!(
            session.restore(snapshot),
            Err(SessionError::Maze(MazeError::CorruptSnapshot(_)))
        ));
        assert_eq!(session.status(), GameStatus::InProgress);
    }
}
