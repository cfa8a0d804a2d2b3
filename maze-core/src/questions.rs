/*!
   Module `questions` holds the trivia side of the game: the question records that gate
   each door and the port through which they are loaded.

   The maze never grades answers. The presentation layer asks the question, decides whether
   the answer was right and feeds a plain outcome back into the session.
*/

use crate::{constants::QUESTION_KINDS, error::QuestionBankError};

use std::collections::{HashSet, VecDeque};

use derive_more::{Display, From};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::event;

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
pub enum QuestionKind {
    #[display("Multiple-Choice")]
    MultipleChoice,
    #[display("True/False")]
    TrueFalse,
    #[display("Short Answer")]
    ShortAnswer,
}

/// A single trivia question.
///
/// Built only through the checked constructors, or deserialized through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    text: String,
    answer: String,
    kind: QuestionKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    choices: Vec<String>,
}

// Unchecked wire shape of a [Question].
#[derive(Deserialize)]
struct QuestionRecord {
    text: String,
    answer: String,
    kind: QuestionKind,
    #[serde(default)]
    choices: Vec<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionBankError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::checked(record.text, record.answer, record.kind, record.choices)
    }
}

impl Question {
    pub fn multiple_choice(
        text: impl Into<String>,
        answer: impl Into<String>,
        choices: Vec<String>,
    ) -> Result<Self, QuestionBankError> {
        Self::checked(text.into(), answer.into(), QuestionKind::MultipleChoice, choices)
    }

    pub fn true_false(text: impl Into<String>, answer: bool) -> Result<Self, QuestionBankError> {
        let answer = if answer { "True" } else { "False" };

        Self::checked(text.into(), answer.to_owned(), QuestionKind::TrueFalse, Vec::new())
    }

    pub fn short_answer(
        text: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionBankError> {
        Self::checked(text.into(), answer.into(), QuestionKind::ShortAnswer, Vec::new())
    }

    fn checked(
        text: String,
        answer: String,
        kind: QuestionKind,
        choices: Vec<String>,
    ) -> Result<Self, QuestionBankError> {
        if text.trim().is_empty() {
            return Err(QuestionBankError::EmptyText);
        }

        if answer.trim().is_empty() {
            return Err(QuestionBankError::EmptyAnswer(text));
        }

        let choices = match kind {
            QuestionKind::MultipleChoice if choices.is_empty() => {
                return Err(QuestionBankError::MissingChoices(text));
            }
            QuestionKind::MultipleChoice => choices,
            // Only multiple-choice questions carry their options.
            QuestionKind::TrueFalse | QuestionKind::ShortAnswer => Vec::new(),
        };

        Ok(Question {
            text,
            answer,
            kind,
            choices,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Case-insensitive comparison of a player's response with the expected answer.
    pub fn is_correct(&self, response: &str) -> bool {
        response.trim().eq_ignore_ascii_case(self.answer.trim())
    }
}

/// `QuestionSource` is the port through which the game reads its question bank.
///
/// The game is not concerned with where the questions are stored, it only asks for the
/// whole bank and does the filtering and ordering itself, see [QuestionDeck].
pub trait QuestionSource {
    /// Load every question known to the bank.
    ///
    /// # Errors
    ///
    /// - [QuestionBankError::Unavailable] if the underlying store cannot be read.
    fn load_questions(&self) -> Result<Vec<Question>, QuestionBankError>;
}

impl<S: QuestionSource + ?Sized> QuestionSource for &S {
    fn load_questions(&self) -> Result<Vec<Question>, QuestionBankError> {
        (**self).load_questions()
    }
}

/// A question bank held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, From)]
pub struct InMemoryQuestionBank {
    questions: Vec<Question>,
}

impl InMemoryQuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        InMemoryQuestionBank { questions }
    }

    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionSource for InMemoryQuestionBank {
    fn load_questions(&self) -> Result<Vec<Question>, QuestionBankError> {
        Ok(self.questions.clone())
    }
}

/// The ordered queue of questions handed out during a game.
///
/// Questions are grouped by kind (multiple choice, then true/false, then short answer),
/// shuffled inside each group and never repeated within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDeck {
    kinds: Vec<QuestionKind>,
    queue: VecDeque<Question>,
}

impl QuestionDeck {
    pub fn build<S, R>(
        source: &S,
        kinds: &[QuestionKind],
        rng: &mut R,
    ) -> Result<Self, QuestionBankError>
    where
        S: QuestionSource + ?Sized,
        R: Rng + ?Sized,
    {
        let mut deck = QuestionDeck {
            kinds: kinds.to_vec(),
            queue: VecDeque::new(),
        };

        deck.refill(source, rng)?;

        Ok(deck)
    }

    /// Takes the next question, reshuffling the whole bank once the deck runs out.
    ///
    /// Returns `None` only when the bank holds no question of the requested kinds.
    pub fn draw<S, R>(
        &mut self,
        source: &S,
        rng: &mut R,
    ) -> Result<Option<Question>, QuestionBankError>
    where
        S: QuestionSource + ?Sized,
        R: Rng + ?Sized,
    {
        if self.queue.is_empty() {
            self.refill(source, rng)?;
        }

        Ok(self.queue.pop_front())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.queue.iter()
    }

    fn refill<S, R>(&mut self, source: &S, rng: &mut R) -> Result<(), QuestionBankError>
    where
        S: QuestionSource + ?Sized,
        R: Rng + ?Sized,
    {
        let questions = source.load_questions()?;
        let loaded = questions.len();

        for kind in QUESTION_KINDS {
            if !self.kinds.contains(&kind) {
                continue;
            }

            let mut seen_texts = HashSet::new();
            let mut group = questions
                .iter()
                .filter(|question| question.kind() == kind)
                .filter(|question| seen_texts.insert(question.text()))
                .cloned()
                .collect::<Vec<_>>();

            group.shuffle(rng);

            self.queue.extend(group);
        }

        event!(
            tracing::Level::DEBUG,
            "Refilled question deck with {} of {} loaded questions",
            self.queue.len(),
            loaded
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::{SeedableRng, rngs::StdRng};

    struct BrokenSource;

    impl QuestionSource for BrokenSource {
        fn load_questions(&self) -> Result<Vec<Question>, QuestionBankError> {
            Err(QuestionBankError::Unavailable("database is locked".to_owned()))
        }
    }

    fn sample_bank() -> InMemoryQuestionBank {
        InMemoryQuestionBank::new(vec![
            Question::short_answer("What do bees collect to make honey?", "Nectar").unwrap(),
            Question::true_false("Bananas are berries.", true).unwrap(),
            Question::multiple_choice(
                "What is the capital city of Australia?",
                "c) Canberra",
                vec![
                    "a) Sydney".to_owned(),
                    "b) Melbourne".to_owned(),
                    "c) Canberra".to_owned(),
                ],
            )
            .unwrap(),
            Question::true_false("You can sneeze while asleep.", false).unwrap(),
            // Same text twice, only one of them makes it into the deck.
            Question::true_false("Bananas are berries.", true).unwrap(),
            Question::short_answer("Who is the Greek god of war?", "Ares").unwrap(),
            // Same text as a short answer, but a different kind.
            Question::multiple_choice(
                "Who is the Greek god of war?",
                "a) Ares",
                vec!["a) Ares".to_owned(), "b) Apollo".to_owned()],
            )
            .unwrap(),
        ])
    }

    #[test]
    fn test_constructors_validate_input() {
        assert_eq!(
            Question::short_answer("  ", "Zeus"),
            Err(QuestionBankError::EmptyText)
        );
        assert_eq!(
            Question::short_answer("Who?", ""),
            Err(QuestionBankError::EmptyAnswer("Who?".to_owned()))
        );
        assert_eq!(
            Question::multiple_choice("Which one?", "a) This", Vec::new()),
            Err(QuestionBankError::MissingChoices("Which one?".to_owned()))
        );

        let tf = Question::true_false("The Titanic sank on its maiden voyage.", true).unwrap();
        assert_eq!(tf.answer(), "True");
        assert_eq!(tf.kind(), QuestionKind::TrueFalse);
        assert!(tf.choices().is_empty());
    }

    #[test]
    fn test_answers_are_case_insensitive() {
        let question = Question::short_answer("What is the largest ocean?", "Pacific Ocean").unwrap();

        assert!(question.is_correct("pacific ocean"));
        assert!(question.is_correct("  PACIFIC OCEAN "));
        assert!(!question.is_correct("Atlantic Ocean"));

        let tf = Question::true_false("Mars has blue skies.", false).unwrap();
        assert!(tf.is_correct("false"));
        assert!(!tf.is_correct("true"));
    }

    #[test]
    fn test_deck_partitions_deduplicates_and_orders_by_kind() {
        let bank = sample_bank();
        let mut rng = StdRng::seed_from_u64(3);

        let deck = QuestionDeck::build(&bank, &QUESTION_KINDS, &mut rng).unwrap();
        let kinds = deck.iter().map(Question::kind).collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![
                QuestionKind::MultipleChoice,
                QuestionKind::MultipleChoice,
                QuestionKind::TrueFalse,
                QuestionKind::TrueFalse,
                QuestionKind::ShortAnswer,
                QuestionKind::ShortAnswer,
            ]
        );
    }

    #[test]
    fn test_deck_only_keeps_requested_kinds() {
        let bank = sample_bank();
        let mut rng = StdRng::seed_from_u64(3);

        let deck = QuestionDeck::build(&bank, &[QuestionKind::ShortAnswer], &mut rng).unwrap();

        assert_eq!(deck.len(), 2);
        assert!(
            deck.iter()
                .all(|question| question.kind() == QuestionKind::ShortAnswer)
        );
    }

    #[test]
    fn test_deck_refills_when_exhausted() {
        let bank = sample_bank();
        let mut rng = StdRng::seed_from_u64(9);

        let mut deck = QuestionDeck::build(&bank, &[QuestionKind::TrueFalse], &mut rng).unwrap();

        let mut drawn = Vec::new();
        for _ in 0..5 {
            drawn.push(deck.draw(&bank, &mut rng).unwrap().unwrap());
        }

        assert_eq!(drawn.len(), 5);
        assert!(
            drawn
                .iter()
                .all(|question| question.kind() == QuestionKind::TrueFalse)
        );
    }

    #[test]
    fn test_empty_bank_yields_nothing() {
        let bank = InMemoryQuestionBank::default();
        let mut rng = StdRng::seed_from_u64(0);

        let mut deck = QuestionDeck::build(&bank, &QUESTION_KINDS, &mut rng).unwrap();

        assert!(deck.is_empty());
        assert_eq!(deck.draw(&bank, &mut rng), Ok(None));
    }

    #[test]
    fn test_source_failures_propagate() {
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            QuestionDeck::build(&BrokenSource, &QUESTION_KINDS, &mut rng),
            Err(QuestionBankError::Unavailable("database is locked".to_owned()))
        );
    }

    #[test]
    fn test_deserializing_runs_the_same_checks() {
        let question: Question = serde_json::from_str(
            r#"{"text": "Who founded Microsoft?", "answer": "a) Bill Gates", "kind": "MultipleChoice", "choices": ["a) Bill Gates", "b) Steve Jobs"]}"#,
        )
        .unwrap();
        assert_eq!(question.choices().len(), 2);

        let missing_choices = serde_json::from_str::<Question>(
            r#"{"text": "Who founded Microsoft?", "answer": "a) Bill Gates", "kind": "MultipleChoice"}"#,
        );
        assert!(missing_choices.is_err());
    }
}
