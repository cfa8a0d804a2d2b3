mod render;
mod sample_bank;

use maze_core::{
    AnswerOutcome, Direction, GameSession, GameSnapshot, GameStatus, InMemoryQuestionBank,
    MazeBuilderConfig, MoveRequest, QUESTION_KINDS, Question, QuestionKind, SessionConfig,
};

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing::{Level, event};

#[derive(Parser, Debug)]
#[command(version, about = "Trivia maze: answer questions to open the doors", long_about = None)]
struct Args {
    /// Number of rows in the maze
    #[arg(short, long, default_value_t = 3)]
    rows: usize,

    /// Number of columns in the maze
    #[arg(short, long, default_value_t = 3)]
    cols: usize,

    /// Seed for the maze layout and the question order
    #[arg(long)]
    seed: Option<u64>,

    /// Question kinds to ask, all of them by default
    #[arg(short, long, value_enum, value_delimiter = ',')]
    kinds: Vec<QuestionKind>,

    /// JSON file with the question bank, the built-in trivia is used otherwise
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Comma separated moves to play without prompting, e.g. "E+,S-,S".
    /// A trailing '+' answers the door's question correctly, '-' incorrectly.
    #[arg(long)]
    script: Option<String>,

    /// Resume the game stored in this file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Store the game in this file before exiting
    #[arg(long)]
    save: Option<PathBuf>,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScriptStep {
    direction: Direction,
    outcome: Option<AnswerOutcome>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let max_level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();

    let bank = match &args.questions {
        Some(path) => load_bank(path)?,
        None => sample_bank::sample_bank().context("Built-in question bank is invalid")?,
    };

    let config = SessionConfig {
        maze: MazeBuilderConfig {
            rows: args.rows,
            cols: args.cols,
            seed: args.seed,
        },
        question_kinds: if args.kinds.is_empty() {
            QUESTION_KINDS.to_vec()
        } else {
            args.kinds.clone()
        },
    };

    let mut session = GameSession::new(config, bank).context("Failed to start the game")?;

    if let Some(path) = &args.load {
        let snapshot = read_json::<GameSnapshot>(path)?;
        session
            .restore(snapshot)
            .with_context(|| format!("Cannot resume game from {}", path.display()))?;
        println!("Resumed game from {}", path.display());
    }

    match &args.script {
        Some(script) => run_script(&mut session, &parse_script(script)?)?,
        None => run_interactive(&mut session)?,
    }

    println!("{}", render::render(session.maze()));
    println!("Status: {}", session.status());

    if let Some(path) = &args.save {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Game saved to {}", path.display());
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("Malformed JSON in {}", path.display()))
}

fn load_bank(path: &Path) -> anyhow::Result<InMemoryQuestionBank> {
    let bank = InMemoryQuestionBank::from(read_json::<Vec<Question>>(path)?);

    if bank.is_empty() {
        bail!("No questions in {}", path.display());
    }

    event!(Level::INFO, "Loaded {} questions from {}", bank.len(), path.display());

    Ok(bank)
}

fn parse_direction(letter: char) -> Option<Direction> {
    match letter.to_ascii_uppercase() {
        'N' => Some(Direction::North),
        'S' => Some(Direction::South),
        'E' => Some(Direction::East),
        'W' => Some(Direction::West),
        _ => None,
    }
}

fn parse_script(script: &str) -> anyhow::Result<Vec<ScriptStep>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut chars = token.chars();

            let direction = chars
                .next()
                .and_then(parse_direction)
                .with_context(|| format!("Unknown direction in step '{token}'"))?;
            let outcome = match chars.as_str() {
                "" => None,
                "+" => Some(AnswerOutcome::Correct),
                "-" => Some(AnswerOutcome::Incorrect),
                rest => bail!("Unknown answer marker '{rest}' in step '{token}'"),
            };

            Ok(ScriptStep { direction, outcome })
        })
        .collect()
}

fn run_script<S: maze_core::QuestionSource>(
    session: &mut GameSession<S>,
    steps: &[ScriptStep],
) -> anyhow::Result<()> {
    for step in steps {
        if session.status() != GameStatus::InProgress {
            break;
        }

        match session.request_move(step.direction)? {
            MoveRequest::Moved(cell) => println!("{} -> {}", step.direction, cell),
            MoveRequest::Blocked => println!("{} is blocked", step.direction),
            MoveRequest::Challenge(question) => {
                let Some(outcome) = step.outcome else {
                    bail!(
                        "Door {} asks \"{}\" but the step has no answer marker",
                        step.direction,
                        question.text()
                    );
                };

                println!("{}: {}", question.kind(), question.text());
                let report = session.submit_outcome(outcome)?;
                println!("{} answer, player at {}", report.outcome, report.player);
            }
        }
    }

    Ok(())
}

fn run_interactive<S: maze_core::QuestionSource>(
    session: &mut GameSession<S>,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while session.status() == GameStatus::InProgress {
        println!("{}", render::render(session.maze()));
        print!("Move (n/s/e/w, q to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") {
            break;
        }

        let Some(direction) = line.chars().next().and_then(parse_direction) else {
            println!("Unknown direction '{line}'");
            continue;
        };

        match session.request_move(direction)? {
            MoveRequest::Moved(cell) => println!("Moved to {cell}"),
            MoveRequest::Blocked => println!("That way is blocked"),
            MoveRequest::Challenge(question) => {
                println!("{}: {}", question.kind(), question.text());
                for choice in question.choices() {
                    println!("  - {choice}");
                }
                print!("Answer: ");
                io::stdout().flush()?;

                let Some(answer) = lines.next().transpose()? else {
                    break;
                };

                let report = session.submit_outcome(question.is_correct(&answer))?;
                match report.outcome {
                    AnswerOutcome::Correct => println!("Correct! Moved to {}", report.player),
                    AnswerOutcome::Incorrect => {
                        println!("Wrong, the answer was '{}'. This door is now sealed.", question.answer())
                    }
                }
            }
        }
    }

    Ok(())
}
