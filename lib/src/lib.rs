//! Solver assistance for five-letter word-guessing games.
//!
//! The solver tracks a [`Session`] per game: it suggests guesses, ingests the
//! green/yellow/gray feedback for each guess you actually played, and narrows
//! the candidate pool until the game is solved or no candidates remain.
//!
//! ```
//! use std::io::Cursor;
//! use wordmaster_solver::*;
//!
//! fn solve() -> Result<(), Box<dyn std::error::Error>> {
//!     let bank = WordBank::from_reader(Cursor::new("CRANE,SLATE,TABLE,CABLE"))?;
//!     let mut session = Session::new(
//!         &bank,
//!         ScoringMode::Entropy,
//!         HistoryPolicy::Keep,
//!         &AnswerHistory::default(),
//!     );
//!
//!     // Pick a guess (any valid word works, suggested or not), play it in
//!     // the real game, then report the colors the game showed.
//!     assert!(!session.top_guesses(3).is_empty());
//!     let status = session.apply_feedback("TABLE", "XGGGG")?;
//!     assert_eq!(status, SessionStatus::InProgress);
//!     assert_eq!(session.candidates()[0].as_ref(), "CABLE");
//!     Ok(())
//! }
//! # solve().unwrap();
//! ```
//!
//! Guess quality is configurable via [`ScoringMode`]: three letter-frequency
//! heuristics and a Shannon-entropy strategy that ranks guesses by expected
//! information gain. [`play_game`] runs the whole loop against a known answer,
//! which is useful for benchmarking the strategies against each other.

mod data;
mod engine;
mod restrictions;
mod results;
mod scorers;

pub use crate::data::{AnswerHistory, FrequencyTable, WordBank};
pub use crate::engine::{
    play_game, play_game_with_rng, GameResult, HistoryPolicy, Session, SessionStatus, MAX_GUESSES,
};
pub use crate::restrictions::{filter_words, FeedbackConstraint};
pub use crate::results::{
    get_result_for_guess, is_valid_word, parse_pattern, GuessResult, LetterResult, SolverError,
    WORD_LENGTH,
};
pub use crate::scorers::{
    rank_guesses, GuessScore, ScoredWord, ScoringMode, MAX_ENTROPY_CANDIDATES,
};
