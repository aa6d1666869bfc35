use crate::data::{AnswerHistory, WordBank};
use crate::restrictions::{filter_words, FeedbackConstraint};
use crate::results::{
    get_result_for_guess, is_valid_word, parse_pattern, LetterResult, SolverError,
};
use crate::scorers::{rank_guesses, ScoredWord, ScoringMode};
use rand::Rng;
use std::result::Result;
use std::sync::Arc;

/// The maximum number of guesses in a game.
pub const MAX_GUESSES: u32 = 6;

/// How previously used answers affect the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HistoryPolicy {
    /// Past answers stay in the candidate pool.
    Keep,
    /// Past answers are removed from the candidate pool before the first
    /// guess.
    ExcludeFromStart,
    /// Past answers are removed exactly once, right after the first guess's
    /// feedback is applied. The first guess can then still be a past answer
    /// (useful as a well-known opener), but no suggestion from round two
    /// onwards will be.
    ExcludeAfterFirstGuess,
}

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    /// No guesses have been made yet.
    Fresh,
    /// At least one guess has been made and candidates remain.
    InProgress,
    /// The last feedback was all green.
    Solved,
    /// Six guesses were made without solving.
    Exhausted,
    /// No candidate is consistent with the feedback seen so far.
    Dead,
}

impl SessionStatus {
    /// Returns true iff the session can accept no further guesses.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Solved | SessionStatus::Exhausted | SessionStatus::Dead
        )
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    /// The guesser won the game; contains the guesses that were made.
    Success(Vec<Box<str>>),
    /// The guesser failed to find the word; contains the guesses that were made.
    Failure(Vec<Box<str>>),
    /// The given word is not in the word bank.
    UnknownWord,
}

/// A single solving session.
///
/// A session owns only the state that changes as the game progresses: the
/// candidate set, the guess count, and the cached score table. The word bank
/// and answer history it was created from are immutable and can back any
/// number of concurrent sessions.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    vocabulary: Vec<Arc<str>>,
    candidates: Vec<Arc<str>>,
    mode: ScoringMode,
    history_policy: HistoryPolicy,
    history: AnswerHistory,
    history_excluded: bool,
    num_guesses: u32,
    status: SessionStatus,
    score_table: Option<Vec<ScoredWord>>,
}

impl Session {
    /// Creates a session over the given word bank.
    ///
    /// The bank defines both the guess pool and the initial candidate set.
    /// With [`HistoryPolicy::ExcludeFromStart`], past answers are removed
    /// from the candidates immediately. An empty bank yields a session that
    /// produces no suggestions.
    pub fn new(
        bank: &WordBank,
        mode: ScoringMode,
        history_policy: HistoryPolicy,
        history: &AnswerHistory,
    ) -> Session {
        let mut session = Session {
            vocabulary: bank.to_vec(),
            candidates: bank.to_vec(),
            mode,
            history_policy,
            history: history.clone(),
            history_excluded: false,
            num_guesses: 0,
            status: SessionStatus::Fresh,
            score_table: None,
        };
        if history_policy == HistoryPolicy::ExcludeFromStart {
            session.exclude_history();
        }
        session
    }

    /// The scoring strategy this session was created with. The entropy
    /// scorer's large-candidate-set fallback never changes this.
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn num_guesses(&self) -> u32 {
        self.num_guesses
    }

    /// The words still consistent with every feedback applied so far, in
    /// vocabulary order.
    pub fn candidates(&self) -> &[Arc<str>] {
        &self.candidates
    }

    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    /// Returns the ranked score table for the current candidate set,
    /// computing and caching it if needed. The cache is invalidated whenever
    /// the candidate set changes.
    pub fn score_table(&mut self) -> &[ScoredWord] {
        if self.score_table.is_none() {
            self.score_table = Some(rank_guesses(self.mode, &self.candidates, &self.vocabulary));
        }
        self.score_table.as_deref().unwrap_or_default()
    }

    /// Returns up to `n` of the best next guesses, best first. Returns fewer
    /// (possibly none) if the table is smaller.
    pub fn top_guesses(&mut self, n: usize) -> Vec<Arc<str>> {
        self.score_table()
            .iter()
            .take(n)
            .map(|scored| Arc::clone(&scored.word))
            .collect()
    }

    /// Applies one round of real feedback and returns the resulting status.
    ///
    /// `feedback` uses the boundary encoding: five symbols from 'G' (green),
    /// 'Y' (yellow), 'X' (gray). The guess may be any valid word, not just a
    /// suggested one. Applying feedback to a session already in a terminal
    /// state is a no-op that returns the current status.
    pub fn apply_feedback(
        &mut self,
        guess: &str,
        feedback: &str,
    ) -> Result<SessionStatus, SolverError> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }
        if !is_valid_word(guess) {
            return Err(SolverError::InvalidWord);
        }
        let pattern = parse_pattern(feedback)?;
        self.num_guesses += 1;

        if pattern.iter().all(|lr| *lr == LetterResult::Correct) {
            self.status = SessionStatus::Solved;
            return Ok(self.status);
        }

        let constraint = FeedbackConstraint::new(guess, &pattern)?;
        self.candidates = filter_words(&self.candidates, &constraint);
        self.score_table = None;
        log::debug!(
            "applied {} / {}: {} candidates remain",
            constraint.guess(),
            feedback.to_ascii_uppercase(),
            self.candidates.len()
        );

        if self.history_policy == HistoryPolicy::ExcludeAfterFirstGuess && self.num_guesses == 1 {
            self.exclude_history();
        }

        self.status = if self.candidates.is_empty() {
            SessionStatus::Dead
        } else if self.num_guesses >= MAX_GUESSES {
            SessionStatus::Exhausted
        } else {
            SessionStatus::InProgress
        };
        Ok(self.status)
    }

    /// Removes every past answer from the candidate set. Runs at most once
    /// per session; calling it again is a no-op.
    fn exclude_history(&mut self) {
        if self.history_excluded {
            return;
        }
        self.history_excluded = true;
        if self.history.is_empty() {
            return;
        }
        let before = self.candidates.len();
        let history = &self.history;
        self.candidates.retain(|word| !history.contains(word));
        if self.candidates.len() != before {
            self.score_table = None;
            log::info!(
                "excluded {} past answers: {} candidates remain",
                before - self.candidates.len(),
                self.candidates.len()
            );
        }
    }
}

/// Attempts to guess the given word within [`MAX_GUESSES`] guesses, always
/// playing the top suggestion.
pub fn play_game(objective: &str, bank: &WordBank, mode: ScoringMode) -> GameResult {
    run_game(objective, bank, mode, 1, |_| 0)
}

/// Like [`play_game`], but each round picks uniformly at random among the top
/// `top_k` suggestions, drawing from the given random source. Useful for
/// strategy analysis; seeding the source makes runs reproducible.
pub fn play_game_with_rng<R: Rng>(
    objective: &str,
    bank: &WordBank,
    mode: ScoringMode,
    top_k: usize,
    rng: &mut R,
) -> GameResult {
    run_game(objective, bank, mode, top_k, |available| {
        rng.gen_range(0..available)
    })
}

fn run_game(
    objective: &str,
    bank: &WordBank,
    mode: ScoringMode,
    top_k: usize,
    mut pick: impl FnMut(usize) -> usize,
) -> GameResult {
    if !bank.contains(objective) {
        return GameResult::UnknownWord;
    }
    let objective = objective.to_ascii_uppercase();
    let mut session = Session::new(bank, mode, HistoryPolicy::Keep, &AnswerHistory::default());
    let mut guesses: Vec<Box<str>> = Vec::new();
    for _ in 1..=MAX_GUESSES {
        let top = session.top_guesses(top_k.max(1));
        if top.is_empty() {
            break;
        }
        let guess = Arc::clone(&top[pick(top.len())]);
        guesses.push(Box::from(guess.as_ref()));

        // Infallible: the bank only holds valid words.
        let result = match get_result_for_guess(&objective, &guess) {
            Ok(result) => result,
            Err(_) => break,
        };
        let feedback = result.to_string();
        if session.apply_feedback(&guess, &feedback) == Ok(SessionStatus::Solved) {
            return GameResult::Success(guesses);
        }
    }
    GameResult::Failure(guesses)
}
