use crate::results::{
    is_valid_word, CompressedGuessResult, LetterResult, SolverError, WORD_LENGTH,
};
use std::result::Result;
use std::sync::Arc;

/// The constraint that one guess and its feedback impose on candidate words.
///
/// A candidate survives iff the guess, played against that candidate, would
/// have produced exactly the observed feedback. Consistency is checked with
/// the same two-pass simulation that produces real feedback (see
/// [`get_result_for_guess`](crate::get_result_for_guess)), so duplicate
/// letters are handled identically on both paths: a letter that is green in
/// one spot and gray in another never wrongly eliminates an answer that
/// contains it only once, and the true answer always survives its own
/// feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackConstraint {
    guess: Box<str>,
    pattern: CompressedGuessResult,
}

impl FeedbackConstraint {
    /// Creates the constraint for the given guess and feedback pattern.
    pub fn new(guess: &str, pattern: &[LetterResult]) -> Result<FeedbackConstraint, SolverError> {
        if !is_valid_word(guess) {
            return Err(SolverError::InvalidWord);
        }
        if pattern.len() != WORD_LENGTH {
            return Err(SolverError::InvalidFeedback);
        }
        Ok(FeedbackConstraint {
            guess: guess.to_ascii_uppercase().into_boxed_str(),
            pattern: CompressedGuessResult::from_results(pattern),
        })
    }

    /// Returns the guess this constraint was built from, in canonical form.
    pub fn guess(&self) -> &str {
        &self.guess
    }

    /// Returns `true` iff the given word could still be the answer.
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        if !is_valid_word(word) {
            return false;
        }
        CompressedGuessResult::compute(word, &self.guess) == self.pattern
    }
}

/// Returns the candidates that remain consistent with the given constraint.
///
/// Order is preserved, so a candidate list that started in vocabulary order
/// stays in vocabulary order.
pub fn filter_words(words: &[Arc<str>], constraint: &FeedbackConstraint) -> Vec<Arc<str>> {
    words
        .iter()
        .filter(|word| constraint.is_satisfied_by(word))
        .map(Arc::clone)
        .collect()
}
