use std::fmt;
use std::result::Result;

/// Every word in the game is exactly this long.
pub const WORD_LENGTH: usize = 5;

/// The number of distinct feedback patterns: 3^[`WORD_LENGTH`].
pub(crate) const NUM_PATTERNS: usize = 243;

/// The result of a given letter at a specific location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterResult {
    /// Green: the letter is in the word at this location.
    Correct,
    /// Yellow: the letter is in the word, but not at this location.
    PresentNotHere,
    /// Gray: the letter is not in the word, or every copy of it is already
    /// accounted for by a green or yellow mark.
    NotPresent,
}

impl LetterResult {
    /// Returns the single-character encoding used at the I/O boundary.
    pub fn to_char(self) -> char {
        match self {
            LetterResult::Correct => 'G',
            LetterResult::PresentNotHere => 'Y',
            LetterResult::NotPresent => 'X',
        }
    }

    /// Parses the boundary encoding ('G', 'Y', or 'X', case-insensitive).
    pub fn from_char(c: char) -> Result<LetterResult, SolverError> {
        match c.to_ascii_uppercase() {
            'G' => Ok(LetterResult::Correct),
            'Y' => Ok(LetterResult::PresentNotHere),
            'X' => Ok(LetterResult::NotPresent),
            _ => Err(SolverError::InvalidFeedback),
        }
    }
}

/// Indicates that an input given to the solver was malformed.
///
/// All core computations are deterministic given valid inputs, so these are
/// the only errors the library itself produces. I/O failures surface as
/// [`std::io::Error`] from the functions that read or write files.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SolverError {
    /// The word is not exactly [`WORD_LENGTH`] ASCII letters.
    InvalidWord,
    /// The feedback is not exactly [`WORD_LENGTH`] symbols from 'G', 'Y', 'X'.
    InvalidFeedback,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::InvalidWord => {
                write!(f, "words must be exactly {} ASCII letters", WORD_LENGTH)
            }
            SolverError::InvalidFeedback => write!(
                f,
                "feedback must be exactly {} symbols from 'G', 'Y', 'X'",
                WORD_LENGTH
            ),
        }
    }
}

impl std::error::Error for SolverError {}

/// The result of a single word guess.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessResult<'a> {
    pub guess: &'a str,
    /// The result of each letter, provided in the same letter order as in the guess.
    pub results: Vec<LetterResult>,
}

impl<'a> GuessResult<'a> {
    /// Returns true iff every letter was marked [`LetterResult::Correct`].
    pub fn is_win(&self) -> bool {
        self.results.iter().all(|lr| *lr == LetterResult::Correct)
    }
}

impl<'a> fmt::Display for GuessResult<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for lr in &self.results {
            write!(f, "{}", lr.to_char())?;
        }
        Ok(())
    }
}

/// Returns true iff `word` is exactly [`WORD_LENGTH`] ASCII letters.
pub fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Parses a feedback report given in the boundary encoding, e.g. "GYXXG".
pub fn parse_pattern(feedback: &str) -> Result<Vec<LetterResult>, SolverError> {
    if feedback.chars().count() != WORD_LENGTH {
        return Err(SolverError::InvalidFeedback);
    }
    feedback.chars().map(LetterResult::from_char).collect()
}

/// Determines the result of the given `guess` when applied to the given `objective`.
///
/// Duplicate letters are handled in two passes: correct letters are marked
/// and consumed first, then each remaining guess letter claims at most one
/// remaining copy of itself in the objective. A letter therefore never earns
/// more green plus yellow marks than it has occurrences in the objective.
pub fn get_result_for_guess<'a>(
    objective: &str,
    guess: &'a str,
) -> Result<GuessResult<'a>, SolverError> {
    if !is_valid_word(objective) || !is_valid_word(guess) {
        return Err(SolverError::InvalidWord);
    }
    let objective = normalized_bytes(objective);
    let guess_bytes = normalized_bytes(guess);
    Ok(GuessResult {
        guess,
        results: letter_results(&objective, &guess_bytes).to_vec(),
    })
}

fn normalized_bytes(word: &str) -> [u8; WORD_LENGTH] {
    let mut bytes = [0u8; WORD_LENGTH];
    for (slot, b) in bytes.iter_mut().zip(word.bytes()) {
        *slot = b.to_ascii_uppercase();
    }
    bytes
}

fn letter_results(
    objective: &[u8; WORD_LENGTH],
    guess: &[u8; WORD_LENGTH],
) -> [LetterResult; WORD_LENGTH] {
    let mut results = [LetterResult::NotPresent; WORD_LENGTH];
    let mut remaining = [0u8; 26];

    // Green pass: exact matches consume their objective letter.
    for i in 0..WORD_LENGTH {
        if guess[i] == objective[i] {
            results[i] = LetterResult::Correct;
        } else {
            remaining[(objective[i] - b'A') as usize] += 1;
        }
    }
    // Yellow pass: each remaining guess letter consumes at most one leftover.
    for i in 0..WORD_LENGTH {
        if results[i] == LetterResult::Correct {
            continue;
        }
        let left = &mut remaining[(guess[i] - b'A') as usize];
        if *left > 0 {
            *left -= 1;
            results[i] = LetterResult::PresentNotHere;
        }
    }
    results
}

/// A guess result compressed into a single byte, with each letter result
/// encoded as a base-3 digit. Used to key outcome buckets cheaply when
/// computing entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CompressedGuessResult(u8);

impl CompressedGuessResult {
    /// Computes the compressed result for `guess` against `objective`.
    ///
    /// Both words must already be canonical (uppercase, [`WORD_LENGTH`] ASCII
    /// letters), which the [`WordBank`](crate::WordBank) guarantees.
    pub(crate) fn compute(objective: &str, guess: &str) -> CompressedGuessResult {
        debug_assert!(is_valid_word(objective) && is_valid_word(guess));
        let objective = normalized_bytes(objective);
        let guess = normalized_bytes(guess);
        CompressedGuessResult::from_results(&letter_results(&objective, &guess))
    }

    /// Compresses an already-computed sequence of letter results.
    pub(crate) fn from_results(results: &[LetterResult]) -> CompressedGuessResult {
        debug_assert_eq!(results.len(), WORD_LENGTH);
        let mut compressed = 0u8;
        let mut multiplier = 1u8;
        for result in results {
            let digit = match result {
                LetterResult::NotPresent => 0,
                LetterResult::PresentNotHere => 1,
                LetterResult::Correct => 2,
            };
            compressed += digit * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }
        CompressedGuessResult(compressed)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
