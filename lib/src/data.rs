use crate::results::is_valid_word;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::io::BufRead;
use std::io::Result;
use std::io::Write;
use std::ops::Deref;
use std::sync::Arc;

/// Normalizes a raw entry from a word file: trims it, uppercases it, and
/// rejects anything that isn't a valid word.
fn normalize_entry(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !is_valid_word(trimmed) {
        log::debug!("skipping invalid word entry: {:?}", trimmed);
        return None;
    }
    Some(trimmed.to_ascii_uppercase())
}

/// Contains all the possible words for a game.
///
/// The bank defines both the space of legal guesses and, by default, the
/// space of possible answers. Words are stored in their canonical form
/// (uppercase ASCII), deduplicated, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
}

impl WordBank {
    /// Constructs a `WordBank` by reading words from the given reader.
    ///
    /// Words may be separated by newlines or commas (the upstream vocabulary
    /// file is a single comma-separated row). Entries are trimmed and
    /// uppercased; entries that are not exactly five ASCII letters are
    /// skipped.
    pub fn from_reader<R: BufRead>(mut word_reader: R) -> Result<Self> {
        let mut contents = String::new();
        word_reader.read_to_string(&mut contents)?;
        Ok(WordBank::from_iterator(
            contents.split(|c| c == ',' || c == '\n' || c == '\r'),
        ))
    }

    /// Constructs a `WordBank` from the given words, normalizing and
    /// deduplicating as in [`WordBank::from_reader`].
    pub fn from_iterator<S, I>(words: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut all_words: Vec<Arc<str>> = Vec::new();
        for raw in words {
            if let Some(word) = normalize_entry(raw.as_ref()) {
                let word: Arc<str> = Arc::from(word.as_str());
                if seen.insert(Arc::clone(&word)) {
                    all_words.push(word);
                }
            }
        }
        WordBank { all_words }
    }

    /// Returns the number of possible words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    /// Returns true iff the bank contains no words.
    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns true iff the bank contains the given word (canonical form).
    pub fn contains(&self, word: &str) -> bool {
        let canonical = word.to_ascii_uppercase();
        self.all_words.iter().any(|w| w.as_ref() == canonical)
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &[Arc<str>] {
        &self.all_words
    }
}

/// The set of words that have already been used as answers.
///
/// Past answers can optionally be excluded from the candidate pool (see
/// [`HistoryPolicy`](crate::HistoryPolicy)). The set is persisted as a single
/// comma-separated line, sorted, matching the upstream answers file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnswerHistory {
    words: BTreeSet<Box<str>>,
}

impl AnswerHistory {
    /// Reads past answers from the given reader. Accepts the same formats as
    /// [`WordBank::from_reader`]. An empty or whitespace-only source yields
    /// an empty history.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Ok(AnswerHistory::from_iterator(
            contents.split(|c| c == ',' || c == '\n' || c == '\r'),
        ))
    }

    /// Constructs an `AnswerHistory` from the given words, skipping invalid
    /// entries.
    pub fn from_iterator<S, I>(words: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        AnswerHistory {
            words: words
                .into_iter()
                .filter_map(|raw| normalize_entry(raw.as_ref()))
                .map(Box::from)
                .collect(),
        }
    }

    /// Returns true iff the given word (in canonical form) is a past answer.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word.to_ascii_uppercase().as_str())
    }

    /// Records a new answer. Returns true if the word was newly added, false
    /// if it was already present. Invalid words are rejected.
    pub fn record(&mut self, word: &str) -> std::result::Result<bool, crate::SolverError> {
        match normalize_entry(word) {
            Some(canonical) => Ok(self.words.insert(canonical.into_boxed_str())),
            None => Err(crate::SolverError::InvalidWord),
        }
    }

    /// Writes the history as a single sorted, comma-separated line.
    ///
    /// This is best-effort: a failed write surfaces as an error and leaves
    /// the in-memory set untouched.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut first = true;
        for word in &self.words {
            if !first {
                write!(writer, ",")?;
            }
            write!(writer, "{}", word)?;
            first = false;
        }
        writeln!(writer)?;
        writer.flush()
    }

    /// Returns the number of recorded answers.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true iff no answers have been recorded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates the recorded answers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_ref())
    }
}

/// Per-letter occurrence counts over a set of words, used by the frequency
/// scorers.
///
/// Counts are keyed by letter and occurrence rank. Rank 1 is a letter's first
/// occurrence within a word, rank 2 its second, and so on; the total and
/// unique counting schemes only ever touch rank 1.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    counts: HashMap<(char, u8), i64>,
}

impl FrequencyTable {
    /// Counts every letter occurrence in every word. A word with a repeated
    /// letter contributes once per occurrence.
    pub fn total<S: AsRef<str>>(words: &[S]) -> FrequencyTable {
        let mut counts = HashMap::new();
        for word in words {
            for letter in word.as_ref().chars() {
                *counts.entry((letter, 1)).or_insert(0) += 1;
            }
        }
        FrequencyTable { counts }
    }

    /// Counts each distinct letter once per word.
    pub fn unique<S: AsRef<str>>(words: &[S]) -> FrequencyTable {
        let mut counts = HashMap::new();
        for word in words {
            let distinct: HashSet<char> = word.as_ref().chars().collect();
            for letter in distinct {
                *counts.entry((letter, 1)).or_insert(0) += 1;
            }
        }
        FrequencyTable { counts }
    }

    /// Counts letters into per-occurrence-rank buckets: a letter appearing k
    /// times in a word increments ranks 1 through k.
    pub fn repeat<S: AsRef<str>>(words: &[S]) -> FrequencyTable {
        let mut counts = HashMap::new();
        for word in words {
            let mut per_word: HashMap<char, u8> = HashMap::new();
            for letter in word.as_ref().chars() {
                *per_word.entry(letter).or_insert(0) += 1;
            }
            for (letter, occurrences) in per_word {
                for rank in 1..=occurrences {
                    *counts.entry((letter, rank)).or_insert(0) += 1;
                }
            }
        }
        FrequencyTable { counts }
    }

    /// Retrieves the count for the given letter at the given occurrence rank.
    pub fn count(&self, letter: char, rank: u8) -> i64 {
        *self.counts.get(&(letter, rank)).unwrap_or(&0)
    }
}
