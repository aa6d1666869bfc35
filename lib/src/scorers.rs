use crate::data::FrequencyTable;
use crate::results::{CompressedGuessResult, NUM_PATTERNS};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Above this many candidates, entropy scoring silently falls back to
/// [`ScoringMode::UniqueFrequency`] for the round, to bound the cost of the
/// candidates-times-vocabulary simulation. The declared mode is unchanged and
/// entropy resumes once the candidate set shrinks below the limit.
pub const MAX_ENTROPY_CANDIDATES: usize = 500;

/// Added to an entropy score when the guess is itself a candidate, so that a
/// guess that could win outright beats a statistically tied non-candidate.
/// Kept well below the resolution of meaningful entropy differences.
const CANDIDATE_BONUS: f64 = 1e-6;

/// With this many candidates or fewer, entropy guesses are drawn from the
/// candidates themselves rather than the whole vocabulary: a probing guess
/// that cannot win is pointless with so few options left.
const MIN_CANDIDATES_FOR_GLOBAL_POOL: usize = 3;

/// The strategy used to rank the next guess.
///
/// The three frequency modes are cheap heuristics that score a word by how
/// common its letters are among the remaining candidates; they differ only in
/// how repeated letters are counted. [`ScoringMode::Entropy`] ranks by the
/// expected information gain of each guess and is the strongest (and most
/// expensive) strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoringMode {
    /// Every letter occurrence counts, duplicates included.
    TotalFrequency,
    /// Repeated letters read from per-occurrence-rank buckets, so reusing a
    /// common letter still scores, but less than the first use.
    RepeatFrequency,
    /// Each distinct letter counts once per word.
    UniqueFrequency,
    /// Shannon entropy, in bits, of the feedback-pattern distribution the
    /// guess induces on the candidate set.
    Entropy,
}

/// A guess's score: an integer count for the frequency modes, a bit count
/// for entropy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessScore {
    Frequency(i64),
    Entropy(f64),
}

impl GuessScore {
    /// Returns true iff this score came from a frequency mode.
    pub fn is_frequency(self) -> bool {
        matches!(self, GuessScore::Frequency(_))
    }

    /// Returns the score as a float, for display.
    pub fn as_f64(self) -> f64 {
        match self {
            GuessScore::Frequency(count) => count as f64,
            GuessScore::Entropy(bits) => bits,
        }
    }
}

impl PartialOrd for GuessScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (GuessScore::Frequency(a), GuessScore::Frequency(b)) => Some(a.cmp(b)),
            (GuessScore::Entropy(a), GuessScore::Entropy(b)) => a.partial_cmp(b),
            // Scores from different modes are never ranked against each other.
            _ => None,
        }
    }
}

/// A word along with its score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredWord {
    pub word: Arc<str>,
    pub score: GuessScore,
}

/// Ranks the next guess for the given candidate set.
///
/// `candidates` is the current set of words still consistent with all
/// feedback so far, in vocabulary order. `vocabulary` is the full word list
/// and serves as the guess pool for entropy scoring (a guess that cannot be
/// the answer can still split the field well). The frequency modes rank the
/// candidates themselves.
///
/// The returned table is sorted descending by score; ties keep vocabulary
/// order. An empty candidate set yields an empty table: no solution remains,
/// and callers should stop the round progression rather than treat this as
/// an error.
pub fn rank_guesses(
    mode: ScoringMode,
    candidates: &[Arc<str>],
    vocabulary: &[Arc<str>],
) -> Vec<ScoredWord> {
    if candidates.is_empty() {
        return Vec::new();
    }
    match effective_mode(mode, candidates.len()) {
        ScoringMode::Entropy => rank_by_entropy(candidates, vocabulary),
        frequency_mode => rank_by_frequency(frequency_mode, candidates),
    }
}

/// Substitutes unique-frequency scoring for entropy when the candidate set is
/// too large for the full simulation. Only affects the current round.
fn effective_mode(mode: ScoringMode, num_candidates: usize) -> ScoringMode {
    if mode == ScoringMode::Entropy && num_candidates > MAX_ENTROPY_CANDIDATES {
        log::debug!(
            "{} candidates exceed the entropy limit of {}; using unique-frequency scoring this round",
            num_candidates,
            MAX_ENTROPY_CANDIDATES
        );
        return ScoringMode::UniqueFrequency;
    }
    mode
}

fn rank_by_frequency(mode: ScoringMode, candidates: &[Arc<str>]) -> Vec<ScoredWord> {
    let table = match mode {
        ScoringMode::TotalFrequency => FrequencyTable::total(candidates),
        ScoringMode::RepeatFrequency => FrequencyTable::repeat(candidates),
        ScoringMode::UniqueFrequency => FrequencyTable::unique(candidates),
        ScoringMode::Entropy => unreachable!("entropy has no frequency table"),
    };
    let mut scored: Vec<ScoredWord> = candidates
        .iter()
        .map(|word| ScoredWord {
            word: Arc::clone(word),
            score: GuessScore::Frequency(score_word_frequency(mode, word, &table)),
        })
        .collect();
    sort_descending(&mut scored);
    scored
}

fn score_word_frequency(mode: ScoringMode, word: &str, table: &FrequencyTable) -> i64 {
    match mode {
        ScoringMode::TotalFrequency => word.chars().map(|c| table.count(c, 1)).sum(),
        ScoringMode::UniqueFrequency => {
            let distinct: HashSet<char> = word.chars().collect();
            distinct.iter().map(|c| table.count(*c, 1)).sum()
        }
        ScoringMode::RepeatFrequency => {
            let mut per_word: HashMap<char, u8> = HashMap::new();
            for c in word.chars() {
                *per_word.entry(c).or_insert(0) += 1;
            }
            per_word
                .iter()
                .map(|(c, occurrences)| {
                    (1..=*occurrences).map(|rank| table.count(*c, rank)).sum::<i64>()
                })
                .sum()
        }
        ScoringMode::Entropy => unreachable!("entropy is not frequency-scored"),
    }
}

fn rank_by_entropy(candidates: &[Arc<str>], vocabulary: &[Arc<str>]) -> Vec<ScoredWord> {
    let pool = if candidates.len() >= MIN_CANDIDATES_FOR_GLOBAL_POOL {
        vocabulary
    } else {
        candidates
    };
    let candidate_set: HashSet<&str> = candidates.iter().map(|w| w.as_ref()).collect();
    let mut scored: Vec<ScoredWord> = pool
        .par_iter()
        .map(|guess| {
            let mut bits = entropy_of_guess(guess, candidates);
            if candidate_set.contains(guess.as_ref()) {
                bits += CANDIDATE_BONUS;
            }
            ScoredWord {
                word: Arc::clone(guess),
                score: GuessScore::Entropy(bits),
            }
        })
        .collect();
    sort_descending(&mut scored);
    scored
}

/// Shannon entropy, in bits, of the distribution of feedback patterns the
/// guess induces over the candidates: -sum(p * log2(p)) across the outcome
/// buckets. Zero iff every candidate lands in the same bucket.
fn entropy_of_guess(guess: &str, candidates: &[Arc<str>]) -> f64 {
    let mut bucket_sizes = [0u32; NUM_PATTERNS];
    for candidate in candidates {
        let outcome = CompressedGuessResult::compute(candidate, guess);
        bucket_sizes[outcome.index()] += 1;
    }
    let total = candidates.len() as f64;
    bucket_sizes
        .iter()
        .filter(|size| **size > 0)
        .map(|size| {
            let p = *size as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Stable descending sort: equal scores keep their input (vocabulary) order.
fn sort_descending(scored: &mut [ScoredWord]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Arc<str>> {
        list.iter().map(|w| Arc::from(*w)).collect()
    }

    fn ranked_words(table: &[ScoredWord]) -> Vec<&str> {
        table.iter().map(|sw| sw.word.as_ref()).collect()
    }

    #[test]
    fn empty_candidates_yield_empty_table() {
        let vocabulary = words(&["CRANE", "SLATE"]);
        assert!(rank_guesses(ScoringMode::Entropy, &[], &vocabulary).is_empty());
        assert!(rank_guesses(ScoringMode::UniqueFrequency, &[], &vocabulary).is_empty());
    }

    #[test]
    fn unique_frequency_counts_repeated_letters_once() {
        let candidates = words(&["SPEED", "SPADE"]);
        let table = FrequencyTable::unique(&candidates);

        // S, P, E, D appear in both words; A only in SPADE.
        assert_eq!(
            score_word_frequency(ScoringMode::UniqueFrequency, "SPEED", &table),
            2 + 2 + 2 + 2
        );
        assert_eq!(
            score_word_frequency(ScoringMode::UniqueFrequency, "SPADE", &table),
            2 + 2 + 1 + 2 + 2
        );
    }

    #[test]
    fn total_frequency_counts_repeated_letters_each_time() {
        let candidates = words(&["SPEED", "SPADE"]);
        let table = FrequencyTable::total(&candidates);

        // SPEED reads E's total count (3) twice.
        assert_eq!(
            score_word_frequency(ScoringMode::TotalFrequency, "SPEED", &table),
            2 + 2 + 3 + 3 + 2
        );
    }

    #[test]
    fn repeat_frequency_pays_less_for_reuse() {
        let candidates = words(&["SPEED", "SPADE"]);
        let table = FrequencyTable::repeat(&candidates);

        // First E is worth 2 (both words have one), second E only 1 (only
        // SPEED has two).
        assert_eq!(
            score_word_frequency(ScoringMode::RepeatFrequency, "SPEED", &table),
            2 + 2 + (2 + 1) + 2
        );
        let total = score_word_frequency(ScoringMode::TotalFrequency, "SPEED",
            &FrequencyTable::total(&candidates));
        assert!(score_word_frequency(ScoringMode::RepeatFrequency, "SPEED", &table) < total);
    }

    #[test]
    fn frequency_table_sorts_descending_with_stable_ties() {
        let candidates = words(&["AAAAB", "AAABA", "ZZZZZ"]);
        let table = rank_guesses(ScoringMode::TotalFrequency, &candidates, &candidates);

        // The two A-heavy words tie and must keep their input order.
        assert_eq!(ranked_words(&table), vec!["AAAAB", "AAABA", "ZZZZZ"]);
        assert!(table[0].score == table[1].score);
    }

    #[test]
    fn entropy_is_non_negative_and_zero_for_single_bucket() {
        let candidates = words(&["CRANE"]);
        // Only one candidate: every guess produces one outcome bucket.
        assert_eq!(entropy_of_guess("SLATE", &candidates), 0.0);

        let candidates = words(&["CRANE", "SLATE", "TABLE", "CABLE"]);
        for guess in ["CRANE", "SLATE", "QUIRK"] {
            assert!(entropy_of_guess(guess, &candidates) >= 0.0);
        }
    }

    #[test]
    fn entropy_perfect_split_is_log2() {
        // TABLE vs CABLE: guessing TRACK distinguishes them (T green vs not),
        // giving a 1-bit split.
        let candidates = words(&["TABLE", "CABLE"]);
        let bits = entropy_of_guess("TRACK", &candidates);
        assert!((bits - 1.0).abs() < 1e-9);
    }

    #[test]
    fn entropy_pool_restricted_at_two_candidates() {
        let candidates = words(&["TABLE", "CABLE"]);
        let vocabulary = words(&["TABLE", "CABLE", "QUIRK"]);
        let table = rank_guesses(ScoringMode::Entropy, &candidates, &vocabulary);

        // Two candidates left: only they are worth guessing.
        assert_eq!(table.len(), 2);
        assert!(matches!(table[0].score, GuessScore::Entropy(_)));
    }

    #[test]
    fn entropy_uses_global_pool_above_two_candidates() {
        let candidates = words(&["CRANE", "SLATE", "TABLE"]);
        let vocabulary = words(&["CRANE", "SLATE", "TABLE", "QUIRK"]);
        let table = rank_guesses(ScoringMode::Entropy, &candidates, &vocabulary);

        assert_eq!(table.len(), vocabulary.len());
    }

    #[test]
    fn entropy_candidate_bonus_breaks_exact_ties() {
        // The candidates differ only in their first letter. The probe TQQQQ
        // splits them 1/2 exactly as guessing TABLE does, so its entropy is
        // identical; the candidates must still outrank it despite TQQQQ
        // coming first in vocabulary order.
        let candidates = words(&["TABLE", "CABLE", "FABLE"]);
        let vocabulary = words(&["TQQQQ", "TABLE", "CABLE", "FABLE"]);
        let table = rank_guesses(ScoringMode::Entropy, &candidates, &vocabulary);

        assert_eq!(ranked_words(&table), vec!["TABLE", "CABLE", "FABLE", "TQQQQ"]);
    }

    #[test]
    fn entropy_falls_back_to_unique_frequency_when_too_many_candidates() {
        // Build > MAX_ENTROPY_CANDIDATES synthetic five-letter words.
        let mut raw: Vec<String> = Vec::new();
        for a in b'A'..=b'Z' {
            for b in b'A'..=b'Z' {
                raw.push(format!("{}{}MOP", a as char, b as char));
            }
        }
        assert!(raw.len() > MAX_ENTROPY_CANDIDATES);
        let candidates: Vec<Arc<str>> = raw.iter().map(|w| Arc::from(w.as_str())).collect();

        let table = rank_guesses(ScoringMode::Entropy, &candidates, &candidates);

        // Frequency-typed scores prove the substitution happened.
        assert_eq!(table.len(), candidates.len());
        assert!(table.iter().all(|sw| sw.score.is_frequency()));
    }

    #[test]
    fn small_candidate_set_keeps_entropy_mode() {
        let candidates = words(&["CRANE", "SLATE", "TABLE", "CABLE"]);
        let table = rank_guesses(ScoringMode::Entropy, &candidates, &candidates);
        assert!(table.iter().all(|sw| !sw.score.is_frequency()));
    }
}
