#[macro_use]
extern crate assert_matches;

use wordmaster_solver::*;

fn bank(words: &[&str]) -> WordBank {
    WordBank::from_iterator(words)
}

fn new_session(bank: &WordBank, mode: ScoringMode) -> Session {
    Session::new(bank, mode, HistoryPolicy::Keep, &AnswerHistory::default())
}

#[test]
fn session_solves_over_multiple_rounds() {
    let bank = bank(&["CRANE", "SLATE", "TABLE", "CABLE", "FABLE"]);
    let mut session = new_session(&bank, ScoringMode::UniqueFrequency);

    // The hidden answer is CABLE.
    assert_matches!(
        session.apply_feedback("CRANE", "GXYXG"),
        Ok(SessionStatus::InProgress)
    );
    assert_eq!(session.num_candidates(), 1);
    assert_eq!(session.top_guesses(5)[0].as_ref(), "CABLE");

    assert_matches!(
        session.apply_feedback("CABLE", "GGGGG"),
        Ok(SessionStatus::Solved)
    );
    assert_eq!(session.num_guesses(), 2);
}

#[test]
fn the_answer_always_survives_its_own_feedback() {
    // Includes duplicate-letter pairs that trip up per-position filtering.
    let words = [
        "CRANE", "SLATE", "EERIE", "ETHER", "ABBEY", "BABES", "MESAS", "SASSY", "LOLLY", "SOLID",
    ];
    let bank = bank(&words);

    for objective in &words {
        for guess in &words {
            let feedback = get_result_for_guess(objective, guess)
                .unwrap()
                .to_string();
            let mut session = new_session(&bank, ScoringMode::UniqueFrequency);
            session.apply_feedback(guess, &feedback).unwrap();
            assert!(
                session.status() == SessionStatus::Solved
                    || session
                        .candidates()
                        .iter()
                        .any(|w| w.as_ref() == *objective),
                "{} eliminated by {} / {}",
                objective,
                guess,
                feedback
            );
        }
    }
}

#[test]
fn history_exclusion_after_first_guess() {
    let bank = bank(&["CRANE", "SLATE", "TABLE", "CABLE"]);
    let history = AnswerHistory::from_iterator(["CRANE", "TABLE"]);
    let mut session = Session::new(
        &bank,
        ScoringMode::UniqueFrequency,
        HistoryPolicy::ExcludeAfterFirstGuess,
        &history,
    );

    // Past answers are fair game as openers.
    assert!(session
        .top_guesses(10)
        .iter()
        .any(|w| w.as_ref() == "CRANE"));

    // ZZZZZ shares no letters with the bank, so only the history exclusion
    // changes the pool.
    session.apply_feedback("ZZZZZ", "XXXXX").unwrap();
    let remaining = session.top_guesses(10);
    assert!(remaining.iter().all(|w| !history.contains(w)));
    assert_eq!(remaining.len(), 2);
}

#[test]
fn history_exclusion_from_start() {
    let bank = bank(&["CRANE", "SLATE", "TABLE", "CABLE"]);
    let history = AnswerHistory::from_iterator(["CRANE", "TABLE"]);
    let mut session = Session::new(
        &bank,
        ScoringMode::UniqueFrequency,
        HistoryPolicy::ExcludeFromStart,
        &history,
    );

    assert_eq!(session.num_candidates(), 2);
    assert!(session
        .top_guesses(10)
        .iter()
        .all(|w| !history.contains(w)));
}

#[test]
fn entropy_fallback_recovers_when_candidates_shrink() {
    // 676 words of the form ??MOP, far above the entropy candidate limit.
    let mut raw: Vec<String> = Vec::new();
    for a in b'A'..=b'Z' {
        for b in b'A'..=b'Z' {
            raw.push(format!("{}{}MOP", a as char, b as char));
        }
    }
    let bank = WordBank::from_iterator(&raw);
    assert!(bank.len() > MAX_ENTROPY_CANDIDATES);
    let mut session = new_session(&bank, ScoringMode::Entropy);

    // Too many candidates: scores come from the frequency fallback, but the
    // session's declared mode is unchanged.
    assert!(session.score_table().iter().all(|sw| sw.score.is_frequency()));
    assert_eq!(session.mode(), ScoringMode::Entropy);

    // First letter is C, second is anything but C: 25 candidates remain, and
    // entropy scoring takes over.
    session.apply_feedback("CCMOP", "GXGGG").unwrap();
    assert_eq!(session.num_candidates(), 25);
    assert!(session.score_table().iter().all(|sw| !sw.score.is_frequency()));
}

#[test]
fn play_game_solves_every_word_in_a_small_bank() {
    let words = [
        "CRANE", "SLATE", "TABLE", "CABLE", "FABLE", "MAPLE", "QUIRK", "SOLID", "ABBEY", "MESAS",
    ];
    let bank = bank(&words);

    for mode in [
        ScoringMode::TotalFrequency,
        ScoringMode::RepeatFrequency,
        ScoringMode::UniqueFrequency,
        ScoringMode::Entropy,
    ] {
        for objective in &words {
            let result = play_game(objective, &bank, mode);
            assert_matches!(result, GameResult::Success(_));
            if let GameResult::Success(guesses) = result {
                assert_eq!(guesses.last().map(|g| g.as_ref()), Some(*objective));
            }
        }
    }
}

#[test]
fn play_game_rejects_unknown_words() {
    let bank = bank(&["CRANE", "SLATE"]);
    assert_eq!(
        play_game("WRONG", &bank, ScoringMode::Entropy),
        GameResult::UnknownWord
    );
}
