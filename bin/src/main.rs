use clap::{ArgEnum, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::Write;
use std::time::Instant;
use wordmaster_solver::*;

/// Solver assistant for five-letter word-guessing games: suggests guesses,
/// takes the green/yellow/gray feedback you got, and narrows down the answer.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file of legal words, separated by commas or newlines.
    #[clap(short = 'f', long)]
    words_file: String,

    /// Path to a file of past answers. Answers are read according to the
    /// history policy, and in interactive mode each solved word is appended.
    #[clap(short = 'a', long)]
    answers_file: Option<String>,

    /// The strategy used to rank guesses.
    #[clap(arg_enum, short, long, default_value = "entropy")]
    mode: Mode,

    /// How past answers affect the suggestions.
    #[clap(arg_enum, long, default_value = "exclude-after-first-guess")]
    history_policy: Policy,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assist with a live game: pick a suggestion (or your own word), then
    /// report the colors the game showed.
    Interactive,
    /// Solve a single known word and show the guesses taken.
    Single { word: String },
    /// Solve every word in the words file and print a histogram of the
    /// number of guesses needed.
    Benchmark {
        /// Pick uniformly at random among the top K suggestions each round,
        /// instead of always playing the best one.
        #[clap(long)]
        random_top_k: Option<usize>,

        /// Seed for the random picks, so runs are reproducible.
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum Mode {
    Total,
    Repeat,
    Unique,
    Entropy,
}

impl Mode {
    fn to_scoring_mode(self) -> ScoringMode {
        match self {
            Mode::Total => ScoringMode::TotalFrequency,
            Mode::Repeat => ScoringMode::RepeatFrequency,
            Mode::Unique => ScoringMode::UniqueFrequency,
            Mode::Entropy => ScoringMode::Entropy,
        }
    }
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum Policy {
    Keep,
    ExcludeFromStart,
    ExcludeAfterFirstGuess,
}

impl Policy {
    fn to_history_policy(self) -> HistoryPolicy {
        match self {
            Policy::Keep => HistoryPolicy::Keep,
            Policy::ExcludeFromStart => HistoryPolicy::ExcludeFromStart,
            Policy::ExcludeAfterFirstGuess => HistoryPolicy::ExcludeAfterFirstGuess,
        }
    }
}

fn main() -> io::Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    let word_bank = load_word_bank(&args.words_file)?;
    println!("There are {} possible words.", word_bank.len());
    let history = load_history(args.answers_file.as_deref())?;

    let mode = args.mode.to_scoring_mode();
    match args.command {
        Command::Benchmark {
            random_top_k,
            seed,
        } => run_benchmark(&word_bank, mode, random_top_k, seed),
        Command::Single { word } => play_single_game(&word, &word_bank, mode),
        Command::Interactive => play_interactive_game(
            &word_bank,
            mode,
            args.history_policy.to_history_policy(),
            history,
            args.answers_file.as_deref(),
        )?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Loads the word bank, degrading to an empty one (with a warning) if the
/// file can't be read.
fn load_word_bank(path: &str) -> io::Result<WordBank> {
    match File::open(path) {
        Ok(file) => WordBank::from_reader(io::BufReader::new(file)),
        Err(err) => {
            eprintln!(
                "Warning: couldn't read words file {}: {}. Starting with an empty word list.",
                path, err
            );
            Ok(WordBank::default())
        }
    }
}

/// Loads past answers. A missing file is normal on a first run and yields an
/// empty history.
fn load_history(path: Option<&str>) -> io::Result<AnswerHistory> {
    let path = match path {
        Some(path) => path,
        None => return Ok(AnswerHistory::default()),
    };
    match File::open(path) {
        Ok(file) => AnswerHistory::from_reader(io::BufReader::new(file)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AnswerHistory::default()),
        Err(err) => {
            eprintln!(
                "Warning: couldn't read answers file {}: {}. Starting with an empty history.",
                path, err
            );
            Ok(AnswerHistory::default())
        }
    }
}

fn run_benchmark(word_bank: &WordBank, mode: ScoringMode, random_top_k: Option<usize>, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let mut failures: u32 = 0;
    for word in word_bank.iter() {
        let result = match random_top_k {
            Some(top_k) => play_game_with_rng(word, word_bank, mode, top_k, &mut rng),
            None => play_game(word, word_bank, mode),
        };
        match result {
            GameResult::Success(guesses) => num_guesses_per_game.push(guesses.len() as u32),
            GameResult::Failure(guesses) => {
                failures += 1;
                num_guesses_per_game.push(guesses.len() as u32);
            }
            GameResult::UnknownWord => unreachable!("benchmark words come from the bank"),
        }
    }
    println!(
        "Played {} games, {} unsolved. Results:",
        num_guesses_per_game.len(),
        failures
    );

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds = num_games_per_round.keys().copied().collect::<Vec<u32>>();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!(
            "|{}|{}|",
            num_round,
            num_games_per_round.get(num_round).unwrap()
        );
    }

    if num_guesses_per_game.is_empty() {
        return;
    }
    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of guesses:** {:.2} +/- {:.2}",
        average, std_dev
    );
}

fn play_single_game(word: &str, word_bank: &WordBank, mode: ScoringMode) {
    match play_game(word, word_bank, mode) {
        GameResult::Success(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::Failure(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::UnknownWord => {
            eprintln!("Error: given word not in the word list.");
            std::process::exit(1);
        }
    }
}

fn play_interactive_game(
    word_bank: &WordBank,
    mode: ScoringMode,
    history_policy: HistoryPolicy,
    mut history: AnswerHistory,
    answers_file: Option<&str>,
) -> io::Result<()> {
    let mut session = Session::new(word_bank, mode, history_policy, &history);
    println!(
        "Play each guess in your game, then enter the colors it showed as five\n\
         letters: 'G' = green (right letter, right spot), 'Y' = yellow (right\n\
         letter, wrong spot), 'X' = gray (letter not in the word).\n\
         For example, if the answer were SPADE and you guessed SOAPY, you would\n\
         enter GXGYX."
    );

    let mut last_guess = String::new();
    while !session.status().is_terminal() {
        let suggestions: Vec<ScoredWord> =
            session.score_table().iter().take(10).cloned().collect();
        if suggestions.is_empty() {
            break;
        }
        println!(
            "\n{} candidates remain. Top suggestions:",
            session.num_candidates()
        );
        for (index, suggestion) in suggestions.iter().enumerate() {
            match suggestion.score {
                GuessScore::Frequency(count) => {
                    println!("  {}. {} ({})", index + 1, suggestion.word, count)
                }
                GuessScore::Entropy(bits) => {
                    println!("  {}. {} ({:.3} bits)", index + 1, suggestion.word, bits)
                }
            }
        }

        let guess = match read_guess(&suggestions)? {
            Some(guess) => guess,
            None => return Ok(()),
        };
        last_guess = guess.clone();

        loop {
            print!("How did {} do? ", guess);
            io::stdout().flush()?;
            let input = read_trimmed_line()?;
            match session.apply_feedback(&guess, &input) {
                Ok(_) => break,
                Err(err) => println!("{}. Try again.", err),
            }
        }
    }

    match session.status() {
        SessionStatus::Solved => {
            println!(
                "Solved in {} guesses! The word was {}.",
                session.num_guesses(),
                last_guess.to_ascii_uppercase()
            );
            record_answer(&mut history, &last_guess, answers_file);
        }
        SessionStatus::Dead => {
            println!("No word in the list matches that feedback. Check the reports for typos.")
        }
        SessionStatus::Exhausted => println!("Out of guesses :("),
        _ => println!("No candidates to suggest."),
    }

    Ok(())
}

/// Prompts for the next guess: a suggestion number, any five-letter word, or
/// 'quit'. Returns `None` when the user quits.
fn read_guess(suggestions: &[ScoredWord]) -> io::Result<Option<String>> {
    loop {
        print!("Guess (number, word, or 'quit'): ");
        io::stdout().flush()?;
        let input = read_trimmed_line()?;
        if input.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        if let Ok(index) = input.parse::<usize>() {
            if (1..=suggestions.len()).contains(&index) {
                return Ok(Some(suggestions[index - 1].word.to_string()));
            }
            println!("Enter a number between 1 and {}.", suggestions.len());
            continue;
        }
        if is_valid_word(&input) {
            return Ok(Some(input.to_ascii_uppercase()));
        }
        println!("Enter a suggestion number, a five-letter word, or 'quit'.");
    }
}

/// Adds the solved word to the history and rewrites the answers file.
/// Best-effort: a write failure is reported but doesn't fail the game.
fn record_answer(history: &mut AnswerHistory, word: &str, answers_file: Option<&str>) {
    let path = match answers_file {
        Some(path) => path,
        None => return,
    };
    match history.record(word) {
        Ok(true) => {}
        // Already recorded, or (unreachably) invalid: nothing to persist.
        _ => return,
    }
    let result = File::create(path).and_then(|file| history.write_to(io::BufWriter::new(file)));
    match result {
        Ok(()) => println!("Recorded {} in {}.", word.to_ascii_uppercase(), path),
        Err(err) => eprintln!("Warning: couldn't update answers file {}: {}.", path, err),
    }
}

fn read_trimmed_line() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}
