//! Terminal word game driving a word_kit session.
//!
//! Commands are read line by line from stdin while the session actor keeps
//! the countdown running in the background.

use std::path::PathBuf;

use anyhow::{Context, Error};
use ctrlc::set_handler;
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use word_kit::{
    Catalog, Difficulty, GameEngine, GameSettings, LevelStatus, Outcome, RoundView, SessionActor,
    SessionHandle, session::SessionError,
};
use wk_cli::{
    commands::{Command, parse_command},
    config::CliConfig,
    logging,
};

const HELP: &str = "\
Play the word guessing game in the terminal

USAGE:
  wk_cli [OPTIONS]

OPTIONS:
  --progress   PATH        Progress file  [default: env WK_PROGRESS_PATH or word_kit_progress.json]
  --difficulty LEVEL       easy, medium, or hard  [default: env WK_DIFFICULTY or medium]
  --level      N           Level to open first  [default: furthest unlocked]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  WK_PROGRESS_PATH         Progress file path
  WK_DIFFICULTY            Starting difficulty
  WK_TICK_MILLIS           Countdown tick length in milliseconds (default: 1000)
  WK_INBOX_CAPACITY        Session inbox size (default: 32)
  RUST_LOG                 Log filter (default: warn)
";

const COMMANDS: &str = "\
COMMANDS:
  <letter> | guess X       Guess a letter
  hint                     Spend a hint (costs 10 seconds)
  play                     Open the furthest unlocked level
  start N                  Open level N
  next                     Open the next level
  retry                    Play the current level again
  levels                   Show which levels are unlocked and passed
  status                   Show the current round
  difficulty LEVEL         easy, medium, or hard (applies from the next round)
  reset progress           Lock every level but the first
  reset hints              Refill the hint budget
  help                     Show this list
  quit                     Leave the game
";

struct Args {
    progress: Option<PathBuf>,
    difficulty: Option<Difficulty>,
    level: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        progress: pargs.opt_value_from_str("--progress")?,
        difficulty: pargs.opt_value_from_fn("--difficulty", str::parse::<Difficulty>)?,
        level: pargs.opt_value_from_str("--level")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = CliConfig::from_env(args.progress, args.difficulty)?;
    config.validate()?;
    tracing::info!(path = %config.store.path.display(), "Using progress file");

    let settings = GameSettings {
        difficulty: config.difficulty,
        ..GameSettings::default()
    };
    let engine = GameEngine::new(Catalog::standard(), settings, Box::new(config.store.open()))
        .with_context(|| format!("Failed to load progress from {}", config.store.path.display()))?;

    let first_level = match args.level {
        Some(n) if (1..=engine.level_count()).contains(&n) => n - 1,
        Some(n) => anyhow::bail!("Level {n} does not exist (1-{})", engine.level_count()),
        None => engine.resume_level(),
    };

    let (actor, handle) = SessionActor::new(engine, config.session)?;
    let session = tokio::spawn(actor.run());

    println!("Type 'help' for commands.\n");
    handle.start_level(first_level).await?;
    show(&handle).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        match execute(&handle, command).await {
            Ok(()) => {}
            Err(SessionError::Failed(msg)) => println!("! {msg}"),
            Err(SessionError::Closed) => break,
            Err(e @ SessionError::InvalidConfig(_)) => return Err(e.into()),
        }
    }

    handle.close().await.ok();
    session.await?;
    Ok(())
}

async fn execute(handle: &SessionHandle, command: Command) -> Result<(), SessionError> {
    match command {
        Command::Start(level) => handle.start_level(level).await?,
        Command::Play => {
            let levels = handle.levels().await?;
            let furthest = levels.iter().rposition(|s| s.unlocked).unwrap_or(0);
            handle.start_level(furthest).await?;
        }
        Command::Next => handle.start_next_level().await?,
        Command::Retry => handle.restart_level().await?,
        Command::Guess(letter) => handle.guess_letter(letter).await?,
        Command::Hint => handle.use_hint().await?,
        Command::Levels => {
            print_levels(&handle.levels().await?);
            return Ok(());
        }
        Command::Status => {}
        Command::ResetProgress => handle.reset_progress().await?,
        Command::ResetHints => handle.reset_hints().await?,
        Command::Difficulty(difficulty) => handle.set_difficulty(difficulty).await?,
        Command::Help => {
            print!("{COMMANDS}");
            return Ok(());
        }
        Command::Quit => return Ok(()),
    }

    show(handle).await
}

/// Print pending events followed by the board.
async fn show(handle: &SessionHandle) -> Result<(), SessionError> {
    let events = handle.drain_events().await?;
    for event in &events {
        logging::log_game_event(event);
        println!("* {event}");
    }

    let view = handle.view().await?;
    logging::log_round_end(&events, &view);
    print_view(&view);
    Ok(())
}

fn print_view(view: &RoundView) {
    let Some(level) = view.level else {
        println!("No level started. Type 'play' to begin.");
        return;
    };

    let passed = if view.is_level_completed { " (passed)" } else { "" };
    println!(
        "Level {}/{}{}  [{}]  {}s left  misses {}/{}  hints {}",
        level + 1,
        view.level_count,
        passed,
        view.difficulty,
        view.time_remaining_secs,
        view.incorrect_attempts,
        view.max_attempts,
        view.hints_remaining,
    );
    println!("\n    {}\n", view.masked_word);

    if let (true, Some(hint)) = (view.hint_used, view.hint) {
        println!("Hint: {hint}");
    }

    match view.outcome {
        Some(Outcome::Playing) => {
            let letters: String = view
                .remaining_letters
                .iter()
                .map(|letter| letter.as_char())
                .collect();
            println!("Letters: {letters}");
        }
        Some(Outcome::Won) => println!("Solved! Type 'next' to continue."),
        Some(Outcome::Lost) => println!("Out of guesses. Type 'retry' to try again."),
        Some(Outcome::TimedOut) => println!("Time's up. Type 'retry' to try again."),
        None => {}
    }
}

fn print_levels(levels: &[LevelStatus]) {
    for row in levels.chunks(10) {
        let cells: Vec<String> = row
            .iter()
            .map(|status| {
                let mark = match (status.unlocked, status.passed) {
                    (_, true) => '*',
                    (true, false) => ' ',
                    (false, false) => '#',
                };
                format!("{:>3}{}", status.id + 1, mark)
            })
            .collect();
        println!("{}", cells.join(" "));
    }
    println!("* passed   # locked");
}
