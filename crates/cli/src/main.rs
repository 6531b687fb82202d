use anyhow::Context;
use clap::{Parser, Subcommand};
use pyramid_core::{
    canonical_key, evaluate_expression, format_number, format_progress_percentage,
    format_progress_text, generate_valid_game_configuration, normalize_expression,
    progress_status_text, solutions_for_target, Card, Difficulty, DifficultyConfig, Event,
    EventBus, GameConfiguration, GameSession, RngState, SessionError, Solution, SolutionSet,
    SubmitOutcome, DEFAULT_MAX_ATTEMPTS,
};
use pyramid_data::load_difficulty_table;
use rustyline::{error::ReadlineError, DefaultEditor};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "pyramid", about = "Equation Pyramid board generator and solver")]
struct Cli {
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,
    /// Board seed; defaults to the current time.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Directory holding difficulty.json.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
    /// Print events and results as JSON lines.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a board and print its target and distinct solution count.
    Generate,
    /// Generate a board and list every distinct solution.
    Solve {
        /// Also list the reorderings that collapse into each solution.
        #[arg(long)]
        all: bool,
    },
    /// Evaluate and normalize an arithmetic expression.
    Normalize { expression: String },
    /// Play a board interactively.
    Play,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Some(Command::Generate) => run_generate(&cli),
        Some(Command::Solve { all }) => run_solve(&cli, *all),
        Some(Command::Normalize { expression }) => run_normalize(&cli, expression),
        Some(Command::Play) | None => run_play(&cli),
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

fn difficulty_config(cli: &Cli) -> anyhow::Result<DifficultyConfig> {
    let table = load_difficulty_table(&cli.assets)
        .with_context(|| format!("load difficulty table from {}", cli.assets.display()))?;
    Ok(table.get(cli.difficulty).clone())
}

fn generate_board(
    cli: &Cli,
    seed: u64,
    events: &mut EventBus,
) -> anyhow::Result<GameConfiguration> {
    let config = difficulty_config(cli)?;
    let mut rng = RngState::from_seed(seed);
    let configuration = generate_valid_game_configuration(
        cli.difficulty,
        &config,
        &mut rng,
        cli.max_attempts,
        events,
    )
    .with_context(|| format!("generate {} board with seed {seed}", cli.difficulty))?;
    Ok(configuration)
}

fn run_generate(cli: &Cli) -> anyhow::Result<()> {
    let seed = cli.seed.unwrap_or_else(now_ms);
    let mut events = EventBus::default();
    let configuration = generate_board(cli, seed, &mut events)?;
    flush_events(cli.json, &mut events)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&configuration)?);
        return Ok(());
    }
    println!("seed: {seed}");
    println!("{}", render_board(&configuration.cards));
    println!("target: {}", configuration.target);
    println!("distinct solutions: {}", configuration.total_solutions);
    Ok(())
}

#[derive(Serialize)]
struct SolutionReport<'a> {
    key: String,
    equation: &'a str,
    cards: [&'a str; 3],
    variants: Vec<&'a str>,
}

fn run_solve(cli: &Cli, all: bool) -> anyhow::Result<()> {
    let seed = cli.seed.unwrap_or_else(now_ms);
    let mut events = EventBus::default();
    let configuration = generate_board(cli, seed, &mut events)?;
    flush_events(cli.json, &mut events)?;

    let raw = solutions_for_target(&configuration.cards, configuration.target);
    let unique = SolutionSet::from_solutions(&raw)?;
    let mut reports = Vec::with_capacity(unique.len());
    for solution in unique.solutions() {
        let key = canonical_key(solution.hand_ref())?;
        let mut variants = Vec::new();
        if all {
            for candidate in &raw {
                if canonical_key(candidate.hand_ref())? == key {
                    variants.push(candidate.equation.as_str());
                }
            }
        }
        reports.push(SolutionReport {
            key,
            equation: &solution.equation,
            cards: hand_labels(solution),
            variants,
        });
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    println!("seed: {seed}");
    println!("{}", render_board(&configuration.cards));
    println!(
        "target {}: {} distinct of {} raw",
        configuration.target,
        reports.len(),
        raw.len()
    );
    for report in &reports {
        println!(
            "  {} = {}  [{}]",
            report.equation,
            configuration.target,
            report.cards.join(" ")
        );
        for variant in &report.variants {
            if *variant != report.equation {
                println!("      ~ {variant}");
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct NormalizeReport<'a> {
    expression: &'a str,
    value: f64,
    normalized: String,
}

fn run_normalize(cli: &Cli, expression: &str) -> anyhow::Result<()> {
    let value = evaluate_expression(expression)
        .with_context(|| format!("evaluate {expression:?}"))?;
    let normalized = normalize_expression(expression)
        .with_context(|| format!("normalize {expression:?}"))?;
    if cli.json {
        let report = NormalizeReport {
            expression,
            value,
            normalized,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("value: {}", format_number(value));
        println!("normalized: {normalized}");
        println!("key: {}:{normalized}", format_number(value));
    }
    Ok(())
}

fn run_play(cli: &Cli) -> anyhow::Result<()> {
    let mut events = EventBus::default();
    let mut seed = cli.seed.unwrap_or_else(now_ms);
    let configuration = generate_board(cli, seed, &mut events)?;
    let mut game = GameSession::start(configuration, now_ms(), &mut events);
    flush_events(cli.json, &mut events)?;
    print_status(seed, &game);
    println!("Pick three cards by label (e.g. `A D F`), or type `help`.");

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rl.add_history_entry(line)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() == 3 {
            submit_labels(&mut game, [tokens[0], tokens[1], tokens[2]], &mut events);
            flush_events(cli.json, &mut events)?;
            continue;
        }
        match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" | "?" => print_help(),
            "board" => print_status(seed, &game),
            "found" => {
                for solution in game.found.solutions() {
                    println!("  {} [{}]", solution.equation, hand_labels(solution).join(" "));
                }
            }
            "reveal" => {
                let raw = solutions_for_target(&game.cards, game.target);
                for solution in SolutionSet::from_solutions(&raw)?.solutions() {
                    println!("  {} [{}]", solution.equation, hand_labels(solution).join(" "));
                }
            }
            "new" => {
                seed = now_ms();
                let configuration = generate_board(cli, seed, &mut events)?;
                game = GameSession::start(configuration, now_ms(), &mut events);
                flush_events(cli.json, &mut events)?;
                print_status(seed, &game);
            }
            _ => println!("pick exactly three cards, or type `help`"),
        }
    }
    Ok(())
}

fn submit_labels(game: &mut GameSession, labels: [&str; 3], events: &mut EventBus) {
    let mut ids = Vec::with_capacity(3);
    for label in labels {
        match game.card_by_label(label) {
            Some(card) => ids.push(card.id.clone()),
            None => {
                println!("no card labelled {label}");
                return;
            }
        }
    }
    let hand = [ids[0].as_str(), ids[1].as_str(), ids[2].as_str()];
    match game.submit(hand, now_ms(), events) {
        Ok(SubmitOutcome::Found { solution, .. }) => {
            println!("correct: {} = {}", solution.equation, game.target);
            let progress = game.progress();
            println!(
                "{} ({}) {}",
                format_progress_text(progress.current, progress.total),
                format_progress_percentage(progress.current, progress.total),
                progress_status_text(progress.current, progress.total)
            );
            if game.completion.should_celebrate() {
                println!("board cleared with score {}", game.score);
            }
        }
        Ok(SubmitOutcome::Duplicate { .. }) => {
            println!("already found: that is a reordering of an earlier solution");
        }
        Ok(SubmitOutcome::Incorrect { result }) => {
            println!("{} is not {}", format_number(result), game.target);
        }
        Err(SessionError::GameCompleted) => println!("board already cleared; type `new`"),
        Err(err) => println!("error: {err}"),
    }
}

fn flush_events(json: bool, events: &mut EventBus) -> anyhow::Result<()> {
    for event in events.drain() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("event: {}", format_event(&event));
        }
    }
    Ok(())
}

fn format_event(event: &Event) -> String {
    match event {
        Event::ConfigurationGenerated {
            difficulty,
            cards,
            target,
            total_solutions,
            attempts,
        } => format!(
            "board generated: {difficulty} {cards} cards target {target} solutions {total_solutions} attempts {attempts}"
        ),
        Event::GameStarted {
            difficulty,
            target,
            cards,
            total_solutions,
        } => format!(
            "game started: {difficulty} {cards} cards target {target} solutions {total_solutions}"
        ),
        Event::HandSubmitted {
            card_ids,
            equation,
            result,
        } => format!(
            "hand submitted: {} => {equation} = {}",
            card_ids.join(","),
            format_number(*result)
        ),
        Event::SolutionFound {
            key,
            found,
            total,
            score,
        } => format!("solution found: {key} ({found}/{total}) score {score}"),
        Event::DuplicateSolution { key } => format!("duplicate solution: {key}"),
        Event::WrongAnswer { result, target } => {
            format!("wrong answer: {} != {target}", format_number(*result))
        }
        Event::GameCompleted {
            found,
            score,
            duration_ms,
        } => match duration_ms {
            Some(ms) => format!("game completed: {found} found score {score} in {ms}ms"),
            None => format!("game completed: {found} found score {score}"),
        },
    }
}

fn render_board(cards: &[Card]) -> String {
    let width = (cards.len() as f64).sqrt().ceil().max(1.0) as usize;
    cards
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|card| format!("[{:>2} {:>4}]", card.label, card.to_string()))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn hand_labels(solution: &Solution) -> [&str; 3] {
    solution.hand.each_ref().map(|card| card.label.as_str())
}

fn print_status(seed: u64, game: &GameSession) {
    let progress = game.progress();
    println!("seed: {seed}  difficulty: {}", game.difficulty);
    println!("{}", render_board(&game.cards));
    println!(
        "target: {}  {}  score: {}",
        game.target,
        format_progress_text(progress.current, progress.total),
        game.score
    );
}

fn print_help() {
    println!("A B C        submit the cards labelled A, B and C, in that order");
    println!("board        show the board and progress");
    println!("found        list solutions found so far");
    println!("reveal       list every distinct solution");
    println!("new          start a fresh board");
    println!("quit         leave");
}
