//! Decider - pick one item from a shared list.
//!
//! # Commands
//!
//! - `decider pick`: Parse a list and pick one item
//! - `decider parse`: Show how a list is parsed
//! - `decider history`: Show recent decisions
//! - `decider stats`: Show statistics over recent decisions
//! - `decider clear`: Forget all decisions
//!
//! Results go to stdout; diagnostics and the spin reel go to stderr.
//!
//! # Exit Codes
//!
//! - `0`: success
//! - `1`: the list cannot be decided on (no items, or only one)
//! - `2`: runtime error (configuration, I/O, history file)
//!
//! # Environment Variables
//!
//! See the [`config`] module for available configuration options.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::Rng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use decider::config::Config;
use decider::history::{HistoryStore, JsonFileStore, Statistics};
use decider::parser::parse_list;
use decider::selector::Selector;
use decider::spin::{SpinFrame, SpinSchedule};
use decider::types::{Decision, ParsedList, ValidationError};
use decider::DeciderError;

/// Exit code for lists that cannot be decided on.
const EXIT_VALIDATION: u8 = 1;

/// Exit code for runtime errors.
const EXIT_RUNTIME: u8 = 2;

/// Decider - pick one item from a shared list.
///
/// Reads a newline-separated list (or a Markdown-style checklist) and
/// picks one item at random.
#[derive(Parser, Debug)]
#[command(name = "decider")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    DECIDER_HISTORY_PATH   History file (default: platform data dir)
    DECIDER_HISTORY_LIMIT  Decisions remembered (default: 50)
    DECIDER_SPIN           Spin before every pick (default: false)
    RUST_LOG               Log filter for diagnostics (default: warn)

EXAMPLES:
    # Pick from a file
    decider pick dinner.txt

    # Pick from piped text, with the spin reel
    printf 'Pizza\\nSushi\\nBurgers' | decider pick --spin

    # Pick from a checklist; checked items are skipped
    decider pick --text $'Chores\\n[x] Dishes\\n[ ] Laundry\\n[ ] Vacuum'

    # Show the last 10 decisions
    decider history --limit 10
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Where the list text comes from.
#[derive(Args, Debug)]
struct InputArgs {
    /// File containing the list. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// List text given directly on the command line.
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a list and pick one item at random.
    Pick {
        #[command(flatten)]
        input: InputArgs,

        /// Show the spin reel on stderr before revealing the pick.
        #[arg(short, long)]
        spin: bool,

        /// Do not record the decision in history.
        #[arg(long)]
        no_save: bool,

        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the items (and title) parsed from a list.
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Print the parsed list as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show recent decisions, newest first.
    History {
        /// Maximum number of decisions to show.
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print decisions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show statistics over recent decisions.
    Stats {
        /// Print statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Forget all recorded decisions.
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if is_validation_failure(&err) {
                ExitCode::from(EXIT_VALIDATION)
            } else {
                ExitCode::from(EXIT_RUNTIME)
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    debug!(
        history_path = %config.history_path.display(),
        history_limit = config.history_limit,
        "Configuration loaded"
    );

    let store = JsonFileStore::new(&config.history_path, config.history_limit);

    match cli.command {
        Command::Pick {
            input,
            spin,
            no_save,
            json,
        } => run_pick(&input, spin || config.spin, no_save, json, &store),
        Command::Parse { input, json } => run_parse(&input, json),
        Command::History { limit, json } => run_history(limit, json, &store),
        Command::Stats { json } => run_stats(json, &store),
        Command::Clear => run_clear(&store),
    }
}

/// Runs the pick command.
fn run_pick(
    input: &InputArgs,
    spin: bool,
    no_save: bool,
    json: bool,
    store: &impl HistoryStore,
) -> Result<()> {
    let list = parse_list(&read_input(input)?);
    list.validate()?;

    let mut selector = Selector::new();
    let decision = if spin && io::stderr().is_terminal() {
        spin_decision(
            &mut selector,
            &list,
            &SpinSchedule::default(),
            &mut io::stderr().lock(),
        )?
    } else {
        selector.decide(&list)?
    };

    info!(
        selected = %decision.selected_item,
        total_items = decision.total_items,
        title = decision.title.as_deref().unwrap_or(""),
        "Decision made"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        println!("{}", decision.selected_item);
    }

    if no_save {
        debug!("Skipping history (--no-save)");
        return Ok(());
    }

    // A failed history write should not hide a pick the user already saw.
    if let Err(e) = store.append(decision) {
        warn!(error = %e, "Failed to record decision in history");
        eprintln!("Warning: decision not saved: {e}");
    }

    Ok(())
}

/// Plays a spin reel on `out`, then records its final pick.
fn spin_decision<R: Rng, W: Write>(
    selector: &mut Selector<R>,
    list: &ParsedList,
    schedule: &SpinSchedule,
    out: &mut W,
) -> Result<Decision> {
    let reel = selector.spin(list.len(), schedule)?;
    play_reel(out, &list.items, &reel.frames)?;
    Ok(Decision::new(
        list.items[reel.selected].clone(),
        list.len(),
        list.title.clone(),
    ))
}

/// Renders spin frames on `out`, overwriting one line.
fn play_reel<W: Write>(out: &mut W, items: &[String], frames: &[SpinFrame]) -> io::Result<()> {
    let width = items.iter().map(|i| i.chars().count()).max().unwrap_or(0);

    for frame in frames {
        write!(out, "\r  {:<width$}", items[frame.index])?;
        out.flush()?;
        thread::sleep(frame.delay);
    }
    writeln!(out, "\r  {:<width$}", "")?;
    Ok(())
}

/// Runs the parse command.
fn run_parse(input: &InputArgs, json: bool) -> Result<()> {
    let list = parse_list(&read_input(input)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if let Some(title) = &list.title {
        println!("# {title}");
    }
    for item in &list.items {
        println!("{item}");
    }

    if let Err(e) = list.validate() {
        eprintln!("Note: {e}");
    }
    Ok(())
}

/// Runs the history command.
fn run_history(limit: Option<usize>, json: bool, store: &impl HistoryStore) -> Result<()> {
    let log = store.load().context("Failed to load history")?;
    let shown: Vec<&Decision> = log.iter().take(limit.unwrap_or(usize::MAX)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        eprintln!("No decisions yet.");
        return Ok(());
    }

    for decision in shown {
        let from = match &decision.title {
            Some(title) => format!("{} items, {title}", decision.total_items),
            None => format!("{} items", decision.total_items),
        };
        println!(
            "{}  {}  ({from})",
            decision.timestamp.format("%Y-%m-%d %H:%M:%S"),
            decision.selected_item
        );
    }
    Ok(())
}

/// Runs the stats command.
fn run_stats(json: bool, store: &impl HistoryStore) -> Result<()> {
    let log = store.load().context("Failed to load history")?;
    let stats = Statistics::from_history(&log);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Decisions:          {}", stats.total_decisions);
    if let Some(average) = stats.average_list_size {
        println!("Average list size:  {average:.1}");
    }
    println!("Titled lists:       {}", stats.titled_lists);
    if let (Some(first), Some(last)) = (stats.first_decision, stats.last_decision) {
        println!("First decision:     {}", first.format("%Y-%m-%d %H:%M:%S"));
        println!("Last decision:      {}", last.format("%Y-%m-%d %H:%M:%S"));
    }
    if !stats.most_picked.is_empty() {
        println!();
        println!("Most picked:");
        for entry in stats.most_picked.iter().take(5) {
            println!("  {:>3}  {}", entry.count, entry.item);
        }
    }
    Ok(())
}

/// Runs the clear command.
fn run_clear(store: &JsonFileStore) -> Result<()> {
    store.clear().context("Failed to clear history")?;
    info!(path = %store.path().display(), "History cleared");
    eprintln!("History cleared.");
    Ok(())
}

/// Reads the list text from `--text`, a file, or stdin.
fn read_input(input: &InputArgs) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }

    match &input.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Returns `true` if `err` came from list validation.
fn is_validation_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<ValidationError>()
            || cause
                .downcast_ref::<DeciderError>()
                .is_some_and(DeciderError::is_validation)
    })
}

/// Initializes the logging subsystem.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}
