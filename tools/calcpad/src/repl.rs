//! Interactive keypad REPL
//!
//! Each input line is a list of key tokens (`12 + 3 =`, `12+3=`,
//! `9 sqrt`, `Escape`). After every line the display is printed.

use anyhow::{Context, Result};
use calcpad_engine::keypad::NAMED_KEYS;
use calcpad_engine::{KeyVariant, KEYPAD_ROWS};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use crate::config::CalcpadConfig;
use crate::session::{FeedError, Session};

const COMMANDS: &[&str] = &["help", "keys", "state", "quit", "exit"];

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// REPL helper providing Tab completion for commands and named keys
struct CalcHelper;

impl Helper for CalcHelper {}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CalcHelper {}

impl Validator for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let start = line.rfind(char::is_whitespace).map_or(0, |i| i + 1);
        let word = &line[start..];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        // Commands only make sense as the first word
        let commands: &[&str] = if start == 0 { COMMANDS } else { &[] };
        let candidates = commands.iter().chain(NAMED_KEYS.iter());
        Ok((start, complete_word(word, candidates)))
    }
}

fn complete_word<'a>(prefix: &str, candidates: impl Iterator<Item = &'a &'a str>) -> Vec<Pair> {
    let prefix_lower = prefix.to_ascii_lowercase();
    candidates
        .filter(|c| c.starts_with(&prefix_lower))
        .map(|c| Pair {
            display: (*c).to_string(),
            replacement: (*c).to_string(),
        })
        .collect()
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the keypad grid, colored by button class
pub fn render_keypad() -> String {
    let mut out = String::new();
    for row in KEYPAD_ROWS {
        let cells: Vec<String> = row
            .iter()
            .map(|key| {
                let cell = format!("[{:^3}]", key.label());
                match key.variant() {
                    KeyVariant::Number => cell.bright_white().to_string(),
                    KeyVariant::Operation => cell.bright_cyan().to_string(),
                    KeyVariant::Clear => cell.red().to_string(),
                }
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

pub fn print_display(display: &str) {
    println!("  {}", display.bold());
}

pub fn print_feed_error(err: &FeedError) {
    eprintln!("{} {}", "Error:".red(), err);
}

/// Print help message
fn print_help() {
    println!("{}", "=== Commands ===".bright_cyan());
    println!();
    println!("  {}   Show this help message", "help".bright_yellow());
    println!("  {}   Show the keypad", "keys".bright_yellow());
    println!("  {}  Show pending operand and operator", "state".bright_yellow());
    println!("  {}   Exit", "quit".bright_yellow());
    println!();
    println!("{}", "=== Keys ===".bright_cyan());
    println!();
    println!("  0-9 .              Digits and decimal point");
    println!("  + - * / ^ %        Operators (chained left to right)");
    println!("  sqrt  √  r         Square root of the display");
    println!("  =  Enter           Apply the pending operator");
    println!("  c  Escape  Delete  Clear");
    println!("  Backspace          Delete the last character");
    println!();
    println!("{}", "=== Examples ===".bright_cyan());
    println!();
    println!("  12 + 30 =          Shows 42");
    println!("  5+3*2=             Shows 16, operators apply in order");
    println!("  2 sqrt             Shows 1.4142135624");
}

// ============================================================================
// Loop
// ============================================================================

/// Interactive REPL loop
pub fn run(config: &CalcpadConfig) -> Result<()> {
    let rl_config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(rl_config).context("Failed to initialize readline")?;
    rl.set_helper(Some(CalcHelper));

    let mut session = Session::new();

    println!("{}", "calcpad".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );
    if config.show_keypad {
        print!("{}", render_keypad());
        println!();
    }
    print_display(session.display());

    loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Add to history (ignore errors)
                let _ = rl.add_history_entry(line);

                if !execute_line(&mut session, line)? {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - ignore and continue
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                break;
            },
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    println!("Bye!");
    Ok(())
}

/// Execute a single REPL line
/// Returns Ok(true) to continue, Ok(false) to quit
fn execute_line(session: &mut Session, line: &str) -> Result<bool> {
    match line.to_ascii_lowercase().as_str() {
        "help" | "?" => print_help(),
        "keys" => print!("{}", render_keypad()),
        "state" => {
            let json = session
                .report_json()
                .context("Failed to serialize calculator state")?;
            println!("{}", json);
        },
        "quit" | "exit" | "q" => return Ok(false),
        _ => match session.feed(line) {
            Ok(display) => print_display(display),
            Err(e) => {
                print_feed_error(&e);
                print_display(session.display());
            },
        },
    }
    Ok(true)
}
