//! calcpad - Terminal keypad calculator
//!
//! Maps keyboard tokens onto the calcpad engine and prints the display.

mod config;
mod logging;
mod repl;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use crate::config::CalcpadConfig;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "calcpad")]
#[command(about = "Keypad calculator for the terminal")]
#[command(long_about = "Keypad calculator for the terminal

Keys are entered as tokens: digits, '.', operators (+ - * / ^ %),
'sqrt', '=' or 'Enter', 'c'/'Escape'/'Delete' to clear and 'Backspace'.
Operators chain left to right: 5 + 3 * 2 = shows 16.

Examples:
  calcpad                         # Interactive keypad
  calcpad eval 12 + 30 =          # Prints 42
  calcpad eval '5+3*2='           # Prints 16
  calcpad eval 2 sqrt             # Prints 1.4142135624")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: ./calcpad.toml or ./calcpad.yaml if present)
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive keypad (default)
    Repl,

    /// Press a sequence of keys and print the final display
    Eval {
        /// Key tokens, e.g. `12 + 30 =`
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CalcpadConfig::load(cli.config_path.as_deref())?;

    let color = config.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }
    logging::init(logging::resolve_filter(cli.verbose, &config.log.level), color);
    debug!(?config, "configuration loaded");

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl::run(&config),
        Commands::Eval { keys } => {
            run_eval(&keys.join(" "));
            Ok(())
        },
    }
}

/// One-shot evaluation; exits with status 1 when a key is rejected
fn run_eval(input: &str) {
    let mut session = Session::new();
    match session.feed(input) {
        Ok(display) => println!("{}", display),
        Err(e) => {
            eprintln!("{} {}", "ERROR".red(), e);
            std::process::exit(1);
        },
    }
}
