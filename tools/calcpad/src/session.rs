//! Input session - turns lines of key tokens into engine calls

use calcpad_engine::{parse_keys, CalcError, Calculator, CalculatorState, Key, Phase, UnknownKey};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure while feeding a line
#[derive(Debug, Error)]
pub enum FeedError {
    /// The line contained a token with no key; nothing was applied
    #[error(transparent)]
    UnknownKey(#[from] UnknownKey),

    /// The engine rejected a key; earlier keys on the line stay applied
    #[error("{key}: {source}")]
    Rejected {
        key: Key,
        #[source]
        source: CalcError,
    },
}

/// Snapshot printed by the REPL `state` command
#[derive(Debug, Serialize)]
pub struct StateReport<'a> {
    pub phase: Phase,
    #[serde(flatten)]
    pub state: &'a CalculatorState,
}

#[derive(Debug, Default)]
pub struct Session {
    calculator: Calculator,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        self.calculator.display()
    }

    /// Apply every key on the line, stopping at the first rejected one
    ///
    /// The whole line is parsed before anything is applied, so a typo never
    /// leaves half a line on the calculator.
    pub fn feed(&mut self, line: &str) -> Result<&str, FeedError> {
        let keys = parse_keys(line)?;
        debug!(line, keys = keys.len(), "feed");

        for key in keys {
            if let Err(source) = self.calculator.press(key) {
                warn!(%key, error = %source, display = %self.calculator.display(), "key rejected");
                return Err(FeedError::Rejected { key, source });
            }
        }
        Ok(self.calculator.display())
    }

    pub fn report(&self) -> StateReport<'_> {
        StateReport {
            phase: self.calculator.phase(),
            state: self.calculator.state(),
        }
    }

    pub fn report_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }
}
