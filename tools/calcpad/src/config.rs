//! Configuration loading for calcpad
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed `CALCPAD_` (nested keys split on `__`,
//!    e.g. `CALCPAD_LOG__LEVEL=debug`)
//! 2. The file given with `--config`, or `calcpad.toml` / `calcpad.yaml` in
//!    the working directory
//! 3. Default values

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "CALCPAD_";
pub const DEFAULT_TOML: &str = "calcpad.toml";
pub const DEFAULT_YAML: &str = "calcpad.yaml";

/// Front end settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CalcpadConfig {
    /// REPL prompt
    ///
    /// Values from `CALCPAD_PROMPT` are trimmed by the env provider; a prompt
    /// with trailing whitespace has to come from a config file.
    pub prompt: String,
    /// Colored output
    pub color: bool,
    /// Print the keypad grid when the REPL starts
    pub show_keypad: bool,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// Filter directive used when neither `RUST_LOG` nor `--verbose` is set
    pub level: String,
}

impl Default for CalcpadConfig {
    fn default() -> Self {
        Self {
            prompt: "calc> ".to_string(),
            color: true,
            show_keypad: true,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl CalcpadConfig {
    /// Build the layered figment without extracting it
    pub fn figment(config_path: Option<&Path>) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(CalcpadConfig::default()));

        let figment = match config_path {
            Some(path) => merge_file(figment, path)?,
            None => figment
                .merge(Toml::file(DEFAULT_TOML))
                .merge(Yaml::file(DEFAULT_YAML)),
        };

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::figment(config_path)?
            .extract()
            .context("Failed to load configuration")
    }
}

/// Merge an explicitly requested file, picking the format from its extension
fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.exists() {
        bail!("Config file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .context("Config file must have an extension")?;

    let figment = match extension {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        _ => bail!("Unsupported config file format: {}", extension),
    };
    Ok(figment)
}
