//! Host configuration parsed from environment variables.
//!
//! Every setting has a default, so an empty environment starts a document-mode
//! board on port 3000 backed by `./table_data.json` and `./cards.yaml`.

use scene::engine::Mode;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TABLE_LOCATION: &str = "./table_data.json";
pub const DEFAULT_CARDS_LOCATION: &str = "./cards.yaml";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("unknown CARDTABLE_MODE '{0}' (expected 'document' or 'content-source')")]
    UnknownMode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Startup mode. `Reset` is only ever reached at runtime.
    pub mode: Mode,
    /// Where the saved table document is read from at startup.
    pub table_location: String,
    /// Where content-source records are fetched from, if anywhere.
    pub cards_location: Option<String>,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CARDTABLE_MODE`: `document` (default) or `content-source`
    /// - `CARDTABLE_TABLE`: default `./table_data.json`
    /// - `CARDTABLE_CARDS`: default `./cards.yaml` in document mode, unset otherwise
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unparseable port or an unknown mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unparseable port or an unknown mode.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let mode = parse_mode(get("CARDTABLE_MODE").as_deref())?;
        let table_location = get("CARDTABLE_TABLE").unwrap_or_else(|| DEFAULT_TABLE_LOCATION.to_owned());
        let cards_location = get("CARDTABLE_CARDS").or_else(|| match mode {
            Mode::Document => Some(DEFAULT_CARDS_LOCATION.to_owned()),
            Mode::ContentSource | Mode::Reset => None,
        });

        Ok(Self { port, mode, table_location, cards_location })
    }
}

fn parse_mode(raw: Option<&str>) -> Result<Mode, ConfigError> {
    match raw.map(str::trim).unwrap_or("document") {
        "document" | "dev" => Ok(Mode::Document),
        "content-source" | "deployed" => Ok(Mode::ContentSource),
        other => Err(ConfigError::UnknownMode(other.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
