use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::errors::{CustomResult, Error};
use crate::modules::puzzle::constructor::{PuzzleRequest, DEFAULT_MAX_RETRIES};
use crate::modules::questions::question::Difficulty;

/// settings read from the environment and `.env`
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    pub difficulty: Difficulty,
    pub guesses: Option<u32>,
    pub max_retries: u32,
    pub seed: Option<u64>,
    pub logging_level: String,
    pub log_file: Option<String>,
    pub archive_path: Option<String>,
    pub demonyms_path: Option<String>,
}

impl GridConfig {
    /// # read the config from the environment
    /// loads `.env` first when it exists
    pub fn from_env() -> CustomResult<GridConfig> {
        dotenv().ok();
        GridConfig::from_lookup(|key| env::var(key).ok())
    }

    /// # read the config from a lookup
    ///
    /// ## Arguments
    /// * `lookup` - returns the value of a key, `None` when unset
    ///
    /// ## Returns
    /// * `GridConfig` - the config, or the first invalid value
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> CustomResult<GridConfig> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(GridConfig {
            columns: parse(&read, "GRID_COLUMNS")?.unwrap_or(3),
            rows: parse(&read, "GRID_ROWS")?.unwrap_or(3),
            difficulty: parse(&read, "GRID_DIFFICULTY")?.unwrap_or(Difficulty::Easy),
            guesses: parse(&read, "GRID_GUESSES")?,
            max_retries: parse(&read, "GRID_MAX_RETRIES")?.unwrap_or(DEFAULT_MAX_RETRIES),
            seed: parse(&read, "GRID_SEED")?,
            logging_level: read("LOGGING_LEVEL").unwrap_or_else(|| "INFO".to_string()),
            log_file: read("LOG_FILE"),
            archive_path: read("ARCHIVE_PATH"),
            demonyms_path: read("DEMONYMS_PATH"),
        })
    }

    pub fn request(&self) -> PuzzleRequest {
        PuzzleRequest {
            seed: self.seed,
            max_retries: self.max_retries,
            guesses: self.guesses,
            ..PuzzleRequest::new(self.columns, self.rows, self.difficulty)
        }
    }
}

fn parse<T: FromStr, F: Fn(&str) -> Option<String>>(read: &F, key: &str) -> CustomResult<Option<T>> {
    match read(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidConfigError {
                key: key.to_string(),
                value,
            }),
        None => Ok(None),
    }
}
