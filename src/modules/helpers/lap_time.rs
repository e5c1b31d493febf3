use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, Error};

/// a lap time with millisecond resolution, as recorded by race timing
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LapTime {
    pub millis: u32,
}

impl LapTime {
    /// the lap time format, compile once and hand to `parse_with` when parsing many times
    pub fn pattern() -> CustomResult<Regex> {
        let pattern = r"^(?:(\d+):)?(\d{1,2})\.(\d{1,3})$";
        Regex::new(pattern).map_err(|_| Error::InvalidLapTimeError {
            value: pattern.to_string(),
        })
    }

    /// # parse a lap time
    /// accepts `m:ss.fff` and `ss.fff`, the fraction may have 1-3 digits
    ///
    /// ## Arguments
    /// * `input` - the lap time as written in the archive
    ///
    /// ## Returns
    /// * `LapTime` - the parsed time
    pub fn parse(input: &str) -> CustomResult<LapTime> {
        LapTime::parse_with(&LapTime::pattern()?, input)
    }

    /// parse with a pattern from `LapTime::pattern`
    pub fn parse_with(pattern: &Regex, input: &str) -> CustomResult<LapTime> {
        let invalid = || Error::InvalidLapTimeError {
            value: input.to_string(),
        };

        let captures = pattern.captures(input.trim()).ok_or_else(invalid)?;

        let minutes: u32 = match captures.get(1) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };
        let seconds: u32 = captures[2].parse().map_err(|_| invalid())?;
        if captures.get(1).is_some() && seconds >= 60 {
            return Err(invalid());
        }

        // "1:23.4" means 400ms, not 4ms
        let fraction = &captures[3];
        let mut millis: u32 = fraction.parse().map_err(|_| invalid())?;
        for _ in fraction.len()..3 {
            millis *= 10;
        }

        let millis = minutes
            .checked_mul(60_000)
            .and_then(|total| total.checked_add(seconds * 1000 + millis))
            .ok_or_else(invalid)?;

        Ok(LapTime { millis })
    }
}

impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let minutes = self.millis / 60_000;
        let seconds = (self.millis % 60_000) / 1000;
        let millis = self.millis % 1000;
        write!(f, "{}:{:02}.{:03}", minutes, seconds, millis)
    }
}
