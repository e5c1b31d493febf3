use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::modules::models::archive::Archive;
use crate::modules::models::driver::Driver;

/// the value a question template is bound to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Modifier {
    Nothing,
    AtLeast(u32),
    Is(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QuestionFamily {
    Achievement,
    Nationality,
    Team,
    Special,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Difficulty> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// tier used for the slot at `index` of an axis, the first slots are easier
    pub fn for_slot(&self, index: usize) -> Difficulty {
        let level = (self.level() as usize).min(index + 1);
        Difficulty::from_level(level as u8).unwrap_or(Difficulty::Easy)
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "easy" => Ok(Difficulty::Easy),
            "2" | "medium" => Ok(Difficulty::Medium),
            "3" | "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidConfigError {
                key: "difficulty".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    Column,
    Row,
}

impl Axis {
    /// families a question on this axis can be drawn from, with their weight
    pub fn families(&self) -> &'static [(QuestionFamily, u32)] {
        match self {
            Axis::Column => &[
                (QuestionFamily::Achievement, 2),
                (QuestionFamily::Nationality, 2),
                (QuestionFamily::Special, 1),
            ],
            Axis::Row => &[
                (QuestionFamily::Achievement, 2),
                (QuestionFamily::Team, 2),
                (QuestionFamily::Special, 1),
            ],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Column => write!(f, "column"),
            Axis::Row => write!(f, "row"),
        }
    }
}

pub type Predicate = fn(&Modifier, &Driver, &Archive) -> bool;

/// a question template bound to its modifier.
/// two questions are the same question when they read the same
#[derive(Clone, Debug)]
pub struct Question {
    pub id: String,
    pub family: QuestionFamily,
    pub tier: Difficulty,
    pub base: String,
    pub modifier: Modifier,
    pub detail: Option<String>,
    predicate: Predicate,
}

impl Question {
    pub fn new(
        id: &str,
        family: QuestionFamily,
        tier: Difficulty,
        base: &str,
        modifier: Modifier,
        predicate: Predicate,
    ) -> Question {
        Question {
            id: id.to_string(),
            family,
            tier,
            base: base.to_string(),
            modifier,
            detail: None,
            predicate,
        }
    }

    pub fn with_detail(mut self, detail: &str) -> Question {
        self.detail = Some(detail.to_string());
        self
    }

    /// # render the question
    ///
    /// ## Returns
    /// * `String` - e.g. "Race wins ≥ 5" or "Nationality = Finnish"
    pub fn text(&self) -> String {
        match &self.modifier {
            Modifier::Nothing => self.base.clone(),
            Modifier::AtLeast(n) => format!("{} ≥ {}", self.base, n),
            Modifier::Is(value) => format!("{} = {}", self.base, value),
        }
    }

    pub fn check(&self, driver: &Driver, archive: &Archive) -> bool {
        (self.predicate)(&self.modifier, driver, archive)
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for Question {}

impl Hash for Question {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
