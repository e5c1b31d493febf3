use std::collections::BTreeMap;

use log::info;
use serde::Serialize;

use crate::modules::models::driver::DriverId;
use crate::modules::puzzle::solver::{Assignment, Cell, CellDomains};
use crate::modules::questions::answers::Answers;
use crate::modules::questions::question::{Axis, Difficulty, Question};

/// the result of a guess. only `Correct` and `Incorrect` use up a guess
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    /// the driver is already the answer of another cell
    AlreadyUsed,
    CellAlreadySolved,
    NoGuessesRemaining,
    /// the grid is solved or the player gave up
    GameOver,
    UnknownCell,
}

/// a puzzle being played
#[derive(Clone, Debug)]
pub struct PuzzleGrid {
    columns: Vec<Question>,
    rows: Vec<Question>,
    domains: CellDomains,
    solution: Option<Assignment>,
    answers: BTreeMap<Cell, DriverId>,
    guesses_left: u32,
    guesses_used: u32,
    forfeited: bool,
    difficulty: Difficulty,
    seed: u64,
}

impl PuzzleGrid {
    pub fn new(
        columns: Vec<Question>,
        rows: Vec<Question>,
        domains: CellDomains,
        solution: Option<Assignment>,
        guesses: u32,
        difficulty: Difficulty,
        seed: u64,
    ) -> PuzzleGrid {
        PuzzleGrid {
            columns,
            rows,
            domains,
            solution,
            answers: BTreeMap::new(),
            guesses_left: guesses,
            guesses_used: 0,
            forfeited: false,
            difficulty,
            seed,
        }
    }

    /********** QUESTIONS **********/
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn question(&self, axis: Axis, index: usize) -> Option<&Question> {
        match axis {
            Axis::Column => self.columns.get(index),
            Axis::Row => self.rows.get(index),
        }
    }

    pub fn question_text(&self, axis: Axis, index: usize) -> Option<String> {
        self.question(axis, index).map(|q| q.text())
    }

    /// ids of the questions on an axis, enough to rebuild the same grid
    pub fn question_ids(&self, axis: Axis) -> Vec<String> {
        let questions = match axis {
            Axis::Column => &self.columns,
            Axis::Row => &self.rows,
        };

        questions.iter().map(|q| q.id.clone()).collect()
    }

    /********** PLAY **********/

    /// # submit a guess
    /// check if the driver answers the column and the row question of the cell.
    /// invalid moves are rejected without using a guess
    ///
    /// ## Arguments
    /// * `column` - the column of the cell
    /// * `row` - the row of the cell
    /// * `driver` - the guessed driver
    ///
    /// ## Returns
    /// * `GuessOutcome` - what happened
    pub fn submit(&mut self, column: usize, row: usize, driver: DriverId) -> GuessOutcome {
        let cell = Cell::new(column, row);
        let correct = match self.domains.get(&cell) {
            Some(domain) => domain.contains(&driver),
            None => return GuessOutcome::UnknownCell,
        };

        if self.forfeited || self.is_solved() {
            return GuessOutcome::GameOver;
        }
        if self.guesses_left == 0 {
            return GuessOutcome::NoGuessesRemaining;
        }
        if self.answers.contains_key(&cell) {
            return GuessOutcome::CellAlreadySolved;
        }
        if self.answers.values().any(|answer| *answer == driver) {
            return GuessOutcome::AlreadyUsed;
        }

        self.guesses_left -= 1;
        self.guesses_used += 1;

        if correct {
            self.answers.insert(cell, driver);
            if self.is_solved() {
                info!(target:"puzzle/session:submit", "grid solved with {} guesses", self.guesses_used);
            }
            GuessOutcome::Correct
        } else {
            GuessOutcome::Incorrect
        }
    }

    pub fn forfeit(&mut self) {
        self.forfeited = true;
    }

    pub fn is_solved(&self) -> bool {
        self.answers.len() == self.domains.len()
    }

    pub fn is_over(&self) -> bool {
        self.forfeited || self.guesses_left == 0 || self.is_solved()
    }

    /********** GETTERS **********/

    /// every driver that answers the cell, for reviewing the grid after the game
    pub fn reveal(&self, column: usize, row: usize) -> Option<Answers> {
        self.domains.get(&Cell::new(column, row)).cloned()
    }

    pub fn answer(&self, column: usize, row: usize) -> Option<DriverId> {
        self.answers.get(&Cell::new(column, row)).copied()
    }

    pub fn answers(&self) -> &BTreeMap<Cell, DriverId> {
        &self.answers
    }

    /// a full solution found while building, `None` if the grid was forced
    pub fn solution(&self) -> Option<&Assignment> {
        self.solution.as_ref()
    }

    pub fn domains(&self) -> &CellDomains {
        &self.domains
    }

    pub fn guesses_left(&self) -> u32 {
        self.guesses_left
    }

    pub fn guesses_used(&self) -> u32 {
        self.guesses_used
    }

    pub fn score(&self) -> usize {
        self.answers.len()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
