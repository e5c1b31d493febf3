use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::modules::models::driver::DriverId;
use crate::modules::questions::answers::{AnswerCache, Answers};
use crate::modules::questions::question::Question;

const COLUMN_NAMES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(column: usize, row: usize) -> Cell {
        Cell { column, row }
    }

    /// # parse a cell label
    /// columns are letters and rows are numbers starting at 1, e.g. "B2"
    ///
    /// ## Arguments
    /// * `label` - the label, case insensitive
    ///
    /// ## Returns
    /// * `Option<Cell>` - the cell, `None` for anything else
    pub fn parse(label: &str) -> Option<Cell> {
        let label = label.trim().to_uppercase();
        let mut chars = label.chars();
        let letter = chars.next()?;
        let column = COLUMN_NAMES.iter().position(|c| *c == letter)?;
        let row: usize = chars.as_str().parse().ok()?;
        if row == 0 || row > COLUMN_NAMES.len() {
            return None;
        }

        Some(Cell::new(column, row - 1))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match COLUMN_NAMES.get(self.column) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "({}, {})", self.column, self.row),
        }
    }
}

pub type CellDomains = BTreeMap<Cell, Answers>;
pub type Assignment = BTreeMap<Cell, DriverId>;

pub struct PuzzleSolver {}

impl PuzzleSolver {
    /// # compute the cell domains
    /// the domain of a cell holds every candidate answering its column and its row
    ///
    /// ## Arguments
    /// * `cache` - the answer cache of the candidate pool
    /// * `columns` - the column questions
    /// * `rows` - the row questions
    ///
    /// ## Returns
    /// * `CellDomains` - the domain of every cell
    pub fn domains(cache: &mut AnswerCache, columns: &[Question], rows: &[Question]) -> CellDomains {
        let mut domains = BTreeMap::new();
        for (column, column_question) in columns.iter().enumerate() {
            for (row, row_question) in rows.iter().enumerate() {
                domains.insert(
                    Cell::new(column, row),
                    cache.mutual_answers(column_question, row_question),
                );
            }
        }

        domains
    }

    /// # solve a grid
    /// find a distinct answer for every cell. the most constrained cells are
    /// assigned first and the search backtracks when a cell runs out of candidates
    ///
    /// ## Arguments
    /// * `domains` - the domain of every cell
    ///
    /// ## Returns
    /// * `Option<Assignment>` - an answer per cell, `None` if no full assignment exists
    pub fn solve(domains: &CellDomains) -> Option<Assignment> {
        if domains.values().any(|d| d.is_empty()) {
            return None;
        }

        let distinct: BTreeSet<&DriverId> = domains.values().flat_map(|d| d.iter()).collect();
        if distinct.len() < domains.len() {
            return None;
        }

        let mut order: Vec<(&Cell, &Answers)> = domains.iter().collect();
        order.sort_by_key(|(_, domain)| domain.len());

        let mut used = BTreeSet::new();
        let mut chosen = Vec::with_capacity(order.len());
        if !PuzzleSolver::search(&order, &mut used, &mut chosen) {
            return None;
        }

        Some(
            order
                .iter()
                .zip(chosen)
                .map(|((cell, _), driver)| (**cell, driver))
                .collect(),
        )
    }

    fn search(order: &[(&Cell, &Answers)], used: &mut BTreeSet<DriverId>, chosen: &mut Vec<DriverId>) -> bool {
        let depth = chosen.len();
        if depth == order.len() {
            return true;
        }

        let (_, domain) = order[depth];
        for candidate in domain.iter() {
            if used.contains(candidate) {
                continue;
            }

            used.insert(*candidate);
            chosen.push(*candidate);
            if PuzzleSolver::search(order, used, chosen) {
                return true;
            }
            chosen.pop();
            used.remove(candidate);
        }

        false
    }

    /// # verify an assignment
    /// every cell has an answer from its domain and no answer is used twice
    pub fn verify(domains: &CellDomains, assignment: &Assignment) -> bool {
        if assignment.len() != domains.len() {
            return false;
        }

        let distinct: BTreeSet<&DriverId> = assignment.values().collect();
        if distinct.len() != assignment.len() {
            return false;
        }

        domains.iter().all(|(cell, domain)| {
            assignment
                .get(cell)
                .map(|driver| domain.contains(driver))
                .unwrap_or(false)
        })
    }
}
