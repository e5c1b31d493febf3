use std::collections::BTreeMap;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::errors::{CustomResult, Error};
use crate::modules::models::archive::Archive;
use crate::modules::puzzle::session::PuzzleGrid;
use crate::modules::puzzle::solver::{CellDomains, PuzzleSolver};
use crate::modules::questions::answers::AnswerCache;
use crate::modules::questions::catalogue::{QuestionCatalogue, ANY_DRIVER};
use crate::modules::questions::question::{Axis, Difficulty, Question};

pub const MAX_AXIS_SIZE: usize = 5;
pub const DEFAULT_MAX_RETRIES: u32 = 100;

/// what kind of puzzle to build
#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleRequest {
    pub columns: usize,
    pub rows: usize,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    /// question ids fixed by slot
    pub pinned_columns: BTreeMap<usize, String>,
    pub pinned_rows: BTreeMap<usize, String>,
    /// accept the last grid even when no full solution was found
    pub force: bool,
    pub max_retries: u32,
    /// defaults to one guess per cell
    pub guesses: Option<u32>,
}

impl Default for PuzzleRequest {
    fn default() -> PuzzleRequest {
        PuzzleRequest {
            columns: 3,
            rows: 3,
            difficulty: Difficulty::Easy,
            seed: None,
            pinned_columns: BTreeMap::new(),
            pinned_rows: BTreeMap::new(),
            force: false,
            max_retries: DEFAULT_MAX_RETRIES,
            guesses: None,
        }
    }
}

impl PuzzleRequest {
    pub fn new(columns: usize, rows: usize, difficulty: Difficulty) -> PuzzleRequest {
        PuzzleRequest {
            columns,
            rows,
            difficulty,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> PuzzleRequest {
        self.seed = Some(seed);
        self
    }

    pub fn pin(mut self, axis: Axis, slot: usize, id: &str) -> PuzzleRequest {
        match axis {
            Axis::Column => self.pinned_columns.insert(slot, id.to_string()),
            Axis::Row => self.pinned_rows.insert(slot, id.to_string()),
        };
        self
    }

    pub fn forced(mut self) -> PuzzleRequest {
        self.force = true;
        self
    }

    fn is_fully_pinned(&self) -> bool {
        (0..self.columns).all(|slot| self.pinned_columns.contains_key(&slot))
            && (0..self.rows).all(|slot| self.pinned_rows.contains_key(&slot))
    }
}

pub struct PuzzleConstructor<'a> {
    archive: &'a Archive,
    catalogue: &'a QuestionCatalogue,
}

impl<'a> PuzzleConstructor<'a> {
    pub fn new(archive: &'a Archive, catalogue: &'a QuestionCatalogue) -> PuzzleConstructor<'a> {
        PuzzleConstructor { archive, catalogue }
    }

    /// # build a puzzle
    /// draw questions for every slot and keep the first set that has a full solution.
    /// a set without a solution is thrown away as a whole and drawn again
    ///
    /// ## Arguments
    /// * `request` - size, difficulty, seed and pinned questions
    ///
    /// ## Returns
    /// * `PuzzleGrid` - a grid with a known solution, or without one when forced
    pub fn build(&self, request: &PuzzleRequest) -> CustomResult<PuzzleGrid> {
        if !(1..=MAX_AXIS_SIZE).contains(&request.columns) || !(1..=MAX_AXIS_SIZE).contains(&request.rows) {
            return Err(Error::InvalidGridSizeError {
                columns: request.columns,
                rows: request.rows,
            });
        }

        let pinned_columns = self.resolve_pins(&request.pinned_columns, request.columns)?;
        let pinned_rows = self.resolve_pins(&request.pinned_rows, request.rows)?;
        check_duplicates(pinned_columns.values().chain(pinned_rows.values()))?;

        let seed = request.seed.unwrap_or_else(|| ChaCha8Rng::from_entropy().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cache = AnswerCache::for_archive(self.archive);

        let attempts = if request.is_fully_pinned() {
            1
        } else {
            request.max_retries.max(1)
        };
        let guesses = request
            .guesses
            .unwrap_or((request.columns * request.rows) as u32);

        let mut last: Option<(Vec<Question>, Vec<Question>, CellDomains)> = None;
        for attempt in 1..=attempts {
            let mut chosen: Vec<Question> = pinned_columns.values().chain(pinned_rows.values()).cloned().collect();
            let columns = self.fill_axis(Axis::Column, request, &pinned_columns, &mut chosen, &mut rng)?;
            let rows = self.fill_axis(Axis::Row, request, &pinned_rows, &mut chosen, &mut rng)?;

            let domains = PuzzleSolver::domains(&mut cache, &columns, &rows);
            match PuzzleSolver::solve(&domains) {
                Some(solution) => {
                    info!(
                        target:"puzzle/constructor:build",
                        "built a {}x{} grid after {} attempt(s), seed {}",
                        request.columns,
                        request.rows,
                        attempt,
                        seed
                    );
                    return Ok(PuzzleGrid::new(
                        columns,
                        rows,
                        domains,
                        Some(solution),
                        guesses,
                        request.difficulty,
                        seed,
                    ));
                }
                None => {
                    debug!(target:"puzzle/constructor:build", "attempt {} has no solution", attempt);
                    last = Some((columns, rows, domains));
                }
            }
        }

        if request.force {
            if let Some((columns, rows, domains)) = last {
                warn!(target:"puzzle/constructor:build", "no solution after {} attempt(s), using the grid anyway", attempts);
                return Ok(PuzzleGrid::new(columns, rows, domains, None, guesses, request.difficulty, seed));
            }
        }

        Err(Error::UnsatisfiablePuzzleError { attempts })
    }

    fn resolve_pins(&self, pins: &BTreeMap<usize, String>, size: usize) -> CustomResult<BTreeMap<usize, Question>> {
        let mut questions = BTreeMap::new();
        for (slot, id) in pins {
            if *slot >= size {
                return Err(Error::InvalidConfigError {
                    key: format!("pin {}", slot),
                    value: id.clone(),
                });
            }
            questions.insert(*slot, self.catalogue.lookup(id)?);
        }

        Ok(questions)
    }

    fn fill_axis(
        &self,
        axis: Axis,
        request: &PuzzleRequest,
        pinned: &BTreeMap<usize, Question>,
        chosen: &mut Vec<Question>,
        rng: &mut ChaCha8Rng,
    ) -> CustomResult<Vec<Question>> {
        let size = match axis {
            Axis::Column => request.columns,
            Axis::Row => request.rows,
        };

        let mut questions = Vec::with_capacity(size);
        for slot in 0..size {
            let question = match pinned.get(&slot) {
                Some(question) => question.clone(),
                None => {
                    let tier = request.difficulty.for_slot(slot);
                    let question = self.catalogue.draw(axis, slot, tier, rng, chosen)?;
                    chosen.push(question.clone());
                    question
                }
            };
            questions.push(question);
        }

        Ok(questions)
    }
}

/// pinned questions may not read the same, except the any driver placeholder
fn check_duplicates<'q, I: Iterator<Item = &'q Question>>(questions: I) -> CustomResult<()> {
    let mut seen: Vec<&Question> = Vec::new();
    for question in questions {
        if question.id == ANY_DRIVER {
            continue;
        }
        if seen.contains(&question) {
            return Err(Error::DuplicateQuestionError { text: question.text() });
        }
        seen.push(question);
    }

    Ok(())
}

/// # build a puzzle
/// build a puzzle with drawn questions and the default number of retries
///
/// ## Arguments
/// * `archive` - the archive answers come from
/// * `catalogue` - the questions to draw from
/// * `columns` - number of columns, 1-5
/// * `rows` - number of rows, 1-5
/// * `difficulty` - the hardest tier questions are drawn from
/// * `seed` - seed for a repeatable puzzle
///
/// ## Returns
/// * `PuzzleGrid` - the puzzle
pub fn build_puzzle(
    archive: &Archive,
    catalogue: &QuestionCatalogue,
    columns: usize,
    rows: usize,
    difficulty: Difficulty,
    seed: Option<u64>,
) -> CustomResult<PuzzleGrid> {
    let mut request = PuzzleRequest::new(columns, rows, difficulty);
    request.seed = seed;

    PuzzleConstructor::new(archive, catalogue).build(&request)
}
