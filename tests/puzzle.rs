mod common;

use std::collections::BTreeSet;
use std::rc::Rc;

use common::*;
use formula_grid::errors::Error;
use formula_grid::modules::models::driver::DriverId;
use formula_grid::modules::puzzle::solver::{Cell, CellDomains, PuzzleSolver};
use formula_grid::modules::questions::answers::AnswerCache;
use formula_grid::modules::questions::catalogue::ANY_DRIVER;
use formula_grid::{Archive, Axis, Difficulty, GuessOutcome, PuzzleConstructor, PuzzleGrid, PuzzleRequest, QuestionCatalogue};
use proptest::prelude::*;

fn champions_and_finns() -> PuzzleRequest {
    PuzzleRequest::new(2, 2, Difficulty::Easy)
        .pin(Axis::Column, 0, "achievement.championships.1")
        .pin(Axis::Column, 1, "nationality.finnish")
        .pin(Axis::Row, 0, ANY_DRIVER)
        .pin(Axis::Row, 1, ANY_DRIVER)
}

fn build(archive: &Archive, request: &PuzzleRequest) -> Result<PuzzleGrid, Error> {
    let catalogue = QuestionCatalogue::standard();
    PuzzleConstructor::new(archive, &catalogue).build(request)
}

#[test]
fn test_too_few_qualifiers_is_unsatisfiable() {
    // Häkkinen and Schumacher are champions, Häkkinen and Bottas are finns
    let archive = finnish_archive(false);

    match build(&archive, &champions_and_finns()) {
        Err(Error::UnsatisfiablePuzzleError { attempts }) => assert_eq!(attempts, 1),
        other => panic!("expected an unsatisfiable puzzle, got {:?}", other.map(|g| g.seed())),
    }
}

#[test]
fn test_enough_qualifiers_is_solved() {
    let archive = finnish_archive(true);
    let grid = build(&archive, &champions_and_finns()).unwrap();

    assert_eq!(grid.question_text(Axis::Column, 0).as_deref(), Some("World championships ≥ 1"));
    assert_eq!(grid.question_text(Axis::Column, 1).as_deref(), Some("Nationality = Finnish"));
    assert_eq!(grid.question_text(Axis::Row, 1).as_deref(), Some("Any driver"));

    let solution = grid.solution().unwrap();
    assert_eq!(solution.len(), 4);
    assert!(PuzzleSolver::verify(grid.domains(), solution));

    // solving the committed grid again gives a valid assignment too
    let again = PuzzleSolver::solve(grid.domains()).unwrap();
    assert!(PuzzleSolver::verify(grid.domains(), &again));

    let finns = grid.reveal(1, 0).unwrap();
    assert_eq!(finns.len(), 3);
    assert!(finns.contains(&archive.find_driver("Bottas").unwrap()));
}

#[test]
fn test_forced_grid_has_no_solution() {
    let archive = finnish_archive(false);
    let grid = build(&archive, &champions_and_finns().forced()).unwrap();

    assert!(grid.solution().is_none());
    assert_eq!(grid.column_count(), 2);
}

#[test]
fn test_duplicate_and_unknown_pins() {
    let archive = finnish_archive(true);

    let duplicate = PuzzleRequest::new(2, 1, Difficulty::Easy)
        .pin(Axis::Column, 0, "nationality.finnish")
        .pin(Axis::Column, 1, "nationality.finnish");
    assert!(matches!(build(&archive, &duplicate), Err(Error::DuplicateQuestionError { .. })));

    let unknown = PuzzleRequest::new(1, 1, Difficulty::Easy).pin(Axis::Row, 0, "team.minardi");
    assert!(matches!(build(&archive, &unknown), Err(Error::UnknownQuestionError { .. })));

    let too_big = PuzzleRequest::new(6, 1, Difficulty::Easy);
    assert!(matches!(build(&archive, &too_big), Err(Error::InvalidGridSizeError { columns: 6, rows: 1 })));
}

#[test]
fn test_already_used_answer_keeps_guesses() {
    let archive = finnish_archive(true);
    let mut grid = build(&archive, &champions_and_finns()).unwrap();
    let hakkinen = archive.find_driver("Mika Hakkinen").unwrap();
    let coulthard = archive.find_driver("Coulthard").unwrap();
    assert_eq!(grid.guesses_left(), 4);

    assert_eq!(grid.submit(0, 0, hakkinen), GuessOutcome::Correct);
    assert_eq!(grid.guesses_left(), 3);

    assert_eq!(grid.submit(1, 1, hakkinen), GuessOutcome::AlreadyUsed);
    assert_eq!(grid.submit(0, 0, coulthard), GuessOutcome::CellAlreadySolved);
    assert_eq!(grid.guesses_left(), 3);

    assert_eq!(grid.submit(1, 1, coulthard), GuessOutcome::Incorrect);
    assert_eq!(grid.guesses_left(), 2);
    assert_eq!(grid.answer(0, 0), Some(hakkinen));
    assert_eq!(grid.answer(1, 1), None);
}

#[test]
fn test_answers_are_memoized() {
    let archive = finnish_archive(true);
    let catalogue = QuestionCatalogue::standard();
    let champions = catalogue.lookup("achievement.championships.1").unwrap();
    let finns = catalogue.lookup("nationality.finnish").unwrap();
    let mut cache = AnswerCache::for_archive(&archive);

    let first = cache.all_answers(&champions);
    let second = cache.all_answers(&champions);
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(cache.scans(), 1);

    let both = cache.mutual_answers(&champions, &finns);
    let reversed = cache.mutual_answers(&finns, &champions);
    assert!(Rc::ptr_eq(&both, &reversed));
    assert_eq!(cache.scans(), 2);
    // Häkkinen and Räikkönen
    assert_eq!(both.len(), 2);
}

#[test]
fn test_special_questions() {
    let archive = finnish_archive(true);
    let catalogue = QuestionCatalogue::standard();
    let hakkinen = archive.driver(archive.find_driver("Häkkinen").unwrap());
    let bottas = archive.driver(archive.find_driver("Bottas").unwrap());
    let coulthard = archive.driver(archive.find_driver("Coulthard").unwrap());

    // Häkkinen won from pole in Finland
    let at_home = catalogue.lookup("special.won_at_home").unwrap();
    let from_pole = catalogue.lookup("special.won_from_pole").unwrap();
    assert!(at_home.check(hakkinen, &archive));
    assert!(from_pole.check(hakkinen, &archive));
    assert!(!from_pole.check(bottas, &archive));

    // Coulthard drove alongside Häkkinen at McLaren
    let teammate = catalogue.lookup("special.teammate_of_champion").unwrap();
    assert!(teammate.check(coulthard, &archive));
    assert!(!teammate.check(bottas, &archive));

    let williams = catalogue.lookup("team.williams").unwrap();
    assert!(williams.check(bottas, &archive));
    assert!(!williams.check(hakkinen, &archive));
}

#[test]
fn test_team_question_covers_every_team_with_the_name() {
    // two constructors decades apart carry the same name
    let mut data = ArchiveBuilder::new()
        .driver(1, "Bruno", "Giacomelli", "Italian")
        .driver(2, "Kimi", "Räikkönen", "Finnish")
        .race(1980, 1, CIRCUIT_ITALY, &[(1, LOTUS)])
        .race(2019, 1, CIRCUIT_ITALY, &[(2, FERRARI)])
        .data();
    for team in data.teams.iter_mut().filter(|t| t.team_id == LOTUS || t.team_id == FERRARI) {
        team.name = "Alfa Romeo".to_string();
    }
    let archive = Archive::build(data, &countries()).unwrap();
    let catalogue = QuestionCatalogue::standard();
    let alfa = catalogue.lookup("team.alfa_romeo").unwrap();

    assert_eq!(archive.teams_named("alfa romeo").len(), 2);
    assert!(alfa.check(archive.driver(archive.find_driver("Giacomelli").unwrap()), &archive));
    assert!(alfa.check(archive.driver(archive.find_driver("Raikkonen").unwrap()), &archive));
}

#[test]
fn test_same_seed_same_grid() {
    let archive = finnish_archive(true);
    let mut request = PuzzleRequest::new(3, 3, Difficulty::Hard).with_seed(11).forced();
    request.max_retries = 3;

    let first = build(&archive, &request).unwrap();
    let second = build(&archive, &request).unwrap();

    assert_eq!(first.seed(), 11);
    assert_eq!(first.question_ids(Axis::Column), second.question_ids(Axis::Column));
    assert_eq!(first.question_ids(Axis::Row), second.question_ids(Axis::Row));
    assert_eq!(first.guesses_left(), 9);
}

/// every injective assignment is searched, no ordering heuristics
fn exists_assignment(cells: &[(Cell, Vec<usize>)], used: &mut Vec<usize>) -> bool {
    match cells.split_first() {
        None => true,
        Some(((_, domain), rest)) => domain.iter().any(|candidate| {
            if used.contains(candidate) {
                return false;
            }
            used.push(*candidate);
            let found = exists_assignment(rest, used);
            used.pop();
            found
        }),
    }
}

fn grids() -> impl Strategy<Value = Vec<Vec<usize>>> {
    let domain = prop::collection::btree_set(0..6usize, 0..5).prop_map(|set| set.into_iter().collect::<Vec<usize>>());
    prop::collection::vec(domain, 6)
}

proptest! {
    #[test]
    fn prop_solver_agrees_with_exhaustive_search(raw in grids()) {
        let cells: Vec<(Cell, Vec<usize>)> = raw
            .into_iter()
            .enumerate()
            .map(|(i, domain)| (Cell::new(i % 3, i / 3), domain))
            .collect();
        let domains: CellDomains = cells
            .iter()
            .map(|(cell, domain)| (*cell, Rc::new(domain.iter().copied().map(DriverId).collect::<BTreeSet<DriverId>>())))
            .collect();

        match PuzzleSolver::solve(&domains) {
            Some(assignment) => prop_assert!(PuzzleSolver::verify(&domains, &assignment)),
            None => prop_assert!(!exists_assignment(&cells, &mut Vec::new())),
        }
    }
}
