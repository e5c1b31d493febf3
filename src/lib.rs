pub mod errors;
pub mod modules;

mod macros {
    pub mod predicates;
}

pub use modules::models::archive::{Archive, ArchiveData, CountryLookup, DemonymTable};
pub use modules::puzzle::constructor::{build_puzzle, PuzzleConstructor, PuzzleRequest};
pub use modules::puzzle::session::{GuessOutcome, PuzzleGrid};
pub use modules::questions::catalogue::QuestionCatalogue;
pub use modules::questions::question::{Axis, Difficulty};
