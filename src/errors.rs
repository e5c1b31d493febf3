use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    /********** ARCHIVE INTEGRITY **********/
    #[snafu(display("duplicate {} record with id {}", kind, id))]
    DuplicateRecordError { kind: &'static str, id: i32 },

    #[snafu(display("driver name '{}' is used by more than one driver", name))]
    DuplicateDriverNameError { name: String },

    #[snafu(display("{} references unknown {} {}", referenced_by, kind, id))]
    MissingReferenceError {
        kind: &'static str,
        id: i32,
        referenced_by: String,
    },

    #[snafu(display("round {} of {} is defined more than once", round, year))]
    DuplicateRoundError { year: u16, round: u32 },

    #[snafu(display("round {} of {} is missing", round, year))]
    MissingRoundError { year: u16, round: u32 },

    #[snafu(display("{} driving for {} is entered twice in {}", driver, team, race))]
    DuplicateEntrantError {
        race: String,
        driver: String,
        team: String,
    },

    #[snafu(display("'{}' is not a valid lap time", value))]
    InvalidLapTimeError { value: String },

    #[snafu(display("the {} championship is tied between {:?}", year, entrants))]
    UnresolvedTieError { year: u16, entrants: Vec<String> },

    /********** PUZZLE **********/
    #[snafu(display("a grid must have 1-5 columns and 1-5 rows, got {}x{}", columns, rows))]
    InvalidGridSizeError { columns: usize, rows: usize },

    #[snafu(display("no question with id '{}'", id))]
    UnknownQuestionError { id: String },

    #[snafu(display("the question '{}' is used more than once", text))]
    DuplicateQuestionError { text: String },

    #[snafu(display("no unused question left for {} {}", axis, slot))]
    QuestionPoolExhaustedError { axis: String, slot: usize },

    #[snafu(display("no solvable grid found after {} attempts", attempts))]
    UnsatisfiablePuzzleError { attempts: u32 },

    /********** CONFIG / IO **********/
    #[snafu(display("invalid value '{}' for {}", value, key))]
    InvalidConfigError { key: String, value: String },

    #[snafu(display("could not read archive {}: {}", path, message))]
    ArchiveReadError { path: String, message: String },
}

pub type CustomResult<T> = Result<T, Error>;
