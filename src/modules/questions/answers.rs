use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::modules::models::archive::Archive;
use crate::modules::models::driver::DriverId;
use crate::modules::questions::question::Question;

pub type Answers = Rc<BTreeSet<DriverId>>;

/// memoized answers of questions over a fixed pool of candidates.
/// entries are keyed by the rendered question text and never invalidated
pub struct AnswerCache<'a> {
    archive: &'a Archive,
    candidates: BTreeSet<DriverId>,
    all: HashMap<String, Answers>,
    mutual: HashMap<(String, String), Answers>,
    scans: usize,
}

impl<'a> AnswerCache<'a> {
    pub fn new(archive: &'a Archive, candidates: BTreeSet<DriverId>) -> AnswerCache<'a> {
        AnswerCache {
            archive,
            candidates,
            all: HashMap::new(),
            mutual: HashMap::new(),
            scans: 0,
        }
    }

    /// cache over every driver in the archive
    pub fn for_archive(archive: &'a Archive) -> AnswerCache<'a> {
        AnswerCache::new(archive, archive.driver_ids())
    }

    pub fn archive(&self) -> &'a Archive {
        self.archive
    }

    /// # get all answers
    /// every candidate that satisfies the question
    ///
    /// ## Arguments
    /// * `question` - the question to answer
    ///
    /// ## Returns
    /// * `Answers` - the matching candidates
    pub fn all_answers(&mut self, question: &Question) -> Answers {
        let key = question.text();
        if let Some(answers) = self.all.get(&key) {
            return answers.clone();
        }

        self.scans += 1;
        let archive = self.archive;
        let answers: Answers = Rc::new(
            self.candidates
                .iter()
                .copied()
                .filter(|id| question.check(archive.driver(*id), archive))
                .collect(),
        );

        self.all.insert(key, answers.clone());
        answers
    }

    /// # get the mutual answers
    /// every candidate that satisfies both questions. the pair is unordered
    ///
    /// ## Arguments
    /// * `question` - the first question
    /// * `other` - the second question
    ///
    /// ## Returns
    /// * `Answers` - the candidates that answer both
    pub fn mutual_answers(&mut self, question: &Question, other: &Question) -> Answers {
        let (a, b) = (question.text(), other.text());
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(answers) = self.mutual.get(&key) {
            return answers.clone();
        }

        let first = self.all_answers(question);
        let second = self.all_answers(other);
        let answers: Answers = Rc::new(first.intersection(&second).copied().collect());

        self.mutual.insert(key, answers.clone());
        answers
    }

    /// how often the candidate pool was scanned
    pub fn scans(&self) -> usize {
        self.scans
    }
}
