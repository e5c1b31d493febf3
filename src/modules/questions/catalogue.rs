use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::{CustomResult, Error};
use crate::modules::questions::predicates;
use crate::modules::questions::question::{Axis, Difficulty, Modifier, Predicate, Question, QuestionFamily};

/// id of the question every driver answers, used for unconstrained slots
pub const ANY_DRIVER: &str = "special.any";

/// the immutable set of questions puzzles are built from
#[derive(Clone, Debug)]
pub struct QuestionCatalogue {
    questions: Vec<Question>,
    placeholder: Question,
}

impl QuestionCatalogue {
    pub fn new(questions: Vec<Question>) -> QuestionCatalogue {
        QuestionCatalogue {
            questions,
            placeholder: Question::new(
                ANY_DRIVER,
                QuestionFamily::Special,
                Difficulty::Easy,
                "Any driver",
                Modifier::Nothing,
                predicates::any,
            ),
        }
    }

    /// # the standard catalogue
    /// achievement, nationality, team and special questions in three tiers
    pub fn standard() -> QuestionCatalogue {
        use Difficulty::{Easy, Hard, Medium};
        use QuestionFamily::{Achievement, Nationality, Special, Team};

        let mut questions = Vec::new();

        let achievements: [(&str, Difficulty, &str, u32, Predicate); 15] = [
            ("wins", Easy, "Race wins", 5, predicates::wins),
            ("championships", Easy, "World championships", 1, predicates::championships),
            ("entries", Easy, "Race entries", 20, predicates::entries),
            ("poles", Easy, "Pole positions", 5, predicates::poles),
            ("season_wins", Easy, "Number of wins in a season", 3, predicates::season_wins),
            ("season_podiums", Medium, "Number of podiums in a season", 6, predicates::season_podiums),
            ("points", Medium, "Number of points during career", 300, predicates::points),
            ("podiums", Medium, "Podiums", 10, predicates::podiums),
            ("seasons", Medium, "Seasons raced", 10, predicates::seasons),
            ("teams", Medium, "Teams driven for", 4, predicates::teams_driven_for),
            ("sprint_wins", Hard, "Sprint wins", 1, predicates::sprint_wins),
            ("season_poles", Hard, "Pole positions in a season", 5, predicates::season_poles),
            ("season_points", Hard, "Points in a season", 100, predicates::season_points),
            ("championships", Hard, "World championships", 2, predicates::championships),
            ("wins", Hard, "Race wins", 20, predicates::wins),
        ];
        for (key, tier, base, n, predicate) in achievements {
            let id = format!("achievement.{}.{}", key, n);
            questions.push(Question::new(&id, Achievement, tier, base, Modifier::AtLeast(n), predicate));
        }

        let nationalities = [
            (Easy, vec!["German", "British", "Italian", "French"]),
            (Medium, vec!["American", "Australian", "Spanish", "Brazilian", "Finnish"]),
            (Hard, vec!["Japanese", "Canadian", "Dutch"]),
        ];
        for (tier, values) in nationalities {
            for value in values {
                let id = format!("nationality.{}", value.to_lowercase());
                questions.push(Question::new(
                    &id,
                    Nationality,
                    tier,
                    "Nationality",
                    Modifier::Is(value.to_string()),
                    predicates::nationality,
                ));
            }
        }

        let teams = [
            (Easy, vec!["Williams", "McLaren", "Ferrari"]),
            (Medium, vec!["Mercedes", "Red Bull", "Renault"]),
            (Hard, vec!["Sauber", "Toro Rosso", "Alfa Romeo"]),
        ];
        for (tier, values) in teams {
            for value in values {
                let id = format!("team.{}", value.to_lowercase().replace(' ', "_"));
                questions.push(Question::new(
                    &id,
                    Team,
                    tier,
                    "Driven for team",
                    Modifier::Is(value.to_string()),
                    predicates::drove_for_team,
                ));
            }
        }

        questions.push(
            Question::new(
                "special.teammate_of_champion",
                Special,
                Easy,
                "Teammate of a world champion",
                Modifier::Nothing,
                predicates::teammate_of_champion,
            )
            .with_detail("shared a team in a race with a driver who won a title"),
        );
        questions.push(Question::new(
            "special.won_from_pole",
            Special,
            Medium,
            "Won a race from pole position",
            Modifier::Nothing,
            predicates::won_from_pole,
        ));
        questions.push(
            Question::new(
                "special.won_at_home",
                Special,
                Medium,
                "Won a home race",
                Modifier::Nothing,
                predicates::won_at_home,
            )
            .with_detail("won a race held in the country of their nationality"),
        );
        questions.push(Question::new(
            "special.sprint_and_race_winner",
            Special,
            Hard,
            "Won a sprint and a race in the same season",
            Modifier::Nothing,
            predicates::sprint_and_race_winner,
        ));

        QuestionCatalogue::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// # look up a question
    /// used to pin a question or replay a puzzle
    ///
    /// ## Arguments
    /// * `id` - the id of the question
    ///
    /// ## Returns
    /// * `Question` - a copy of the question
    pub fn lookup(&self, id: &str) -> CustomResult<Question> {
        if id == self.placeholder.id {
            return Ok(self.placeholder.clone());
        }

        self.questions
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| Error::UnknownQuestionError { id: id.to_string() })
    }

    pub fn any_driver(&self) -> Question {
        self.placeholder.clone()
    }

    pub fn pool(&self, family: QuestionFamily, tier: Difficulty) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.family == family && q.tier == tier)
            .collect()
    }

    /// # draw a question
    /// pick a family of the axis by weight, then a random question of that family and tier.
    /// when nothing is left there, easier tiers are tried first, then the other families
    ///
    /// ## Arguments
    /// * `axis` - the axis the question is for
    /// * `slot` - the index on the axis, used for errors
    /// * `tier` - the wanted tier
    /// * `rng` - the random source
    /// * `exclude` - questions already in the puzzle
    ///
    /// ## Returns
    /// * `Question` - a question that reads different from all excluded questions
    pub fn draw<R: Rng + ?Sized>(
        &self,
        axis: Axis,
        slot: usize,
        tier: Difficulty,
        rng: &mut R,
        exclude: &[Question],
    ) -> CustomResult<Question> {
        let families = axis.families();
        let chosen = families
            .choose_weighted(rng, |(_, weight)| *weight)
            .map(|(family, _)| *family)
            .unwrap_or(QuestionFamily::Achievement);

        let mut order: Vec<QuestionFamily> = vec![chosen];
        order.extend(families.iter().map(|(f, _)| *f).filter(|f| *f != chosen));

        let mut tiers: Vec<Difficulty> = Difficulty::ALL.iter().copied().filter(|t| *t <= tier).rev().collect();
        tiers.extend(Difficulty::ALL.iter().copied().filter(|t| *t > tier));

        for family in &order {
            for candidate_tier in &tiers {
                let candidates: Vec<&Question> = self
                    .pool(*family, *candidate_tier)
                    .into_iter()
                    .filter(|q| !exclude.contains(*q))
                    .collect();

                if let Some(question) = candidates.choose(rng) {
                    if *family != chosen || *candidate_tier != tier {
                        debug!(target:"questions/catalogue:draw", "{} {}: fell back to {:?} {:?}", axis, slot, family, candidate_tier);
                    }
                    return Ok((*question).clone());
                }
            }
        }

        Err(Error::QuestionPoolExhaustedError {
            axis: axis.to_string(),
            slot,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_texts_are_unique() {
        let catalogue = QuestionCatalogue::standard();
        let texts: HashSet<String> = catalogue.questions().iter().map(|q| q.text()).collect();
        let ids: HashSet<&str> = catalogue.questions().iter().map(|q| q.id.as_str()).collect();

        assert_eq!(texts.len(), catalogue.questions().len());
        assert_eq!(ids.len(), catalogue.questions().len());
    }

    #[test]
    fn test_lookup() {
        let catalogue = QuestionCatalogue::standard();

        assert_eq!(catalogue.lookup("achievement.championships.1").unwrap().text(), "World championships ≥ 1");
        assert_eq!(catalogue.lookup("nationality.finnish").unwrap().text(), "Nationality = Finnish");
        assert_eq!(catalogue.lookup(ANY_DRIVER).unwrap().text(), "Any driver");
        assert!(matches!(
            catalogue.lookup("nationality.martian"),
            Err(Error::UnknownQuestionError { .. })
        ));
    }

    #[test]
    fn test_draw_respects_axis_families() {
        let catalogue = QuestionCatalogue::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let column = catalogue.draw(Axis::Column, 0, Difficulty::Easy, &mut rng, &[]).unwrap();
            assert_ne!(column.family, QuestionFamily::Team);

            let row = catalogue.draw(Axis::Row, 0, Difficulty::Easy, &mut rng, &[]).unwrap();
            assert_ne!(row.family, QuestionFamily::Nationality);
            assert_ne!(row.id, ANY_DRIVER);
        }
    }

    #[test]
    fn test_draw_skips_excluded_and_runs_out() {
        let catalogue = QuestionCatalogue::new(vec![
            catalogue_question("achievement.wins.5"),
            catalogue_question("achievement.poles.5"),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let first = catalogue.draw(Axis::Row, 0, Difficulty::Easy, &mut rng, &[]).unwrap();
        let second = catalogue
            .draw(Axis::Row, 1, Difficulty::Easy, &mut rng, &[first.clone()])
            .unwrap();
        assert_ne!(first, second);

        let exhausted = catalogue.draw(Axis::Row, 2, Difficulty::Easy, &mut rng, &[first, second]);
        assert!(matches!(exhausted, Err(Error::QuestionPoolExhaustedError { slot: 2, .. })));
    }

    fn catalogue_question(id: &str) -> Question {
        QuestionCatalogue::standard().lookup(id).unwrap()
    }
}
