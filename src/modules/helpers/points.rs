use serde::Serialize;

const POINTS_1950: [u32; 5] = [8, 6, 4, 3, 2];
const POINTS_1960: [u32; 6] = [8, 6, 4, 3, 2, 1];
const POINTS_1961: [u32; 6] = [9, 6, 4, 3, 2, 1];
const POINTS_1991: [u32; 6] = [10, 6, 4, 3, 2, 1];
const POINTS_2003: [u32; 8] = [10, 8, 6, 5, 4, 3, 2, 1];
const POINTS_2010: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

const SPRINT_2021: [u32; 3] = [3, 2, 1];
const SPRINT_2022: [u32; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

/// first season with a constructors' championship
pub const FIRST_CONSTRUCTORS_SEASON: u16 = 1958;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Championship {
    Drivers,
    Constructors,
}

/// points for the fastest lap of a race.
/// `eligible_up_to` of 0 means a driver in any position gets the bonus
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FastestLapRule {
    pub points: f64,
    pub eligible_up_to: u32,
}

impl FastestLapRule {
    pub fn none() -> FastestLapRule {
        FastestLapRule {
            points: 0.0,
            eligible_up_to: 0,
        }
    }

    /// # check eligibility
    /// check if a fastest lap holder finishing in `position` receives the bonus
    ///
    /// ## Arguments
    /// * `position` - the classified position, `None` if not classified
    ///
    /// ## Returns
    /// * `bool` - true if the bonus is awarded
    pub fn is_eligible(&self, position: Option<u32>) -> bool {
        if self.points <= 0.0 {
            return false;
        }
        if self.eligible_up_to == 0 {
            return true;
        }

        matches!(position, Some(p) if p <= self.eligible_up_to)
    }
}

/// all scoring rules that apply to a single race
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoringSystem {
    pub race: Vec<f64>,
    pub sprint: Vec<f64>,
    pub fastest_lap: FastestLapRule,
}

impl ScoringSystem {
    /// # get the scoring system of a season
    ///
    /// ## Arguments
    /// * `year` - the season
    /// * `championship` - which standings the points are for
    ///
    /// ## Returns
    /// * `ScoringSystem` - the rules of that season
    pub fn for_season(year: u16, championship: Championship) -> ScoringSystem {
        ScoringSystem {
            race: PointsHelper::to_points(PointsHelper::race_table(year, championship)),
            sprint: PointsHelper::to_points(PointsHelper::sprint_table(year)),
            fastest_lap: PointsHelper::fastest_lap_rule(year),
        }
    }

    /// the same system with every race position worth half
    pub fn halved(&self) -> ScoringSystem {
        ScoringSystem {
            race: self.race.iter().map(|p| p / 2.0).collect(),
            sprint: self.sprint.clone(),
            fastest_lap: self.fastest_lap,
        }
    }

    pub fn race_points(&self, position: Option<u32>) -> f64 {
        PointsHelper::lookup(&self.race, position)
    }

    pub fn sprint_points(&self, position: Option<u32>) -> f64 {
        PointsHelper::lookup(&self.sprint, position)
    }
}

pub struct PointsHelper {}

impl PointsHelper {
    /// # select the race points table
    /// in 1961 the constructors kept the 1960 table while the drivers
    /// already scored 9 points for a win
    ///
    /// ## Arguments
    /// * `year` - the season
    /// * `championship` - drivers' or constructors' standings
    ///
    /// ## Returns
    /// * `&[u32]` - points per position, index 0 is the winner
    pub fn race_table(year: u16, championship: Championship) -> &'static [u32] {
        match year {
            2010.. => &POINTS_2010,
            2003..=2009 => &POINTS_2003,
            1991..=2002 => &POINTS_1991,
            1962..=1990 => &POINTS_1961,
            1961 if championship == Championship::Drivers => &POINTS_1961,
            1960..=1961 => &POINTS_1960,
            _ => &POINTS_1950,
        }
    }

    pub fn sprint_table(year: u16) -> &'static [u32] {
        match year {
            2022.. => &SPRINT_2022,
            2021 => &SPRINT_2021,
            _ => &[],
        }
    }

    pub fn fastest_lap_rule(year: u16) -> FastestLapRule {
        match year {
            2019.. => FastestLapRule {
                points: 1.0,
                eligible_up_to: 10,
            },
            1950..=1959 => FastestLapRule {
                points: 1.0,
                eligible_up_to: 0,
            },
            _ => FastestLapRule::none(),
        }
    }

    /// # look up the points for a position
    /// positions beyond the end of the table, or no position at all, score nothing
    pub fn lookup(table: &[f64], position: Option<u32>) -> f64 {
        match position {
            Some(p) if p >= 1 => table.get(p as usize - 1).copied().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn to_points(table: &[u32]) -> Vec<f64> {
        table.iter().map(|p| *p as f64).collect()
    }
}

/// how the drivers' champion of a season is decided
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ChampionMethod {
    /// every race counts
    AllRaces,
    /// only the best `counted` results count
    BestOf { counted: usize },
    /// the season is split after `first_races` races, each half has its own cap
    SplitBestOf {
        first_counted: usize,
        first_races: usize,
        second_counted: usize,
        second_races: usize,
    },
}

impl ChampionMethod {
    pub fn for_season(year: u16) -> ChampionMethod {
        let split = |first_counted, first_races, second_counted, second_races| {
            ChampionMethod::SplitBestOf {
                first_counted,
                first_races,
                second_counted,
                second_races,
            }
        };

        match year {
            1950..=1953 => ChampionMethod::BestOf { counted: 4 },
            1954..=1957 | 1959 | 1961 | 1962 | 1966 => ChampionMethod::BestOf { counted: 5 },
            1958 | 1960 | 1963..=1965 => ChampionMethod::BestOf { counted: 6 },
            1967 | 1969 => split(5, 6, 4, 5),
            1968 | 1972 => split(5, 6, 5, 6),
            1970 | 1971 => split(6, 7, 5, 6),
            1973 | 1975 => split(7, 8, 6, 7),
            1974 | 1976 | 1978 => split(7, 8, 7, 8),
            1977 => split(8, 9, 7, 8),
            1979 => split(4, 7, 4, 8),
            1980 => split(5, 7, 5, 7),
            1981 => ChampionMethod::BestOf { counted: 10 },
            1982..=1990 => ChampionMethod::BestOf { counted: 11 },
            _ => ChampionMethod::AllRaces,
        }
    }

    /// # count the championship points
    /// apply the method to a points series in round order.
    /// rounds the entrant did not take part in are `None`
    ///
    /// ## Arguments
    /// * `series` - points per round
    ///
    /// ## Returns
    /// * `f64` - the points that count towards the title
    pub fn counted_points(&self, series: &[Option<f64>]) -> f64 {
        match *self {
            ChampionMethod::AllRaces => series.iter().flatten().sum(),
            ChampionMethod::BestOf { counted } => best_of(series, counted),
            ChampionMethod::SplitBestOf {
                first_counted,
                first_races,
                second_counted,
                ..
            } => {
                let split = first_races.min(series.len());
                best_of(&series[..split], first_counted) + best_of(&series[split..], second_counted)
            }
        }
    }
}

fn best_of(series: &[Option<f64>], counted: usize) -> f64 {
    let mut scores: Vec<f64> = series.iter().flatten().copied().collect();
    scores.sort_by(|a, b| b.total_cmp(a));

    scores.iter().take(counted).sum()
}
