use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::modules::models::race::RaceId;
use crate::modules::models::team::TeamId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DriverId(pub usize);

/// driver as handed over by the archive loader
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub driver_id: i32,
    #[serde(default)]
    pub driver_ref: String,
    pub forename: String,
    pub surname: String,
    pub nationality: String,
}

/// one entry of a driver in a race
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RaceEntryRef {
    pub race: RaceId,
    pub team: TeamId,
}

/// what a driver achieved in a single season.
/// counts are per race, a shared drive or a second car in the same race counts once
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct SeasonStats {
    pub champion: bool,
    pub entries: u32,
    pub wins: u32,
    pub podiums: u32,
    pub poles: u32,
    pub points: f64,
    pub sprint_entries: u32,
    pub sprint_wins: u32,
    pub sprint_podiums: u32,
    pub sprint_poles: u32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct CareerStats {
    pub championships: u32,
    pub seasons: u32,
    pub entries: u32,
    pub wins: u32,
    pub podiums: u32,
    pub poles: u32,
    pub points: f64,
    pub sprint_entries: u32,
    pub sprint_wins: u32,
    pub sprint_podiums: u32,
    pub sprint_poles: u32,
}

impl AddAssign<&SeasonStats> for CareerStats {
    fn add_assign(&mut self, season: &SeasonStats) {
        self.championships += season.champion as u32;
        self.seasons += 1;
        self.entries += season.entries;
        self.wins += season.wins;
        self.podiums += season.podiums;
        self.poles += season.poles;
        self.points += season.points;
        self.sprint_entries += season.sprint_entries;
        self.sprint_wins += season.sprint_wins;
        self.sprint_podiums += season.sprint_podiums;
        self.sprint_poles += season.sprint_poles;
    }
}

impl<'a> Sum<&'a SeasonStats> for CareerStats {
    fn sum<I: Iterator<Item = &'a SeasonStats>>(iter: I) -> CareerStats {
        let mut career = CareerStats::default();
        for season in iter {
            career += season;
        }

        career
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Driver {
    pub id: DriverId,
    pub archive_id: i32,
    pub driver_ref: String,
    pub forename: String,
    pub surname: String,
    pub nationality: String,
    pub full_name: String,
    /// country the nationality belongs to, `None` if it could not be resolved
    pub home_country: Option<String>,
    pub teams: BTreeSet<TeamId>,
    pub teammates: BTreeSet<DriverId>,
    pub seasons: BTreeSet<u16>,
    pub entries: BTreeMap<u16, Vec<RaceEntryRef>>,
    pub season_stats: BTreeMap<u16, SeasonStats>,
    pub career: CareerStats,
}

impl Driver {
    pub fn from_record(id: DriverId, record: &DriverRecord, home_country: Option<String>) -> Driver {
        Driver {
            id,
            archive_id: record.driver_id,
            driver_ref: record.driver_ref.clone(),
            forename: record.forename.clone(),
            surname: record.surname.clone(),
            nationality: record.nationality.clone(),
            full_name: Driver::full_name_of(record),
            home_country,
            teams: BTreeSet::new(),
            teammates: BTreeSet::new(),
            seasons: BTreeSet::new(),
            entries: BTreeMap::new(),
            season_stats: BTreeMap::new(),
            career: CareerStats::default(),
        }
    }

    pub fn full_name_of(record: &DriverRecord) -> String {
        format!("{} {}", record.forename.trim(), record.surname.trim())
    }

    /// # get the stats of a season
    /// seasons the driver did not take part in give empty stats
    ///
    /// ## Arguments
    /// * `year` - the season
    ///
    /// ## Returns
    /// * `SeasonStats` - the stats of that season
    pub fn stats(&self, year: u16) -> SeasonStats {
        self.season_stats.get(&year).copied().unwrap_or_default()
    }

    /// # get the best season
    /// get the highest value of a stat over all seasons
    ///
    /// ## Arguments
    /// * `stat` - the stat to read from a season
    ///
    /// ## Returns
    /// * `f64` - the best value, 0 for drivers without seasons
    pub fn best_season<F: Fn(&SeasonStats) -> f64>(&self, stat: F) -> f64 {
        self.season_stats.values().map(stat).fold(0.0, f64::max)
    }

    pub fn drove_for(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }

    pub fn is_teammate_of(&self, other: DriverId) -> bool {
        self.teammates.contains(&other)
    }

    /// every race the driver entered, in season order
    pub fn all_entries(&self) -> impl Iterator<Item = &RaceEntryRef> {
        self.entries.values().flatten()
    }

    /// recompute the career from the stored seasons
    pub fn recompute_career(&mut self) {
        self.career = self.season_stats.values().sum();
    }
}

impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for Driver {}

impl Hash for Driver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DriverRecord {
        DriverRecord {
            driver_id: 1,
            driver_ref: "raikkonen".to_string(),
            forename: "Kimi".to_string(),
            surname: "Räikkönen".to_string(),
            nationality: "Finnish".to_string(),
        }
    }

    #[test]
    fn test_full_name_and_equality() {
        let a = Driver::from_record(DriverId(0), &record(), None);
        let b = Driver::from_record(DriverId(7), &record(), Some("finland".to_string()));

        assert_eq!(a.full_name, "Kimi Räikkönen");
        assert_eq!(a, b);
    }

    #[test]
    fn test_career_is_sum_of_seasons() {
        let mut driver = Driver::from_record(DriverId(0), &record(), None);
        driver.season_stats.insert(
            2005,
            SeasonStats {
                entries: 19,
                wins: 7,
                podiums: 12,
                poles: 5,
                points: 112.0,
                ..Default::default()
            },
        );
        driver.season_stats.insert(
            2007,
            SeasonStats {
                champion: true,
                entries: 17,
                wins: 6,
                podiums: 12,
                poles: 3,
                points: 110.0,
                ..Default::default()
            },
        );
        driver.recompute_career();

        assert_eq!(driver.career.championships, 1);
        assert_eq!(driver.career.seasons, 2);
        assert_eq!(driver.career.wins, 13);
        assert_eq!(driver.career.points, 222.0);
        assert_eq!(driver.best_season(|s| s.wins as f64), 7.0);
        assert_eq!(driver.stats(1999), SeasonStats::default());
    }
}
