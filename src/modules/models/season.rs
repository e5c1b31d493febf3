use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::errors::{CustomResult, Error};
use crate::modules::helpers::points::{
    ChampionMethod, Championship, ScoringSystem, FIRST_CONSTRUCTORS_SEASON,
};
use crate::modules::helpers::standings::{SeasonRecord, StandingsHelper, StandingsRow};
use crate::modules::models::driver::{Driver, DriverId, SeasonStats};
use crate::modules::models::race::{Race, RaceId};
use crate::modules::models::team::TeamId;

#[derive(Clone, Debug, Serialize)]
pub struct Season {
    pub year: u16,
    /// races in round order, index 0 is round 1
    pub races: Vec<RaceId>,
    pub champion_method: ChampionMethod,
    /// official standings, points counted with the champion method of the season
    pub driver_standings: Vec<StandingsRow<DriverId>>,
    /// empty before the first constructors' championship
    pub constructor_standings: Vec<StandingsRow<TeamId>>,
    pub champion: Option<DriverId>,
    #[serde(skip)]
    pub driver_record: SeasonRecord<DriverId>,
    #[serde(skip)]
    pub constructor_record: SeasonRecord<TeamId>,
}

impl Season {
    /// # build a season
    /// check the rounds, award the points of every race and resolve the standings
    /// and the champion
    ///
    /// ## Arguments
    /// * `year` - the season
    /// * `rounds` - the races of the season by round
    /// * `races` - the race arena
    /// * `drivers` - the driver arena, used for error messages
    ///
    /// ## Returns
    /// * `Season` - the season with standings
    pub fn build(
        year: u16,
        rounds: &BTreeMap<u32, RaceId>,
        races: &[Race],
        drivers: &[Driver],
    ) -> CustomResult<Season> {
        let last = rounds.keys().next_back().copied().unwrap_or(0);
        for round in 1..=last {
            if !rounds.contains_key(&round) {
                return Err(Error::MissingRoundError { year, round });
            }
        }
        if rounds.contains_key(&0) {
            return Err(Error::MissingRoundError { year, round: 1 });
        }

        let season_races: Vec<RaceId> = rounds.values().copied().collect();
        let count = season_races.len();

        let driver_system = ScoringSystem::for_season(year, Championship::Drivers);
        let constructor_system = ScoringSystem::for_season(year, Championship::Constructors);

        let mut driver_record = SeasonRecord::new();
        let mut constructor_record = SeasonRecord::new();

        for (index, race_id) in season_races.iter().enumerate() {
            let race = &races[race_id.0];
            let round = index + 1;

            for (key, points) in race.calculate_points(&driver_system) {
                let position = race.entrants.get(&key).and_then(|r| r.position);
                driver_record.record(key.driver, round, count, points, position);
            }

            if year >= FIRST_CONSTRUCTORS_SEASON {
                for (key, points) in race.calculate_points(&constructor_system) {
                    let position = race.entrants.get(&key).and_then(|r| r.position);
                    constructor_record.record(key.team, round, count, points, position);
                }
            }
        }

        let champion_method = ChampionMethod::for_season(year);
        let counted: BTreeMap<DriverId, f64> = driver_record
            .points
            .iter()
            .map(|(driver, series)| (*driver, champion_method.counted_points(series)))
            .collect();

        let driver_standings = StandingsHelper::rank(&counted, &driver_record, year);
        let constructor_standings =
            StandingsHelper::rank(&constructor_record.totals(), &constructor_record, year);

        let leaders: Vec<DriverId> = driver_standings
            .iter()
            .filter(|row| row.position == 1)
            .map(|row| row.key)
            .collect();
        if leaders.len() > 1 {
            return Err(Error::UnresolvedTieError {
                year,
                entrants: leaders.iter().map(|d| drivers[d.0].full_name.clone()).collect(),
            });
        }

        let champion = leaders.first().copied();
        debug!(target:"models/season:build", "{}: {} races, champion {:?}", year, count, champion);

        Ok(Season {
            year,
            races: season_races,
            champion_method,
            driver_standings,
            constructor_standings,
            champion,
            driver_record,
            constructor_record,
        })
    }

    /// # get the stats of every driver
    /// entries, wins, podiums and poles per race, points as scored (not only the counted results)
    ///
    /// ## Arguments
    /// * `races` - the race arena
    ///
    /// ## Returns
    /// * `BTreeMap<DriverId, SeasonStats>` - stats per driver that took part
    pub fn driver_stats(&self, races: &[Race]) -> BTreeMap<DriverId, SeasonStats> {
        let mut stats: BTreeMap<DriverId, SeasonStats> = BTreeMap::new();

        for race_id in &self.races {
            let race = &races[race_id.0];

            for driver in race.drivers() {
                let entry = stats.entry(driver).or_default();
                let results: Vec<_> = race.results_of(driver).map(|(_, r)| r).collect();

                entry.entries += 1;
                entry.wins += results.iter().any(|r| r.position == Some(1)) as u32;
                entry.podiums += results.iter().any(|r| is_podium(r.position)) as u32;
                entry.poles += results.iter().any(|r| r.grid == Some(1)) as u32;
            }

            if let Some(sprint) = &race.sprint {
                let mut sprint_drivers: Vec<DriverId> = sprint.results.keys().map(|k| k.driver).collect();
                sprint_drivers.dedup();

                for driver in sprint_drivers {
                    let entry = stats.entry(driver).or_default();
                    let results = race.sprint_results_of(driver);

                    entry.sprint_entries += 1;
                    entry.sprint_wins += results.iter().any(|r| r.position == Some(1)) as u32;
                    entry.sprint_podiums += results.iter().any(|r| is_podium(r.position)) as u32;
                    entry.sprint_poles += results.iter().any(|r| r.grid == Some(1)) as u32;
                }
            }
        }

        for (driver, entry) in stats.iter_mut() {
            entry.points = self.driver_record.total(driver);
            entry.champion = self.champion == Some(*driver);
        }

        stats
    }

    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    pub fn constructors_champion(&self) -> Option<TeamId> {
        match self.constructor_standings.as_slice() {
            [_, second, ..] if second.position == 1 => None,
            [first, ..] => Some(first.key),
            [] => None,
        }
    }

    /// # get the standings position of a driver
    ///
    /// ## Returns
    /// * `Option<u32>` - the position, `None` if the driver did not take part
    pub fn driver_position(&self, driver: DriverId) -> Option<u32> {
        self.driver_standings
            .iter()
            .find(|row| row.key == driver)
            .map(|row| row.position)
    }
}

fn is_podium(position: Option<u32>) -> bool {
    matches!(position, Some(1..=3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::models::circuit::CircuitId;
    use crate::modules::models::driver::DriverRecord;
    use crate::modules::models::race::{EntrantKey, FastestLapSource, RaceRecord, RaceResult};

    fn drivers(count: usize) -> Vec<Driver> {
        (0..count)
            .map(|i| {
                let record = DriverRecord {
                    driver_id: i as i32,
                    driver_ref: format!("d{}", i),
                    forename: "Driver".to_string(),
                    surname: format!("{}", i),
                    nationality: "British".to_string(),
                };
                Driver::from_record(DriverId(i), &record, None)
            })
            .collect()
    }

    /// a race where `finishers` are classified in the given order, driver i drives for team i
    fn race(index: usize, year: u16, round: u32, finishers: &[usize]) -> Race {
        let record = RaceRecord {
            race_id: index as i32,
            year,
            round,
            circuit_id: 0,
            name: format!("Round {}", round),
            half_points: false,
            fastest_lap_override: None,
        };
        let mut race = Race::new(RaceId(index), &record, CircuitId(0));
        for (i, driver) in finishers.iter().enumerate() {
            let position = i as u32 + 1;
            race.add_result(
                EntrantKey {
                    driver: DriverId(*driver),
                    team: TeamId(*driver),
                },
                RaceResult {
                    grid: Some(position),
                    position: Some(position),
                    position_order: position,
                    time: None,
                    fastest_lap: None,
                    recorded_points: 0.0,
                },
            );
        }
        race.finalize(FastestLapSource::NotAwarded);
        race
    }

    fn rounds(races: &[Race]) -> BTreeMap<u32, RaceId> {
        races.iter().map(|r| (r.round, r.id)).collect()
    }

    #[test]
    fn test_missing_round_is_rejected() {
        let races = vec![race(0, 1995, 1, &[0, 1]), race(1, 1995, 3, &[1, 0])];
        let result = Season::build(1995, &rounds(&races), &races, &drivers(2));

        assert!(matches!(result, Err(Error::MissingRoundError { year: 1995, round: 2 })));
    }

    #[test]
    fn test_champion_and_stats() {
        let races = vec![
            race(0, 1995, 1, &[0, 1, 2]),
            race(1, 1995, 2, &[1, 0, 2]),
            race(2, 1995, 3, &[0, 2, 1]),
        ];
        let season = Season::build(1995, &rounds(&races), &races, &drivers(3)).unwrap();

        assert_eq!(season.champion, Some(DriverId(0)));
        assert_eq!(season.driver_position(DriverId(1)), Some(2));
        assert_eq!(season.constructors_champion(), Some(TeamId(0)));

        let stats = season.driver_stats(&races);
        assert_eq!(stats[&DriverId(0)].wins, 2);
        assert_eq!(stats[&DriverId(0)].points, 26.0);
        assert!(stats[&DriverId(0)].champion);
        assert_eq!(stats[&DriverId(2)].podiums, 3);
        assert_eq!(stats[&DriverId(1)].poles, 1);
    }

    #[test]
    fn test_best_of_decides_champion() {
        // 1953 counts the best 4 results only
        let races = vec![
            race(0, 1953, 1, &[0, 1]),
            race(1, 1953, 2, &[0, 1]),
            race(2, 1953, 3, &[0, 1]),
            race(3, 1953, 4, &[1, 0]),
            race(4, 1953, 5, &[1]),
            race(5, 1953, 6, &[1]),
        ];
        let season = Season::build(1953, &rounds(&races), &races, &drivers(2)).unwrap();

        assert_eq!(season.driver_record.total(&DriverId(1)), 42.0);
        assert_eq!(season.driver_record.total(&DriverId(0)), 30.0);
        // both count 8,8,8,6 = 30 with three wins each, driver 1 has more second places
        assert_eq!(season.champion, Some(DriverId(1)));
        assert!(season.constructor_standings.is_empty());
    }

    #[test]
    fn test_split_best_of_decides_champion() {
        // 1967 counts the best 5 of the first 6 rounds and the best 4 of the last 5.
        // driver 1 is second every time, driver 0 wins 7 rounds spread over both halves
        let winners = [0, 0, 0, 2, 2, 2, 0, 0, 0, 0, 2];
        let races: Vec<Race> = winners
            .iter()
            .enumerate()
            .map(|(i, winner)| race(i, 1967, i as u32 + 1, &[*winner, 1]))
            .collect();
        let season = Season::build(1967, &rounds(&races), &races, &drivers(3)).unwrap();

        assert!(matches!(season.champion_method, ChampionMethod::SplitBestOf { .. }));
        assert_eq!(season.driver_record.total(&DriverId(1)), 66.0);
        assert_eq!(season.driver_record.total(&DriverId(0)), 63.0);

        assert_eq!(season.champion, Some(DriverId(0)));
        assert_eq!(season.driver_standings[0].points, 63.0);
        assert_eq!(season.driver_standings[1].key, DriverId(1));
        assert_eq!(season.driver_standings[1].points, 54.0);
    }

    #[test]
    fn test_dead_heat_title_is_an_error() {
        let mut races = vec![race(0, 1995, 1, &[0])];
        races[0].add_result(
            EntrantKey {
                driver: DriverId(1),
                team: TeamId(1),
            },
            RaceResult {
                grid: Some(2),
                position: Some(1),
                position_order: 1,
                time: None,
                fastest_lap: None,
                recorded_points: 0.0,
            },
        );
        races[0].finalize(FastestLapSource::NotAwarded);

        let result = Season::build(1995, &rounds(&races), &races, &drivers(2));
        match result {
            Err(Error::UnresolvedTieError { year, entrants }) => {
                assert_eq!(year, 1995);
                assert_eq!(entrants.len(), 2);
            }
            other => panic!("expected an unresolved tie, got {:?}", other.map(|s| s.champion)),
        }
    }
}
