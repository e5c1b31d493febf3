use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, Error};
use crate::modules::helpers::general::Helpers;
use crate::modules::helpers::lap_time::LapTime;
use crate::modules::models::circuit::{Circuit, CircuitId, CircuitRecord};
use crate::modules::models::driver::{Driver, DriverId, DriverRecord, RaceEntryRef};
use crate::modules::models::race::{
    EntrantKey, FastestLapOverride, FastestLapSource, Race, RaceId, RaceRecord, RaceResult,
    ResultRecord, SprintResult, SprintResultRecord,
};
use crate::modules::models::season::Season;
use crate::modules::models::team::{Team, TeamId, TeamRecord};

/// resolves a nationality like "Finnish" to the country it belongs to
pub trait CountryLookup {
    fn country_of(&self, nationality: &str) -> Option<String>;
}

/// country lookup backed by a demonym table
#[derive(Clone, Debug, Default)]
pub struct DemonymTable {
    countries: BTreeMap<String, String>,
}

impl DemonymTable {
    pub fn new() -> DemonymTable {
        DemonymTable::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> DemonymTable
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut table = DemonymTable::new();
        for (demonym, country) in pairs {
            table.insert(demonym.as_ref(), country.as_ref());
        }

        table
    }

    /// # read a table from json
    /// the json is an object of demonym to country, e.g. `{"Finnish": "Finland"}`
    pub fn from_json(json: &str) -> CustomResult<DemonymTable> {
        let pairs: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| Error::ArchiveReadError {
                path: "demonyms".to_string(),
                message: e.to_string(),
            })?;

        Ok(DemonymTable::from_pairs(pairs))
    }

    pub fn insert(&mut self, demonym: &str, country: &str) {
        self.countries
            .insert(Helpers::normalize_name(demonym), Helpers::normalize_country(country));
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl CountryLookup for DemonymTable {
    fn country_of(&self, nationality: &str) -> Option<String> {
        self.countries.get(&Helpers::normalize_name(nationality)).cloned()
    }
}

/// everything the archive loader hands over, keyed by the archive's own ids
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchiveData {
    pub circuits: Vec<CircuitRecord>,
    pub teams: Vec<TeamRecord>,
    pub drivers: Vec<DriverRecord>,
    pub races: Vec<RaceRecord>,
    pub results: Vec<ResultRecord>,
    #[serde(default)]
    pub sprint_results: Vec<SprintResultRecord>,
}

/// the entity store. built once, read only afterwards
#[derive(Clone, Debug)]
pub struct Archive {
    circuits: Vec<Circuit>,
    teams: Vec<Team>,
    drivers: Vec<Driver>,
    races: Vec<Race>,
    seasons: BTreeMap<u16, Season>,
}

/// archive id to arena id, rejecting duplicates
fn index_ids<T>(
    records: &[T],
    kind: &'static str,
    archive_id: impl Fn(&T) -> i32,
) -> CustomResult<BTreeMap<i32, usize>> {
    let mut ids = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        let id = archive_id(record);
        if ids.insert(id, index).is_some() {
            return Err(Error::DuplicateRecordError { kind, id });
        }
    }

    Ok(ids)
}

fn resolve(ids: &BTreeMap<i32, usize>, kind: &'static str, id: i32, referenced_by: &str) -> CustomResult<usize> {
    ids.get(&id).copied().ok_or_else(|| Error::MissingReferenceError {
        kind,
        id,
        referenced_by: referenced_by.to_string(),
    })
}

impl Archive {
    /// # build the archive
    /// resolve all references, check the integrity of the data and compute every
    /// derived value: race orders, standings, champions and driver stats
    ///
    /// ## Arguments
    /// * `data` - the records from the archive loader
    /// * `countries` - resolves driver nationalities to home countries
    ///
    /// ## Returns
    /// * `Archive` - the complete archive, or the first integrity error found
    pub fn build(data: ArchiveData, countries: &dyn CountryLookup) -> CustomResult<Archive> {
        let circuit_ids = index_ids(&data.circuits, "circuit", |c| c.circuit_id)?;
        let team_ids = index_ids(&data.teams, "team", |t| t.team_id)?;
        let driver_ids = index_ids(&data.drivers, "driver", |d| d.driver_id)?;
        let race_ids = index_ids(&data.races, "race", |r| r.race_id)?;

        let circuits: Vec<Circuit> = data
            .circuits
            .iter()
            .enumerate()
            .map(|(i, record)| Circuit::from_record(CircuitId(i), record))
            .collect();

        let mut teams: Vec<Team> = data
            .teams
            .iter()
            .enumerate()
            .map(|(i, record)| Team::from_record(TeamId(i), record))
            .collect();

        /********** DRIVERS **********/
        let mut names = BTreeSet::new();
        let mut drivers = Vec::with_capacity(data.drivers.len());
        for (i, record) in data.drivers.iter().enumerate() {
            let home_country = countries.country_of(&record.nationality);
            let driver = Driver::from_record(DriverId(i), record, home_country);

            if driver.home_country.is_none() {
                debug!(target:"models/archive:build", "no home country for {} ({})", driver.full_name, driver.nationality);
            }
            if !names.insert(driver.full_name.clone()) {
                return Err(Error::DuplicateDriverNameError {
                    name: driver.full_name,
                });
            }

            drivers.push(driver);
        }

        /********** RACES **********/
        let mut rounds: BTreeMap<u16, BTreeMap<u32, RaceId>> = BTreeMap::new();
        let mut races = Vec::with_capacity(data.races.len());
        for (i, record) in data.races.iter().enumerate() {
            let circuit = resolve(&circuit_ids, "circuit", record.circuit_id, &format!("race {}", record.race_id))?;
            let race = Race::new(RaceId(i), record, CircuitId(circuit));

            if rounds.entry(record.year).or_default().insert(record.round, race.id).is_some() {
                return Err(Error::DuplicateRoundError {
                    year: record.year,
                    round: record.round,
                });
            }

            races.push(race);
        }

        let lap_pattern = LapTime::pattern()?;
        for record in &data.results {
            let referenced_by = format!("result of race {}", record.race_id);
            let race = resolve(&race_ids, "race", record.race_id, &referenced_by)?;
            let key = EntrantKey {
                driver: DriverId(resolve(&driver_ids, "driver", record.driver_id, &referenced_by)?),
                team: TeamId(resolve(&team_ids, "team", record.team_id, &referenced_by)?),
            };

            if races[race].has_entrant(&key) {
                return Err(Error::DuplicateEntrantError {
                    race: races[race].to_string(),
                    driver: drivers[key.driver.0].full_name.clone(),
                    team: teams[key.team.0].name.clone(),
                });
            }

            let fastest_lap = match &record.fastest_lap_time {
                Some(time) => Some(LapTime::parse_with(&lap_pattern, time)?),
                None => None,
            };

            races[race].add_result(
                key,
                RaceResult {
                    grid: record.grid,
                    position: record.position,
                    position_order: record.position_order,
                    time: record.time.clone(),
                    fastest_lap,
                    recorded_points: record.points,
                },
            );

            let year = races[race].year;
            let driver = &mut drivers[key.driver.0];
            driver.teams.insert(key.team);
            driver.seasons.insert(year);
            driver.entries.entry(year).or_default().push(RaceEntryRef {
                race: RaceId(race),
                team: key.team,
            });
            teams[key.team.0].drivers.insert(key.driver);
        }

        for record in &data.sprint_results {
            let referenced_by = format!("sprint result of race {}", record.race_id);
            let race = resolve(&race_ids, "race", record.race_id, &referenced_by)?;
            let key = EntrantKey {
                driver: DriverId(resolve(&driver_ids, "driver", record.driver_id, &referenced_by)?),
                team: TeamId(resolve(&team_ids, "team", record.team_id, &referenced_by)?),
            };

            let duplicate = races[race]
                .sprint
                .as_ref()
                .map(|sprint| sprint.results.contains_key(&key))
                .unwrap_or(false);
            if duplicate {
                return Err(Error::DuplicateEntrantError {
                    race: format!("{} sprint", races[race]),
                    driver: drivers[key.driver.0].full_name.clone(),
                    team: teams[key.team.0].name.clone(),
                });
            }

            races[race].add_sprint_result(
                key,
                SprintResult {
                    grid: record.grid,
                    position: record.position,
                    position_order: record.position_order,
                },
            );
        }

        for (record, race) in data.races.iter().zip(races.iter_mut()) {
            let source = match &record.fastest_lap_override {
                None => FastestLapSource::Timing,
                Some(FastestLapOverride::NotAwarded) => FastestLapSource::NotAwarded,
                Some(FastestLapOverride::Drivers(ids)) => {
                    let referenced_by = format!("fastest lap of race {}", record.race_id);
                    let mut holders = BTreeSet::new();
                    for id in ids {
                        holders.insert(DriverId(resolve(&driver_ids, "driver", *id, &referenced_by)?));
                    }
                    FastestLapSource::Drivers(holders)
                }
            };

            race.finalize(source);
        }

        /********** TEAMMATES **********/
        for race in &races {
            let mut by_team: BTreeMap<TeamId, Vec<DriverId>> = BTreeMap::new();
            for key in race.entrants.keys() {
                by_team.entry(key.team).or_default().push(key.driver);
            }

            for team_drivers in by_team.values() {
                for driver in team_drivers {
                    for other in team_drivers {
                        if driver != other {
                            drivers[driver.0].teammates.insert(*other);
                        }
                    }
                }
            }
        }

        /********** SEASONS **********/
        let mut seasons = BTreeMap::new();
        for (year, season_rounds) in &rounds {
            let season = Season::build(*year, season_rounds, &races, &drivers)?;

            for (driver, stats) in season.driver_stats(&races) {
                drivers[driver.0].season_stats.insert(*year, stats);
            }

            seasons.insert(*year, season);
        }

        for driver in drivers.iter_mut() {
            driver.recompute_career();
        }

        info!(
            target:"models/archive:build",
            "archive built: {} seasons, {} races, {} drivers, {} teams, {} circuits",
            seasons.len(),
            races.len(),
            drivers.len(),
            teams.len(),
            circuits.len()
        );

        Ok(Archive {
            circuits,
            teams,
            drivers,
            races,
            seasons,
        })
    }

    /********** GETTERS **********/
    pub fn driver(&self, id: DriverId) -> &Driver {
        &self.drivers[id.0]
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }

    pub fn race(&self, id: RaceId) -> &Race {
        &self.races[id.0]
    }

    pub fn circuit(&self, id: CircuitId) -> &Circuit {
        &self.circuits[id.0]
    }

    pub fn season(&self, year: u16) -> Option<&Season> {
        self.seasons.get(&year)
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn races(&self) -> &[Race] {
        &self.races
    }

    pub fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    pub fn seasons(&self) -> impl Iterator<Item = &Season> {
        self.seasons.values()
    }

    pub fn driver_ids(&self) -> BTreeSet<DriverId> {
        self.drivers.iter().map(|d| d.id).collect()
    }

    /// every driver that won at least one title
    pub fn champions(&self) -> BTreeSet<DriverId> {
        self.seasons.values().filter_map(|s| s.champion).collect()
    }

    /// # find teams by name
    /// case and accent insensitive. constructors can share a name across eras,
    /// so every match is returned
    pub fn teams_named(&self, name: &str) -> Vec<&Team> {
        let wanted = Helpers::normalize_name(name);
        self.teams
            .iter()
            .filter(|team| Helpers::normalize_name(&team.name) == wanted)
            .collect()
    }

    /// # find a driver by name
    /// match the full name, case and accent insensitive. when no full name matches,
    /// a surname is accepted if only one driver carries it
    ///
    /// ## Arguments
    /// * `input` - the name typed by the player
    ///
    /// ## Returns
    /// * `Option<DriverId>` - the driver, `None` when unknown or ambiguous
    pub fn find_driver(&self, input: &str) -> Option<DriverId> {
        let wanted = Helpers::normalize_name(input);
        if wanted.is_empty() {
            return None;
        }

        if let Some(driver) = self
            .drivers
            .iter()
            .find(|d| Helpers::normalize_name(&d.full_name) == wanted)
        {
            return Some(driver.id);
        }

        let mut by_surname = self
            .drivers
            .iter()
            .filter(|d| Helpers::normalize_name(&d.surname) == wanted);

        match (by_surname.next(), by_surname.next()) {
            (Some(driver), None) => Some(driver.id),
            _ => None,
        }
    }
}
