use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modules::helpers::lap_time::LapTime;
use crate::modules::helpers::points::ScoringSystem;
use crate::modules::models::circuit::CircuitId;
use crate::modules::models::driver::DriverId;
use crate::modules::models::team::TeamId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RaceId(pub usize);

/// fastest lap data the loader knows better than the timing sheets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FastestLapOverride {
    /// nobody was awarded the fastest lap
    NotAwarded,
    /// the fastest lap went to these archive driver ids
    Drivers(Vec<i32>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub race_id: i32,
    pub year: u16,
    pub round: u32,
    pub circuit_id: i32,
    pub name: String,
    /// shortened races where only half the points were given
    #[serde(default)]
    pub half_points: bool,
    #[serde(default)]
    pub fastest_lap_override: Option<FastestLapOverride>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub race_id: i32,
    pub driver_id: i32,
    pub team_id: i32,
    /// `None` or 0 for a pit lane start
    pub grid: Option<u32>,
    /// classified position, `None` when not classified
    pub position: Option<u32>,
    pub position_order: u32,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub fastest_lap_time: Option<String>,
    #[serde(default)]
    pub points: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SprintResultRecord {
    pub race_id: i32,
    pub driver_id: i32,
    pub team_id: i32,
    pub grid: Option<u32>,
    pub position: Option<u32>,
    pub position_order: u32,
}

/// a driver and the team that entered them
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntrantKey {
    pub driver: DriverId,
    pub team: TeamId,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RaceResult {
    pub grid: Option<u32>,
    pub position: Option<u32>,
    pub position_order: u32,
    pub time: Option<String>,
    pub fastest_lap: Option<LapTime>,
    /// points as recorded in the archive, not recomputed
    pub recorded_points: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SprintResult {
    pub grid: Option<u32>,
    pub position: Option<u32>,
    pub position_order: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Sprint {
    pub results: BTreeMap<EntrantKey, SprintResult>,
    pub finish_order: Vec<Vec<EntrantKey>>,
}

/// where the fastest lap holders of a race come from
#[derive(Clone, Debug, PartialEq)]
pub enum FastestLapSource {
    Timing,
    NotAwarded,
    Drivers(BTreeSet<DriverId>),
}

#[derive(Clone, Debug, Serialize)]
pub struct Race {
    pub id: RaceId,
    pub archive_id: i32,
    pub year: u16,
    pub round: u32,
    pub circuit: CircuitId,
    pub name: String,
    pub half_points: bool,
    pub entrants: BTreeMap<EntrantKey, RaceResult>,
    pub sprint: Option<Sprint>,

    pub grid_order: Vec<EntrantKey>,
    /// entrants grouped by finishing order, a group holds more than one entrant on a tie
    pub finish_order: Vec<Vec<EntrantKey>>,
    pub fastest_lap: Vec<EntrantKey>,
}

impl Race {
    pub fn new(id: RaceId, record: &RaceRecord, circuit: CircuitId) -> Race {
        Race {
            id,
            archive_id: record.race_id,
            year: record.year,
            round: record.round,
            circuit,
            name: record.name.clone(),
            half_points: record.half_points,
            entrants: BTreeMap::new(),
            sprint: None,
            grid_order: Vec::new(),
            finish_order: Vec::new(),
            fastest_lap: Vec::new(),
        }
    }

    pub fn has_entrant(&self, key: &EntrantKey) -> bool {
        self.entrants.contains_key(key)
    }

    pub fn add_result(&mut self, key: EntrantKey, result: RaceResult) {
        self.entrants.insert(key, result);
    }

    pub fn add_sprint_result(&mut self, key: EntrantKey, result: SprintResult) {
        self.sprint.get_or_insert_with(Sprint::default).results.insert(key, result);
    }

    /// # finalize the race
    /// compute the grid order, finish order and fastest lap holders.
    /// called once by the archive after all results are attached
    ///
    /// ## Arguments
    /// * `source` - where the fastest lap holders come from
    pub fn finalize(&mut self, source: FastestLapSource) {
        let mut grid: Vec<(&EntrantKey, &RaceResult)> = self.entrants.iter().collect();
        grid.sort_by_key(|(_, result)| (starting_slot(result.grid), result.position_order));
        self.grid_order = grid.into_iter().map(|(key, _)| *key).collect();

        self.finish_order = group_by_order(self.entrants.iter().map(|(k, r)| (*k, r.position_order)));

        if let Some(sprint) = self.sprint.as_mut() {
            sprint.finish_order = group_by_order(sprint.results.iter().map(|(k, r)| (*k, r.position_order)));
        }

        self.fastest_lap = match source {
            FastestLapSource::Timing => {
                let best = self.entrants.values().filter_map(|r| r.fastest_lap).min();
                match best {
                    Some(best) => self
                        .entrants
                        .iter()
                        .filter(|(_, r)| r.fastest_lap == Some(best))
                        .map(|(k, _)| *k)
                        .collect(),
                    None => Vec::new(),
                }
            }
            FastestLapSource::NotAwarded => Vec::new(),
            FastestLapSource::Drivers(drivers) => self
                .entrants
                .keys()
                .filter(|k| drivers.contains(&k.driver))
                .copied()
                .collect(),
        };
    }

    /// # calculate points
    /// points for every entrant: the race table by position, a share of the fastest lap
    /// bonus and the sprint points
    ///
    /// ## Arguments
    /// * `system` - the scoring rules of the season
    ///
    /// ## Returns
    /// * `BTreeMap<EntrantKey, f64>` - points per entrant
    pub fn calculate_points(&self, system: &ScoringSystem) -> BTreeMap<EntrantKey, f64> {
        let table = if self.half_points {
            system.halved()
        } else {
            system.clone()
        };

        let share = if self.fastest_lap.is_empty() {
            0.0
        } else {
            system.fastest_lap.points / self.fastest_lap.len() as f64
        };

        let mut points = BTreeMap::new();
        for (key, result) in &self.entrants {
            let mut scored = table.race_points(result.position);
            if self.fastest_lap.contains(key) && system.fastest_lap.is_eligible(result.position) {
                scored += share;
            }
            points.insert(*key, scored);
        }

        if let Some(sprint) = &self.sprint {
            for (key, result) in &sprint.results {
                *points.entry(*key).or_insert(0.0) += table.sprint_points(result.position);
            }
        }

        points
    }

    /// every entry of a driver, more than one for shared drives
    pub fn results_of(&self, driver: DriverId) -> impl Iterator<Item = (&EntrantKey, &RaceResult)> {
        self.entrants.iter().filter(move |(key, _)| key.driver == driver)
    }

    pub fn sprint_results_of(&self, driver: DriverId) -> Vec<&SprintResult> {
        match &self.sprint {
            Some(sprint) => sprint
                .results
                .iter()
                .filter(|(key, _)| key.driver == driver)
                .map(|(_, r)| r)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn drivers(&self) -> BTreeSet<DriverId> {
        self.entrants.keys().map(|k| k.driver).collect()
    }

    /// the drivers classified first
    pub fn winners(&self) -> Vec<DriverId> {
        self.entrants
            .iter()
            .filter(|(_, r)| r.position == Some(1))
            .map(|(k, _)| k.driver)
            .collect()
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.year, self.name)
    }
}

/// pit lane and unknown starters go to the back of the grid
fn starting_slot(grid: Option<u32>) -> u32 {
    match grid {
        Some(slot) if slot > 0 => slot,
        _ => u32::MAX,
    }
}

fn group_by_order<I: Iterator<Item = (EntrantKey, u32)>>(entries: I) -> Vec<Vec<EntrantKey>> {
    let mut groups: BTreeMap<u32, Vec<EntrantKey>> = BTreeMap::new();
    for (key, order) in entries {
        groups.entry(order).or_default().push(key);
    }

    groups.into_values().collect()
}
