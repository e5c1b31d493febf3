#![allow(dead_code)]

use formula_grid::modules::models::circuit::CircuitRecord;
use formula_grid::modules::models::driver::DriverRecord;
use formula_grid::modules::models::race::{RaceRecord, ResultRecord, SprintResultRecord};
use formula_grid::modules::models::team::TeamRecord;
use formula_grid::{Archive, ArchiveData, DemonymTable};

pub const CIRCUIT_FINLAND: i32 = 1;
pub const CIRCUIT_ITALY: i32 = 2;
pub const CIRCUIT_BRITAIN: i32 = 3;

pub const MCLAREN: i32 = 1;
pub const FERRARI: i32 = 2;
pub const WILLIAMS: i32 = 3;
pub const LOTUS: i32 = 4;

/// builds small archives for tests, ids are the archive ids
pub struct ArchiveBuilder {
    data: ArchiveData,
    next_race: i32,
}

impl ArchiveBuilder {
    pub fn new() -> ArchiveBuilder {
        let mut builder = ArchiveBuilder {
            data: ArchiveData::default(),
            next_race: 1,
        };

        for (id, name, country) in [
            (CIRCUIT_FINLAND, "Keimola", "Finland"),
            (CIRCUIT_ITALY, "Monza", "Italy"),
            (CIRCUIT_BRITAIN, "Silverstone", "UK"),
        ] {
            builder.data.circuits.push(CircuitRecord {
                circuit_id: id,
                circuit_ref: name.to_lowercase(),
                name: name.to_string(),
                location: name.to_string(),
                country: country.to_string(),
            });
        }

        for (id, name, nationality) in [
            (MCLAREN, "McLaren", "British"),
            (FERRARI, "Ferrari", "Italian"),
            (WILLIAMS, "Williams", "British"),
            (LOTUS, "Lotus", "British"),
        ] {
            builder.data.teams.push(TeamRecord {
                team_id: id,
                name: name.to_string(),
                nationality: nationality.to_string(),
                url: String::new(),
            });
        }

        builder
    }

    pub fn driver(mut self, id: i32, forename: &str, surname: &str, nationality: &str) -> ArchiveBuilder {
        self.data.drivers.push(DriverRecord {
            driver_id: id,
            driver_ref: surname.to_lowercase(),
            forename: forename.to_string(),
            surname: surname.to_string(),
            nationality: nationality.to_string(),
        });
        self
    }

    /// a race where `finishers` (driver, team) finish in order and start in the same order.
    /// the winner sets the fastest lap
    pub fn race(self, year: u16, round: u32, circuit: i32, finishers: &[(i32, i32)]) -> ArchiveBuilder {
        let laps: Vec<Option<String>> = (0..finishers.len())
            .map(|i| Some(format!("1:{:02}.000", 20 + i)))
            .collect();
        self.race_with_laps(year, round, circuit, finishers, &laps)
    }

    pub fn race_with_laps(
        mut self,
        year: u16,
        round: u32,
        circuit: i32,
        finishers: &[(i32, i32)],
        laps: &[Option<String>],
    ) -> ArchiveBuilder {
        let race_id = self.next_race;
        self.next_race += 1;

        self.data.races.push(RaceRecord {
            race_id,
            year,
            round,
            circuit_id: circuit,
            name: format!("Grand Prix {}", race_id),
            half_points: false,
            fastest_lap_override: None,
        });

        for (i, (driver, team)) in finishers.iter().enumerate() {
            let position = i as u32 + 1;
            self.data.results.push(ResultRecord {
                race_id,
                driver_id: *driver,
                team_id: *team,
                grid: Some(position),
                position: Some(position),
                position_order: position,
                time: None,
                fastest_lap_time: laps.get(i).cloned().flatten(),
                points: 0.0,
            });
        }

        self
    }

    /// a sprint for the last race added
    pub fn sprint(mut self, finishers: &[(i32, i32)]) -> ArchiveBuilder {
        let race_id = self.next_race - 1;
        for (i, (driver, team)) in finishers.iter().enumerate() {
            let position = i as u32 + 1;
            self.data.sprint_results.push(SprintResultRecord {
                race_id,
                driver_id: *driver,
                team_id: *team,
                grid: Some(position),
                position: Some(position),
                position_order: position,
            });
        }
        self
    }

    pub fn data(self) -> ArchiveData {
        self.data
    }

    pub fn build(self) -> Archive {
        Archive::build(self.data, &countries()).unwrap()
    }
}

pub fn countries() -> DemonymTable {
    DemonymTable::from_pairs(vec![
        ("Finnish", "Finland"),
        ("British", "United Kingdom"),
        ("German", "Germany"),
        ("Italian", "Italy"),
        ("Brazilian", "Brazil"),
    ])
}

pub const HAKKINEN: i32 = 10;
pub const RAIKKONEN: i32 = 11;
pub const BOTTAS: i32 = 12;
pub const SCHUMACHER: i32 = 13;
pub const COULTHARD: i32 = 14;

/// champions and finns. with `with_raikkonen` there are 4 drivers that can fill
/// a champions and finns grid, without it only 3
pub fn finnish_archive(with_raikkonen: bool) -> Archive {
    let mut builder = ArchiveBuilder::new()
        .driver(HAKKINEN, "Mika", "Häkkinen", "Finnish")
        .driver(BOTTAS, "Valtteri", "Bottas", "Finnish")
        .driver(SCHUMACHER, "Michael", "Schumacher", "German")
        .driver(COULTHARD, "David", "Coulthard", "British")
        .race(1998, 1, CIRCUIT_FINLAND, &[(HAKKINEN, MCLAREN), (SCHUMACHER, FERRARI), (BOTTAS, WILLIAMS)])
        .race(2000, 1, CIRCUIT_ITALY, &[(SCHUMACHER, FERRARI), (COULTHARD, MCLAREN), (HAKKINEN, MCLAREN)]);

    if with_raikkonen {
        builder = builder
            .driver(RAIKKONEN, "Kimi", "Räikkönen", "Finnish")
            .race(2007, 1, CIRCUIT_BRITAIN, &[(RAIKKONEN, FERRARI), (BOTTAS, WILLIAMS), (COULTHARD, MCLAREN)]);
    }

    builder.build()
}
