use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modules::models::driver::DriverId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub usize);

/// constructor as handed over by the archive loader
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team_id: i32,
    pub name: String,
    pub nationality: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub archive_id: i32,
    pub name: String,
    pub nationality: String,
    pub url: String,
    /// every driver that was entered by this team at least once
    pub drivers: BTreeSet<DriverId>,
}

impl Team {
    pub fn from_record(id: TeamId, record: &TeamRecord) -> Team {
        Team {
            id,
            archive_id: record.team_id,
            name: record.name.clone(),
            nationality: record.nationality.clone(),
            url: record.url.clone(),
            drivers: BTreeSet::new(),
        }
    }

    /// # check if a driver raced for the team
    ///
    /// ## Arguments
    /// * `driver` - the driver to check
    ///
    /// ## Returns
    /// * `bool` - true if the driver has at least one entry for this team
    pub fn has_driver(&self, driver: DriverId) -> bool {
        self.drivers.contains(&driver)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
