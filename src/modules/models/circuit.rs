use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modules::helpers::general::Helpers;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CircuitId(pub usize);

/// circuit as handed over by the archive loader
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircuitRecord {
    pub circuit_id: i32,
    pub circuit_ref: String,
    pub name: String,
    pub location: String,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Circuit {
    pub id: CircuitId,
    pub archive_id: i32,
    pub circuit_ref: String,
    pub name: String,
    pub location: String,
    /// lowercase and without accents
    pub country: String,
}

impl Circuit {
    pub fn from_record(id: CircuitId, record: &CircuitRecord) -> Circuit {
        Circuit {
            id,
            archive_id: record.circuit_id,
            circuit_ref: record.circuit_ref.clone(),
            name: record.name.clone(),
            location: record.location.clone(),
            country: Helpers::normalize_country(&record.country),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
