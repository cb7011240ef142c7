mod parser;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Census tract with the demographic indicators the scorer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tract {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub poverty_rate_pct: f64,
    pub unhoused_count: u32,
}

/// Shelter location with its bed capacity. Occupancy may exceed capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: f64,
    pub current_occupancy: f64,
}

/// Point-in-time homelessness summary, held as raw strings. Nothing scores from it yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitSummary {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PitSummary {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let table = ReferenceTable::PitSummary;
        let mut csv_reader = parser::csv_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|source| ReferenceError::Csv { table, source })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|source| ReferenceError::Csv { table, source })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three tables a scoring call reads. Loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub tracts: Vec<Tract>,
    pub shelters: Vec<Shelter>,
    pub pit_summary: PitSummary,
}

impl ReferenceData {
    pub fn new(tracts: Vec<Tract>, shelters: Vec<Shelter>, pit_summary: PitSummary) -> Self {
        Self {
            tracts,
            shelters,
            pit_summary,
        }
    }

    pub fn from_paths(
        tracts: impl AsRef<Path>,
        shelters: impl AsRef<Path>,
        pit_summary: impl AsRef<Path>,
    ) -> Result<Self, ReferenceError> {
        Ok(Self {
            tracts: load_tracts(open(ReferenceTable::Tracts, tracts)?)?,
            shelters: load_shelters(open(ReferenceTable::Shelters, shelters)?)?,
            pit_summary: PitSummary::from_reader(open(
                ReferenceTable::PitSummary,
                pit_summary,
            )?)?,
        })
    }

    pub fn from_readers<T: Read, S: Read, P: Read>(
        tracts: T,
        shelters: S,
        pit_summary: P,
    ) -> Result<Self, ReferenceError> {
        Ok(Self {
            tracts: load_tracts(tracts)?,
            shelters: load_shelters(shelters)?,
            pit_summary: PitSummary::from_reader(pit_summary)?,
        })
    }
}

/// Reads `Tract ID`, `Latitude`, `Longitude`, `Poverty Rate (%)` and `Unhoused Count`. Other
/// columns are ignored.
pub fn load_tracts<R: Read>(reader: R) -> Result<Vec<Tract>, ReferenceError> {
    parser::parse_tracts(reader)
}

/// Reads `Latitude`, `Longitude`, `Capacity` and `Current Occupancy`. Other columns are ignored.
pub fn load_shelters<R: Read>(reader: R) -> Result<Vec<Shelter>, ReferenceError> {
    parser::parse_shelters(reader)
}

fn open(table: ReferenceTable, path: impl AsRef<Path>) -> Result<std::fs::File, ReferenceError> {
    let path = path.as_ref();
    std::fs::File::open(path).map_err(|source| ReferenceError::Io {
        table,
        path: path.display().to_string(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTable {
    Tracts,
    Shelters,
    PitSummary,
}

impl ReferenceTable {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tracts => "census tract",
            Self::Shelters => "shelter",
            Self::PitSummary => "point-in-time summary",
        }
    }
}

impl fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to read {table} table at {path}: {source}")]
    Io {
        table: ReferenceTable,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {table} CSV data: {source}")]
    Csv {
        table: ReferenceTable,
        #[source]
        source: csv::Error,
    },
    #[error("malformed {table} row {row}: {message}")]
    MalformedRow {
        table: ReferenceTable,
        row: usize,
        message: String,
    },
}
