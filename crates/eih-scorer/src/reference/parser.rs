use super::{ReferenceError, ReferenceTable, Shelter, Tract};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct TractRow {
    #[serde(rename = "Tract ID")]
    tract_id: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Poverty Rate (%)")]
    poverty_rate_pct: f64,
    #[serde(rename = "Unhoused Count")]
    unhoused_count: f64,
}

#[derive(Debug, Deserialize)]
struct ShelterRow {
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Capacity")]
    capacity: f64,
    #[serde(rename = "Current Occupancy")]
    current_occupancy: f64,
}

pub(crate) fn parse_tracts<R: Read>(reader: R) -> Result<Vec<Tract>, ReferenceError> {
    parse_rows(reader, ReferenceTable::Tracts, |row: TractRow| {
        let tract_id = row.tract_id.trim();
        if tract_id.is_empty() {
            return Err("Tract ID is blank".to_string());
        }
        check_coordinate(row.latitude, row.longitude)?;
        if !(0.0..=100.0).contains(&row.poverty_rate_pct) {
            return Err(format!(
                "Poverty Rate (%) {} is outside 0-100",
                row.poverty_rate_pct
            ));
        }
        let unhoused_count = whole_count(row.unhoused_count)
            .ok_or_else(|| format!("Unhoused Count {} is not a count", row.unhoused_count))?;

        Ok(Tract {
            id: tract_id.to_string(),
            latitude: row.latitude,
            longitude: row.longitude,
            poverty_rate_pct: row.poverty_rate_pct,
            unhoused_count,
        })
    })
}

pub(crate) fn parse_shelters<R: Read>(reader: R) -> Result<Vec<Shelter>, ReferenceError> {
    parse_rows(reader, ReferenceTable::Shelters, |row: ShelterRow| {
        check_coordinate(row.latitude, row.longitude)?;
        if !(row.capacity.is_finite() && row.capacity > 0.0) {
            return Err(format!("Capacity {} must be positive", row.capacity));
        }
        if !(row.current_occupancy.is_finite() && row.current_occupancy >= 0.0) {
            return Err(format!(
                "Current Occupancy {} must not be negative",
                row.current_occupancy
            ));
        }

        Ok(Shelter {
            latitude: row.latitude,
            longitude: row.longitude,
            capacity: row.capacity,
            current_occupancy: row.current_occupancy,
        })
    })
}

/// Deserialises every data row, then hands it to `validate`. Row numbers in errors are 1-based
/// and exclude the header.
fn parse_rows<R, Row, T, F>(
    reader: R,
    table: ReferenceTable,
    mut validate: F,
) -> Result<Vec<T>, ReferenceError>
where
    R: Read,
    Row: DeserializeOwned,
    F: FnMut(Row) -> Result<T, String>,
{
    let mut csv_reader = csv_reader(reader);
    let mut records = Vec::new();

    for (index, result) in csv_reader.deserialize::<Row>().enumerate() {
        let row_number = index + 1;
        let row = result.map_err(|source| row_error(table, row_number, source))?;
        let record = validate(row).map_err(|message| ReferenceError::MalformedRow {
            table,
            row: row_number,
            message,
        })?;
        records.push(record);
    }

    Ok(records)
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn row_error(table: ReferenceTable, row: usize, source: csv::Error) -> ReferenceError {
    if let csv::ErrorKind::Deserialize { err, .. } = source.kind() {
        return ReferenceError::MalformedRow {
            table,
            row,
            message: err.to_string(),
        };
    }
    ReferenceError::Csv { table, source }
}

fn check_coordinate(latitude: f64, longitude: f64) -> Result<(), String> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(format!("Latitude {latitude} is outside -90..90"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("Longitude {longitude} is outside -180..180"));
    }
    Ok(())
}

fn whole_count(value: f64) -> Option<u32> {
    let in_range = value >= 0.0 && value <= f64::from(u32::MAX);
    (in_range && value.fract() == 0.0).then_some(value as u32)
}
