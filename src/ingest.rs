//! CSV ingestion for address, driver and location lists.

use std::fs::File;
use std::io::Read;

use serde::Deserialize;

use crate::error::IngestError;
use crate::model::Coordinate;
use crate::resolver::StaticResolver;

/// True when the list names CSV files rather than literal values.
///
/// Only the first entry is inspected.
pub fn names_csv_files(values: &[String]) -> bool {
    values.first().is_some_and(|value| value.contains(".csv"))
}

/// Expands a command-line list.
///
/// Literal values are trimmed and blanks dropped. If the list names CSV files,
/// every field of every record of every file is returned in file order.
pub fn expand_list(values: Vec<String>) -> Result<Vec<String>, IngestError> {
    if !names_csv_files(&values) {
        return Ok(values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect());
    }

    let mut expanded = Vec::new();
    for path in &values {
        let file = open(path)?;
        expanded.extend(read_csv_values(file)?);
    }
    Ok(expanded)
}

/// All non-empty fields of a headerless CSV, record by record.
pub fn read_csv_values<R: Read>(reader: R) -> Result<Vec<String>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        values.extend(record.iter().filter(|field| !field.is_empty()).map(str::to_string));
    }
    Ok(values)
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    address: String,
    lat: f64,
    lon: f64,
}

/// Builds a lookup table from a CSV with an `address,lat,lon` header.
pub fn read_location_table<R: Read>(reader: R) -> Result<StaticResolver, IngestError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut resolver = StaticResolver::new();
    for record in reader.deserialize::<LocationRecord>() {
        let record = record?;
        resolver.insert(record.address, Coordinate::new(record.lat, record.lon));
    }
    Ok(resolver)
}

pub fn read_location_file(path: &str) -> Result<StaticResolver, IngestError> {
    read_location_table(open(path)?)
}

fn open(path: &str) -> Result<File, IngestError> {
    File::open(path).map_err(|source| IngestError::Io {
        path: path.to_string(),
        source,
    })
}
