use std::io::Read;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Record};

/// Default remote location of the dataset CSV.
pub const DATA_URL: &str =
    "https://drive.google.com/uc?id=16A_4BmOEsbhhv9vUBQWemk8s3M4WDB5D";

/// Environment variable overriding [`DATA_URL`], e.g. for a local mirror.
pub const DATA_URL_ENV: &str = "CARBONSCOPE_DATA_URL";

static DATASET: OnceLock<Dataset> = OnceLock::new();

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The dataset could not be made available.  Fatal: the app cannot start
/// without data and never retries.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to parse dataset as CSV: {0}")]
    Parse(#[from] csv::Error),
    #[error("dataset contains no complete rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the dataset, fetching it on the first call and returning the cached
/// copy afterwards.  The cache lives for the process lifetime, so every
/// downstream consumer sees the same `&'static Dataset`.
pub fn load() -> Result<&'static Dataset, LoadError> {
    if let Some(ds) = DATASET.get() {
        return Ok(ds);
    }
    let url = std::env::var(DATA_URL_ENV).unwrap_or_else(|_| DATA_URL.to_string());
    let dataset = fetch(&url)?;
    // Publish exactly once; a racing loader keeps the first value.
    Ok(DATASET.get_or_init(|| dataset))
}

fn fetch(url: &str) -> Result<Dataset, LoadError> {
    log::info!("Fetching dataset from {url}");
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    parse_csv(body.as_bytes())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// One CSV row before cleaning.  Every field is optional so incomplete rows
/// can be detected and dropped instead of failing the whole load.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Year")]
    year: Option<i32>,
    #[serde(rename = "Total Energy Consumption (TWh)")]
    energy_twh: Option<f64>,
    #[serde(rename = "Carbon Emissions (Million Tons)")]
    emissions_mt: Option<f64>,
    #[serde(rename = "Fossil Fuel Dependency (%)")]
    fossil_pct: Option<f64>,
    #[serde(rename = "Renewable Energy Share (%)")]
    renewable_pct: Option<f64>,
}

impl RawRow {
    /// Promote to a [`Record`] iff every field is present.
    fn into_record(self) -> Option<Record> {
        Some(Record {
            country: self.country?,
            year: self.year?,
            energy_twh: self.energy_twh?,
            emissions_mt: self.emissions_mt?,
            fossil_pct: self.fossil_pct?,
            renewable_pct: self.renewable_pct?,
        })
    }
}

/// Parse CSV text into a cleaned [`Dataset`].  Rows with a missing or
/// unparseable field are dropped here and never reintroduced downstream.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    // A payload without a readable header row is not tabular at all.
    rdr.headers()?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in rdr.deserialize::<RawRow>() {
        match row {
            Ok(raw) => match raw.into_record() {
                Some(rec) => records.push(rec),
                None => dropped += 1,
            },
            // A type error (e.g. text in a numeric column) makes the row as
            // incomplete as a missing field.
            Err(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} incomplete rows while loading dataset");
    }
    if records.is_empty() {
        return Err(LoadError::Empty);
    }
    log::info!("Loaded {} records", records.len());
    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Country,Year,Total Energy Consumption (TWh),\
Carbon Emissions (Million Tons),Fossil Fuel Dependency (%),Renewable Energy Share (%)";

    fn parse(body: &str) -> Result<Dataset, LoadError> {
        parse_csv(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn complete_rows_are_kept_in_order() {
        let ds = parse("France,2000,100.5,50.0,30.0,70.0\nBrazil,2001,200.0,90.0,60.0,40.0")
            .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].country, "France");
        assert_eq!(ds.records[0].year, 2000);
        assert_eq!(ds.records[0].energy_twh, 100.5);
        assert_eq!(ds.records[1].country, "Brazil");
        assert_eq!(ds.energy_bounds, (100.5, 200.0));
    }

    #[test]
    fn rows_with_missing_fields_are_dropped() {
        let ds = parse(
            "France,2000,100.0,50.0,30.0,70.0\n\
             Brazil,2001,,90.0,60.0,40.0\n\
             India,,150.0,80.0,55.0,45.0",
        )
        .unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].country, "France");
    }

    #[test]
    fn rows_with_unparseable_fields_are_dropped() {
        let ds = parse(
            "France,2000,100.0,50.0,30.0,70.0\n\
             Brazil,n/a,200.0,90.0,60.0,40.0",
        )
        .unwrap();

        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(matches!(parse(""), Err(LoadError::Empty)));
    }

    #[test]
    fn unrelated_table_is_an_error() {
        // Headers do not match: every row deserializes with no fields set.
        let result = parse_csv("a,b,c\n1,2,3\n4,5,6".as_bytes());
        assert!(matches!(result, Err(LoadError::Empty)));
    }
}
